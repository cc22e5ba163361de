//! Composition root.
//!
//! [`IsomorphicCookies`] is built once per process from a [`CookiesConfig`] and a
//! [`CookieServices`] bundle. It picks the server or the client variant of every
//! hook from the configured [`Environment`] and wires the capabilities into it;
//! nothing below this module checks the environment again.
//!
//! ```rust
//! use std::rc::Rc;
//! use isomorphic_cookies::config::{CookiesConfig, Environment};
//! use isomorphic_cookies::cookies::{CookieServices, IsomorphicCookies};
//! use isomorphic_cookies::provider::{CookiesInServer, HydratingFlag, ServerSnapshot};
//! use isomorphic_cookies::render::CommitQueue;
//! use isomorphic_cookies::state::{CookieStateOptions, UseCookieState};
//!
//! let queue = Rc::new(CommitQueue::new());
//! let config = CookiesConfig::builder().environment(Environment::Client).build();
//! let cookies = IsomorphicCookies::new(&config, CookieServices::for_config(&config).with_scheduler(queue.clone()));
//!
//! let mut theme = cookies.use_cookie_state("theme", |v: Option<String>| v.unwrap_or_else(|| "light".into()), CookieStateOptions::new());
//! let provider = CookiesInServer::new(ServerSnapshot::missing(), HydratingFlag::new());
//!
//! let handle = theme.render(Some(&provider)).unwrap();
//! assert_eq!(handle.value, "light");
//! assert!(handle.is_syncing);
//! queue.commit().unwrap();
//! ```

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{Codec, JsonCodec};
use crate::config::{CookiesConfig, Environment};
use crate::cookie::{ClientCookie, ServerCookie, UseCookie};
use crate::logger::{logger_for, Logger};
use crate::render::{CommitQueue, Scheduler};
use crate::state::{ClientCookieState, CookieStateOptions, ServerCookieState, UseCookieState};
use crate::store::{ClientStore, InMemoryClientStore};
use crate::sync::SyncWithCookie;

/// Capabilities handed to every hook.
#[derive(Clone)]
pub struct CookieServices {
    pub client_store: Rc<dyn ClientStore>,
    /// Post-commit scheduler. Hosts keep their own handle to flush it.
    pub scheduler: Rc<dyn Scheduler>,
    pub logger: Rc<dyn Logger>,
    pub codec: Rc<dyn Codec>,
}

impl CookieServices {
    /// In-memory store, a fresh commit queue, JSON and the logger selected by the log mode.
    pub fn for_config(config: &CookiesConfig) -> Self {
        Self {
            client_store: Rc::new(InMemoryClientStore::new()),
            scheduler: Rc::new(CommitQueue::new()),
            logger: logger_for(config.log_mode),
            codec: Rc::new(JsonCodec),
        }
    }

    pub fn with_client_store(mut self, client_store: Rc<dyn ClientStore>) -> Self {
        self.client_store = client_store;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_logger(mut self, logger: Rc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_codec(mut self, codec: Rc<dyn Codec>) -> Self {
        self.codec = codec;
        self
    }
}

impl Default for CookieServices {
    fn default() -> Self {
        Self::for_config(&CookiesConfig::default())
    }
}

impl std::fmt::Debug for CookieServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieServices").finish_non_exhaustive()
    }
}

/// Hands out hooks of the variant matching the configured environment.
#[derive(Debug, Clone)]
pub struct IsomorphicCookies {
    environment: Environment,
    services: CookieServices,
}

impl IsomorphicCookies {
    pub fn new(config: &CookiesConfig, services: CookieServices) -> Self {
        log::debug!(target: "isomorphic_cookies", "cookie hooks for {:?}", config.environment);
        Self {
            environment: config.environment,
            services,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn services(&self) -> &CookieServices {
        &self.services
    }

    /// Mounts a cookie accessor for `key`.
    pub fn use_cookie<T>(&self, key: &str) -> Box<dyn UseCookie<T>>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let services = &self.services;
        match self.environment {
            Environment::Server => Box::new(ServerCookie::new(key, services.codec.clone(), services.logger.clone())),
            Environment::Client => Box::new(ClientCookie::new(
                key,
                services.codec.clone(),
                services.logger.clone(),
                services.client_store.clone(),
                services.scheduler.clone(),
            )),
        }
    }

    /// Mounts a resync trigger for `key`.
    pub fn use_sync_with_cookie<T>(&self, key: &str) -> SyncWithCookie<T>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        SyncWithCookie::new(self.use_cookie(key), self.services.scheduler.clone())
    }

    /// Mounts a cookie-backed state for `key`.
    ///
    /// `initializer` turns the stored value (or its absence) into the state; it
    /// runs once on mount and again on resync and on `clear`.
    pub fn use_cookie_state<T, S>(
        &self,
        key: &str,
        initializer: impl Fn(Option<T>) -> T + 'static,
        options: CookieStateOptions<T, S>,
    ) -> Box<dyn UseCookieState<T>>
    where
        T: Clone + 'static,
        S: Serialize + DeserializeOwned + 'static,
    {
        match self.environment {
            Environment::Server => Box::new(ServerCookieState::new(self.use_cookie(key), initializer, options)),
            Environment::Client => Box::new(ClientCookieState::new(
                self.use_cookie(key),
                self.use_sync_with_cookie(key),
                initializer,
                options,
            )),
        }
    }
}
