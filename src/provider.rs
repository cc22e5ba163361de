//! Server snapshot capability.
//!
//! One [`CookiesInServer`] value is provided per page instance. It carries:
//!
//! - the [`ServerSnapshot`]: the cookies the server saw for this request, or
//!   nothing at all when the page was not server rendered with cookies (static
//!   generation, or the props wrapper was not applied);
//! - the [`HydratingFlag`]: one shared cell that starts `true` and is flipped to
//!   `false` by the first post-commit effect of the page.
//!
//! Both are reference-counted handles. Cloning the provider value hands out the
//! same snapshot and the same flag, and hooks use their identity as
//! memoization dependencies.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::{user_error, CookieError};
use crate::logger::Logger;

/// Request-time cookies, keyed by cookie name, holding raw serialized text.
///
/// Snapshots compare by identity: two snapshots are equal only when they are
/// handles to the same map.
#[derive(Debug, Clone, Default)]
pub struct ServerSnapshot(Option<Rc<HashMap<String, String>>>);

impl ServerSnapshot {
    /// A snapshot for a page that received no cookies from the server.
    pub fn missing() -> Self {
        Self(None)
    }

    pub fn new(cookies: HashMap<String, String>) -> Self {
        Self(Some(Rc::new(cookies)))
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// Raw text for `key`. `None` both when the snapshot is missing and when
    /// the key was not sent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.as_ref()?.get(key).map(String::as_str)
    }

    pub fn cookies(&self) -> Option<&HashMap<String, String>> {
        self.0.as_deref()
    }
}

impl From<Option<HashMap<String, String>>> for ServerSnapshot {
    fn from(cookies: Option<HashMap<String, String>>) -> Self {
        Self(cookies.map(Rc::new))
    }
}

impl From<HashMap<String, String>> for ServerSnapshot {
    fn from(cookies: HashMap<String, String>) -> Self {
        Self::new(cookies)
    }
}

impl PartialEq for ServerSnapshot {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// The page-wide "still hydrating" cell.
///
/// Clones share the cell. Flags compare by identity.
#[derive(Debug, Clone)]
pub struct HydratingFlag(Rc<Cell<bool>>);

impl HydratingFlag {
    /// A fresh flag for a page instance that is about to hydrate.
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    /// A flag for a page instance that will never hydrate (client-side navigation).
    pub fn hydrated() -> Self {
        Self(Rc::new(Cell::new(false)))
    }

    pub fn is_hydrating(&self) -> bool {
        self.0.get()
    }

    /// Ends hydration. The transition is one way.
    pub(crate) fn finish(&self) {
        self.0.set(false);
    }
}

impl Default for HydratingFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for HydratingFlag {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Provider value shared by every cookie hook of one render tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookiesInServer {
    snapshot: ServerSnapshot,
    hydrating: HydratingFlag,
}

impl CookiesInServer {
    pub fn new(snapshot: impl Into<ServerSnapshot>, hydrating: HydratingFlag) -> Self {
        Self {
            snapshot: snapshot.into(),
            hydrating,
        }
    }

    pub fn snapshot(&self) -> &ServerSnapshot {
        &self.snapshot
    }

    pub fn hydrating(&self) -> &HydratingFlag {
        &self.hydrating
    }

    /// True when the value rendered now may not be the real client value and
    /// has to be corrected after hydration. Recomputed on every call.
    pub fn needs_sync(&self) -> bool {
        self.snapshot.is_missing() && self.hydrating.is_hydrating()
    }
}

/// Resolves the provider for a hook, failing loudly when it is absent.
pub fn use_cookies_in_server<'a>(
    provider: Option<&'a CookiesInServer>,
    logger: &dyn Logger,
) -> Result<&'a CookiesInServer, CookieError> {
    provider.ok_or_else(|| user_error(logger, CookieError::ProviderMissing))
}
