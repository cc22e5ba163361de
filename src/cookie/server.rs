use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::codec::{decode_value, Codec};
use crate::cookie::{Clear, CookieHandle, Retrieve, Store, UseCookie};
use crate::errors::CookieError;
use crate::logger::Logger;
use crate::provider::{use_cookies_in_server, CookiesInServer, HydratingFlag, ServerSnapshot};
use crate::render::Memo;

/// Server-rendering cookie accessor. Reads the request snapshot, writes nothing.
pub struct ServerCookie<T> {
    key: String,
    codec: Rc<dyn Codec>,
    logger: Rc<dyn Logger>,
    retrieve: Memo<(ServerSnapshot, HydratingFlag), Retrieve<T>>,
    store: Store<T>,
    clear: Clear,
}

impl<T: DeserializeOwned + 'static> ServerCookie<T> {
    pub fn new(key: impl Into<String>, codec: Rc<dyn Codec>, logger: Rc<dyn Logger>) -> Self {
        Self {
            key: key.into(),
            codec,
            logger,
            retrieve: Memo::new(),
            // No op
            store: Store::new(|_, _| Ok(())),
            // No op
            clear: Clear::new(|_| Ok(())),
        }
    }
}

impl<T: DeserializeOwned + 'static> UseCookie<T> for ServerCookie<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn render(&mut self, provider: Option<&CookiesInServer>) -> Result<CookieHandle<T>, CookieError> {
        let cookies = use_cookies_in_server(provider, &*self.logger)?;
        let snapshot = cookies.snapshot().clone();

        let retrieve = self.retrieve.get_or_update(
            (snapshot.clone(), cookies.hydrating().clone()),
            || {
                let key = self.key.clone();
                let codec = self.codec.clone();
                Retrieve::new(move || match snapshot.get(&key) {
                    Some(raw) => decode_value(&*codec, raw),
                    None => Ok(None),
                })
            },
        );

        Ok(CookieHandle {
            retrieve,
            store: self.store.clone(),
            clear: self.clear.clone(),
            needs_sync: cookies.needs_sync(),
        })
    }
}
