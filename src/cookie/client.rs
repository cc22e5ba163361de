use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{decode_value, encode_value, Codec};
use crate::cookie::{Clear, CookieHandle, Retrieve, Store, UseCookie};
use crate::errors::CookieError;
use crate::logger::Logger;
use crate::provider::{use_cookies_in_server, CookiesInServer, HydratingFlag, ServerSnapshot};
use crate::render::{Memo, Scheduler};
use crate::store::ClientStore;

fn hydration_warning(key: &str) -> String {
    format!(
        "Cookie \"{key}\" is being retrieved during hydration, but this page did not receive \
         cookies from the server (it was statically generated, or its server-side props were \
         not wrapped with with_cookies_server_props). To keep the first client render identical \
         to the server markup, retrieve returns the server value during hydration, which here is \
         nothing, so this value will probably not be initialized correctly."
    )
}

/// Browser cookie accessor.
pub struct ClientCookie<T> {
    key: String,
    codec: Rc<dyn Codec>,
    logger: Rc<dyn Logger>,
    client_store: Rc<dyn ClientStore>,
    scheduler: Rc<dyn Scheduler>,
    /// Set once the hydration-ending effect has been scheduled.
    mounted: bool,
    retrieve: Memo<(ServerSnapshot, HydratingFlag), Retrieve<T>>,
    store: Store<T>,
    clear: Clear,
}

impl<T: Serialize + DeserializeOwned + 'static> ClientCookie<T> {
    pub fn new(
        key: impl Into<String>,
        codec: Rc<dyn Codec>,
        logger: Rc<dyn Logger>,
        client_store: Rc<dyn ClientStore>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        let key = key.into();

        let store = {
            let key = key.clone();
            let codec = codec.clone();
            let client_store = client_store.clone();
            Store::new(move |value: &T, attributes| {
                let text = encode_value(&*codec, value)?;
                client_store.set(&key, &text, attributes)?;
                Ok(())
            })
        };

        let clear = {
            let key = key.clone();
            let client_store = client_store.clone();
            Clear::new(move |attributes| {
                client_store.remove(&key, attributes)?;
                Ok(())
            })
        };

        Self {
            key,
            codec,
            logger,
            client_store,
            scheduler,
            mounted: false,
            retrieve: Memo::new(),
            store,
            clear,
        }
    }
}

impl<T: Serialize + DeserializeOwned + 'static> UseCookie<T> for ClientCookie<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn render(&mut self, provider: Option<&CookiesInServer>) -> Result<CookieHandle<T>, CookieError> {
        let cookies = use_cookies_in_server(provider, &*self.logger)?;

        if !self.mounted {
            self.mounted = true;
            let hydrating = cookies.hydrating().clone();
            self.scheduler.after_commit(Box::new(move || {
                hydrating.finish();
                Ok(())
            }));
        }

        let snapshot = cookies.snapshot().clone();
        let hydrating = cookies.hydrating().clone();
        let retrieve = self.retrieve.get_or_update((snapshot.clone(), hydrating.clone()), || {
            let key = self.key.clone();
            let codec = self.codec.clone();
            let logger = self.logger.clone();
            let client_store = self.client_store.clone();

            Retrieve::new(move || {
                // Evaluated per call: the flag may have flipped since render.
                let is_hydrating = hydrating.is_hydrating();
                if snapshot.is_missing() && is_hydrating {
                    logger.warn(&hydration_warning(&key));
                }

                let serialized = if is_hydrating {
                    snapshot.get(&key).map(str::to_owned)
                } else {
                    client_store.get(&key)?
                };

                match serialized {
                    Some(raw) => decode_value(&*codec, &raw),
                    None => Ok(None),
                }
            })
        });

        Ok(CookieHandle {
            retrieve,
            store: self.store.clone(),
            clear: self.clear.clone(),
            needs_sync: cookies.needs_sync(),
        })
    }
}
