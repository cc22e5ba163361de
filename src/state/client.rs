use std::cell::RefCell;
use std::rc::Rc;

use super::{retrieve_state, Initializer};
use crate::cookie::{Clear, Retrieve, Store, UseCookie};
use crate::errors::CookieError;
use crate::provider::CookiesInServer;
use crate::render::Memo;
use crate::state::{
    ClearState, CookieStateHandle, CookieStateOptions, RetrieveState, SetValue, StoreOnSet, StoreState,
    UseCookieState,
};
use crate::sync::SyncWithCookie;
use crate::updater::updated_value_from_updater;

/// Browser cookie-backed state holding `T`, stored as `S`.
pub struct ClientCookieState<T, S = T> {
    cookie: Box<dyn UseCookie<S>>,
    sync: SyncWithCookie<S>,
    initializer: Initializer<T>,
    options: CookieStateOptions<T, S>,
    value: Option<Rc<RefCell<T>>>,
    set_value: Memo<Store<S>, SetValue<T>>,
    retrieve: Memo<Retrieve<S>, RetrieveState>,
    store: Memo<Store<S>, StoreState>,
    clear: Memo<Clear, ClearState>,
}

impl<T: Clone + 'static, S: 'static> ClientCookieState<T, S> {
    /// `cookie` and `sync` must be bound to the same key.
    pub fn new(
        cookie: Box<dyn UseCookie<S>>,
        sync: SyncWithCookie<S>,
        initializer: impl Fn(Option<T>) -> T + 'static,
        options: CookieStateOptions<T, S>,
    ) -> Self {
        Self {
            cookie,
            sync,
            initializer: Rc::new(initializer),
            options,
            value: None,
            set_value: Memo::new(),
            retrieve: Memo::new(),
            store: Memo::new(),
            clear: Memo::new(),
        }
    }
}

impl<T: Clone + 'static, S: 'static> UseCookieState<T> for ClientCookieState<T, S> {
    fn key(&self) -> &str {
        self.cookie.key()
    }

    fn render(&mut self, provider: Option<&CookiesInServer>) -> Result<CookieStateHandle<T>, CookieError> {
        let cookie = self.cookie.render(provider)?;

        let value = match &self.value {
            Some(value) => value.clone(),
            None => {
                // A snapshot-derived guess would be corrected anyway; start from unknown.
                let stored = if cookie.needs_sync {
                    None
                } else {
                    retrieve_state(&cookie.retrieve, &*self.options.deserializer)?
                };
                let value = Rc::new(RefCell::new((self.initializer)(stored)));
                self.value = Some(value.clone());
                value
            }
        };

        {
            let value = value.clone();
            let initializer = self.initializer.clone();
            let deserializer = self.options.deserializer.clone();
            self.sync.render(provider, move |resynced| {
                *value.borrow_mut() = initializer(resynced.map(|stored| deserializer(stored)));
            })?;
        }

        let set_value = self.set_value.get_or_update(cookie.store.clone(), || {
            let value = value.clone();
            let store = cookie.store.clone();
            let serializer = self.options.serializer.clone();
            let store_on_set = self.options.store_on_set.clone();

            SetValue::new(move |updater| {
                let current = value.borrow().clone();
                let next = updated_value_from_updater(&current, updater);
                if let StoreOnSet::Enabled { attributes } = &store_on_set {
                    store.call(&serializer(&next), attributes.as_ref())?;
                }
                *value.borrow_mut() = next;
                Ok(())
            })
        });

        let retrieve = self.retrieve.get_or_update(cookie.retrieve.clone(), || {
            let value = value.clone();
            let retrieve = cookie.retrieve.clone();
            let initializer = self.initializer.clone();
            let deserializer = self.options.deserializer.clone();

            RetrieveState::new(move || {
                let next = match retrieve_state(&retrieve, &*deserializer)? {
                    Some(stored) => stored,
                    None => initializer(None),
                };
                *value.borrow_mut() = next;
                Ok(())
            })
        });

        let store = self.store.get_or_update(cookie.store.clone(), || {
            let value = value.clone();
            let store = cookie.store.clone();
            let serializer = self.options.serializer.clone();

            StoreState::new(move |attributes| {
                let current = value.borrow().clone();
                let stored = serializer(&current);
                store.call(&stored, attributes)
            })
        });

        let clear = self.clear.get_or_update(cookie.clear.clone(), || {
            let value = value.clone();
            let clear = cookie.clear.clone();
            let initializer = self.initializer.clone();

            ClearState::new(move || {
                clear.call(None)?;
                *value.borrow_mut() = initializer(None);
                Ok(())
            })
        });

        let current = value.borrow().clone();
        Ok(CookieStateHandle {
            value: current,
            set_value,
            retrieve,
            store,
            clear,
            is_syncing: cookie.needs_sync,
        })
    }
}
