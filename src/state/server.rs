use std::cell::RefCell;
use std::rc::Rc;

use super::{retrieve_state, Initializer};
use crate::cookie::{Retrieve, UseCookie};
use crate::errors::CookieError;
use crate::provider::CookiesInServer;
use crate::render::Memo;
use crate::state::{
    ClearState, CookieStateHandle, CookieStateOptions, RetrieveState, SetValue, StoreState, UseCookieState,
};
use crate::updater::updated_value_from_updater;

/// Server-rendering cookie-backed state. Never writes the cookie and never resyncs.
pub struct ServerCookieState<T, S = T> {
    cookie: Box<dyn UseCookie<S>>,
    initializer: Initializer<T>,
    deserializer: Rc<dyn Fn(S) -> T>,
    value: Option<Rc<RefCell<T>>>,
    set_value: Memo<(), SetValue<T>>,
    retrieve: Memo<Retrieve<S>, RetrieveState>,
    clear: Memo<(), ClearState>,
    store: StoreState,
}

impl<T: Clone + 'static, S: 'static> ServerCookieState<T, S> {
    /// Only the deserializer of `options` matters here; nothing is ever stored.
    pub fn new(
        cookie: Box<dyn UseCookie<S>>,
        initializer: impl Fn(Option<T>) -> T + 'static,
        options: CookieStateOptions<T, S>,
    ) -> Self {
        Self {
            cookie,
            initializer: Rc::new(initializer),
            deserializer: options.deserializer,
            value: None,
            set_value: Memo::new(),
            retrieve: Memo::new(),
            clear: Memo::new(),
            // No op
            store: StoreState::new(|_| Ok(())),
        }
    }
}

impl<T: Clone + 'static, S: 'static> UseCookieState<T> for ServerCookieState<T, S> {
    fn key(&self) -> &str {
        self.cookie.key()
    }

    fn render(&mut self, provider: Option<&CookiesInServer>) -> Result<CookieStateHandle<T>, CookieError> {
        let cookie = self.cookie.render(provider)?;

        let value = match &self.value {
            Some(value) => value.clone(),
            None => {
                let stored = retrieve_state(&cookie.retrieve, &*self.deserializer)?;
                let value = Rc::new(RefCell::new((self.initializer)(stored)));
                self.value = Some(value.clone());
                value
            }
        };

        let set_value = self.set_value.get_or_update((), || {
            let value = value.clone();
            SetValue::new(move |updater| {
                let current = value.borrow().clone();
                let next = updated_value_from_updater(&current, updater);
                *value.borrow_mut() = next;
                Ok(())
            })
        });

        let retrieve = self.retrieve.get_or_update(cookie.retrieve.clone(), || {
            let value = value.clone();
            let retrieve = cookie.retrieve.clone();
            let initializer = self.initializer.clone();
            let deserializer = self.deserializer.clone();

            RetrieveState::new(move || {
                let next = match retrieve_state(&retrieve, &*deserializer)? {
                    Some(stored) => stored,
                    None => initializer(None),
                };
                *value.borrow_mut() = next;
                Ok(())
            })
        });

        let clear = self.clear.get_or_update((), || {
            let value = value.clone();
            let initializer = self.initializer.clone();
            ClearState::new(move || {
                *value.borrow_mut() = initializer(None);
                Ok(())
            })
        });

        let current = value.borrow().clone();
        Ok(CookieStateHandle {
            value: current,
            set_value,
            retrieve,
            store: self.store.clone(),
            clear,
            is_syncing: cookie.needs_sync,
        })
    }
}
