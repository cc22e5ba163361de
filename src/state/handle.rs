use crate::errors::CookieError;
use crate::render::callback;
use crate::store::CookieAttributes;
use crate::updater::Updater;

callback! {
    /// State setter. Persists the new value first when store-on-set is enabled.
    pub struct SetValue<T>: Fn(updater: Updater<T>) -> Result<(), CookieError>;
}

impl<T: 'static> SetValue<T> {
    pub fn set(&self, value: T) -> Result<(), CookieError> {
        self.call(Updater::Value(value))
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) -> Result<(), CookieError> {
        self.call(Updater::function(f))
    }
}

callback! {
    /// Re-reads the cookie into the state.
    pub struct RetrieveState<>: Fn() -> Result<(), CookieError>;
}

callback! {
    /// Writes the current state to the cookie.
    pub struct StoreState<>: Fn(attributes: Option<&CookieAttributes>) -> Result<(), CookieError>;
}

callback! {
    /// Removes the cookie and resets the state through the initializer.
    pub struct ClearState<>: Fn() -> Result<(), CookieError>;
}

#[derive(Debug, Clone)]
pub struct CookieStateHandle<T> {
    /// State as of this render.
    ///
    /// Setters, `retrieve`, `clear` and the post-hydration resync update the
    /// hook's state without notifying anyone. The host must render the hook
    /// again after `CommitQueue::commit` and after calling any of them to see
    /// the new value.
    pub value: T,
    pub set_value: SetValue<T>,
    pub retrieve: RetrieveState,
    pub store: StoreState,
    pub clear: ClearState,
    /// A post-hydration resync will replace `value`.
    pub is_syncing: bool,
}
