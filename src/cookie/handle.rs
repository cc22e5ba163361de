use crate::errors::CookieError;
use crate::render::callback;
use crate::store::CookieAttributes;

callback! {
    /// Reads the cookie. `Ok(None)` means absent.
    pub struct Retrieve<T>: Fn() -> Result<Option<T>, CookieError>;
}

callback! {
    /// Encodes and writes a value.
    pub struct Store<T>: Fn(value: &T, attributes: Option<&CookieAttributes>) -> Result<(), CookieError>;
}

callback! {
    /// Removes the cookie.
    pub struct Clear<>: Fn(attributes: Option<&CookieAttributes>) -> Result<(), CookieError>;
}

/// What a cookie accessor hands out on each render.
pub struct CookieHandle<T> {
    pub retrieve: Retrieve<T>,
    pub store: Store<T>,
    pub clear: Clear,
    /// The value shown now may be wrong and will be corrected after hydration.
    pub needs_sync: bool,
}

impl<T> Clone for CookieHandle<T> {
    fn clone(&self) -> Self {
        Self {
            retrieve: self.retrieve.clone(),
            store: self.store.clone(),
            clear: self.clear.clone(),
            needs_sync: self.needs_sync,
        }
    }
}

impl<T> std::fmt::Debug for CookieHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieHandle")
            .field("needs_sync", &self.needs_sync)
            .finish_non_exhaustive()
    }
}
