use std::rc::Rc;

use crate::store::CookieAttributes;

/// Whether `set_value` also writes the cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOnSet {
    Disabled,
    Enabled {
        /// Attributes passed to the client store on every write.
        attributes: Option<CookieAttributes>,
    },
}

impl StoreOnSet {
    pub fn is_enabled(&self) -> bool {
        matches!(self, StoreOnSet::Enabled { .. })
    }
}

impl Default for StoreOnSet {
    fn default() -> Self {
        StoreOnSet::Enabled { attributes: None }
    }
}

impl From<bool> for StoreOnSet {
    fn from(enabled: bool) -> Self {
        if enabled {
            StoreOnSet::default()
        } else {
            StoreOnSet::Disabled
        }
    }
}

impl From<CookieAttributes> for StoreOnSet {
    fn from(attributes: CookieAttributes) -> Self {
        StoreOnSet::Enabled {
            attributes: Some(attributes),
        }
    }
}

/// Options of a cookie-backed state holding `T` and storing `S`.
///
/// When `S` is `T` both transforms default to identity ([`CookieStateOptions::new`]).
/// A distinct stored type needs both transforms ([`CookieStateOptions::with_transform`]).
pub struct CookieStateOptions<T, S = T> {
    pub store_on_set: StoreOnSet,
    /// Applied right before storing.
    pub(crate) serializer: Rc<dyn Fn(&T) -> S>,
    /// Applied right after retrieving.
    pub(crate) deserializer: Rc<dyn Fn(S) -> T>,
}

impl<T: Clone + 'static> CookieStateOptions<T, T> {
    pub fn new() -> Self {
        Self {
            store_on_set: StoreOnSet::default(),
            serializer: Rc::new(T::clone),
            deserializer: Rc::new(std::convert::identity),
        }
    }
}

impl<T: Clone + 'static> Default for CookieStateOptions<T, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> CookieStateOptions<T, S> {
    pub fn with_transform(serializer: impl Fn(&T) -> S + 'static, deserializer: impl Fn(S) -> T + 'static) -> Self {
        Self {
            store_on_set: StoreOnSet::default(),
            serializer: Rc::new(serializer),
            deserializer: Rc::new(deserializer),
        }
    }

    pub fn store_on_set(mut self, store_on_set: impl Into<StoreOnSet>) -> Self {
        self.store_on_set = store_on_set.into();
        self
    }

    pub fn serializer(mut self, serializer: impl Fn(&T) -> S + 'static) -> Self {
        self.serializer = Rc::new(serializer);
        self
    }

    pub fn deserializer(mut self, deserializer: impl Fn(S) -> T + 'static) -> Self {
        self.deserializer = Rc::new(deserializer);
        self
    }
}

impl<T, S> Clone for CookieStateOptions<T, S> {
    fn clone(&self) -> Self {
        Self {
            store_on_set: self.store_on_set.clone(),
            serializer: self.serializer.clone(),
            deserializer: self.deserializer.clone(),
        }
    }
}

impl<T, S> std::fmt::Debug for CookieStateOptions<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieStateOptions")
            .field("store_on_set", &self.store_on_set)
            .finish_non_exhaustive()
    }
}
