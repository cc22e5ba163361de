//! Client store capability.
//!
//! A **client store** is the live, mutable cookie store of the browser (or of
//! whatever hosts the client side). The hooks only ever read it lazily; no
//! value is cached between calls, so every read after hydration observes the
//! current store content.
//!
//! This module exports the [`ClientStore`] trait, the [`CookieAttributes`] passed
//! through on writes, and the reference implementations:
//! - [`InMemoryClientStore`]: process memory, with a journal of mutations.
//! - [`JsonClientStore`]: a single JSON file on disk (desktop/webview hosts).
//! - `SqliteClientStore`: a SQLite database (feature `sqlite_client_store`).

mod attributes;
mod in_memory;
mod json;
#[cfg(feature = "sqlite_client_store")]
mod sqlite;

pub use attributes::{CookieAttributes, Expires, SameSite};
pub use in_memory::{InMemoryClientStore, StoreCall};
pub use json::JsonClientStore;
#[cfg(feature = "sqlite_client_store")]
pub use sqlite::SqliteClientStore;

/// Live cookie store used by the client-side hooks.
///
/// Values are the raw serialized text; encoding is done by the caller.
pub trait ClientStore {
    /// Returns the current text for `key`, if any.
    ///
    /// A backend that cannot be read reports an error; `Ok(None)` always means
    /// the cookie is absent.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Sets `key` to `value`. Attributes are forwarded untouched.
    fn set(&self, key: &str, value: &str, attributes: Option<&CookieAttributes>) -> anyhow::Result<()>;

    /// Removes `key`. Attributes must match the ones used when setting for
    /// browser stores to find the cookie.
    fn remove(&self, key: &str, attributes: Option<&CookieAttributes>) -> anyhow::Result<()>;
}
