//! Cookie accessor: per-key access to one cookie from inside a component.
//!
//! [`UseCookie`] has two implementations, picked once by the composition root:
//!
//! - [`ServerCookie`] reads the request snapshot and never writes anything;
//!   `store` and `clear` are no-ops.
//! - [`ClientCookie`] returns the snapshot value while the page is hydrating
//!   (so the first client paint matches the server markup) and the live store
//!   value afterwards. Writes always go to the live store.
//!
//! Rendering a cookie accessor yields a [`CookieHandle`] whose callables keep
//! their identity across renders as long as the snapshot and flag handles of
//! the provider are unchanged.

mod client;
mod handle;
mod server;

pub use client::ClientCookie;
pub use handle::{Clear, CookieHandle, Retrieve, Store};
pub use server::ServerCookie;

use crate::errors::CookieError;
use crate::provider::CookiesInServer;

/// A mounted cookie accessor for one key.
pub trait UseCookie<T> {
    fn key(&self) -> &str;

    /// Renders the accessor against the current provider value.
    ///
    /// Fails with [`CookieError::ProviderMissing`] when `provider` is `None`.
    fn render(&mut self, provider: Option<&CookiesInServer>) -> Result<CookieHandle<T>, CookieError>;
}
