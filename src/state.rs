//! Cookie-backed state.
//!
//! A state hook holds a value seeded from a cookie by a caller-supplied
//! initializer. On the client every `set_value` also writes the cookie (unless
//! store-on-set is disabled) and a value rendered from a missing snapshot is
//! re-initialized right after hydration. On the server the same shape is
//! offered but nothing is ever written.

use std::rc::Rc;

use crate::cookie::Retrieve;
use crate::errors::CookieError;
use crate::provider::CookiesInServer;

mod client;
mod handle;
mod options;
mod server;

pub use client::ClientCookieState;
pub use handle::{ClearState, CookieStateHandle, RetrieveState, SetValue, StoreState};
pub use options::{CookieStateOptions, StoreOnSet};
pub use server::ServerCookieState;

/// Turns a possibly absent stored value into the state value.
pub type Initializer<T> = Rc<dyn Fn(Option<T>) -> T>;

/// A mounted cookie-backed state. Call `render` once per render of the owner.
pub trait UseCookieState<T> {
    fn key(&self) -> &str;

    fn render(&mut self, provider: Option<&CookiesInServer>) -> Result<CookieStateHandle<T>, CookieError>;
}

/// Reads the stored representation and converts it to the state type.
fn retrieve_state<T, S>(retrieve: &Retrieve<S>, deserializer: &dyn Fn(S) -> T) -> Result<Option<T>, CookieError> {
    Ok(retrieve.call()?.map(deserializer))
}
