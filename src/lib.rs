//! Hydration-consistent cookies for server-rendered, client-hydrated UIs.
//!
//! A component reads and writes named state backed by an HTTP cookie. During
//! server rendering and during hydration every read is answered from the
//! request snapshot, so the first client render reproduces the server markup.
//! After the first commit reads switch to the live client store, and values
//! that were rendered without a snapshot are resynced once.
//!
//! Start with [`cookies::IsomorphicCookies`], which hands out the server or the
//! client variant of each hook.

pub mod codec;
pub mod config;
pub mod cookie;
pub mod cookies;
pub mod errors;
pub mod logger;
pub mod provider;
pub mod render;
pub mod state;
pub mod store;
pub mod sync;
pub mod updater;
pub mod wrappers;

pub use config::{CookiesConfig, Environment, LogMode};
pub use cookie::{CookieHandle, UseCookie};
pub use cookies::{CookieServices, IsomorphicCookies};
pub use errors::CookieError;
pub use provider::{CookiesInServer, HydratingFlag, ServerSnapshot};
pub use state::{CookieStateHandle, CookieStateOptions, StoreOnSet, UseCookieState};
pub use store::{ClientStore, CookieAttributes};
pub use sync::SyncWithCookie;
pub use updater::Updater;
