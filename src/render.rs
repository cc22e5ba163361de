//! Render host capabilities.
//!
//! The cookie hooks do not own a rendering engine. They consume two things from
//! the host:
//!
//! - a [`Scheduler`] that runs deferred effects once, after content has been
//!   committed to the display ([`CommitQueue`] is the reference host);
//! - per-hook identity caching ([`Memo`]), so the callables handed out by a
//!   hook keep their identity across renders while their dependencies hold.
//!
//! Everything here is single threaded. Hooks are mounted by one page instance
//! and driven by that page's render loop.

mod callback;
mod memo;
mod scheduler;

pub(crate) use callback::callback;
pub use memo::Memo;
pub use scheduler::{CommitQueue, Effect, Scheduler};
