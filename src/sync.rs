//! Resync trigger.
//!
//! A component that rendered from a missing snapshot shows a placeholder value
//! during hydration. [`SyncWithCookie`] schedules one post-commit effect that
//! re-reads the real client value and hands it to the component, so the
//! correction lands strictly after the first paint.

use std::rc::Rc;

use crate::cookie::UseCookie;
use crate::errors::CookieError;
use crate::provider::CookiesInServer;
use crate::render::Scheduler;

pub struct SyncWithCookie<T> {
    cookie: Box<dyn UseCookie<T>>,
    scheduler: Rc<dyn Scheduler>,
    armed: bool,
}

impl<T: 'static> SyncWithCookie<T> {
    pub fn new(cookie: Box<dyn UseCookie<T>>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            cookie,
            scheduler,
            armed: false,
        }
    }

    pub fn key(&self) -> &str {
        self.cookie.key()
    }

    /// Renders the trigger and returns whether a resync is pending.
    ///
    /// Only the first render schedules the effect; `on_resync` passed on later
    /// renders is dropped. The effect calls `on_resync` with the freshly
    /// retrieved value only when a sync was needed at first render.
    pub fn render<F>(&mut self, provider: Option<&CookiesInServer>, on_resync: F) -> Result<bool, CookieError>
    where
        F: FnOnce(Option<T>) + 'static,
    {
        let handle = self.cookie.render(provider)?;

        if !self.armed {
            self.armed = true;
            let needs_sync = handle.needs_sync;
            let retrieve = handle.retrieve.clone();
            self.scheduler.after_commit(Box::new(move || {
                if needs_sync {
                    on_resync(retrieve.call()?);
                }
                Ok(())
            }));
        }

        Ok(handle.needs_sync)
    }
}
