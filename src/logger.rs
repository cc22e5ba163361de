//! Logging capability.
//!
//! The hooks never call the `log` macros directly; they receive a [`Logger`] so
//! hosts can silence diagnostics in production or capture them in tests.
//!
//! - [`DevLogger`] forwards to the `log` facade under the `isomorphic_cookies` target.
//! - [`SilentLogger`] drops everything.
//! - [`RecordingLogger`] keeps every message in memory for assertions.

use std::cell::RefCell;
use std::rc::Rc;

use log::Level;

use crate::config::LogMode;

const LOG_TARGET: &str = "isomorphic_cookies";

pub trait Logger {
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn log(&self, message: &str);
}

/// Logger used in development builds.
#[derive(Debug, Default, Clone, Copy)]
pub struct DevLogger;

impl Logger for DevLogger {
    fn error(&self, message: &str) {
        log::error!(target: LOG_TARGET, "{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!(target: LOG_TARGET, "{message}");
    }

    fn info(&self, message: &str) {
        log::info!(target: LOG_TARGET, "{message}");
    }

    fn log(&self, message: &str) {
        log::debug!(target: LOG_TARGET, "{message}");
    }
}

/// Logger used in production: every call is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentLogger;

impl Logger for SilentLogger {
    fn error(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn log(&self, _message: &str) {}
}

/// Keeps every message with its level. `log` calls are recorded as [`Level::Debug`].
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: RefCell<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn count(&self, level: Level) -> usize {
        self.entries.borrow().iter().filter(|(l, _)| *l == level).count()
    }

    fn push(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn log(&self, message: &str) {
        self.push(Level::Debug, message);
    }
}

/// Returns the logger matching `mode`.
pub fn logger_for(mode: LogMode) -> Rc<dyn Logger> {
    match mode {
        LogMode::Development => Rc::new(DevLogger),
        LogMode::Production => Rc::new(SilentLogger),
    }
}
