//! Cookie layer configuration.
//!
//! `CookiesConfig` decides, once per process, which variant of every hook the
//! composition root hands out ([`Environment`]) and which logger is installed
//! when the host does not bring its own ([`LogMode`]).
//!
//! # Examples
//!
//! ```rust
//! use isomorphic_cookies::config::{CookiesConfig, Environment, LogMode};
//!
//! let cfg = CookiesConfig::builder()
//!     .environment(Environment::Client)
//!     .log_mode(LogMode::Production)
//!     .build();
//! assert_eq!(cfg.environment, Environment::Client);
//! ```

/// Where the current process renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Server rendering: cookies come from the request snapshot only.
    Server,
    /// Browser (hydration and after): cookies come from the live store.
    Client,
}

impl Environment {
    /// `Client` when compiled for `wasm32`, `Server` otherwise.
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Environment::Client
        } else {
            Environment::Server
        }
    }

    pub fn is_server(self) -> bool {
        self == Environment::Server
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Development,
    Production,
}

impl Default for LogMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            LogMode::Development
        } else {
            LogMode::Production
        }
    }
}

#[derive(Debug, Clone)]
pub struct CookiesConfig {
    pub environment: Environment,
    pub log_mode: LogMode,
}

impl Default for CookiesConfig {
    fn default() -> Self {
        Self {
            environment: Environment::detect(),
            log_mode: LogMode::default(),
        }
    }
}

impl CookiesConfig {
    pub fn builder() -> CookiesConfigBuilder {
        CookiesConfigBuilder::default()
    }
}

/// Builder for [`CookiesConfig`].
#[derive(Debug, Clone, Default)]
pub struct CookiesConfigBuilder {
    inner: CookiesConfig,
}

impl CookiesConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut CookiesConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn environment(self, env: Environment) -> Self { self.map(|c| c.environment = env) }
    pub fn log_mode(self, mode: LogMode) -> Self { self.map(|c| c.log_mode = mode) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut CookiesConfig)) -> Self { self.map(f) }

    pub fn build(self) -> CookiesConfig {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_builds_default_to_server() {
        let cfg = CookiesConfig::default();
        assert_eq!(cfg.environment, Environment::Server);
        assert!(cfg.environment.is_server());
    }

    #[test]
    fn builder_overrides_defaults() {
        let cfg = CookiesConfig::builder()
            .environment(Environment::Client)
            .with(|c| c.log_mode = LogMode::Production)
            .build();

        assert_eq!(cfg.environment, Environment::Client);
        assert_eq!(cfg.log_mode, LogMode::Production);
    }
}
