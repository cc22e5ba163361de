use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// SameSite policy of a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// When a cookie expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expires {
    /// Relative to the moment the cookie is written.
    Days(u32),
    /// Absolute instant.
    At(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
}

impl Expires {
    /// Resolves the expiry against `now`.
    pub fn instant_from(&self, now: OffsetDateTime) -> OffsetDateTime {
        match self {
            Expires::Days(days) => now + Duration::days(i64::from(*days)),
            Expires::At(at) => *at,
        }
    }
}

/// Attributes passed through to the client store on `set` and `remove`.
///
/// The hooks never interpret these; expiry and scoping are the store's business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<Expires>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,
}

impl CookieAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn expires(mut self, expires: Expires) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }
}
