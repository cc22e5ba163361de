//! Page wrappers.
//!
//! The server-side props wrapper copies the request cookies into the page
//! props under `__isomorphic_cookies`; the app wrapper turns those props back
//! into the [`CookiesInServer`] provider value on both sides.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::provider::{CookiesInServer, HydratingFlag, ServerSnapshot};
use crate::render::Memo;

/// Name of the page prop carrying the request cookies.
pub const COOKIES_PROP: &str = "__isomorphic_cookies";

/// The parts of an incoming request the wrappers look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub cookies: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(cookies: HashMap<String, String>) -> Self {
        Self { cookies }
    }

    pub fn with_cookie(mut self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        self.cookies.insert(key.into(), raw.into());
        self
    }
}

/// Outcome of a server-side props function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerSideProps<P> {
    Props(P),
    Redirect { destination: String, permanent: bool },
    NotFound,
}

/// Page props with the request cookies attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithCookies<P> {
    #[serde(flatten)]
    pub props: P,

    /// `None` for statically generated pages or unwrapped props functions.
    #[serde(rename = "__isomorphic_cookies", default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<HashMap<String, String>>,
}

impl<P> WithCookies<P> {
    /// Props rendered without any request, e.g. static generation.
    pub fn without_cookies(props: P) -> Self {
        Self { props, cookies: None }
    }
}

/// Wraps a server-side props function so that its props carry the request cookies.
///
/// Redirects and not-found outcomes pass through untouched.
pub fn with_cookies_server_props<P, E, F>(
    get_props: F,
) -> impl Fn(&RequestContext) -> Result<ServerSideProps<WithCookies<P>>, E>
where
    F: Fn(&RequestContext) -> Result<ServerSideProps<P>, E>,
{
    move |context: &RequestContext| {
        Ok(match get_props(context)? {
            ServerSideProps::Props(props) => ServerSideProps::Props(WithCookies {
                props,
                cookies: Some(context.cookies.clone()),
            }),
            ServerSideProps::Redirect { destination, permanent } => {
                ServerSideProps::Redirect { destination, permanent }
            }
            ServerSideProps::NotFound => ServerSideProps::NotFound,
        })
    }
}

/// App wrapper: owns the hydrating flag of one page instance.
///
/// Build it once, outside of rendering, so that remounting the app keeps the flag.
#[derive(Debug, Default)]
pub struct CookiesApp {
    hydrating: HydratingFlag,
    provider: Memo<Option<HashMap<String, String>>, CookiesInServer>,
}

impl CookiesApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hydrating(&self) -> &HydratingFlag {
        &self.hydrating
    }

    /// Provider value for this render.
    ///
    /// The same value (same snapshot identity) is returned while the cookie map
    /// in the props stays equal.
    pub fn provider<P>(&mut self, page_props: &WithCookies<P>) -> CookiesInServer {
        let hydrating = self.hydrating.clone();
        self.provider.get_or_update(page_props.cookies.clone(), || {
            CookiesInServer::new(ServerSnapshot::from(page_props.cookies.clone()), hydrating)
        })
    }
}
