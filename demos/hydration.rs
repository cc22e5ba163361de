//! Walks one page through a server render, a client hydration and a resync.
//!
//! Run with `RUST_LOG=debug cargo run --example hydration`.

use std::rc::Rc;

use isomorphic_cookies::render::CommitQueue;
use isomorphic_cookies::store::{CookieAttributes, Expires, InMemoryClientStore};
use isomorphic_cookies::wrappers::{with_cookies_server_props, CookiesApp, RequestContext, ServerSideProps, WithCookies};
use isomorphic_cookies::{
    CookieServices, CookieStateOptions, CookiesConfig, Environment, IsomorphicCookies, LogMode, UseCookieState,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Page {
    title: String,
}

fn theme_or_default(stored: Option<String>) -> String {
    stored.unwrap_or_else(|| "light".to_string())
}

fn cookies_for(environment: Environment, store: Rc<InMemoryClientStore>, queue: Rc<CommitQueue>) -> IsomorphicCookies {
    let config = CookiesConfig::builder()
        .environment(environment)
        .log_mode(LogMode::Development)
        .build();
    let services = CookieServices::for_config(&config)
        .with_client_store(store)
        .with_scheduler(queue);
    IsomorphicCookies::new(&config, services)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let get_props = with_cookies_server_props(|_: &RequestContext| {
        Ok::<_, anyhow::Error>(ServerSideProps::Props(Page { title: "Settings".to_string() }))
    });

    // A statically generated page carries no cookies, a server-rendered one does.
    let request = RequestContext::default().with_cookie("theme", "\"dark\"");
    let pages = [
        ("server rendered", get_props(&request)?),
        (
            "static",
            ServerSideProps::Props(WithCookies::without_cookies(Page { title: "Settings".to_string() })),
        ),
    ];

    for (label, outcome) in pages {
        let ServerSideProps::Props(props) = outcome else {
            continue;
        };
        println!("--- {label} page: {}", props.props.title);

        let browser_store = Rc::new(InMemoryClientStore::with_cookies([("theme", "\"dark\"")]));
        let queue = Rc::new(CommitQueue::new());

        let server = cookies_for(Environment::Server, Rc::new(InMemoryClientStore::new()), Rc::new(CommitQueue::new()));
        let mut server_theme = server.use_cookie_state("theme", theme_or_default, CookieStateOptions::new());
        let markup = server_theme.render(Some(&CookiesApp::new().provider(&props)))?.value;
        println!("server markup:      theme = {markup}");

        let client = cookies_for(Environment::Client, browser_store.clone(), queue.clone());
        let mut app = CookiesApp::new();
        let mut theme = client.use_cookie_state(
            "theme",
            theme_or_default,
            CookieStateOptions::new().store_on_set(CookieAttributes::new().path("/").expires(Expires::Days(365))),
        );

        let hydrated = theme.render(Some(&app.provider(&props)))?;
        println!("hydration render:   theme = {} (syncing: {})", hydrated.value, hydrated.is_syncing);

        let effects = queue.commit()?;
        println!("first commit ran {effects} effect(s)");

        let settled = theme.render(Some(&app.provider(&props)))?;
        println!("after first commit: theme = {}", settled.value);

        settled.set_value.update(|current| if current == "dark" { "light".into() } else { "dark".into() })?;
        println!(
            "after toggle:       theme = {} (journal: {:?})",
            theme.render(Some(&app.provider(&props)))?.value,
            browser_store.journal()
        );
    }

    Ok(())
}
