use std::collections::HashMap;
use std::rc::Rc;

use isomorphic_cookies::logger::RecordingLogger;
use isomorphic_cookies::render::CommitQueue;
use isomorphic_cookies::store::{InMemoryClientStore, JsonClientStore, StoreCall};
use isomorphic_cookies::wrappers::{with_cookies_server_props, CookiesApp, RequestContext, ServerSideProps, WithCookies};
use isomorphic_cookies::{
    CookieError, CookieServices, CookieStateOptions, CookiesConfig, Environment, IsomorphicCookies, UseCookie,
    UseCookieState,
};
use log::Level;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PageProps {
    title: String,
}

/// One side of a page: either the server process or the browser.
struct Side {
    cookies: IsomorphicCookies,
    store: Rc<InMemoryClientStore>,
    queue: Rc<CommitQueue>,
    logger: Rc<RecordingLogger>,
}

impl Side {
    fn new(environment: Environment, store: InMemoryClientStore) -> Self {
        let store = Rc::new(store);
        let queue = Rc::new(CommitQueue::new());
        let logger = Rc::new(RecordingLogger::new());
        let config = CookiesConfig::builder().environment(environment).build();
        let services = CookieServices::for_config(&config)
            .with_client_store(store.clone())
            .with_scheduler(queue.clone())
            .with_logger(logger.clone());

        Self {
            cookies: IsomorphicCookies::new(&config, services),
            store,
            queue,
            logger,
        }
    }
}

fn shout(value: Option<String>) -> String {
    value.map(|v| v.to_uppercase()).unwrap_or_else(|| "DEFAULT".to_string())
}

fn page_props(request: &RequestContext) -> WithCookies<PageProps> {
    let get_props = with_cookies_server_props(|_: &RequestContext| {
        Ok::<_, ()>(ServerSideProps::Props(PageProps { title: "Home".to_string() }))
    });
    match get_props(request) {
        Ok(ServerSideProps::Props(props)) => props,
        other => panic!("expected props, got {other:?}"),
    }
}

#[test]
fn server_render_and_hydration_agree_then_the_client_takes_over() {
    let request = RequestContext::default().with_cookie("greeting", "\"abc\"");

    // Server
    let server = Side::new(Environment::Server, InMemoryClientStore::new());
    let props = page_props(&request);
    let mut server_app = CookiesApp::new();
    let mut server_state = server.cookies.use_cookie_state("greeting", shout, CookieStateOptions::new());
    let server_value = server_state.render(Some(&server_app.provider(&props))).unwrap().value;
    assert_eq!(server_value, "ABC");

    // Props travel to the browser as JSON.
    let wire = serde_json::to_string(&props).unwrap();
    let props: WithCookies<PageProps> = serde_json::from_str(&wire).unwrap();

    // Client, with a cookie that changed since the request.
    let client = Side::new(Environment::Client, InMemoryClientStore::with_cookies([("greeting", "\"xyz\"")]));
    let mut app = CookiesApp::new();
    let mut state = client.cookies.use_cookie_state("greeting", shout, CookieStateOptions::new());

    let hydration = state.render(Some(&app.provider(&props))).unwrap();
    assert_eq!(hydration.value, server_value);
    assert!(!hydration.is_syncing);
    assert_eq!(client.store.reads(), 0);

    client.queue.commit().unwrap();
    assert!(!app.hydrating().is_hydrating());

    // The snapshot was present, so nothing is resynced; explicit retrieve reads the live store.
    let settled = state.render(Some(&app.provider(&props))).unwrap();
    assert_eq!(settled.value, "ABC");
    settled.retrieve.call().unwrap();
    assert_eq!(state.render(Some(&app.provider(&props))).unwrap().value, "xyz");
    assert!(client.logger.entries().is_empty());
}

#[test]
fn statically_generated_page_resyncs_after_first_commit() {
    let props = WithCookies::without_cookies(PageProps { title: "Static".to_string() });
    let client = Side::new(Environment::Client, InMemoryClientStore::with_cookies([("greeting", "\"bye\"")]));
    let mut app = CookiesApp::new();
    let mut state = client.cookies.use_cookie_state("greeting", shout, CookieStateOptions::new());

    let first = state.render(Some(&app.provider(&props))).unwrap();
    assert_eq!(first.value, "DEFAULT");
    assert!(first.is_syncing);

    client.queue.commit().unwrap();

    let second = state.render(Some(&app.provider(&props))).unwrap();
    assert_eq!(second.value, "BYE");
    assert!(!second.is_syncing);
    assert!(client.store.journal().is_empty());
    assert_eq!(client.queue.pending(), 0);
}

#[test]
fn scenario_a_snapshot_during_hydration() {
    let client = Side::new(Environment::Client, InMemoryClientStore::new());
    let mut app = CookiesApp::new();
    let props = WithCookies {
        props: PageProps { title: "A".to_string() },
        cookies: Some(HashMap::from([("greeting".to_string(), "\"hi\"".to_string())])),
    };

    let mut cookie = client.cookies.use_cookie::<String>("greeting");
    let handle = cookie.render(Some(&app.provider(&props))).unwrap();

    assert_eq!(handle.retrieve.call().unwrap(), Some("hi".to_string()));
    assert_eq!(client.logger.count(Level::Warn), 0);
}

#[test]
fn scenario_b_missing_snapshot_during_hydration_warns_once() {
    let client = Side::new(Environment::Client, InMemoryClientStore::new());
    let mut app = CookiesApp::new();
    let props = WithCookies::without_cookies(PageProps { title: "B".to_string() });

    let mut cookie = client.cookies.use_cookie::<String>("greeting");
    let handle = cookie.render(Some(&app.provider(&props))).unwrap();

    assert_eq!(handle.retrieve.call().unwrap(), None);
    assert_eq!(client.logger.count(Level::Warn), 1);
}

#[test]
fn scenario_c_after_hydration_the_live_store_wins() {
    let client = Side::new(Environment::Client, InMemoryClientStore::new());
    let mut app = CookiesApp::new();
    let props = WithCookies {
        props: PageProps { title: "C".to_string() },
        cookies: Some(HashMap::from([("greeting".to_string(), "\"hi\"".to_string())])),
    };

    let mut cookie = client.cookies.use_cookie::<String>("greeting");
    let handle = cookie.render(Some(&app.provider(&props))).unwrap();
    client.queue.commit().unwrap();
    client.store.insert_raw("greeting", "\"bye\"");

    assert_eq!(handle.retrieve.call().unwrap(), Some("bye".to_string()));
}

#[test]
fn scenarios_d_e_f_cookie_backed_state() {
    let client = Side::new(Environment::Client, InMemoryClientStore::new());
    let mut app = CookiesApp::new();
    let props = WithCookies {
        props: PageProps { title: "D".to_string() },
        cookies: Some(HashMap::from([("key".to_string(), "\"abc\"".to_string())])),
    };
    let mut state = client.cookies.use_cookie_state("key", shout, CookieStateOptions::new());

    // D
    let handle = state.render(Some(&app.provider(&props))).unwrap();
    assert_eq!(handle.value, "ABC");

    // E
    handle.set_value.set("x".to_string()).unwrap();
    assert_eq!(
        client.store.journal(),
        vec![StoreCall::Set { key: "key".into(), value: "\"x\"".into(), attributes: None }]
    );

    // F
    handle.clear.call().unwrap();
    let journal = client.store.journal();
    assert_eq!(journal.len(), 2);
    assert_eq!(journal[1], StoreCall::Remove { key: "key".into(), attributes: None });
    assert_eq!(state.render(Some(&app.provider(&props))).unwrap().value, "DEFAULT");
}

#[test]
fn decode_errors_reach_the_caller() {
    let client = Side::new(Environment::Client, InMemoryClientStore::new());
    let mut app = CookiesApp::new();
    let props = WithCookies {
        props: PageProps { title: "Broken".to_string() },
        cookies: Some(HashMap::from([("key".to_string(), "{not json".to_string())])),
    };
    let mut state = client.cookies.use_cookie_state("key", shout, CookieStateOptions::new());

    assert!(matches!(state.render(Some(&app.provider(&props))), Err(CookieError::Decode(_))));
}

#[test]
fn unreadable_client_store_fails_the_resync_instead_of_resetting() {
    let dir = tempfile::tempdir().unwrap();
    let store = Rc::new(JsonClientStore::new(dir.path().join("cookies.json")).unwrap());
    std::fs::write(store.path(), "{ nope").unwrap();

    let queue = Rc::new(CommitQueue::new());
    let config = CookiesConfig::builder().environment(Environment::Client).build();
    let services = CookieServices::for_config(&config)
        .with_client_store(store)
        .with_scheduler(queue.clone());
    let cookies = IsomorphicCookies::new(&config, services);

    let props = WithCookies::without_cookies(PageProps { title: "Static".to_string() });
    let mut app = CookiesApp::new();
    let mut state = cookies.use_cookie_state("greeting", shout, CookieStateOptions::new());

    assert_eq!(state.render(Some(&app.provider(&props))).unwrap().value, "DEFAULT");
    assert!(matches!(queue.commit(), Err(CookieError::Store(_))));

    let handle = state.render(Some(&app.provider(&props))).unwrap();
    assert!(matches!(handle.retrieve.call(), Err(CookieError::Store(_))));
}

#[test]
fn rendering_without_a_provider_fails_on_both_sides() {
    for environment in [Environment::Server, Environment::Client] {
        let side = Side::new(environment, InMemoryClientStore::new());
        let mut state = side.cookies.use_cookie_state("key", shout, CookieStateOptions::new());

        assert!(matches!(state.render(None), Err(CookieError::ProviderMissing)));
        assert_eq!(side.logger.count(Level::Error), 1);
    }
}

#[test]
fn state_handles_are_stable_across_renders_of_one_page() {
    let client = Side::new(Environment::Client, InMemoryClientStore::new());
    let mut app = CookiesApp::new();
    let props = WithCookies {
        props: PageProps { title: "Stable".to_string() },
        cookies: Some(HashMap::from([("key".to_string(), "\"abc\"".to_string())])),
    };
    let mut state = client.cookies.use_cookie_state("key", shout, CookieStateOptions::new());

    let first = state.render(Some(&app.provider(&props))).unwrap();
    let second = state.render(Some(&app.provider(&props))).unwrap();
    assert!(first.retrieve.ptr_eq(&second.retrieve));
    assert!(first.store.ptr_eq(&second.store));
    assert!(first.clear.ptr_eq(&second.clear));
    assert!(first.set_value.ptr_eq(&second.set_value));
}
