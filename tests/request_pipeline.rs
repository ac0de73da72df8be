use gridpool::{
    api::{ApiClient, ClientConfig, CSRF_HEADER},
    guards::{self, Access, Guard},
    pool::{
        picks,
        types::{PickSelection, PickSubmission},
    },
    session::{AuthBridge, AuthState, FileSessionStore, SessionStore},
};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::{net::TcpListener, sync::Arc};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

#[tokio::test]
async fn csrf_rejection_is_recovered_with_one_refetch() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/csrf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc" })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/csrf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "new" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/test"))
        .and(header(CSRF_HEADER, "abc"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "csrf_token_invalid",
            "message": "Invalid CSRF token"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/test"))
        .and(header(CSRF_HEADER, "new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let store = Arc::new(gridpool::session::MemorySessionStore::default());
    let client = ApiClient::new(&ClientConfig::new(server.uri()), store).expect("client");
    client.initialize().await;

    let response: Value = client
        .post("/api/test", &json!({ "value": 1 }))
        .await
        .expect("recovered");
    assert_eq!(response, json!({ "ok": true }));

    let requests = server.received_requests().await.unwrap_or_default();
    let calls: Vec<(String, String)> = requests
        .iter()
        .map(|request| (request.method.to_string(), request.url.path().to_string()))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("GET".to_string(), "/api/csrf-token".to_string()),
            ("POST".to_string(), "/api/test".to_string()),
            ("GET".to_string(), "/api/csrf-token".to_string()),
            ("POST".to_string(), "/api/test".to_string()),
        ]
    );

    assert_eq!(
        requests[1].headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok()),
        Some("abc")
    );
    assert_eq!(
        requests[3].headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok()),
        Some("new")
    );
    for request in requests.iter().filter(|r| r.method.as_str() == "GET") {
        assert!(!request.headers.contains_key(CSRF_HEADER));
    }
}

#[tokio::test]
async fn login_persists_session_and_expired_token_is_refreshed() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");

    Mock::given(method("GET"))
        .and(path("/api/csrf-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "csrf" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "first" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Riley",
            "email": "riley@example.com",
            "role": "user"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/picks/submit"))
        .and(header("authorization", "Bearer first"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "token_expired",
            "message": "Token expired"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "second" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/picks/submit"))
        .and(header("authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "saved": 1 })))
        .mount(&server)
        .await;

    let store = Arc::new(FileSessionStore::new(&session_file));
    let client = ApiClient::new(&ClientConfig::new(server.uri()), store.clone()).expect("client");
    client.initialize().await;
    let bridge = AuthBridge::new(client);
    assert_eq!(
        guards::check(&bridge.state(), Access::Authenticated),
        Guard::MustLogIn
    );

    let user = bridge
        .login("riley@example.com", &SecretString::from("hunter2"))
        .await
        .expect("login");
    assert_eq!(user.id, 7);
    assert!(matches!(bridge.state(), AuthState::Authenticated(_)));
    assert_eq!(
        guards::check(&bridge.state(), Access::Admin),
        Guard::AccessDenied
    );

    let saved = picks::submit_picks(
        bridge.client(),
        &PickSubmission {
            week_id: 1,
            picks: vec![PickSelection {
                game_id: 3,
                team: "Bears".to_string(),
            }],
        },
    )
    .await
    .expect("refreshed and retried");
    assert_eq!(saved.saved, 1);

    // a fresh process picks up the rotated token and the profile snapshot
    let stored = store.load().expect("load").expect("session stored");
    assert_eq!(stored.user.map(|user| user.id), Some(7));
    let restored = AuthBridge::new(
        ApiClient::new(&ClientConfig::new(server.uri()), Arc::new(FileSessionStore::new(&session_file)))
            .expect("client"),
    );
    assert!(restored.is_authenticated());

    let redirect = restored.logout().await;
    assert_eq!(redirect.to, guards::LOGIN_ROUTE);
    assert!(store.load().expect("load").is_none());
}
