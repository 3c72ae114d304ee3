// HTTP-level tests for `ApiClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pmgr_api::{ApiClient, EntityId, EntityKind, Error, Movie, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api/", server.uri());
    let client = ApiClient::new(&base, &TransportConfig::default()).expect("valid base url");
    (server, client)
}

fn empty_snapshot() -> serde_json::Value {
    json!({
        "name": "test",
        "users": [],
        "groups": [],
        "movies": [],
        "ratings": [],
        "requests": [],
    })
}

async fn login(server: &MockServer, client: &ApiClient) -> String {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok123" })))
        .mount(server)
        .await;

    client.login("alice", "pw").await.expect("login succeeds")
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn base_url_without_trailing_slash_is_rejected() {
    let err = ApiClient::new("http://host/api", &TransportConfig::default())
        .err()
        .expect("must fail");
    assert!(matches!(err, Error::BaseUrlNoSlash { .. }));
}

#[test]
fn fresh_client_is_unauthenticated() {
    let client =
        ApiClient::new("http://host/api/", &TransportConfig::default()).expect("valid url");
    assert!(!client.is_authenticated());
    assert_eq!(client.token(), None);
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn login_posts_credentials_and_stores_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "alice", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok123" })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client.login("alice", "pw").await.expect("login succeeds");
    assert_eq!(token, "tok123");
    assert_eq!(client.token().as_deref(), Some("tok123"));
}

#[tokio::test]
async fn failed_login_carries_url_status_and_server_text() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let err = client
        .login("alice", "wrong")
        .await
        .expect_err("login must fail");

    match err {
        Error::Http {
            url,
            body,
            status,
            text,
        } => {
            assert!(url.ends_with("/api/login"));
            assert!(body.contains("alice"));
            assert_eq!(status, 403);
            assert_eq!(text, "bad credentials");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn relogin_overwrites_the_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "alice", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-a" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "bob", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-b" })))
        .mount(&server)
        .await;

    client.login("alice", "pw").await.expect("first login");
    client.login("bob", "pw").await.expect("second login");
    assert_eq!(client.token().as_deref(), Some("tok-b"));
}

// ── Token-scoped endpoints ──────────────────────────────────────────

#[tokio::test]
async fn list_posts_without_a_body() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path("/api/tok123/list"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_snapshot()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client.list().await.expect("list succeeds");
    assert_eq!(snapshot.name, "test");
    assert_eq!(snapshot.entity_count(), 0);
}

#[tokio::test]
async fn unauthenticated_calls_fail_without_a_request() {
    let (server, client) = setup().await;

    let err = client.list().await.expect_err("must fail locally");
    assert!(matches!(err, Error::NotAuthenticated));
    assert!(server.received_requests().await.expect("recorded").is_empty());
}

#[tokio::test]
async fn add_movie_posts_the_entity_without_an_id() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    let movie = Movie::new("tt1234567", "Test", "D", "A", 2020, 100).expect("valid movie");

    let mut snapshot = empty_snapshot();
    snapshot["movies"] = json!([{
        "id": 8, "imdb": "tt1234567", "name": "Test", "director": "D",
        "actors": "A", "year": 2020, "minutes": 100, "ratings": [],
    }]);

    Mock::given(method("POST"))
        .and(path("/api/tok123/addmovie"))
        .and(body_json(json!({
            "imdb": "tt1234567", "name": "Test", "director": "D",
            "actors": "A", "year": 2020, "minutes": 100, "ratings": [],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot))
        .expect(1)
        .mount(&server)
        .await;

    let snap = client
        .add(EntityKind::Movie, &movie)
        .await
        .expect("add succeeds");
    assert_eq!(snap.movies.len(), 1);
    assert_eq!(snap.movies[0].id, Some(EntityId::from(8)));
}

#[tokio::test]
async fn remove_posts_only_the_id() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path("/api/tok123/rmrating"))
        .and(body_json(json!({ "id": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_snapshot()))
        .expect(1)
        .mount(&server)
        .await;

    client
        .remove(EntityKind::Rating, EntityId::from(5))
        .await
        .expect("remove succeeds");
}

#[tokio::test]
async fn server_error_on_mutation_is_structured() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path("/api/tok123/rmmovie"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such movie"))
        .mount(&server)
        .await;

    let err = client
        .remove(EntityKind::Movie, EntityId::from(99))
        .await
        .expect_err("must fail");

    match err {
        Error::Http { status, text, body, .. } => {
            assert_eq!(status, 404);
            assert_eq!(text, "no such movie");
            assert_eq!(body, r#"{"id":99}"#);
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn logout_clears_the_token() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path("/api/tok123/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.logout().await.expect("logout succeeds");
    assert!(!client.is_authenticated());
}
