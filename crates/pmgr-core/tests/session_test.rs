// End-to-end tests for `Session` against a wiremock server: login
// refreshes the store, mutations install the returned snapshot, and
// the local resolve precondition keeps stale calls off the wire.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pmgr_core::{CoreError, EntityKind, Movie, Session, SessionConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let config = SessionConfig {
        url: format!("{}/api/", server.uri()),
        ..SessionConfig::default()
    };
    let session = Session::connect(&config).expect("valid config");
    (server, session)
}

fn snapshot_with_alice() -> serde_json::Value {
    json!({
        "name": "pmgr",
        "users": [
            { "id": 1, "username": "alice", "role": "USER,ADMIN",
              "groups": [], "requests": [], "ratings": [] },
            { "id": 2, "username": "bob", "role": "USER",
              "groups": [], "requests": [], "ratings": [] },
        ],
        "groups": [],
        "movies": [],
        "ratings": [],
        "requests": [],
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok123" })))
        .mount(server)
        .await;
}

async fn login(server: &MockServer, session: &Session, list_body: serde_json::Value) {
    mount_login(server).await;
    Mock::given(method("POST"))
        .and(path("/api/tok123/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body))
        .mount(server)
        .await;

    session
        .login("alice", &SecretString::from("pw"))
        .await
        .expect("login succeeds");
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn login_refreshes_the_store() {
    let (server, session) = setup().await;
    login(&server, &session, snapshot_with_alice()).await;

    assert_eq!(session.username(), Some("alice".to_owned()));
    let me = session.current_user().expect("alice is in the snapshot");
    assert_eq!(me.id, Some(1.into()));

    let entity = session.store().resolve(2.into()).expect("bob resolves");
    assert_eq!(entity.as_user().expect("a user").username, "bob");
    assert!(session.store().last_refresh().is_some());
}

#[tokio::test]
async fn failed_login_leaves_session_anonymous() {
    let (server, session) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let err = session
        .login("alice", &SecretString::from("wrong"))
        .await
        .err()
        .expect("must fail");
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert_eq!(session.username(), None);
    assert_eq!(session.store().snapshot().entity_count(), 0);
}

// ── Mutations install the returned snapshot ─────────────────────────

#[tokio::test]
async fn add_movie_installs_the_new_snapshot() {
    let (server, session) = setup().await;
    login(&server, &session, snapshot_with_alice()).await;

    let movie = Movie::new("tt0120737", "The Fellowship", "Jackson", "McKellen", 2001, 178)
        .expect("valid movie");

    let mut after = snapshot_with_alice();
    after["movies"] = json!([{
        "id": 7, "imdb": "tt0120737", "name": "The Fellowship",
        "director": "Jackson", "actors": "McKellen",
        "year": 2001, "minutes": 178, "ratings": [],
    }]);
    Mock::given(method("POST"))
        .and(path("/api/tok123/addmovie"))
        .and(body_json(&movie))
        .respond_with(ResponseTemplate::new(200).set_body_json(after))
        .mount(&server)
        .await;

    let snapshot = session.add_movie(&movie).await.expect("add succeeds");
    assert_eq!(snapshot.movies.len(), 1);

    let entity = session.store().resolve(7.into()).expect("new id resolves");
    assert_eq!(entity.as_movie().expect("a movie").imdb, "tt0120737");
}

#[tokio::test]
async fn snapshot_with_duplicate_ids_is_rejected_and_prior_state_kept() {
    let (server, session) = setup().await;
    login(&server, &session, snapshot_with_alice()).await;

    let mut broken = snapshot_with_alice();
    broken["movies"] = json!([{
        "id": 1, "imdb": "tt0000001", "name": "Clash", "director": "X",
        "actors": "Y", "year": 2000, "minutes": 90, "ratings": [],
    }]);
    Mock::given(method("POST"))
        .and(path("/api/tok123/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(broken))
        // Shadow the good `list` mock mounted by the login helper:
        // equal-priority mocks match in mount order, first one wins.
        .with_priority(1)
        .mount(&server)
        .await;

    let err = session.list().await.err().expect("must fail");
    assert!(matches!(err, CoreError::DuplicateId { id } if id == 1.into()));

    // Prior snapshot is untouched: id 1 is still alice.
    let entity = session.store().resolve(1.into()).expect("still resolves");
    assert_eq!(entity.kind(), EntityKind::User);
}

// ── Local preconditions ─────────────────────────────────────────────

#[tokio::test]
async fn remove_of_unknown_id_is_rejected_without_a_request() {
    let (server, session) = setup().await;
    login(&server, &session, snapshot_with_alice()).await;
    let before = server.received_requests().await.expect("recording on").len();

    let err = session.remove_movie(5.into()).await.err().expect("must fail");
    assert!(matches!(
        err,
        CoreError::NotFound { kind: EntityKind::Movie, id } if id == 5.into()
    ));

    let after = server.received_requests().await.expect("recording on").len();
    assert_eq!(before, after, "nothing went out on the wire");
}

#[tokio::test]
async fn set_without_an_id_is_rejected() {
    let (server, session) = setup().await;
    login(&server, &session, snapshot_with_alice()).await;

    let movie = Movie::new("tt0120737", "The Fellowship", "Jackson", "McKellen", 2001, 178)
        .expect("valid movie");
    let err = session.set_movie(&movie).await.err().expect("must fail");
    assert!(matches!(err, CoreError::MissingId { kind: EntityKind::Movie }));
}

// ── Change notification ─────────────────────────────────────────────

#[tokio::test]
async fn subscribers_observe_session_refreshes() {
    let (server, session) = setup().await;
    let mut rx = session.store().subscribe();

    login(&server, &session, snapshot_with_alice()).await;

    assert!(rx.has_changed().expect("sender alive"));
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.users.len(), 2);
}
