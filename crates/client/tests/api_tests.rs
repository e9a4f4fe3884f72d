//! Integration tests for the typed API surface

use chrono::{NaiveDate, NaiveDateTime};
use courtside_client::types::{ExportFormat, NewTournament, Role, UserUpdate};
use courtside_client::{ApiClient, ClientError, MemorySessionStore, Session, SessionStore};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(base_url: &str, store: &Arc<MemorySessionStore>) -> ApiClient {
    ApiClient::builder()
        .base_url(base_url)
        .session_store(store.clone())
        .build()
        .unwrap()
}

fn auth_body(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "accessToken": access,
        "refreshToken": refresh,
        "id": 1,
        "username": "alice",
        "email": "alice@example.com",
        "role": "PLAYER"
    })
}

#[tokio::test]
async fn builder_requires_base_url_and_store() {
    let store: Arc<MemorySessionStore> = Arc::new(MemorySessionStore::new());
    let missing_url = ApiClient::builder().session_store(store).build();
    assert!(matches!(missing_url, Err(ClientError::Configuration(_))));

    let missing_store = ApiClient::builder().base_url("http://localhost").build();
    assert!(matches!(missing_store, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn login_persists_the_full_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(query_param("username", "alice"))
        .and(query_param("password", "pw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("A1", "R1")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    let auth = client.login("alice", "pw").await.unwrap();
    assert_eq!(auth.access_token, "A1");
    assert_eq!(auth.role, Role::Player);

    let session = store.load().unwrap();
    assert_eq!(session.access_token, "A1");
    assert_eq!(session.refresh_token, "R1");
    assert_eq!(session.user.id, 1);
    assert_eq!(session.user.email, "alice@example.com");
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn failed_login_leaves_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad credentials"))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    let result = client.login("alice", "wrong").await;
    assert!(matches!(result, Err(ClientError::Http { status: 400, .. })));
    assert!(store.load().is_none());
}

#[tokio::test]
async fn register_sends_role_and_persists_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/register"))
        .and(query_param("username", "alice"))
        .and(query_param("email", "alice@example.com"))
        .and(query_param("role", "PLAYER"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("A1", "R1")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    client
        .register("alice", "alice@example.com", "pw", Role::Player)
        .await
        .unwrap();
    assert!(store.load().is_some());
}

#[tokio::test]
async fn logout_clears_session_even_when_the_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/logout"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.save(&Session {
        access_token: "A1".into(),
        refresh_token: "R1".into(),
        user: courtside_client::types::User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            role: Role::Player,
        },
    });
    let client = client(&server.uri(), &store);

    client.logout().await;
    assert!(store.load().is_none());
}

#[tokio::test]
async fn tournaments_decode_dates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tournaments/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "name": "Spring Open",
            "startDate": "2025-05-01",
            "endDate": "2025-05-10",
            "registrationDeadline": "2025-04-20",
            "maxPlayers": 32,
            "minPlayers": 8,
            "cancelled": false
        }])))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    let tournaments = client.tournaments().await.unwrap();
    assert_eq!(tournaments.len(), 1);
    assert_eq!(tournaments[0].name, "Spring Open");
    assert_eq!(
        tournaments[0].start_date,
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    );
}

#[tokio::test]
async fn create_tournament_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tournaments/create"))
        .and(query_param("name", "Spring Open"))
        .and(query_param("startDate", "2025-05-01"))
        .and(query_param("maxPlayers", "32"))
        .and(query_param("currentUserId", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Spring Open",
            "startDate": "2025-05-01",
            "endDate": "2025-05-10",
            "registrationDeadline": "2025-04-20",
            "maxPlayers": 32,
            "minPlayers": 8,
            "cancelled": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    let created = client
        .create_tournament(&NewTournament {
            name: "Spring Open".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            registration_deadline: NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
            max_players: 32,
            min_players: 8,
            current_user_id: 9,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn update_score_targets_the_match() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/matches/5/score"))
        .and(query_param("newScore", "6-4,3-6,7-5"))
        .and(query_param("currentUserId", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "tournamentId": 7,
            "tournamentName": "Spring Open",
            "player1Id": 1,
            "player1Username": "alice",
            "player2Id": 3,
            "player2Username": "bob",
            "refereeId": 2,
            "refereeUsername": "carol",
            "score": "6-4,3-6,7-5",
            "startTime": "2025-05-01T10:00:00",
            "endTime": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    let updated = client.update_score(5, "6-4,3-6,7-5", 2).await.unwrap();
    assert_eq!(updated.score.as_deref(), Some("6-4,3-6,7-5"));
    assert_eq!(
        updated.start_time,
        NaiveDateTime::parse_from_str("2025-05-01T10:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
    );
}

#[tokio::test]
async fn export_returns_the_raw_blob() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/export"))
        .and(query_param("format", "csv"))
        .and(query_param("tournamentId", "7"))
        .and(query_param("currentUserId", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("id,score\n5,6-4\n"))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    let blob = client.export_matches(ExportFormat::Csv, 7, 9).await.unwrap();
    assert_eq!(blob, "id,score\n5,6-4\n");
}

#[tokio::test]
async fn delete_user_reports_plain_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/users/4"))
        .and(query_param("currentUserId", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User deleted successfully"))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    client.delete_user(4, 9).await.unwrap();
}

#[tokio::test]
async fn update_user_refreshes_the_stored_identity() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/1"))
        .and(query_param("newUsername", "alicia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "alicia",
            "email": "alice@example.com",
            "role": "PLAYER"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.save(&Session {
        access_token: "A1".into(),
        refresh_token: "R1".into(),
        user: courtside_client::types::User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            role: Role::Player,
        },
    });
    let client = client(&server.uri(), &store);

    let update = UserUpdate {
        new_username: Some("alicia".into()),
        ..UserUpdate::default()
    };
    let user = client.update_user(1, &update).await.unwrap();
    assert_eq!(user.username, "alicia");

    // Identity replaced, token pair kept.
    let session = store.load().unwrap();
    assert_eq!(session.user.username, "alicia");
    assert_eq!(session.access_token, "A1");
    assert_eq!(session.refresh_token, "R1");
}

#[tokio::test]
async fn filter_players_omits_absent_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/referee/players"))
        .and(query_param("tournamentId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client(&server.uri(), &store);

    let players = client.filter_players(None, Some(7)).await.unwrap();
    assert!(players.is_empty());
}
