/*
[INPUT]:  Mock authentication responses
[OUTPUT]: Test results for auth flow
[POS]:    Integration tests - authentication and session persistence
[UPDATE]: When auth endpoints or flow changes
*/

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use cloudtask_client::{
    AuthGateway, CloudTaskError, Credentials, FileTokenStore, SessionContext, TokenStore,
};
use common::{client_for, jwt_expiring_at, setup_mock_server};
use tokio_test::assert_ok;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn temp_session_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("cloudtask-test-{}", Uuid::new_v4()));
    path.push("session.json");
    path
}

#[tokio::test]
async fn test_token_survives_restart() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "persisted-token",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session_path = temp_session_path();

    {
        let session = SessionContext::new(Arc::new(FileTokenStore::new(&session_path)));
        let gateway = AuthGateway::new(client_for(&server), session);
        assert_ok!(gateway.login(&Credentials::new("a@b.c", "pw")).await);
    }

    let session = SessionContext::new(Arc::new(FileTokenStore::new(&session_path)));
    assert!(assert_ok!(session.restore().await));
    assert_eq!(assert_ok!(session.bearer_token()), "persisted-token");
    assert_eq!(session.session().unwrap().email, "a@b.c");

    let gateway = AuthGateway::new(client_for(&server), session);
    assert_ok!(gateway.logout().await);
    assert!(!session_path.exists());

    let _ = std::fs::remove_dir_all(session_path.parent().unwrap());
}

#[tokio::test]
async fn test_expired_token_is_not_sent() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    let expired = jwt_expiring_at((Utc::now() - Duration::hours(1)).timestamp());
    assert_ok!(session.establish(expired, "a@b.c").await);

    let err = client_for(&server).list_tasks(&session).await.unwrap_err();
    assert!(matches!(err, CloudTaskError::TokenExpired));
}

#[tokio::test]
async fn test_fresh_jwt_is_sent() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"title": "One"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    let fresh = jwt_expiring_at((Utc::now() + Duration::minutes(15)).timestamp());
    let established = assert_ok!(session.establish(fresh, "a@b.c").await);
    assert!(established.expires_at.is_some());

    let tasks = assert_ok!(client_for(&server).list_tasks(&session).await);
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn test_file_store_is_a_token_store() {
    let session_path = temp_session_path();
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&session_path));
    assert!(assert_ok!(store.load().await).is_none());
    assert_ok!(store.clear().await);
}
