//! HTTP tests for login and token exchange.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, USER_ID};
use pwdless_auth::AccountStore;

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/login", Some(json!({ "email": "not@exists.io" })), None)
        .await;

    response.assert_unauthorized("email not registered");
    assert!(app.no_more_mail().await);
}

#[tokio::test]
async fn test_login_sends_one_email() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/login", Some(json!({ "email": "valid@account.io" })), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.is_empty());

    let mail = app.next_mail().await;
    assert_eq!(mail.email, "valid@account.io");
    assert_eq!(mail.name, "valid");
    assert_eq!(mail.url, format!("http://localhost:3000/login/{}", mail.token));
    assert!(app.no_more_mail().await);
}

#[tokio::test]
async fn test_login_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/login", Some(json!({ "email": "not-an-email" })), None)
        .await;

    response.assert_unauthorized("invalid email address");
}

#[tokio::test]
async fn test_login_disabled_account() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/login", Some(json!({ "email": "disabled@account.io" })), None)
        .await;

    response.assert_unauthorized("login for account disabled");
    assert!(app.no_more_mail().await);
}

#[tokio::test]
async fn test_login_bad_json() {
    let app = TestApp::new().await;

    let response = app
        .raw_request("POST", "/login", "{not json".to_string(), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], "Bad Request");
}

#[tokio::test]
async fn test_login_missing_field() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/login", Some(json!({})), None).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["status"], "Unprocessable Entity");
}

#[tokio::test]
async fn test_exchange_unknown_token() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/token", Some(json!({ "token": "neverIssued1" })), None)
        .await;

    response.assert_unauthorized("invalid or expired login token");
}

#[tokio::test]
async fn test_exchange_malformed_token() {
    let app = TestApp::new().await;

    for token in ["", "abc-defg", "a b c d e f"] {
        let response = app
            .request("POST", "/token", Some(json!({ "token": token })), None)
            .await;
        response.assert_unauthorized("invalid or expired login token");
    }
}

#[tokio::test]
async fn test_exchange_returns_pair_and_records_device() {
    let app = TestApp::new().await;

    let (access, refresh) = app.sign_in("valid@account.io").await;

    let claims = app.token_auth.verify_access(&access).unwrap();
    assert_eq!(claims.id, USER_ID);
    assert_eq!(claims.sub, "valid");
    assert_eq!(claims.roles, vec!["user".to_string()]);

    let refresh = app.token_auth.verify_refresh(&refresh).unwrap();
    let record = app.records.get(refresh.id).await.unwrap();
    assert_eq!(record.account_id, USER_ID);
    assert_eq!(record.identifier.as_deref(), Some("Firefox on Linux"));

    let account = app.accounts.find_by_id(USER_ID).await.unwrap().unwrap();
    assert!(account.last_login > chrono::Utc::now() - chrono::Duration::minutes(1));
}

#[tokio::test]
async fn test_exchange_token_is_single_use() {
    let app = TestApp::new().await;

    app.request("POST", "/login", Some(json!({ "email": "valid@account.io" })), None)
        .await;
    let mail = app.next_mail().await;

    let first = app
        .request("POST", "/token", Some(json!({ "token": mail.token })), None)
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request("POST", "/token", Some(json!({ "token": mail.token })), None)
        .await;
    second.assert_unauthorized("invalid or expired login token");
}

#[tokio::test]
async fn test_exchange_for_deleted_account() {
    let app = TestApp::new().await;

    app.request("POST", "/login", Some(json!({ "email": "valid@account.io" })), None)
        .await;
    let mail = app.next_mail().await;
    app.accounts.remove(USER_ID).await;

    let response = app
        .request("POST", "/token", Some(json!({ "token": mail.token })), None)
        .await;

    response.assert_unauthorized("email not registered");
}

#[tokio::test]
async fn test_exchange_for_account_disabled_after_login() {
    let app = TestApp::new().await;

    app.request("POST", "/login", Some(json!({ "email": "valid@account.io" })), None)
        .await;
    let mail = app.next_mail().await;

    let mut account = app.accounts.find_by_id(USER_ID).await.unwrap().unwrap();
    account.active = false;
    app.accounts.insert(account).await;

    let response = app
        .request("POST", "/token", Some(json!({ "token": mail.token })), None)
        .await;

    response.assert_unauthorized("login for account disabled");
}

#[tokio::test]
async fn test_token_with_surrounding_whitespace() {
    let app = TestApp::new().await;
    app.request("POST", "/login", Some(json!({ "email": "valid@account.io" })), None)
        .await;
    let mail = app.next_mail().await;

    let padded = format!(" {} ", mail.token);
    let response = app
        .request("POST", "/token", Some(json!({ "token": padded })), None)
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let claims = app.token_auth.verify_access(&response.str("access_token")).unwrap();
    assert_eq!(claims.id, USER_ID);
}

#[tokio::test]
async fn test_ping() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/ping", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "pong");
}
