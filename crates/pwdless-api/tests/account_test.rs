//! HTTP tests for routes behind the access token gate.

mod helpers;

use axum::http::StatusCode;

use helpers::{ADMIN_ID, TestApp, USER_ID};

#[tokio::test]
async fn test_own_account() {
    let app = TestApp::new().await;
    let (access, _) = app.sign_in("valid@account.io").await;

    let response = app.request("GET", "/api/account", None, Some(&access)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], USER_ID);
    assert_eq!(response.body["email"], "valid@account.io");
    assert_eq!(response.body["roles"], serde_json::json!(["user"]));
    assert_eq!(response.body["active"], true);
}

#[tokio::test]
async fn test_account_requires_access_token() {
    let app = TestApp::new().await;
    let (_, refresh) = app.sign_in("valid@account.io").await;

    let missing = app.request("GET", "/api/account", None, None).await;
    missing.assert_unauthorized("token unauthorized");

    let wrong_kind = app.request("GET", "/api/account", None, Some(&refresh)).await;
    wrong_kind.assert_unauthorized("invalid access token");
}

#[tokio::test]
async fn test_admin_route_requires_role() {
    let app = TestApp::new().await;
    let (access, _) = app.sign_in("valid@account.io").await;

    let response = app
        .request("GET", &format!("/admin/accounts/{ADMIN_ID}"), None, Some(&access))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body, serde_json::json!({ "status": "Forbidden" }));
}

#[tokio::test]
async fn test_admin_reads_any_account() {
    let app = TestApp::new().await;
    let (access, _) = app.sign_in("admin@boot.io").await;

    let response = app
        .request("GET", &format!("/admin/accounts/{USER_ID}"), None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "valid@account.io");

    let missing = app
        .request("GET", "/admin/accounts/999", None, Some(&access))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "account not found");

    let bad_id = app
        .request("GET", "/admin/accounts/abc", None, Some(&access))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}
