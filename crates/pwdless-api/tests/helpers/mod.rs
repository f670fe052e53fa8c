//! Shared helpers for HTTP tests: the real router over in-memory stores.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};
use tower::ServiceExt;

use pwdless_api::{AppState, ReadinessCheck, build_app};
use pwdless_auth::{
    LoginTokenContent, LoginTokenStore, MailDispatcher, Mailer, MemoryAccountStore,
    MemoryRefreshTokenStore, SessionManager, TokenAuth,
};
use pwdless_core::AppResult;
use pwdless_core::error::AppError;
use pwdless_core::config::AppConfig;
use pwdless_entity::account::Account;

pub const ADMIN_ID: i32 = 1;
pub const USER_ID: i32 = 2;
pub const DISABLED_ID: i32 = 3;

/// Mailer that forwards every message to the test.
struct RecordingMailer(mpsc::UnboundedSender<LoginTokenContent>);

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_login_token(&self, content: &LoginTokenContent) -> AppResult<()> {
        let _ = self.0.send(content.clone());
        Ok(())
    }
}

/// Backing store state reported to `/ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StoreState {
    Ready = 0,
    Unmigrated = 1,
    Down = 2,
}

/// Readiness check the test can flip.
#[derive(Default)]
pub struct SwitchableReadiness(AtomicU8);

impl SwitchableReadiness {
    pub fn set(&self, state: StoreState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReadinessCheck for SwitchableReadiness {
    async fn is_ready(&self) -> AppResult<bool> {
        match self.0.load(Ordering::SeqCst) {
            0 => Ok(true),
            1 => Ok(false),
            _ => Err(AppError::database("connection refused")),
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Account store behind the app
    pub accounts: MemoryAccountStore,
    /// Refresh record store behind the app
    pub records: MemoryRefreshTokenStore,
    /// Token issuer shared with the app
    pub token_auth: Arc<TokenAuth>,
    /// Readiness reported by `/ready`
    pub readiness: Arc<SwitchableReadiness>,
    mail: Mutex<mpsc::UnboundedReceiver<LoginTokenContent>>,
}

impl TestApp {
    /// Create a new test application with three seeded accounts
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("integration-test-secret".to_string());
        let config = Arc::new(config);

        let accounts = MemoryAccountStore::new();
        accounts.insert(account(ADMIN_ID, "admin@boot.io", true, &["admin"])).await;
        accounts.insert(account(USER_ID, "valid@account.io", true, &["user"])).await;
        accounts.insert(account(DISABLED_ID, "disabled@account.io", false, &["user"])).await;

        let records = MemoryRefreshTokenStore::new();
        let token_auth = Arc::new(TokenAuth::new(&config.auth));
        let (tx, rx) = mpsc::unbounded_channel();

        let session_manager = Arc::new(SessionManager::new(
            Arc::new(accounts.clone()),
            Arc::new(records.clone()),
            Arc::new(LoginTokenStore::new(&config.auth)),
            Arc::clone(&token_auth),
            MailDispatcher::spawn(Arc::new(RecordingMailer(tx))),
            &config.auth,
        ));

        let readiness = Arc::new(SwitchableReadiness::default());
        let state = AppState::new(
            config,
            session_manager,
            Arc::new(accounts.clone()),
            readiness.clone(),
        );

        Self {
            router: build_app(state),
            accounts,
            records,
            token_auth,
            readiness,
            mail: Mutex::new(rx),
        }
    }

    /// Wait for the next login token email
    pub async fn next_mail(&self) -> LoginTokenContent {
        tokio::time::timeout(Duration::from_secs(2), self.mail.lock().await.recv())
            .await
            .expect("No login token email was sent")
            .expect("Mail channel closed")
    }

    /// Returns `true` if no further email arrives shortly
    pub async fn no_more_mail(&self) -> bool {
        tokio::time::timeout(Duration::from_millis(100), self.mail.lock().await.recv())
            .await
            .is_err()
    }

    /// Run login + exchange and return `(access_token, refresh_token)`
    pub async fn sign_in(&self, email: &str) -> (String, String) {
        let response = self
            .request("POST", "/login", Some(serde_json::json!({ "email": email })), None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);

        let mail = self.next_mail().await;
        let response = self
            .request("POST", "/token", Some(serde_json::json!({ "token": mail.token })), None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "Exchange failed: {:?}", response.body);

        (response.str("access_token"), response.str("refresh_token"))
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, token.map(|t| format!("Bearer {t}")))
            .await
    }

    /// Make an HTTP request with a raw body and `Authorization` header
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        authorization: Option<String>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .header(
                "User-Agent",
                "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0",
            );

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            text: String::from_utf8_lossy(&bytes).into_owned(),
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Raw body
    pub text: String,
    /// Parsed JSON body (`Null` if not JSON)
    pub body: Value,
}

impl TestResponse {
    /// String field of the JSON body
    pub fn str(&self, field: &str) -> String {
        self.body
            .get(field)
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| panic!("No {field} in {:?}", self.body))
            .to_string()
    }

    /// Asserts a 401 envelope with the given message
    pub fn assert_unauthorized(&self, message: &str) {
        assert_eq!(self.status, StatusCode::UNAUTHORIZED, "{:?}", self.body);
        assert_eq!(
            self.body,
            serde_json::json!({ "status": "Unauthorized", "error": message })
        );
    }
}

fn account(id: i32, email: &str, active: bool, roles: &[&str]) -> Account {
    let now = Utc::now();
    Account {
        id,
        created_at: now,
        updated_at: now,
        last_login: now - chrono::Duration::days(1),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        active,
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}
