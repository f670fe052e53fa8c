//! Login token emails.

pub mod dispatcher;
pub mod log;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pwdless_core::result::AppResult;

pub use dispatcher::MailDispatcher;
pub use log::LogMailer;

/// Subject line of login token emails.
pub const LOGIN_TOKEN_SUBJECT: &str = "Login Token";

/// Everything a login token email needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginTokenContent {
    /// Recipient address.
    pub email: String,
    /// Recipient display name.
    pub name: String,
    /// Link that completes the login, `{login_url}/{token}`.
    pub url: String,
    /// The login token itself.
    pub token: String,
    /// When the token stops redeeming.
    pub expiry: DateTime<Utc>,
}

impl LoginTokenContent {
    /// Plain-text body of the email.
    pub fn render_text(&self) -> String {
        format!(
            "Hi {name},\n\n\
             use the link below to sign in:\n\n{url}\n\n\
             Or enter this token: {token}\n\n\
             The token is valid until {expiry} and can be used once.\n",
            name = self.name,
            url = self.url,
            token = self.token,
            expiry = self.expiry.format("%Y-%m-%d %H:%M UTC"),
        )
    }
}

/// Delivers login token emails.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Sends a login token to its recipient.
    async fn send_login_token(&self, content: &LoginTokenContent) -> AppResult<()>;
}
