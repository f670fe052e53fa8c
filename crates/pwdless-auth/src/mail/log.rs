//! Mailer that writes messages to the log instead of sending them.

use async_trait::async_trait;
use tracing::{debug, info};

use pwdless_core::config::EmailConfig;
use pwdless_core::result::AppResult;

use super::{LOGIN_TOKEN_SUBJECT, LoginTokenContent, Mailer};

/// Development mailer. The message body is only emitted at debug level.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    /// Creates a log mailer with the configured sender.
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            from: format!("{} <{}>", config.from_name, config.from_address),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_login_token(&self, content: &LoginTokenContent) -> AppResult<()> {
        info!(
            from = %self.from,
            to = %content.email,
            subject = LOGIN_TOKEN_SUBJECT,
            "Login token email"
        );
        debug!(to = %content.email, body = %content.render_text(), "Login token email body");
        Ok(())
    }
}
