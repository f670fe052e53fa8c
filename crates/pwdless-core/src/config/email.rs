//! Outgoing mail configuration.

use serde::{Deserialize, Serialize};

/// Sender identity for login-token emails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Display name of the sender.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_name: default_from_name(),
            from_address: default_from_address(),
        }
    }
}

fn default_from_name() -> String {
    "Pwdless".to_string()
}

fn default_from_address() -> String {
    "no-reply@localhost".to_string()
}
