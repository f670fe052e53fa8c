//! Fire-and-forget mail dispatch.
//!
//! Requests enqueue content and return immediately. A delivery task sends
//! each message on its own task; failures are forwarded to an error channel
//! drained by a logging task.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::error;

use pwdless_core::error::AppError;

use super::{LoginTokenContent, Mailer};

#[derive(Debug)]
struct DeliveryFailure {
    email: String,
    error: AppError,
}

/// Handle for queueing login token emails.
#[derive(Debug, Clone)]
pub struct MailDispatcher {
    queue: mpsc::UnboundedSender<LoginTokenContent>,
}

impl MailDispatcher {
    /// Spawns the delivery and error-logging tasks on the current runtime.
    pub fn spawn(mailer: Arc<dyn Mailer>) -> Self {
        let (queue, mut outbox) = mpsc::unbounded_channel::<LoginTokenContent>();
        let (failures, mut failed) = mpsc::unbounded_channel::<DeliveryFailure>();

        tokio::spawn(async move {
            while let Some(content) = outbox.recv().await {
                let mailer = mailer.clone();
                let failures = failures.clone();
                tokio::spawn(async move {
                    if let Err(error) = mailer.send_login_token(&content).await {
                        let _ = failures.send(DeliveryFailure {
                            email: content.email,
                            error,
                        });
                    }
                });
            }
        });

        tokio::spawn(async move {
            while let Some(failure) = failed.recv().await {
                error!(
                    email = %failure.email,
                    error = %failure.error,
                    "Failed to deliver login token email"
                );
            }
        });

        Self { queue }
    }

    /// Queues a login token email without waiting for delivery.
    pub fn dispatch(&self, content: LoginTokenContent) {
        if let Err(e) = self.queue.send(content) {
            error!(email = %e.0.email, "Mail queue closed; login token email dropped");
        }
    }
}
