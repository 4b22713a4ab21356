//! Outbound mail contract and the Resend-backed dispatcher.
//!
//! The intake service depends only on the [`MailDispatcher`] trait; tests and
//! the preview command substitute in-memory dispatchers at that seam.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::MailConfig;

/// Attachment carried alongside the rendered body. Content is the raw base64
/// payload the provider expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: String,
}

/// A fully rendered message ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Provider acknowledgement for one dispatched message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DispatchReceipt {
    pub id: String,
}

/// Dispatch failure. Opaque to the core: never retried, surfaced as-is.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("mail transport failed: {0}")]
    Transport(String),
    #[error("mail provider rejected the message ({status}): {message}")]
    Provider { status: u16, message: String },
}

/// Delivery seam the intake service dispatches through. At most one `send`
/// call is made per submission.
pub trait MailDispatcher: Send + Sync {
    fn send(
        &self,
        message: EmailMessage,
    ) -> impl Future<Output = Result<DispatchReceipt, DispatchError>> + Send;
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    attachments: &'a [EmailAttachment],
}

/// Dispatcher backed by the Resend transactional email HTTP API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl ResendMailer {
    pub fn from_config(config: &MailConfig, api_key: String) -> Result<Self, DispatchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| DispatchError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

impl MailDispatcher for ResendMailer {
    fn send(
        &self,
        message: EmailMessage,
    ) -> impl Future<Output = Result<DispatchReceipt, DispatchError>> + Send {
        async move {
            let request = SendEmailRequest {
                from: &message.from,
                to: [message.to.as_str()],
                subject: &message.subject,
                html: &message.html,
                attachments: &message.attachments,
            };

            let response = self
                .http
                .post(format!("{}/emails", self.api_base))
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
                .map_err(|err| DispatchError::Transport(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(DispatchError::Provider {
                    status: status.as_u16(),
                    message: body,
                });
            }

            response
                .json::<DispatchReceipt>()
                .await
                .map_err(|err| DispatchError::Transport(err.to_string()))
        }
    }
}
