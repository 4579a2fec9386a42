use std::fmt;

use async_trait::async_trait;

use super::types::{ChatPayload, WebhookReply};

/// Everything that can go wrong talking to the webhook.
///
/// None of these ever reach the transcript; the controller swaps them for
/// the failure fallback text and logs the detail.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookError {
    /// Client could not be built (bad TLS backend, invalid settings).
    Config(String),
    /// Transport failure: DNS, connection refused, reset, abort.
    Network(String),
    /// The configured request timeout elapsed.
    Timeout,
    /// Endpoint answered with a non-2xx status.
    Status { status: u16, body: String },
    /// Body was not JSON, or not the shape we expect.
    Parse(String),
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookError::Config(msg) => write!(f, "config error: {msg}"),
            WebhookError::Network(msg) => write!(f, "network error: {msg}"),
            WebhookError::Timeout => write!(f, "request timed out"),
            WebhookError::Status { status, body } => {
                write!(f, "webhook error (HTTP {status}): {body}")
            }
            WebhookError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for WebhookError {}

/// Anything that can deliver a chat message and hand back the webhook's answer.
///
/// One call per user message. Implementations must not retry.
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn send(&self, payload: &ChatPayload) -> Result<WebhookReply, WebhookError>;
}
