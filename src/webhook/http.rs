//! reqwest-backed webhook client.
//!
//! Plain JSON POST, no auth, no retries. The endpoint is typically an
//! automation workflow (n8n style) that answers `{"response": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{WebhookClient, WebhookError};
use super::types::{ChatPayload, WebhookReply};

pub struct HttpWebhook {
    url: String,
    client: reqwest::Client,
}

impl HttpWebhook {
    /// Builds a client for `url`. `timeout` of `None` means the transport's
    /// own behavior applies (no overall deadline).
    pub fn new(url: String, timeout: Option<Duration>) -> Result<Self, WebhookError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WebhookError::Config(e.to_string()))?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn transport_error(e: reqwest::Error) -> WebhookError {
    if e.is_timeout() {
        WebhookError::Timeout
    } else {
        WebhookError::Network(e.to_string())
    }
}

/// Interprets a 2xx body.
///
/// Any valid JSON counts as settled; only a string `response` on an object is
/// taken as reply text. Non-JSON bodies are a parse failure.
pub(crate) fn parse_reply(body: &str) -> Result<WebhookReply, WebhookError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| WebhookError::Parse(e.to_string()))?;
    let response = value
        .get("response")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    Ok(WebhookReply { response })
}

#[async_trait]
impl WebhookClient for HttpWebhook {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, payload: &ChatPayload) -> Result<WebhookReply, WebhookError> {
        info!(
            "Webhook request: session={}, message_len={}",
            payload.session_id,
            payload.message.len()
        );

        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!("Webhook response status: {}", status);

        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("Webhook error: {} - {}", status.as_u16(), body);
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Webhook body: {} bytes", body.len());
        parse_reply(&body)
    }
}
