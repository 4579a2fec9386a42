use serde::{Deserialize, Serialize};

use crate::core::session::SessionId;

/// Body POSTed to the automation webhook for every submitted message.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatPayload {
    /// Raw user text, exactly as typed.
    pub message: String,
    /// ISO-8601 send time (UTC, millisecond precision).
    pub timestamp: String,
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
}

impl ChatPayload {
    /// Builds a payload stamped with the current time.
    pub fn new(message: String, session_id: SessionId) -> Self {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        Self {
            message,
            timestamp,
            session_id,
        }
    }
}

/// What the webhook answers with. Every field is optional; anything else in
/// the body is ignored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WebhookReply {
    #[serde(default)]
    pub response: Option<String>,
}

impl WebhookReply {
    /// The reply text if the webhook produced something worth showing.
    ///
    /// Empty or whitespace-only strings count as absent.
    pub fn text(&self) -> Option<&str> {
        self.response
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}
