//! Conversation identity sent to the webhook as `sessionId`.
//!
//! Format is `<prefix>-<epoch millis>`. One id per conversation: it is minted
//! when the controller starts (or resets) and reused for every message, so
//! the automation backend can correlate turns.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_SESSION_PREFIX: &str = "vortexia-chat";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mints a new id stamped with the current time.
    pub fn generate(prefix: &str) -> Self {
        Self::at(prefix, Utc::now())
    }

    pub fn at(prefix: &str, now: DateTime<Utc>) -> Self {
        SessionId(format!("{}-{}", prefix, now.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
