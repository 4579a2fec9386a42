//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::config::ChatTexts;
use crate::core::state::Conversation;
use crate::webhook::{ChatPayload, WebhookClient, WebhookError, WebhookReply};

/// A webhook that answers from a script and records what it was sent.
///
/// Once the script runs out it answers with an empty reply.
pub struct ScriptedWebhook {
    replies: Mutex<VecDeque<Result<WebhookReply, WebhookError>>>,
    pub sent: Mutex<Vec<ChatPayload>>,
}

impl ScriptedWebhook {
    pub fn new(replies: Vec<Result<WebhookReply, WebhookError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl WebhookClient for ScriptedWebhook {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send(&self, payload: &ChatPayload) -> Result<WebhookReply, WebhookError> {
        self.sent.lock().unwrap().push(payload.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(WebhookReply::default()))
    }
}

/// Creates a test Conversation with default texts and a `test` session prefix.
pub fn test_conversation() -> Conversation {
    Conversation::new(ChatTexts::default(), "test".to_string(), false)
}
