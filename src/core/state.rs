//! # Conversation State
//!
//! All controller state in one place. Presentation state (scroll offsets,
//! cursor position) lives in the `tui` module.
//!
//! ```text
//! Conversation
//! ├── transcript: Transcript       // ordered messages, greeting first
//! ├── draft: String                // unsent input
//! ├── pending: bool                // awaiting the assistant turn
//! ├── is_open: bool                // panel visibility
//! ├── generation: u64              // reset epoch, tags in-flight work
//! ├── session_id: SessionId        // sent with every message
//! ├── status_message: String       // status line text
//! ├── texts: ChatTexts             // greeting + fallbacks
//! ├── session_prefix: String
//! └── reset_on_close: bool
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::{ChatTexts, ResolvedConfig};
use crate::core::message::Transcript;
use crate::core::session::{DEFAULT_SESSION_PREFIX, SessionId};

pub struct Conversation {
    pub transcript: Transcript,
    pub draft: String,
    /// True from submit until the assistant message lands.
    pub pending: bool,
    pub is_open: bool,
    /// Bumped on every reset. Work issued under an older value is stale.
    pub generation: u64,
    pub session_id: SessionId,
    pub status_message: String,
    pub texts: ChatTexts,
    pub session_prefix: String,
    pub reset_on_close: bool,
}

impl Conversation {
    pub fn new(texts: ChatTexts, session_prefix: String, reset_on_close: bool) -> Self {
        Self {
            transcript: Transcript::seeded(&texts.greeting),
            draft: String::new(),
            pending: false,
            is_open: false,
            generation: 0,
            session_id: SessionId::generate(&session_prefix),
            status_message: String::new(),
            texts,
            session_prefix,
            reset_on_close,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.texts.clone(),
            config.session_prefix.clone(),
            config.reset_on_close,
        )
    }

    /// Whether the input surface accepts a submission right now.
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }

    /// Starts a fresh conversation: new generation, reseeded transcript,
    /// new session id, nothing pending.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.transcript = Transcript::seeded(&self.texts.greeting);
        self.draft.clear();
        self.pending = false;
        self.session_id = SessionId::generate(&self.session_prefix);
        self.status_message.clear();
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(ChatTexts::default(), DEFAULT_SESSION_PREFIX.to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Sender;
    use crate::test_support::test_conversation;

    #[test]
    fn test_conversation_new_defaults() {
        let conversation = test_conversation();
        assert_eq!(conversation.transcript.len(), 1);
        assert_eq!(conversation.transcript.messages()[0].sender, Sender::Assistant);
        assert!(conversation.draft.is_empty());
        assert!(!conversation.pending);
        assert!(!conversation.is_open);
        assert_eq!(conversation.generation, 0);
        assert!(conversation.session_id.as_str().starts_with("test-"));
    }

    #[test]
    fn test_can_submit_requires_text_and_idle() {
        let mut conversation = test_conversation();
        assert!(!conversation.can_submit());
        conversation.draft = "  \t ".into();
        assert!(!conversation.can_submit());
        conversation.draft = "precio".into();
        assert!(conversation.can_submit());
        conversation.pending = true;
        assert!(!conversation.can_submit());
    }

    #[test]
    fn test_reset_bumps_generation_and_reseeds() {
        let mut conversation = test_conversation();
        conversation.transcript.push_user("hello".into());
        conversation.draft = "half typed".into();
        conversation.pending = true;

        conversation.reset();

        assert_eq!(conversation.generation, 1);
        assert_eq!(conversation.transcript.len(), 1);
        assert_eq!(conversation.transcript.messages()[0].text, conversation.texts.greeting);
        assert!(conversation.draft.is_empty());
        assert!(!conversation.pending);
    }
}
