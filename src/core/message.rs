//! # Messages and the Transcript
//!
//! A `Message` is one bubble in the chat panel. The `Transcript` is the
//! ordered, append-only list of them.
//!
//! Ordering is insertion order, full stop. `created_at` exists so the UI can
//! print `HH:MM` under a bubble; nothing sorts by it.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Per-transcript sequence number. The greeting is always `MessageId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Local>,
}

impl Message {
    /// Timestamp in `HH:MM` form, as shown under each bubble.
    pub fn display_time(&self) -> String {
        format_clock(&self.created_at)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Formats a timestamp as 24h `HH:MM`.
pub fn format_clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

/// Ordered conversation history.
///
/// Only two ways in: [`Transcript::seeded`] at construction and the `push_*`
/// methods. Nothing removes or reorders entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    /// Creates a transcript whose first entry is the assistant greeting.
    pub fn seeded(greeting: &str) -> Self {
        let mut transcript = Transcript {
            messages: Vec::new(),
            next_id: 0,
        };
        transcript.push(Sender::Assistant, greeting.to_string());
        transcript
    }

    fn push(&mut self, sender: Sender, text: String) -> &Message {
        let message = Message {
            id: MessageId(self.next_id),
            text,
            sender,
            created_at: Local::now(),
        };
        self.next_id += 1;
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    pub fn push_user(&mut self, text: String) -> &Message {
        self.push(Sender::User, text)
    }

    pub fn push_assistant(&mut self, text: String) -> &Message {
        self.push(Sender::Assistant, text)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_seeded_transcript_starts_with_greeting() {
        let transcript = Transcript::seeded("Hola");
        assert_eq!(transcript.len(), 1);
        let first = &transcript.messages()[0];
        assert_eq!(first.sender, Sender::Assistant);
        assert_eq!(first.text, "Hola");
        assert_eq!(first.id, MessageId(0));
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut transcript = Transcript::seeded("greeting");
        transcript.push_user("one".into());
        transcript.push_assistant("two".into());
        transcript.push_user("three".into());

        let ids: Vec<u64> = transcript.messages().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        let texts: Vec<&str> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["greeting", "one", "two", "three"]);
    }

    #[test]
    fn test_clock_format_is_hour_minute() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(format_clock(&at), "07:05");
    }

    #[test]
    fn test_order_ignores_timestamps() {
        let mut transcript = Transcript::seeded("hi");
        transcript.push_user("later".into());
        // Backdate the newest message; it must still render last.
        let mut backdated = transcript.clone();
        backdated.messages[1].created_at = Local.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(backdated.last().map(|m| m.text.as_str()), Some("later"));
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Assistant).unwrap(), "\"assistant\"");
    }
}
