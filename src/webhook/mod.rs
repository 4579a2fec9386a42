//! # Webhook
//!
//! The only thing outside the process: an HTTP endpoint that receives a chat
//! message and maybe answers with text.

pub mod client;
pub mod http;
pub mod types;

pub use client::{WebhookClient, WebhookError};
pub use http::HttpWebhook;
pub use types::{ChatPayload, WebhookReply};
