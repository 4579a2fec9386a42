//! # Actions
//!
//! Everything that can happen to the chat widget becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Webhook answers? That's `Action::ReplySettled { .. }`.
//!
//! `update()` applies an action to the `Conversation` and returns an `Effect`
//! describing the I/O the caller must perform. No side effects happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The message lifecycle for one submission:
//!
//! ```text
//! Submit(text) ──► user message appended, draft cleared, pending = true
//!              └─► Effect::Dispatch           (caller POSTs the payload)
//! ReplySettled ──► Effect::SchedulePacing     (caller sleeps the pacing delay)
//! PacingElapsed ─► assistant message appended, pending = false
//! ```
//!
//! Settlement and pacing carry the generation they were issued under; if the
//! conversation was reset in between they are dropped.

use log::{debug, info, warn};

use crate::core::config::ChatTexts;
use crate::core::state::Conversation;
use crate::webhook::{ChatPayload, WebhookError, WebhookReply};

#[derive(Debug)]
pub enum Action {
    Open,
    Close,
    Toggle,
    /// The input box content changed.
    DraftChanged(String),
    Submit(String),
    /// The webhook call finished, one way or another.
    ReplySettled {
        generation: u64,
        outcome: Result<WebhookReply, WebhookError>,
    },
    /// The pacing delay after settlement ran out.
    PacingElapsed { generation: u64, text: String },
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// POST this payload. Report back with `Action::ReplySettled`.
    Dispatch {
        generation: u64,
        payload: ChatPayload,
    },
    /// Wait the pacing delay, then report `Action::PacingElapsed`.
    SchedulePacing { generation: u64, text: String },
    /// Drop any scheduled pacing callback.
    CancelPacing,
    Quit,
}

/// Picks the assistant text for a settled call.
///
/// A usable `response` is shown verbatim. A reply without one gets the reply
/// fallback; any error gets the failure fallback.
pub fn reply_text(outcome: &Result<WebhookReply, WebhookError>, texts: &ChatTexts) -> String {
    match outcome {
        Ok(reply) => match reply.text() {
            Some(text) => text.to_string(),
            None => {
                info!("Webhook reply had no usable response, using reply fallback");
                texts.reply_fallback.clone()
            }
        },
        Err(e) => {
            warn!("Webhook call failed ({}), using failure fallback", e);
            texts.failure_fallback.clone()
        }
    }
}

pub fn update(state: &mut Conversation, action: Action) -> Effect {
    match action {
        Action::Open => {
            if !state.is_open {
                info!("Chat opened (session={})", state.session_id);
                state.is_open = true;
            }
            Effect::None
        }
        Action::Close => close(state),
        Action::Toggle => {
            if state.is_open {
                close(state)
            } else {
                update(state, Action::Open)
            }
        }
        Action::DraftChanged(text) => {
            if state.pending {
                debug!("Draft edit ignored while pending");
            } else {
                state.draft = text;
            }
            Effect::None
        }
        Action::Submit(text) => {
            if state.pending {
                debug!("Submit ignored: reply still pending");
                return Effect::None;
            }
            if text.trim().is_empty() {
                debug!("Submit ignored: empty draft");
                return Effect::None;
            }

            state.transcript.push_user(text.clone());
            state.draft.clear();
            state.pending = true;
            state.status_message = String::from("Escribiendo...");

            let payload = ChatPayload::new(text, state.session_id.clone());
            info!(
                "Dispatching message (generation={}, session={}, len={})",
                state.generation,
                state.session_id,
                payload.message.len()
            );
            Effect::Dispatch {
                generation: state.generation,
                payload,
            }
        }
        Action::ReplySettled { generation, outcome } => {
            if generation != state.generation {
                debug!(
                    "Discarding stale settlement (generation {} != {})",
                    generation, state.generation
                );
                return Effect::None;
            }
            if !state.pending {
                warn!("Settlement arrived with nothing pending, ignoring");
                return Effect::None;
            }
            let text = reply_text(&outcome, &state.texts);
            Effect::SchedulePacing { generation, text }
        }
        Action::PacingElapsed { generation, text } => {
            if generation != state.generation || !state.pending {
                debug!(
                    "Discarding stale pacing tick (generation {}, current {}, pending {})",
                    generation, state.generation, state.pending
                );
                return Effect::None;
            }
            state.transcript.push_assistant(text);
            state.pending = false;
            state.status_message.clear();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn close(state: &mut Conversation) -> Effect {
    if !state.is_open {
        return Effect::None;
    }
    state.is_open = false;
    if state.reset_on_close {
        info!("Chat closed, resetting conversation (generation {})", state.generation + 1);
        state.reset();
        Effect::CancelPacing
    } else {
        info!("Chat closed, conversation retained");
        Effect::None
    }
}
