//! # Core Conversation Logic
//!
//! This module contains the chat widget's business logic.
//! It knows nothing about any specific UI technology or HTTP client.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Conversation (state) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. No network.     │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │       Controller        │
//!                    │ (webhook task, pacing)  │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │  headless  │
//!             │ (ratatui)  │            │  (tests)   │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Conversation` struct, all controller state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`message`]: `Message` and the append-only `Transcript`
//! - [`session`]: `SessionId` sent with every webhook call
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod message;
pub mod session;
pub mod state;
