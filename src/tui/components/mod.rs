//! # TUI Components
//!
//! UI components for the chat panel.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from borrowed data:
//! - `TitleBar`: panel header with assistant name, status, and "↓ New"
//! - `Launcher`: closed-panel badge
//! - `MessageBubble`: one transcript entry
//! - `TypingIndicator`: animated dots while a reply is pending
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep local state across frames and emit events:
//! - `InputBox`: single-line draft editor
//! - `MessageList`: scrollable transcript with layout caching
//!
//! Components receive external data as props rather than reading the
//! `Conversation` directly, so each file can be tested on its own.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── title_bar.rs         (panel header)
//! ├── launcher.rs          (closed view)
//! ├── message.rs           (single bubble)
//! ├── typing_indicator.rs  (pending placeholder)
//! ├── message_list.rs      (scrollable container)
//! └── input_box/           (draft editor)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod launcher;
pub mod message;
pub mod message_list;
pub mod typing_indicator;
pub use input_box::{InputBox, InputEvent};
pub use launcher::Launcher;
pub use message_list::{MessageList, MessageListState};
