//! # TitleBar Component
//!
//! Header of the open chat panel.
//!
//! ## Responsibilities
//!
//! - Display the assistant's name and tagline
//! - Display the transient status message (e.g. "Escribiendo...")
//! - Show "↓ New" when there is unseen content below the scroll position
//!
//! TitleBar is purely presentational: every field is a prop supplied by the
//! parent each frame.
//!
//! ## Conditional Formatting
//!
//! 1. **Unseen content**: `"VORTEXIA · tagline | Escribiendo... | ↓ New"`
//! 2. **Status message**: `"VORTEXIA · tagline | Escribiendo..."`
//! 3. **Default**: `"VORTEXIA · tagline"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `assistant_name`: shown in bold
/// - `tagline`: shown dimmed after the name
/// - `status_message`: transient status, omitted when empty
/// - `has_unseen_content`: whether there's content below the current scroll position
pub struct TitleBar<'a> {
    pub assistant_name: &'a str,
    pub tagline: &'a str,
    pub status_message: &'a str,
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        assistant_name: &'a str,
        tagline: &'a str,
        status_message: &'a str,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            assistant_name,
            tagline,
            status_message,
            has_unseen_content,
        }
    }

    fn line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled(
                self.assistant_name,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" · {}", self.tagline),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        if self.has_unseen_content {
            spans.push(Span::styled(" | ↓ New", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
