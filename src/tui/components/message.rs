use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message, Sender};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles take at most this share of the row (percent).
const BUBBLE_WIDTH_PERCENT: u16 = 85;

/// Label shown on user bubbles.
pub const USER_LABEL: &str = "Tú";

/// A stateless component that renders one chat bubble.
///
/// User bubbles hug the right edge, assistant bubbles the left, each at most
/// 85% of the row. The border title carries the sender and `HH:MM`.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` so the parent `MessageList` can lay out the scroll canvas
/// without rendering first. Its options must match `Paragraph`'s wrapping.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    /// Display name for assistant messages.
    pub assistant_name: &'a str,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, assistant_name: &'a str) -> Self {
        Self {
            message,
            assistant_name,
        }
    }

    /// Width of a bubble inside a row of `row_width` columns.
    pub fn bubble_width(row_width: u16) -> u16 {
        let scaled = (row_width as u32 * BUBBLE_WIDTH_PERCENT as u32 / 100) as u16;
        scaled.max(HORIZONTAL_OVERHEAD + 1).min(row_width)
    }

    /// Where the bubble sits within its row.
    pub fn bubble_rect(sender: Sender, row: Rect) -> Rect {
        let width = Self::bubble_width(row.width);
        let x = match sender {
            Sender::User => row.x + row.width.saturating_sub(width),
            Sender::Assistant => row.x,
        };
        Rect::new(x, row.y, width, row.height)
    }

    /// Height of the bubble for a row `row_width` columns wide.
    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> String {
        let who = match self.message.sender {
            Sender::User => USER_LABEL,
            Sender::Assistant => self.assistant_name,
        };
        format!("{} · {}", who, self.message.display_time())
    }
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::LightRed),
        Sender::Assistant => Style::default().fg(Color::Gray),
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.message.sender);
        let border_style = match self.message.sender {
            Sender::User => style,
            Sender::Assistant => Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
        };

        let bubble = Self::bubble_rect(self.message.sender, area);
        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(bubble);
        block.render(bubble, buf);

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for MessageBubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
