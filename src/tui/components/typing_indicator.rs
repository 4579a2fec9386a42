//! Placeholder bubble shown after the last message while a reply is pending.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

/// Rows the indicator occupies (border + one line of dots + border).
pub const TYPING_INDICATOR_HEIGHT: u16 = 3;
const DOT_COUNT: usize = 3;
/// Bubble width: borders, padding, and the dots with spaces between them.
const WIDTH: u16 = 2 + 2 + (DOT_COUNT as u16 * 2 - 1);

pub struct TypingIndicator<'a> {
    pub assistant_name: &'a str,
    /// Animation frame counter; the lit dot advances once per frame.
    pub frame: usize,
}

impl<'a> TypingIndicator<'a> {
    pub fn new(assistant_name: &'a str, frame: usize) -> Self {
        Self {
            assistant_name,
            frame,
        }
    }

    fn dots(&self) -> Line<'static> {
        let lit = self.frame % DOT_COUNT;
        let spans: Vec<Span<'static>> = (0..DOT_COUNT)
            .flat_map(|i| {
                let style = if i == lit {
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
                };
                let dot = Span::styled("●", style);
                if i + 1 < DOT_COUNT {
                    vec![dot, Span::raw(" ")]
                } else {
                    vec![dot]
                }
            })
            .collect();
        Line::from(spans)
    }
}

impl<'a> Widget for TypingIndicator<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Wide enough for the sender title when there is room.
        let title_width = self.assistant_name.chars().count() as u16 + 2;
        let width = WIDTH.max(title_width).min(area.width);
        let bubble = Rect::new(area.x, area.y, width, area.height.min(TYPING_INDICATOR_HEIGHT));

        let border_style = Style::default().fg(Color::Red).add_modifier(Modifier::DIM);
        let block = Block::bordered()
            .title(self.assistant_name)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(1));

        let inner = block.inner(bubble);
        block.render(bubble, buf);
        Paragraph::new(self.dots()).render(inner, buf);
    }
}
