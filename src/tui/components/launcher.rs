//! # Launcher Component
//!
//! What the terminal shows while the chat panel is closed: a centred
//! badge with the assistant's name and the key that opens the panel.
//! The conversation keeps running behind it, so a pending reply is noted.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

pub const OPEN_HINT: &str = "Pulsa Ctrl+O para abrir el chat";
const EXIT_HINT: &str = "Ctrl+C para salir";
const PENDING_NOTE: &str = "Respuesta en camino…";

pub struct Launcher<'a> {
    pub assistant_name: &'a str,
    pub tagline: &'a str,
    pub pending: bool,
}

impl<'a> Launcher<'a> {
    pub fn new(assistant_name: &'a str, tagline: &'a str, pending: bool) -> Self {
        Self {
            assistant_name,
            tagline,
            pending,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(Span::styled(
                self.assistant_name,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.tagline, Style::default().fg(Color::DarkGray))),
            Line::default(),
            Line::from(Span::styled(OPEN_HINT, Style::default().fg(Color::White))),
            Line::from(Span::styled(EXIT_HINT, Style::default().fg(Color::DarkGray))),
        ];
        if self.pending {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                PENDING_NOTE,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }
}

impl<'a> Component for Launcher<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let width = lines
            .iter()
            .map(|l| l.width() as u16)
            .max()
            .unwrap_or(0)
            .saturating_add(6)
            .min(area.width);
        let height = (lines.len() as u16).saturating_add(2).min(area.height);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [badge] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            badge,
        );
    }
}
