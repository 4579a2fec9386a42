//! Cursor position and internal scroll for the input box.
//!
//! The text buffer is owned by `InputBox`; every method takes it explicitly.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::text_wrap::{CONTENT_OFFSET, MAX_VISIBLE_LINES, inner_width, wrap_line_count, wrap_options};

pub(super) struct CursorState {
    /// Byte offset in the buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    /// Place the cursor after the last character.
    pub fn move_to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
        self.scroll_offset = 0;
    }

    /// Wrapped line and display column of the cursor.
    fn line_and_column(&self, buffer: &str, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        let line = lines.len().saturating_sub(1) as u16;

        // textwrap trims the spaces between lines, so locate the last wrapped
        // segment in the untrimmed text and measure from there.
        let mut search = 0;
        let mut last_start = 0;
        for segment in &lines {
            if let Some(i) = before[search..].find(segment.as_ref()) {
                last_start = search + i;
                search = last_start + segment.len();
            }
        }
        let column = (before[last_start..].width() as u16).min(width);
        (line, column)
    }

    /// Keep the cursor line within the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        if wrap_line_count(buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }
        let (line, _) = self.line_and_column(buffer, width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = line + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Screen coordinates of the cursor within `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let (line, column) = self.line_and_column(buffer, width);
        let row = line.saturating_sub(self.scroll_offset);
        (area.x + CONTENT_OFFSET + column, area.y + 1 + row)
    }
}
