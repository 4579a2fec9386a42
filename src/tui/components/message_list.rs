//! # MessageList Component
//!
//! Scrollable view of the transcript, with the typing indicator as a
//! trailing placeholder while a reply is pending.
//!
//! `MessageList` is created each frame and wraps `&'a mut MessageListState`
//! (persistent scroll + layout cache) and the transcript (props). Heights are
//! cached per message; the transcript is append-only, so only new entries
//! need measuring unless the width or the conversation generation changes.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::components::typing_indicator::{TYPING_INDICATOR_HEIGHT, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Blank rows between bubbles.
const GAP: u16 = 1;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Last known canvas height, including the typing indicator
    pub canvas_height: u16,
    /// Transcript length at the last render
    seen_messages: usize,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            canvas_height: 0,
            seen_messages: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.canvas_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Pin the viewport to the last row of the canvas.
    pub fn scroll_to_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        self.scroll_state.set_offset(Position { x: current.x, y: max_y });
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// True when part of the conversation is below the viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub generation: u64,
    pub pending: bool,
    pub assistant_name: &'a str,
    pub spinner_frame: usize,
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let messages = self.transcript.messages();

        // 1. Measure anything not already cached
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width, self.generation);
        layout.heights.truncate(reusable);
        for message in messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(MessageBubble::calculate_height(message, content_width) + GAP);
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(messages.len(), content_width, self.generation);

        // A new message always brings the view back to the newest entry
        if messages.len() > self.state.seen_messages {
            self.state.stick_to_bottom = true;
        }
        self.state.seen_messages = messages.len();

        let messages_height = self.state.layout.total_height();
        let indicator_height = if self.pending { TYPING_INDICATOR_HEIGHT } else { 0 };
        let canvas_height = messages_height + indicator_height;

        self.state.viewport_height = area.height;
        self.state.canvas_height = canvas_height;
        if self.state.stick_to_bottom {
            self.state.scroll_to_bottom();
        } else {
            self.state.clamp_scroll();
        }

        // 2. Render visible bubbles into the scroll canvas
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible {
            let top = self.state.layout.top_of(i);
            let height = self.state.layout.heights[i].saturating_sub(GAP);
            let rect = Rect::new(0, top, content_width, height);
            scroll_view.render_widget(MessageBubble::new(&messages[i], self.assistant_name), rect);
        }

        // 3. Typing indicator strictly after the last message
        if self.pending {
            let rect = Rect::new(0, messages_height, content_width, TYPING_INDICATOR_HEIGHT);
            scroll_view.render_widget(
                TypingIndicator::new(self.assistant_name, self.spinner_frame),
                rect,
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached per-message heights (gap included).
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
    generation: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
            generation: 0,
        }
    }

    /// How many cached heights are still valid.
    ///
    /// Messages never change once appended, so everything cached survives
    /// unless the width changed or the conversation was reset.
    pub fn reusable_count(&self, message_count: usize, content_width: u16, generation: u64) -> usize {
        if self.content_width != content_width
            || self.generation != generation
            || message_count < self.message_count
        {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16, generation: u64) {
        self.message_count = message_count;
        self.content_width = content_width;
        self.generation = generation;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Canvas row where message `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        if index == 0 { 0 } else { self.prefix_heights[index - 1] }
    }

    /// Messages intersecting the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(
        state: &mut MessageListState,
        transcript: &Transcript,
        pending: bool,
        width: u16,
        height: u16,
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let mut list = MessageList {
                    state,
                    transcript,
                    generation: 0,
                    pending,
                    assistant_name: "VORTEXIA",
                    spinner_frame: 0,
                };
                let area = f.area();
                list.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4; 3];
        cache.update_metadata(3, 80, 0);

        // Same everything → all reusable
        assert_eq!(cache.reusable_count(3, 80, 0), 3);
        // Appended message → cached three still valid
        assert_eq!(cache.reusable_count(4, 80, 0), 3);
        // Width changed → nothing reusable
        assert_eq!(cache.reusable_count(3, 40, 0), 0);
        // Conversation reset → nothing reusable
        assert_eq!(cache.reusable_count(3, 80, 1), 0);
        // Fewer messages than cached → nothing reusable
        assert_eq!(cache.reusable_count(1, 80, 0), 0);
    }

    #[test]
    fn test_prefix_heights_and_visible_range() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4, 4, 4, 4, 4];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.prefix_heights, vec![4, 8, 12, 16, 20]);
        assert_eq!(cache.total_height(), 20);
        assert_eq!(cache.top_of(0), 0);
        assert_eq!(cache.top_of(3), 12);

        // Viewport rows 8..12 with a 2-row buffer either side: rows 6..14
        assert_eq!(cache.visible_range(8, 4), 1..4);
    }

    #[test]
    fn test_typing_indicator_renders_only_while_pending() {
        let transcript = Transcript::seeded("Hola");
        let mut state = MessageListState::new();

        let idle = render_text(&mut state, &transcript, false, 40, 12);
        assert!(idle.contains("Hola"));
        assert!(!idle.contains('●'));

        let waiting = render_text(&mut state, &transcript, true, 40, 12);
        assert!(waiting.contains('●'));
    }

    #[test]
    fn test_sticks_to_newest_message() {
        let mut transcript = Transcript::seeded("greeting");
        for i in 0..20 {
            transcript.push_user(format!("message number {i}"));
        }
        let mut state = MessageListState::new();
        let text = render_text(&mut state, &transcript, false, 40, 10);

        assert!(text.contains("message number 19"));
        assert!(!text.contains("greeting"));
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_scroll_up_unpins_and_flags_unseen() {
        let mut transcript = Transcript::seeded("greeting");
        for i in 0..20 {
            transcript.push_user(format!("message number {i}"));
        }
        let mut state = MessageListState::new();
        render_text(&mut state, &transcript, false, 40, 10);

        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);

        state.scroll_state.set_offset(Position { x: 0, y: 0 });
        assert!(state.has_unseen_content());
    }

    #[test]
    fn test_scrolled_up_position_survives_redraw() {
        let mut transcript = Transcript::seeded("greeting");
        for i in 0..20 {
            transcript.push_user(format!("message number {i}"));
        }
        let mut state = MessageListState::new();
        render_text(&mut state, &transcript, false, 40, 10);

        state.handle_event(&TuiEvent::ScrollPageUp);
        state.scroll_state.set_offset(Position { x: 0, y: 0 });
        let text = render_text(&mut state, &transcript, false, 40, 10);

        assert!(!state.stick_to_bottom);
        assert!(text.contains("greeting"));
        assert!(!text.contains("message number 19"));
    }

    #[test]
    fn test_new_reply_repins_after_scrolling_up() {
        let mut transcript = Transcript::seeded("greeting");
        for i in 0..20 {
            transcript.push_user(format!("message number {i}"));
        }
        let mut state = MessageListState::new();
        render_text(&mut state, &transcript, true, 40, 10);

        state.handle_event(&TuiEvent::ScrollPageUp);
        state.scroll_state.set_offset(Position { x: 0, y: 0 });
        assert!(!state.stick_to_bottom);

        transcript.push_assistant("NEWEST REPLY".to_string());
        let text = render_text(&mut state, &transcript, false, 40, 10);

        assert!(text.contains("NEWEST REPLY"));
        assert!(state.stick_to_bottom);
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_scrolling_back_down_repins() {
        let mut state = MessageListState::new();
        state.viewport_height = 10;
        state.canvas_height = 30;
        state.stick_to_bottom = false;
        state.scroll_state.set_offset(Position { x: 0, y: 25 });

        state.repin_if_at_bottom();

        assert!(state.stick_to_bottom);
        assert_eq!(state.scroll_state.offset().y, 20);
    }
}
