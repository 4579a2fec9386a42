use crate::core::state::Conversation;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Launcher, MessageList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draws one frame: the launcher while closed, the chat panel while open.
pub fn draw_ui(frame: &mut Frame, conversation: &Conversation, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();
    if !conversation.is_open {
        Launcher::new(&tui.assistant_name, &tui.tagline, conversation.pending).render(frame, area);
        return;
    }

    tui.input_box.disabled = conversation.pending;
    let input_height = tui.input_box.calculate_height(area.width);

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(area);

    MessageList {
        state: &mut tui.message_list,
        transcript: &conversation.transcript,
        generation: conversation.generation,
        pending: conversation.pending,
        assistant_name: &tui.assistant_name,
        spinner_frame,
    }
    .render(frame, main_area);

    // After the list so "↓ New" reflects this frame's scroll position
    TitleBar::new(
        &tui.assistant_name,
        &tui.tagline,
        &conversation.status_message,
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);
}
