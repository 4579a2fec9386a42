use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into part of the chat screen.
///
/// Props live in struct fields. `render` takes `&mut self` so stateful
/// pieces (the message list's layout cache, the input box's scroll) can
/// update themselves while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal input.
pub trait EventHandler {
    /// What the component reports to the event loop.
    type Event;

    /// Returns `Some` when the input means something to the parent.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
