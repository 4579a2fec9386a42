//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into controller calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Key Map
//!
//! - `Ctrl+O` toggles the chat panel (the launcher is shown while closed)
//! - `Esc` closes the panel
//! - `Ctrl+C` quits
//! - Up/Down, PageUp/PageDown and the mouse wheel scroll the transcript
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply pending): draws every ~80ms so the typing
//!   indicator moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resizes, or
//!   background actions.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::controller::Controller;
use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::webhook::HttpWebhook;

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of the conversation)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub assistant_name: String,
    pub tagline: String,
    /// Generation the message list was last laid out for
    seen_generation: u64,
}

impl TuiState {
    pub fn new(assistant_name: String, tagline: String, placeholder: String) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(placeholder),
            assistant_name,
            tagline,
            seen_generation: 0,
        }
    }

    /// Follows the conversation after the controller has changed it.
    fn sync(&mut self, draft: &str, generation: u64) {
        self.input_box.sync(draft);
        if generation != self.seen_generation {
            self.message_list = MessageListState::new();
            self.seen_generation = generation;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Runs the chat until the user quits. Must be called inside a tokio runtime.
pub fn run(config: ResolvedConfig, start_open: bool) -> std::io::Result<()> {
    let webhook = HttpWebhook::new(config.webhook_url.clone(), config.request_timeout)
        .map_err(std::io::Error::other)?;
    info!("Webhook endpoint: {}", webhook.url());

    let mut controller = Controller::from_config(&config, Arc::new(webhook));
    let mut tui = TuiState::new(
        config.assistant_name.clone(),
        config.tagline.clone(),
        config.placeholder.clone(),
    );
    if start_open {
        controller.open();
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        let animating = controller.state().pending && controller.state().is_open;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 300) as usize;
            terminal.draw(|f| ui::draw_ui(f, controller.state(), &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut controller, &mut tui, event) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        if controller.drain() {
            needs_redraw = true;
        }
        let state = controller.state();
        tui.sync(&state.draft, state.generation);
    }

    info!("Shutting down (session={})", controller.state().session_id);
    drop(controller);
    ratatui::restore();
    Ok(())
}

/// Routes one terminal event. Returns `true` when the app should quit.
fn handle_event(controller: &mut Controller, tui: &mut TuiState, event: TuiEvent) -> bool {
    match event {
        TuiEvent::ForceQuit => return controller.dispatch(Action::Quit),
        TuiEvent::Resize => {}
        TuiEvent::ToggleChat => controller.toggle(),
        _ if !controller.state().is_open => {}
        TuiEvent::Escape => controller.close(),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => {
                controller.submit(text);
                if controller.state().pending {
                    tui.message_list.stick_to_bottom = true;
                } else {
                    debug!("Submit was not accepted");
                }
            }
            Some(InputEvent::ContentChanged) => {
                controller.set_draft(tui.input_box.buffer.clone());
            }
            Some(InputEvent::CursorMoved) | None => {}
        },
    }
    let state = controller.state();
    tui.sync(&state.draft, state.generation);
    false
}
