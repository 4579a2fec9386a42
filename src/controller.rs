//! # Controller
//!
//! Runs the effects that `core::action::update` asks for and feeds the
//! results back in as actions. This is the glue between the pure reducer and
//! the outside world:
//!
//! - `Effect::Dispatch` spawns one task that POSTs to the webhook and reports
//!   `Action::ReplySettled`. The task is never cancelled; a late answer is
//!   discarded by the generation check in `update()`.
//! - `Effect::SchedulePacing` spawns a sleep that reports
//!   `Action::PacingElapsed`. Its `AbortHandle` is owned here, so resets,
//!   quitting, and dropping the controller all cancel it.
//!
//! Background tasks talk back over a single unbounded channel. Nothing
//! touches `Conversation` except the thread that owns the `Controller`.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Conversation;
use crate::webhook::{ChatPayload, WebhookClient};

pub struct Controller {
    state: Conversation,
    client: Arc<dyn WebhookClient>,
    pacing_delay: Duration,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    pacing: Option<AbortHandle>,
}

impl Controller {
    pub fn new(state: Conversation, client: Arc<dyn WebhookClient>, pacing_delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            client,
            pacing_delay,
            tx,
            rx,
            pacing: None,
        }
    }

    pub fn from_config(config: &ResolvedConfig, client: Arc<dyn WebhookClient>) -> Self {
        Self::new(Conversation::from_config(config), client, config.pacing_delay)
    }

    pub fn state(&self) -> &Conversation {
        &self.state
    }

    /// Applies an action and runs whatever effect it produces.
    ///
    /// Returns `true` when the caller should shut down.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let effect = update(&mut self.state, action);
        self.run_effect(effect)
    }

    pub fn submit(&mut self, text: String) {
        self.dispatch(Action::Submit(text));
    }

    pub fn set_draft(&mut self, text: String) {
        self.dispatch(Action::DraftChanged(text));
    }

    pub fn toggle(&mut self) {
        self.dispatch(Action::Toggle);
    }

    pub fn open(&mut self) {
        self.dispatch(Action::Open);
    }

    pub fn close(&mut self) {
        self.dispatch(Action::Close);
    }

    /// Applies every background action that is ready right now.
    ///
    /// Returns `true` if at least one was applied.
    pub fn drain(&mut self) -> bool {
        let mut applied = false;
        while let Ok(action) = self.rx.try_recv() {
            debug!("Controller received: {:?}", action);
            self.dispatch(action);
            applied = true;
        }
        applied
    }

    /// Waits for the next background action and applies it.
    pub async fn step(&mut self) {
        // `self.tx` keeps the channel open, so `recv` only yields actions.
        if let Some(action) = self.rx.recv().await {
            debug!("Controller received: {:?}", action);
            self.dispatch(action);
        }
    }

    /// Waits until nothing is pending.
    ///
    /// With a webhook that never answers this never returns; callers that
    /// care wrap it in `tokio::time::timeout`.
    pub async fn settle(&mut self) {
        while self.state.pending {
            self.step().await;
        }
    }

    fn run_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Dispatch { generation, payload } => {
                self.spawn_dispatch(generation, payload);
                false
            }
            Effect::SchedulePacing { generation, text } => {
                self.schedule_pacing(generation, text);
                false
            }
            Effect::CancelPacing => {
                self.cancel_pacing();
                false
            }
            Effect::Quit => {
                self.cancel_pacing();
                true
            }
        }
    }

    fn spawn_dispatch(&self, generation: u64, payload: ChatPayload) {
        info!(
            "Spawning webhook call via {} (generation={})",
            self.client.name(),
            generation
        );
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.send(&payload).await;
            match &outcome {
                Ok(_) => debug!("Webhook call settled OK (generation={})", generation),
                Err(e) => info!("Webhook call failed (generation={}): {}", generation, e),
            }
            if tx.send(Action::ReplySettled { generation, outcome }).is_err() {
                warn!("Failed to report settlement: controller dropped");
            }
        });
    }

    fn schedule_pacing(&mut self, generation: u64, text: String) {
        self.cancel_pacing();
        let delay = self.pacing_delay;
        let tx = self.tx.clone();
        debug!("Pacing reply for {:?} (generation={})", delay, generation);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Action::PacingElapsed { generation, text }).is_err() {
                warn!("Failed to report pacing: controller dropped");
            }
        });
        self.pacing = Some(handle.abort_handle());
    }

    fn cancel_pacing(&mut self) {
        if let Some(handle) = self.pacing.take() {
            if !handle.is_finished() {
                debug!("Cancelling scheduled pacing");
            }
            handle.abort();
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.cancel_pacing();
    }
}
