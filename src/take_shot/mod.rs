// Take-shot feature: wiring of the prompt dispatcher, the debounce middleware,
// the visibility store and the notification trigger into one session object.
//
// One `TakeShot` per call. Everything it owns (timers included) goes away
// with it, so two sessions in the same process never share state.

pub mod middleware;
pub mod prompt;
pub mod trigger;

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::config::TakeShotConfig;
use crate::debounce::GateStats;
use crate::protocol::message::ChannelMessage;
use crate::session::traits::{ConferenceSource, ExternalApi, Notifier};
use crate::store::action::Action;
use crate::store::reducer::{is_overlay_visible, TakeShotState};
use crate::store::{Middleware, Store};

use middleware::TakeShotMiddleware;
use trigger::PromptTrigger;

/// The external systems a session talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub conference: Arc<dyn ConferenceSource>,
    pub external: Arc<dyn ExternalApi>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct TakeShot {
    store: Arc<Store>,
    middleware: Arc<TakeShotMiddleware>,
}

impl TakeShot {
    pub fn new(config: TakeShotConfig, collaborators: Collaborators) -> Self {
        Self::with_downstream(config, collaborators, Vec::new())
    }

    /// Build a session whose chain continues into `downstream` after the
    /// take-shot middleware. Downstream middleware sees every action,
    /// including channel messages that weren't prompts.
    pub fn with_downstream(
        config: TakeShotConfig,
        collaborators: Collaborators,
        downstream: Vec<Arc<dyn Middleware>>,
    ) -> Self {
        let trigger = Arc::new(PromptTrigger::new(
            collaborators.notifier,
            Arc::clone(&collaborators.external),
            config.notification_timeout,
        ));

        let middleware = Arc::new(TakeShotMiddleware::new(
            config,
            collaborators.conference,
            collaborators.external,
            Arc::clone(&trigger),
        ));

        let mut chain: Vec<Arc<dyn Middleware>> =
            vec![middleware.clone() as Arc<dyn Middleware>];
        chain.extend(downstream);

        let store = Store::new(chain);
        store.subscribe(trigger.listener());

        Self { store, middleware }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// The user pressed "take a shot".
    pub fn dispatch_prompt(
        &self,
        call: Value,
        participant_id: Option<String>,
        display_name: &str,
    ) -> Result<()> {
        prompt::dispatch_prompt(&self.store, call, participant_id, display_name)
    }

    /// Feed a message from the signaling channel.
    pub fn receive(&self, message: ChannelMessage) {
        self.store.dispatch(Action::EndpointMessageReceived(message));
    }

    pub fn set_participant_count(&self, count: usize) {
        self.store.dispatch(Action::ParticipantCountChanged(count));
    }

    pub fn state(&self) -> TakeShotState {
        self.store.state()
    }

    pub fn is_overlay_visible(&self) -> bool {
        is_overlay_visible(&self.store.state())
    }

    pub fn outbound_stats(&self) -> GateStats {
        self.middleware.outbound_stats()
    }

    pub fn inbound_stats(&self) -> GateStats {
        self.middleware.inbound_stats()
    }

    pub fn auto_hide_stats(&self) -> Option<GateStats> {
        self.middleware.auto_hide_stats()
    }
}
