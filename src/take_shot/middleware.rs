// Take-shot middleware: the coordination between local prompts, the
// signaling channel and the overlay.
//
// Outbound: every PROMPT is echoed to the external API right away, then the
// broadcast waits behind the outbound gate (2 × base interval). Only the last
// prompt of a burst is sent, and the conference is looked up when the gate
// fires, not when the prompt arrived.
//
// Inbound: every channel message passes through untouched. Those that
// classify as take-shot prompts also reset the inbound gate (base interval).
// When it fires, the last sender wins: the flag changes, the notification is
// shown and, if enabled, an acknowledgment is echoed.

use std::sync::{Arc, Weak};

use tracing::debug;

use super::trigger::PromptTrigger;
use crate::config::{TakeShotConfig, VisibilityMode};
use crate::debounce::{DebounceGate, GateStats};
use crate::protocol::classifier::{classify, Classification};
use crate::protocol::message::{
    ExternalActionCall, NetworkNotification, BROADCAST_TARGET, EXTERNAL_ACTION_CALL,
};
use crate::session::traits::{ConferenceSource, ExternalApi};
use crate::store::action::{Action, PromptEvent};
use crate::store::{Middleware, Next, Store};

pub struct TakeShotMiddleware {
    config: TakeShotConfig,
    conference: Arc<dyn ConferenceSource>,
    external: Arc<dyn ExternalApi>,
    trigger: Arc<PromptTrigger>,
    outbound: DebounceGate,
    inbound: DebounceGate,
    /// Only present in auto-hide mode.
    auto_hide: Option<Arc<DebounceGate>>,
}

impl TakeShotMiddleware {
    pub fn new(
        config: TakeShotConfig,
        conference: Arc<dyn ConferenceSource>,
        external: Arc<dyn ExternalApi>,
        trigger: Arc<PromptTrigger>,
    ) -> Self {
        let auto_hide = match config.visibility {
            VisibilityMode::AutoHide(d) => Some(Arc::new(DebounceGate::new("auto-hide", d))),
            VisibilityMode::Toggle => None,
        };
        Self {
            outbound: DebounceGate::new("outbound", config.outbound_delay()),
            inbound: DebounceGate::new("inbound", config.inbound_delay()),
            auto_hide,
            config,
            conference,
            external,
            trigger,
        }
    }

    pub fn outbound_stats(&self) -> GateStats {
        self.outbound.stats()
    }

    pub fn inbound_stats(&self) -> GateStats {
        self.inbound.stats()
    }

    /// `None` in toggle mode, where nothing ever hides the overlay on a timer.
    pub fn auto_hide_stats(&self) -> Option<GateStats> {
        self.auto_hide.as_ref().map(|gate| gate.stats())
    }

    /// Echo the prompt locally and (re)arm the outbound broadcast.
    fn on_prompt_event(&self, event: &PromptEvent) {
        let echo = ExternalActionCall::prompt(
            &event.call,
            event.participant_id.clone(),
            &event.display_name,
        );
        self.external.emit(EXTERNAL_ACTION_CALL, echo.to_json());

        let notification = NetworkNotification::take_shot(event.display_name.as_str());
        let source = Arc::clone(&self.conference);

        self.outbound.schedule(async move {
            // Resolved now, at fire time: the call may have been joined mid-window
            let Some(conference) = source.current() else {
                debug!(from = %notification.from, "No conference, dropping take-shot broadcast");
                return;
            };
            conference
                .send_endpoint_message(BROADCAST_TARGET, notification.to_json())
                .await;
            debug!(from = %notification.from, "Take-shot prompt broadcast");
        });
    }

    /// (Re)arm the local reaction for a matched inbound prompt.
    fn on_matched_message(&self, store: &Arc<Store>, from: String) {
        let store: Weak<Store> = Arc::downgrade(store);
        let trigger = Arc::clone(&self.trigger);
        let external = Arc::clone(&self.external);
        let auto_hide = self.auto_hide.clone();
        let visibility = self.config.visibility;
        let echo_acknowledgment = self.config.echo_acknowledgment;

        self.inbound.schedule(async move {
            let Some(store) = store.upgrade() else {
                return;
            };

            let visible = match visibility {
                VisibilityMode::Toggle => None,
                VisibilityMode::AutoHide(_) => Some(true),
            };
            store.dispatch(Action::ToggleVisibility {
                display_name: from.clone(),
                visible,
            });

            trigger.notify(&from);

            if echo_acknowledgment {
                external.emit(
                    EXTERNAL_ACTION_CALL,
                    ExternalActionCall::acknowledgment(&from).to_json(),
                );
            }

            if let Some(gate) = auto_hide.as_deref() {
                schedule_hide(gate, Arc::downgrade(&store), from);
            }

            debug!("Take-shot prompt shown");
        });
    }
}

fn schedule_hide(gate: &DebounceGate, store: Weak<Store>, display_name: String) {
    gate.schedule(async move {
        if let Some(store) = store.upgrade() {
            store.dispatch(Action::ToggleVisibility {
                display_name,
                visible: Some(false),
            });
        }
    });
}

impl Middleware for TakeShotMiddleware {
    fn handle(&self, store: &Arc<Store>, action: Action, next: Next<'_>) {
        match &action {
            Action::Prompt(event) => self.on_prompt_event(event),
            Action::EndpointMessageReceived(message) => {
                if let Classification::Matched { from } = classify(message) {
                    self.on_matched_message(store, from);
                }
            }
            Action::ToggleVisibility { .. } | Action::ParticipantCountChanged(_) => {}
        }
        next.run(action);
    }
}
