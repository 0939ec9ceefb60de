// Notification/Animation Trigger.
//
// Two fire-and-forget outputs for a prompt that made it through the inbound
// debounce: a transient notification naming the sender, and an external
// "play the animation" signal whenever the overlay flag turns on.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::protocol::message::TAKE_SHOT_ANIMATION;
use crate::session::traits::{ExternalApi, Notifier, TransientNotification};
use crate::store::action::Action;
use crate::store::reducer::{is_overlay_visible, TakeShotState};
use crate::store::Listener;

/// Localization key of the "someone prompted you" notification.
pub const PROMPTED_TITLE_KEY: &str = "takeShot.promptedBy";

/// Title argument carrying the sender's display name.
pub const DISPLAY_NAME_ARGUMENT: &str = "participantDisplayName";

pub struct PromptTrigger {
    notifier: Arc<dyn Notifier>,
    external: Arc<dyn ExternalApi>,
    notification_timeout: Duration,
}

impl PromptTrigger {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        external: Arc<dyn ExternalApi>,
        notification_timeout: Duration,
    ) -> Self {
        Self {
            notifier,
            external,
            notification_timeout,
        }
    }

    /// Show the transient notification for a debounced prompt.
    pub fn notify(&self, display_name: &str) {
        let notification = TransientNotification::new(PROMPTED_TITLE_KEY)
            .with_argument(DISPLAY_NAME_ARGUMENT, display_name);
        self.notifier
            .show_transient(notification, self.notification_timeout);
    }

    /// Emit the animation signal if this action turned the flag on.
    pub fn on_transition(&self, action: &Action, before: &TakeShotState, after: &TakeShotState) {
        if before.visible || !after.visible {
            return;
        }
        let display_name = match action {
            Action::ToggleVisibility { display_name, .. } => display_name.as_str(),
            _ => "",
        };
        debug!(display_name, "Overlay turned on, signalling animation");
        self.external.emit(
            TAKE_SHOT_ANIMATION,
            json!({
                "displayName": display_name,
                "overlayVisible": is_overlay_visible(after),
            }),
        );
    }

    /// Wrap this trigger as a store listener.
    pub fn listener(self: &Arc<Self>) -> Listener {
        let trigger = Arc::clone(self);
        Arc::new(
            move |action: &Action, before: &TakeShotState, after: &TakeShotState| {
                trigger.on_transition(action, before, after)
            },
        )
    }
}
