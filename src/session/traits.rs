// Collaborator traits. All of these are fire-and-forget: no return values,
// no error channel. A collaborator that fails is expected to swallow it.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// An established conference that can broadcast endpoint messages.
#[async_trait]
pub trait Conference: Send + Sync {
    /// Send `payload` to `target` ("" broadcasts to every participant).
    /// Delivery is best-effort; there is no acknowledgment.
    async fn send_endpoint_message(&self, target: &str, payload: Value);
}

/// Lazy accessor for the current conference.
///
/// Read at the moment a debounced send fires, never when it is scheduled,
/// so a conference that comes up mid-window still receives the broadcast.
pub trait ConferenceSource: Send + Sync {
    fn current(&self) -> Option<Arc<dyn Conference>>;
}

impl<F> ConferenceSource for F
where
    F: Fn() -> Option<Arc<dyn Conference>> + Send + Sync,
{
    fn current(&self) -> Option<Arc<dyn Conference>> {
        self()
    }
}

/// A conference slot owned by the surrounding client.
///
/// The client sets it once the call is joined and clears it on leave.
/// The take-shot coordinator only ever reads it.
#[derive(Default)]
pub struct SharedConference {
    slot: RwLock<Option<Arc<dyn Conference>>>,
}

impl SharedConference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, conference: Arc<dyn Conference>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(conference);
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl ConferenceSource for SharedConference {
    fn current(&self) -> Option<Arc<dyn Conference>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Sink for events the host application listens to (telemetry and echoes).
pub trait ExternalApi: Send + Sync {
    fn emit(&self, kind: &str, data: Value);
}

/// A localizable notification: a title key plus its interpolation arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientNotification {
    pub title_key: String,
    pub title_arguments: BTreeMap<String, String>,
}

impl TransientNotification {
    pub fn new(title_key: impl Into<String>) -> Self {
        Self {
            title_key: title_key.into(),
            title_arguments: BTreeMap::new(),
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.title_arguments.insert(key.into(), value.into());
        self
    }
}

/// The client's notification system.
pub trait Notifier: Send + Sync {
    /// Show `notification` and dismiss it after `timeout`.
    fn show_transient(&self, notification: TransientNotification, timeout: Duration);
}
