// In-memory collaborators that record every call.
//
// Used by the `simulate` command and by the integration tests to observe
// what the coordinator sent, emitted and showed.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::traits::{Conference, ExternalApi, Notifier, TransientNotification};
use crate::protocol::message::{ChannelMessage, NetworkNotification};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One endpoint message as the conference saw it.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub target: String,
    pub payload: Value,
    pub sent_at: DateTime<Utc>,
}

/// A conference that keeps every message instead of sending it.
#[derive(Default)]
pub struct RecordingConference {
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingConference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        lock(&self.sent).clone()
    }

    pub fn sent_count(&self) -> usize {
        lock(&self.sent).len()
    }
}

#[async_trait]
impl Conference for RecordingConference {
    async fn send_endpoint_message(&self, target: &str, payload: Value) {
        debug!(endpoint = target, %payload, "Recorded endpoint message");
        lock(&self.sent).push(SentMessage {
            target: target.to_string(),
            payload,
            sent_at: Utc::now(),
        });
    }
}

/// One external API event.
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub kind: String,
    pub data: Value,
    pub emitted_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct RecordingExternalApi {
    events: Mutex<Vec<EmittedEvent>>,
}

impl RecordingExternalApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EmittedEvent> {
        lock(&self.events).clone()
    }

    /// Events of a single kind, oldest first.
    pub fn events_of(&self, kind: &str) -> Vec<EmittedEvent> {
        lock(&self.events)
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }
}

impl ExternalApi for RecordingExternalApi {
    fn emit(&self, kind: &str, data: Value) {
        lock(&self.events).push(EmittedEvent {
            kind: kind.to_string(),
            data,
            emitted_at: Utc::now(),
        });
    }
}

/// A notification as it was handed to the notifier.
#[derive(Debug, Clone)]
pub struct ShownNotification {
    pub notification: TransientNotification,
    pub timeout: Duration,
    pub shown_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<ShownNotification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<ShownNotification> {
        lock(&self.shown).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_transient(&self, notification: TransientNotification, timeout: Duration) {
        lock(&self.shown).push(ShownNotification {
            notification,
            timeout,
            shown_at: Utc::now(),
        });
    }
}

/// Inbound prompts for a simulated call: `count` messages taking turns
/// through `senders`, or one per sender when `count` is `None`.
///
/// Each sender keeps a stable endpoint id (`endpoint-<index>`).
pub fn remote_prompts(senders: &[String], count: Option<usize>) -> Vec<ChannelMessage> {
    if senders.is_empty() {
        return Vec::new();
    }
    let count = count.unwrap_or(senders.len());
    (0..count)
        .map(|n| {
            let index = n % senders.len();
            ChannelMessage::new(
                Some(format!("endpoint-{index}")),
                NetworkNotification::take_shot(senders[index].as_str()).to_json(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::classifier::{classify, Classification};

    fn names(messages: &[ChannelMessage]) -> Vec<String> {
        messages
            .iter()
            .map(|m| match classify(m) {
                Classification::Matched { from } => from,
                Classification::Unmatched => panic!("not a prompt: {m:?}"),
            })
            .collect()
    }

    #[test]
    fn test_one_prompt_per_sender_by_default() {
        let senders = vec!["Alice".to_string(), "Bob".to_string()];
        let messages = remote_prompts(&senders, None);
        assert_eq!(names(&messages), vec!["Alice", "Bob"]);
        assert_eq!(messages[1].participant_id.as_deref(), Some("endpoint-1"));
    }

    #[test]
    fn test_count_cycles_through_senders() {
        let senders = vec!["Alice".to_string(), "Bob".to_string()];
        let messages = remote_prompts(&senders, Some(5));
        assert_eq!(names(&messages), vec!["Alice", "Bob", "Alice", "Bob", "Alice"]);
        assert_eq!(messages[4].participant_id.as_deref(), Some("endpoint-0"));
    }

    #[test]
    fn test_zero_count_or_no_senders_is_empty() {
        let senders = vec!["Alice".to_string()];
        assert!(remote_prompts(&senders, Some(0)).is_empty());
        assert!(remote_prompts(&[], Some(3)).is_empty());
    }
}
