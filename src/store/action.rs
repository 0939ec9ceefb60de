// Actions flowing through the store.

use serde_json::Value;

use crate::protocol::message::ChannelMessage;

/// A user asked everyone in the call to take a shot.
///
/// Immutable once built. `call` is an opaque descriptor the host app
/// supplied; it is only ever echoed back, never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptEvent {
    pub call: Value,
    pub participant_id: Option<String>,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Locally triggered prompt (PROMPT).
    Prompt(PromptEvent),
    /// Overlay flag change (TOGGLE_VISIBILITY). `None` flips the flag,
    /// `Some(v)` forces it.
    ToggleVisibility {
        display_name: String,
        visible: Option<bool>,
    },
    /// Raw message from the signaling channel, ours or not.
    EndpointMessageReceived(ChannelMessage),
    /// Number of participants in the call changed.
    ParticipantCountChanged(usize),
}

impl Action {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Prompt(_) => "PROMPT",
            Action::ToggleVisibility { .. } => "TOGGLE_VISIBILITY",
            Action::EndpointMessageReceived(_) => "ENDPOINT_MESSAGE_RECEIVED",
            Action::ParticipantCountChanged(_) => "PARTICIPANT_COUNT_CHANGED",
        }
    }
}
