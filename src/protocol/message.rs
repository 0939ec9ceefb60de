// Wire and event payloads.
//
// Everything here is serde-shaped so it can be handed to the channel or the
// external event sink as a `serde_json::Value` without hand-built JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator carried in the `type` field of a take-shot prompt.
pub const TAKE_SHOT_PROMPT_TYPE: &str = "take-shot-prompt-result";

/// Endpoint id meaning "every participant in the conference".
pub const BROADCAST_TARGET: &str = "";

/// External event kind used for both the local prompt echo and the
/// acknowledgment sent when we were prompted.
pub const EXTERNAL_ACTION_CALL: &str = "EXTERNAL_ACTION_CALL";

/// External event kind telling the host app to play the overlay animation.
pub const TAKE_SHOT_ANIMATION: &str = "TAKE_SHOT_ANIMATION";

/// `action` value inside the acknowledgment's call descriptor.
pub const PROMPTED_TO_TAKE_SHOT: &str = "prompted_to_take_shot";

/// The broadcast sent to other participants once per outbound window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNotification {
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name of the participant who asked everyone to drink.
    pub from: String,
}

impl NetworkNotification {
    pub fn take_shot(from: impl Into<String>) -> Self {
        Self {
            kind: TAKE_SHOT_PROMPT_TYPE.to_string(),
            from: from.into(),
        }
    }

    /// JSON payload for `Conference::send_endpoint_message`.
    pub fn to_json(&self) -> Value {
        to_value(self)
    }
}

/// A message delivered by the signaling channel.
///
/// `json` is whatever the remote endpoint sent. Messages that aren't ours
/// still flow through the store untouched, so nothing here is validated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMessage {
    /// Endpoint id of the sender, when the transport reports one.
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub json: Option<Value>,
}

impl ChannelMessage {
    pub fn new(participant_id: Option<String>, json: Value) -> Self {
        Self {
            participant_id,
            json: Some(json),
        }
    }
}

/// Payload of an `EXTERNAL_ACTION_CALL` event.
///
/// `call` is the call descriptor serialized to a JSON string, which is what
/// host apps listening on the external API expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalActionCall {
    pub call: String,
    pub participant_id: Option<String>,
    pub display_name: String,
}

impl ExternalActionCall {
    /// Echo of a locally triggered prompt.
    pub fn prompt(call: &Value, participant_id: Option<String>, display_name: &str) -> Self {
        Self {
            call: call.to_string(),
            participant_id,
            display_name: display_name.to_string(),
        }
    }

    /// Acknowledgment that a remote prompt reached us. Carries no participant id.
    pub fn acknowledgment(display_name: &str) -> Self {
        Self {
            call: serde_json::json!({ "action": PROMPTED_TO_TAKE_SHOT }).to_string(),
            participant_id: None,
            display_name: display_name.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        to_value(self)
    }
}

/// Serialize one of the payloads above. They hold only strings and options,
/// which always serialize.
fn to_value<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_uses_type_as_the_field_name() {
        let json = NetworkNotification::take_shot("Alice").to_json();
        assert_eq!(json["type"], TAKE_SHOT_PROMPT_TYPE);
        assert_eq!(json["from"], "Alice");
        assert_eq!(json.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn notification_json_matches_the_wire_shape() {
        let json = NetworkNotification::take_shot("Bob").to_json();
        assert_eq!(
            json,
            serde_json::json!({"type": "take-shot-prompt-result", "from": "Bob"})
        );

        let parsed: NetworkNotification = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, NetworkNotification::take_shot("Bob"));
    }

    #[test]
    fn acknowledgment_has_null_participant() {
        let json = ExternalActionCall::acknowledgment("Carol").to_json();
        assert!(json["participantId"].is_null());
        assert_eq!(json["displayName"], "Carol");
        assert_eq!(json["call"], r#"{"action":"prompted_to_take_shot"}"#);
    }
}
