// Unit tests for the signaling payloads and the inbound classifier.
//
// Pure functions only: no runtime, no timers.

use serde_json::json;
use takeshot::protocol::classifier::{classify, classify_json, Classification};
use takeshot::protocol::message::{
    ChannelMessage, ExternalActionCall, NetworkNotification, TAKE_SHOT_PROMPT_TYPE,
};

#[test]
fn prompt_from_alice_matches() {
    let message = ChannelMessage::new(
        Some("abc123".to_string()),
        json!({"type": "take-shot-prompt-result", "from": "Alice"}),
    );
    assert_eq!(
        classify(&message),
        Classification::Matched {
            from: "Alice".to_string()
        }
    );
}

#[test]
fn other_types_are_unmatched() {
    for body in [
        json!({"type": "transcription-result", "from": "Alice"}),
        json!({"type": "TAKE-SHOT-PROMPT-RESULT", "from": "Alice"}),
        json!({"kind": "take-shot-prompt-result", "from": "Alice"}),
        json!({"type": 7}),
        json!("take-shot-prompt-result"),
        json!([]),
        json!(null),
    ] {
        let message = ChannelMessage::new(None, body.clone());
        assert_eq!(classify(&message), Classification::Unmatched, "body: {body}");
    }
}

#[test]
fn missing_json_is_unmatched() {
    let message = ChannelMessage {
        participant_id: Some("abc123".to_string()),
        json: None,
    };
    assert!(!classify(&message).is_matched());
}

#[test]
fn prompt_without_sender_is_unmatched() {
    assert_eq!(
        classify_json(&json!({"type": TAKE_SHOT_PROMPT_TYPE})),
        Classification::Unmatched
    );
    assert_eq!(
        classify_json(&json!({"type": TAKE_SHOT_PROMPT_TYPE, "from": 42})),
        Classification::Unmatched
    );
}

#[test]
fn extra_fields_are_ignored() {
    let body = json!({
        "type": TAKE_SHOT_PROMPT_TYPE,
        "from": "Dana",
        "volume": "double",
        "nested": {"type": "something-else"}
    });
    assert_eq!(
        classify_json(&body),
        Classification::Matched {
            from: "Dana".to_string()
        }
    );
}

#[test]
fn classification_does_not_modify_message() {
    let message = ChannelMessage::new(
        Some("xyz".to_string()),
        json!({"type": "chat", "text": "cheers"}),
    );
    let before = message.clone();
    let _ = classify(&message);
    assert_eq!(message, before);
}

#[test]
fn outgoing_notification_is_classified_as_a_prompt() {
    let body = NetworkNotification::take_shot("Émile 🍻").to_json();
    assert_eq!(
        classify_json(&body),
        Classification::Matched {
            from: "Émile 🍻".to_string()
        }
    );
}

#[test]
fn deserialize_channel_message_with_camel_case_id() {
    let raw = r#"{"participantId": "p1", "json": {"type": "take-shot-prompt-result", "from": "Eve"}}"#;
    let message: ChannelMessage = serde_json::from_str(raw).unwrap();
    assert_eq!(message.participant_id.as_deref(), Some("p1"));
    assert!(classify(&message).is_matched());
}

#[test]
fn deserialize_channel_message_without_fields() {
    let message: ChannelMessage = serde_json::from_str("{}").unwrap();
    assert!(message.participant_id.is_none());
    assert!(message.json.is_none());
}

#[test]
fn prompt_echo_serializes_call_as_string() {
    let echo = ExternalActionCall::prompt(
        &json!({"action": "take_shot"}),
        Some("local".to_string()),
        "Bob",
    );
    let json = echo.to_json();
    assert_eq!(json["call"], r#"{"action":"take_shot"}"#);
    assert_eq!(json["participantId"], "local");
    assert_eq!(json["displayName"], "Bob");
}
