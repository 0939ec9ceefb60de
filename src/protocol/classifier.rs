// Inbound Event Classifier.
//
// Looks at a channel message and decides whether it is a take-shot prompt.
// Classification never fails: anything that doesn't look exactly like a
// prompt (missing json, wrong type, non-string `from`) is simply unmatched
// and the caller forwards it untouched.

use serde_json::Value;
use tracing::trace;

use super::message::{ChannelMessage, TAKE_SHOT_PROMPT_TYPE};

/// Result of inspecting one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A take-shot prompt; `from` is the sender's display name.
    Matched { from: String },
    /// Someone else's traffic (or a malformed prompt).
    Unmatched,
}

impl Classification {
    pub fn is_matched(&self) -> bool {
        matches!(self, Classification::Matched { .. })
    }
}

/// Classify a channel message without consuming or modifying it.
pub fn classify(message: &ChannelMessage) -> Classification {
    match message.json.as_ref() {
        Some(json) => classify_json(json),
        None => {
            trace!("Channel message has no json body");
            Classification::Unmatched
        }
    }
}

/// Classify a raw JSON body. `type` is the only discriminator; other
/// fields besides `from` are ignored.
pub fn classify_json(json: &Value) -> Classification {
    if json.get("type").and_then(Value::as_str) != Some(TAKE_SHOT_PROMPT_TYPE) {
        trace!("Channel message is not a take-shot prompt");
        return Classification::Unmatched;
    }

    match json.get("from").and_then(Value::as_str) {
        Some(from) => Classification::Matched {
            from: from.to_string(),
        },
        None => {
            trace!("Take-shot prompt without a sender name, ignoring");
            Classification::Unmatched
        }
    }
}
