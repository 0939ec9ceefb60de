// Prompt Dispatcher: turns the user's "take a shot" gesture into a PROMPT
// action on the store.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::store::action::{Action, PromptEvent};
use crate::store::Store;

impl PromptEvent {
    /// Build a prompt. The call descriptor is the only thing validated.
    pub fn new(
        call: Value,
        participant_id: Option<String>,
        display_name: impl Into<String>,
    ) -> Result<Self> {
        if call.is_null() {
            anyhow::bail!("take-shot prompt needs a call descriptor");
        }
        Ok(Self {
            call,
            participant_id,
            display_name: display_name.into(),
        })
    }
}

/// Emit one PROMPT action. Returns as soon as the action has gone through
/// the chain; the broadcast itself happens later, after the outbound debounce.
pub fn dispatch_prompt(
    store: &Arc<Store>,
    call: Value,
    participant_id: Option<String>,
    display_name: &str,
) -> Result<()> {
    let event = PromptEvent::new(call, participant_id, display_name)?;
    store.dispatch(Action::Prompt(event));
    Ok(())
}
