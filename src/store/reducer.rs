// Visibility State Store.
//
// A pure reduction over actions. The only state that matters is the overlay
// flag; the participant count is tracked so the overlay selector can hide
// the overlay when nobody else is in the call.

use super::action::Action;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TakeShotState {
    /// Overlay flag. Starts hidden.
    pub visible: bool,
    pub participant_count: usize,
}

/// Apply one action to the state.
///
/// Prompts pass through unchanged. A `ToggleVisibility` without an explicit
/// value flips the flag, so N flips from hidden end visible iff N is odd.
pub fn reduce(state: TakeShotState, action: &Action) -> TakeShotState {
    match action {
        Action::ToggleVisibility { visible: None, .. } => TakeShotState {
            visible: !state.visible,
            ..state
        },
        Action::ToggleVisibility {
            visible: Some(visible),
            ..
        } => TakeShotState {
            visible: *visible,
            ..state
        },
        Action::ParticipantCountChanged(count) => TakeShotState {
            participant_count: *count,
            ..state
        },
        Action::Prompt(_) | Action::EndpointMessageReceived(_) => state,
    }
}

/// Whether the overlay should actually render: the flag is set and there is
/// somebody besides us in the call.
pub fn is_overlay_visible(state: &TakeShotState) -> bool {
    state.visible && state.participant_count > 1
}
