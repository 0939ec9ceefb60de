// Signaling protocol: the JSON shapes exchanged over the call's endpoint
// message channel, plus the classifier that picks take-shot prompts out of
// unrelated traffic.
//
// The channel itself is an external collaborator (see `session::traits`).
// This module only knows what the payloads look like.

pub mod classifier;
pub mod message;
