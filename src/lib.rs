// Takeshot: debounced "take a shot" prompts between call participants.
//
// This is the library root. Each module corresponds to one piece of the
// prompt pipeline, from the debounce primitive up to the session wiring.

pub mod config;
pub mod debounce;
pub mod output;
pub mod protocol;
pub mod session;
pub mod store;
pub mod take_shot;
