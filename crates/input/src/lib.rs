//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Command`]s. Timing and
//! gravity stay in the engine; this crate only translates keys.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
