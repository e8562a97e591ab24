//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine, shared types and input mapping so drivers and tests
//! can use `blockfall::{core, input, types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_types as types;
