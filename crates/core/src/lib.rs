//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the engine state machine. It has no
//! dependency on rendering, audio, persistence or input devices, which makes it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is reachable without a display
//! - **Portable**: any driver (terminal, GUI, headless) can own a `GameState`
//! - **Allocation-free on the hot path**: ticks, commands and snapshots use
//!   fixed-size storage
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 grid with collision, merge and line clearing
//! - [`pieces`]: 4x4 shape templates, piece factory, rotation with kicks
//! - [`rng`]: 7-bag randomizer over a seeded generator
//! - [`scoring`]: line/drop points, level and gravity progression
//! - [`game_state`]: the engine (`Idle`, `Running`, `Paused`, `GameOver`)
//! - [`snapshot`]: read-only state for collaborators
//! - [`config`]: progression tuning and environment overrides
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::{Command, GameEvent};
//!
//! let mut game = GameState::with_seed(12345);
//! game.apply(Command::StartNewGame);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! assert!(game.score() > 0); // hard drop awards points
//! assert_eq!(game.take_events().first(), Some(&GameEvent::PieceLocked));
//! ```
//!
//! # Timing
//!
//! The driver calls [`GameState::tick`](game_state::GameState::tick) every frame
//! with the elapsed milliseconds. Gravity moves the piece one row whenever the
//! accumulated time reaches the level's drop interval.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use game_state::GameState;
pub use pieces::{get_shape, rotate_cw, try_rotate, Piece, Shape};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score, get_drop_interval_ms};
pub use snapshot::{GameSnapshot, Grid, PieceSnapshot};
