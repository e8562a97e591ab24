//! Engine configuration.
//!
//! Defaults reproduce the classic progression (900ms at level 1, 70ms faster per
//! level, 90ms floor, a level every 10 lines). `from_env` lets a driver override
//! them without a config file; values that do not parse fall back to defaults.

use std::env;

use tracing::warn;

use crate::types::{BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, MIN_DROP_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the piece randomizer
    pub seed: u32,
    /// Gravity interval at level 1
    pub base_drop_ms: u32,
    /// Interval reduction per level
    pub drop_step_ms: u32,
    /// Interval floor
    pub min_drop_ms: u32,
    /// Lines per level
    pub lines_per_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            base_drop_ms: BASE_DROP_MS,
            drop_step_ms: DROP_STEP_MS,
            min_drop_ms: MIN_DROP_MS,
            lines_per_level: LINES_PER_LEVEL,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Read overrides from the environment:
    ///
    /// - `BLOCKFALL_SEED`
    /// - `BLOCKFALL_BASE_DROP_MS`
    /// - `BLOCKFALL_DROP_STEP_MS`
    /// - `BLOCKFALL_MIN_DROP_MS`
    /// - `BLOCKFALL_LINES_PER_LEVEL` (0 is rejected)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            seed: env_u32("BLOCKFALL_SEED").unwrap_or(defaults.seed),
            base_drop_ms: env_u32("BLOCKFALL_BASE_DROP_MS").unwrap_or(defaults.base_drop_ms),
            drop_step_ms: env_u32("BLOCKFALL_DROP_STEP_MS").unwrap_or(defaults.drop_step_ms),
            min_drop_ms: env_u32("BLOCKFALL_MIN_DROP_MS").unwrap_or(defaults.min_drop_ms),
            lines_per_level: env_u32("BLOCKFALL_LINES_PER_LEVEL")
                .filter(|&n| n > 0)
                .unwrap_or(defaults.lines_per_level),
        }
    }

    /// Whether `BLOCKFALL_SEED` was provided
    pub fn seed_from_env() -> Option<u32> {
        env_u32("BLOCKFALL_SEED")
    }
}

/// Parse a `u32` variable; unset is silent, garbage is logged and ignored.
pub fn env_u32(key: &str) -> Option<u32> {
    let raw = env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, value = %trimmed, %err, "ignoring unparsable config value");
            None
        }
    }
}
