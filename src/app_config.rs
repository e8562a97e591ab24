//! Driver settings read from the environment.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use blockfall::core::config::env_u32;
use blockfall::core::EngineConfig;

/// Default frame step (~60 FPS)
pub const DEFAULT_TICK_MS: u32 = 16;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Frame step fed to the engine each loop iteration
    pub tick_ms: u32,
    /// Where tracing output goes; `None` disables logging
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    /// `BLOCKFALL_TICK_MS`, `BLOCKFALL_LOG_PATH`, plus every
    /// [`EngineConfig::from_env`] variable. Without `BLOCKFALL_SEED` the seed
    /// comes from the clock.
    pub fn from_env() -> Self {
        let mut engine = EngineConfig::from_env();
        if EngineConfig::seed_from_env().is_none() {
            engine.seed = clock_seed();
        }

        let tick_ms = env_u32("BLOCKFALL_TICK_MS")
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_TICK_MS);

        let log_path = std::env::var("BLOCKFALL_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            engine,
            tick_ms,
            log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
