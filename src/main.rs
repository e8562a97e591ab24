//! Terminal Blockfall runner (default binary).
//!
//! A thin driver around the engine: crossterm for input, a fixed-step loop that
//! feeds elapsed time to `GameState::tick`, and a plain text view of the
//! snapshot after every frame.

mod app_config;
mod term;

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app_config::AppConfig;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::types::{Command, GameEvent};
use term::TerminalRenderer;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file when `BLOCKFALL_LOG_PATH` is set; the terminal belongs to
/// the game.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game = GameState::new(config.engine);
    game.start_new_game();
    info!(seed = config.engine.seed, tick_ms = config.tick_ms, "session started");

    let mut snapshot = GameSnapshot::default();
    let tick = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();

    loop {
        game.snapshot_into(&mut snapshot);
        term.draw(&snapshot)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    if should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        game.apply(command);
                    }
                }
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.apply(Command::AdvanceTime(elapsed_ms));
        }

        for event in game.take_events() {
            match event {
                GameEvent::PieceLocked => debug!("locked"),
                GameEvent::LinesCleared { count } => debug!(count, "lines cleared"),
                GameEvent::GameOver => info!(score = game.score(), lines = game.lines(), "game over"),
            }
        }
    }
}
