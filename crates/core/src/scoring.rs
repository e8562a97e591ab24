//! Scoring module - classic line-clear scoring and level progression
//!
//! - Line clears use the classic table {1: 40, 2: 100, 3: 300, 4: 1200},
//!   multiplied by the current (1-based) level.
//! - Soft drops award 1 point per row, hard drops 2 points per row.
//! - Level is `lines / lines_per_level + 1`; the gravity interval shrinks
//!   linearly with level down to a floor.

use crate::config::EngineConfig;
use crate::types::{HARD_DROP_POINTS, LINE_SCORES, SOFT_DROP_POINTS};

/// Largest simultaneous clear that has its own table entry
pub const MAX_SCORED_LINES: usize = LINE_SCORES.len() - 1;

/// Calculate line clear score
///
/// `lines`: rows removed by a single lock. `level`: current level (1-based).
/// Clears larger than four rows cannot happen with four-cell pieces; if one
/// ever does it is scored as a four-row clear.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base_score = LINE_SCORES[lines.min(MAX_SCORED_LINES)];
    base_score.saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level for a cleared-line total (1-based)
pub fn calculate_level(total_lines: u32, config: &EngineConfig) -> u32 {
    total_lines / config.lines_per_level.max(1) + 1
}

/// Gravity interval for a level: `max(min, base - (level - 1) * step)`
pub fn get_drop_interval_ms(level: u32, config: &EngineConfig) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(config.drop_step_ms);
    config
        .base_drop_ms
        .saturating_sub(reduction)
        .max(config.min_drop_ms)
}
