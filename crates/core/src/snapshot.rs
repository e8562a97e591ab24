//! Read-only views of the engine for renderers, HUDs and sound collaborators.
//!
//! Snapshots are plain `Copy` data and serialize with serde, so a collaborator
//! can hold one across frames or ship it as JSON.

use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, Shape};
use crate::types::{Cell, Phase, PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

/// Board grid, `[row][col]`, top row first
pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
    pub color: Rgb,
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            row: value.row,
            col: value.col,
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Grid,
    pub current: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    /// Landing row of `current` (ghost piece)
    pub ghost_row: Option<i8>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Cell to draw at (row, col), with the current piece composited on top.
    pub fn cell_with_current(&self, row: usize, col: usize) -> Cell {
        if let Some(piece) = &self.current {
            let r = row as i16 - piece.row as i16;
            let c = col as i16 - piece.col as i16;
            if (0..4).contains(&r) && (0..4).contains(&c) && piece.shape[r as usize][c as usize] {
                return Some(piece.color);
            }
        }
        self.board[row][col]
    }

    /// Whether (row, col) is covered by the ghost of the current piece.
    pub fn is_ghost(&self, row: usize, col: usize) -> bool {
        let (Some(piece), Some(ghost_row)) = (&self.current, self.ghost_row) else {
            return false;
        };
        let r = row as i16 - ghost_row as i16;
        let c = col as i16 - piece.col as i16;
        (0..4).contains(&r) && (0..4).contains(&c) && piece.shape[r as usize][c as usize]
    }
}
