//! Pieces module - shape templates, the piece factory and the rotation resolver
//!
//! Every kind is described by a 4x4 occupancy matrix (`shape[row][col]`).
//! A [`Piece`] owns its own copy of that matrix, so rotating a piece never
//! touches the template.
//!
//! Rotation is a plain 90° clockwise turn of the matrix followed by a small
//! symmetric kick search over horizontal offsets. It is deliberately not SRS:
//! there are no per-kind kick tables and no vertical kicks.

use crate::board::Board;
use crate::types::{PieceKind, Rgb, SHAPE_SIZE, SPAWN_COL, SPAWN_ROW};

/// Occupancy matrix of a piece, indexed `[row][col]`
pub type Shape = [[bool; SHAPE_SIZE]; SHAPE_SIZE];

/// Horizontal offsets tried, in order, when rotating
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

const X: bool = true;
const O: bool = false;

const I_SHAPE: Shape = [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]];
const O_SHAPE: Shape = [[O, X, X, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]];
const T_SHAPE: Shape = [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];
const S_SHAPE: Shape = [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]];
const Z_SHAPE: Shape = [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]];
const J_SHAPE: Shape = [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];
const L_SHAPE: Shape = [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];

/// Get the immutable spawn template for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static Shape {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::O => &O_SHAPE,
        PieceKind::T => &T_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::J => &J_SHAPE,
        PieceKind::L => &L_SHAPE,
    }
}

/// Rotate a shape 90° clockwise: `result[col][N-1-row] = shape[row][col]`
pub fn rotate_cw(shape: &Shape) -> Shape {
    let n = SHAPE_SIZE;
    let mut out = [[false; SHAPE_SIZE]; SHAPE_SIZE];
    for (row, cells) in shape.iter().enumerate() {
        for (col, &filled) in cells.iter().enumerate() {
            out[col][n - 1 - row] = filled;
        }
    }
    out
}

/// Iterate the occupied `(row, col)` offsets of a shape
pub fn occupied(shape: &Shape) -> impl Iterator<Item = (i8, i8)> + '_ {
    shape.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(col, _)| (row as i8, col as i8))
    })
}

/// A falling piece instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Current rotation of the shape
    pub shape: Shape,
    /// Board column of the shape's left edge
    pub col: i8,
    /// Board row of the shape's top edge; negative while above the board
    pub row: i8,
    pub color: Rgb,
}

impl Piece {
    /// Build a fresh piece at the spawn origin
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: *get_shape(kind),
            col: SPAWN_COL,
            row: SPAWN_ROW,
            color: kind.color(),
        }
    }

    /// Occupied cells in board coordinates, as `(row, col)`
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        occupied(&self.shape).map(move |(r, c)| (self.row + r, self.col + c))
    }

    /// Lowest occupied board row of this piece
    pub fn bottom_row(&self) -> i8 {
        self.cells().map(|(r, _)| r).max().unwrap_or(self.row)
    }
}

/// Try to rotate a piece clockwise, kicking horizontally if needed.
///
/// The rotated candidate is tested at each of [`KICK_OFFSETS`]; the first
/// position that does not collide is committed to `piece` (shape and column).
/// When every offset collides the piece is left untouched and `false` is
/// returned.
pub fn try_rotate(piece: &mut Piece, board: &Board) -> bool {
    let mut candidate = Piece {
        shape: rotate_cw(&piece.shape),
        ..*piece
    };

    for &dx in KICK_OFFSETS.iter() {
        candidate.col = piece.col + dx;
        if !board.collides(&candidate, 0, 0) {
            *piece = candidate;
            return true;
        }
    }

    false
}
