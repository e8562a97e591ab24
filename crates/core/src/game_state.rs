//! Game state module - the engine state machine
//!
//! Ties together board, pieces, randomizer and scoring. Owns the piece
//! lifecycle (spawn, gravity, player commands, lock, line clear, top-out) and
//! the level/speed progression.
//!
//! All operations are synchronous and run to completion. A lock (merge, line
//! clear, scoring, next-piece promotion, top-out check) happens inside a single
//! `&mut self` call, so no caller can observe a half-finished lock.

use arrayvec::ArrayVec;
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::pieces::{try_rotate, Piece};
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Command, GameEvent, Phase};
use crate::{Board, PieceQueue};

/// Pending events kept between drains. A single lock emits at most three.
const EVENT_CAPACITY: usize = 16;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    piece_queue: PieceQueue,
    phase: Phase,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create an idle engine; call [`GameState::start_new_game`] to play.
    pub fn new(config: EngineConfig) -> Self {
        let level = 1;
        Self {
            board: Board::new(),
            current: None,
            next: None,
            piece_queue: PieceQueue::new(config.seed),
            phase: Phase::Idle,
            score: 0,
            lines: 0,
            level,
            drop_interval_ms: get_drop_interval_ms(level, &config),
            drop_timer_ms: 0,
            events: ArrayVec::new(),
            config,
        }
    }

    /// Idle engine with default progression and the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(EngineConfig::with_seed(seed))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reset board, progression and randomizer, spawn current and next, and
    /// enter `Running`. Accepted from every phase.
    #[instrument(skip(self), fields(seed = self.piece_queue.seed()))]
    pub fn start_new_game(&mut self) {
        self.board.clear();
        self.piece_queue.reset();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = get_drop_interval_ms(self.level, &self.config);
        self.drop_timer_ms = 0;
        self.events.clear();

        self.current = Some(Piece::spawn(self.piece_queue.draw()));
        self.next = Some(Piece::spawn(self.piece_queue.draw()));
        self.phase = Phase::Running;

        info!(
            current = ?self.current.map(|p| p.kind),
            next = ?self.next.map(|p| p.kind),
            "new game"
        );
    }

    /// Running <-> Paused. Returns whether the phase changed.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Idle | Phase::GameOver => return false,
        };
        debug!(phase = self.phase.as_str(), "pause toggled");
        true
    }

    /// Feed elapsed time to the gravity timer.
    ///
    /// Once the accumulated time reaches the drop interval, performs exactly one
    /// gravity step and resets the accumulator. Returns whether that step locked
    /// the piece. Ignored outside `Running`.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.running() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms {
            return false;
        }

        self.drop_timer_ms = 0;
        self.step_down(false)
    }

    /// Shift the current piece one column (`direction` is -1 or +1).
    /// A colliding move is reverted. Returns whether the piece moved.
    pub fn move_horizontal(&mut self, direction: i8) -> bool {
        if !self.running() {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        piece.col += direction.signum();
        if self.board.collides(piece, 0, 0) {
            piece.col -= direction.signum();
            return false;
        }
        true
    }

    /// Rotate the current piece clockwise with horizontal kicks.
    pub fn rotate(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        match self.current.as_mut() {
            Some(piece) => try_rotate(piece, &self.board),
            None => false,
        }
    }

    /// Move down one row for a point; if blocked, lock instead.
    /// Returns whether a lock occurred.
    pub fn soft_drop(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        self.step_down(true)
    }

    /// Drop to the lowest free row (2 points per row) and lock.
    /// Returns the number of rows descended.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.running() {
            return 0;
        }
        let Some(piece) = self.current.as_mut() else {
            return 0;
        };

        let mut steps: u32 = 0;
        while !self.board.collides(piece, 1, 0) {
            piece.row += 1;
            steps += 1;
        }

        self.score = self
            .score
            .saturating_add(calculate_drop_score(steps, true));
        self.lock_current_piece();
        steps
    }

    /// One row of descent. Blocked => lock. Free => optional soft-drop point.
    fn step_down(&mut self, award: bool) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        piece.row += 1;
        if self.board.collides(piece, 0, 0) {
            piece.row -= 1;
            self.lock_current_piece();
            return true;
        }

        if award {
            self.score = self
                .score
                .saturating_add(calculate_drop_score(1, false));
        }
        false
    }

    /// Merge the current piece, clear lines, score, advance the level, promote
    /// the next piece and check for top-out. Ignored outside `Running`.
    pub fn lock_current_piece(&mut self) {
        if !self.running() {
            return;
        }
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.merge(&piece);
        self.push_event(GameEvent::PieceLocked);

        let cleared = self.board.clear_full_lines();
        debug!(kind = piece.kind.as_str(), row = piece.row, col = piece.col, cleared, "piece locked");

        if cleared > 0 {
            self.score = self
                .score
                .saturating_add(calculate_line_score(cleared, self.level));
            self.lines = self.lines.saturating_add(cleared as u32);
            self.push_event(GameEvent::LinesCleared {
                count: cleared as u32,
            });

            let level = calculate_level(self.lines, &self.config);
            if level != self.level {
                self.level = level;
                self.drop_interval_ms = get_drop_interval_ms(level, &self.config);
                debug!(level, interval_ms = self.drop_interval_ms, "level up");
            }
        }

        let promoted = self
            .next
            .take()
            .unwrap_or_else(|| Piece::spawn(self.piece_queue.draw()));
        self.next = Some(Piece::spawn(self.piece_queue.draw()));
        self.current = Some(promoted);
        self.drop_timer_ms = 0;

        if self.board.collides(&promoted, 0, 0) {
            self.phase = Phase::GameOver;
            self.push_event(GameEvent::GameOver);
            info!(score = self.score, lines = self.lines, level = self.level, "game over");
        }
    }

    /// Lowest origin row the current piece can reach without colliding.
    /// Read-only; `None` when there is no current piece.
    pub fn ghost_row(&self) -> Option<i8> {
        let piece = self.current.as_ref()?;
        let mut drop: i8 = 0;
        while !self.board.collides(piece, drop + 1, 0) {
            drop += 1;
        }
        Some(piece.row + drop)
    }

    /// Apply a command. Returns whether it had a visible effect: the piece,
    /// board, score or phase changed. Time that only accumulates toward the
    /// next gravity step reports `false`.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::StartNewGame => {
                self.start_new_game();
                true
            }
            Command::TogglePause => self.toggle_pause(),
            Command::MoveLeft => self.move_horizontal(-1),
            Command::MoveRight => self.move_horizontal(1),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => {
                let before = (self.current, self.score);
                self.soft_drop();
                before != (self.current, self.score)
            }
            Command::HardDrop => {
                if !self.running() {
                    return false;
                }
                self.hard_drop();
                true
            }
            Command::AdvanceTime(ms) => {
                let before = self.current;
                let locked = self.tick(ms);
                locked || before != self.current
            }
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Drain pending events in the order they happened.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    /// Pending events without draining them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = self.current.as_ref().map(PieceSnapshot::from);
        out.next = self.next.as_ref().map(PieceSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::{PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

    const GRAY: Option<Rgb> = Some(Rgb::new(128, 128, 128));

    fn running_with(kind: PieceKind) -> GameState {
        let mut state = GameState::with_seed(12345);
        state.start_new_game();
        state.current = Some(Piece::spawn(kind));
        state
    }

    #[test]
    fn test_new_game_state_is_idle() {
        let state = GameState::with_seed(12345);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.current.is_none());
        assert!(state.next.is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms, 900);
    }

    #[test]
    fn test_start_new_game_spawns_two_pieces() {
        let mut state = GameState::with_seed(12345);
        state.start_new_game();

        assert_eq!(state.phase, Phase::Running);
        let current = state.current.unwrap();
        let next = state.next.unwrap();
        assert_ne!(current.kind, next.kind);
        assert_eq!((current.row, current.col), (-1, 3));
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_idle_ignores_everything_but_start() {
        let mut state = GameState::with_seed(1);
        assert!(!state.tick(10_000));
        assert!(!state.move_horizontal(1));
        assert!(!state.rotate());
        assert!(!state.soft_drop());
        assert_eq!(state.hard_drop(), 0);
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_o_piece_hard_drop_from_spawn() {
        let mut state = running_with(PieceKind::O);
        let spawn_bottom = state.current.unwrap().bottom_row();
        assert_eq!(spawn_bottom, 0);

        let steps = state.hard_drop();
        assert_eq!(steps, 19);
        assert_eq!(
            state.score,
            (BOARD_HEIGHT as u32 - 1 - spawn_bottom as u32) * 2
        );
        assert_eq!(state.lines, 0);

        let color = PieceKind::O.color();
        for row in [18, 19] {
            for col in 0..BOARD_WIDTH as i8 {
                let expected = if col == 4 || col == 5 { Some(color) } else { None };
                assert_eq!(state.board.get(row, col), Some(expected), "({row}, {col})");
            }
        }
        assert_eq!(
            state.take_events().as_slice(),
            &[GameEvent::PieceLocked]
        );
    }

    #[test]
    fn test_completing_a_row_scores_and_counts() {
        let mut state = running_with(PieceKind::I);
        // Bottom row full except columns 3..=6, which a flat I fills.
        for col in 0..BOARD_WIDTH as i8 {
            if !(3..=6).contains(&col) {
                state.board.set(19, col, GRAY);
            }
        }

        let steps = state.hard_drop();
        // I occupies shape row 1: origin row 18 puts it on row 19.
        assert_eq!(steps, 19);
        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 19 * 2 + 40);
        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms, 900);
        assert!(state.board.is_empty());
        assert_eq!(
            state.take_events().as_slice(),
            &[GameEvent::PieceLocked, GameEvent::LinesCleared { count: 1 }]
        );
    }

    #[test]
    fn test_level_up_recomputes_interval() {
        let mut state = running_with(PieceKind::I);
        state.lines = 9;
        for col in 0..BOARD_WIDTH as i8 {
            if !(3..=6).contains(&col) {
                state.board.set(19, col, GRAY);
            }
        }

        state.hard_drop();
        // Scored at the level in force when the lines were cleared.
        assert_eq!(state.score, 19 * 2 + 40);
        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.drop_interval_ms, 830);
    }

    #[test]
    fn test_multi_line_clear_uses_table() {
        let mut state = running_with(PieceKind::I);
        // Vertical I into a 1-wide well spanning the bottom four rows.
        state.current = Some(Piece {
            shape: crate::pieces::rotate_cw(get_shape(PieceKind::I)),
            ..Piece::spawn(PieceKind::I)
        });
        // Vertical I occupies shape col 2: board col 5.
        for row in 16..20 {
            for col in 0..BOARD_WIDTH as i8 {
                if col != 5 {
                    state.board.set(row, col, GRAY);
                }
            }
        }

        state.hard_drop();
        assert_eq!(state.lines, 4);
        assert_eq!(state.score, 1200 + 17 * 2);
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_soft_drop_awards_and_locks() {
        let mut state = running_with(PieceKind::O);
        assert!(!state.soft_drop());
        assert_eq!(state.score, 1);
        assert_eq!(state.current.unwrap().row, 0);

        state.current.as_mut().unwrap().row = 18;
        let score = state.score;
        assert!(state.soft_drop());
        // Blocked drop locks without a bonus point.
        assert_eq!(state.score, score);
        assert!(state.board.is_occupied(19, 4));
    }

    #[test]
    fn test_tick_accumulates_then_steps_once() {
        let mut state = running_with(PieceKind::T);
        let row = state.current.unwrap().row;

        assert!(!state.tick(500));
        assert_eq!(state.current.unwrap().row, row);

        // Crossing the interval steps exactly once, even with a large overshoot.
        assert!(!state.tick(5_000));
        assert_eq!(state.current.unwrap().row, row + 1);
        assert_eq!(state.drop_timer_ms, 0);
        // Gravity never awards points.
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_tick_locks_grounded_piece() {
        let mut state = running_with(PieceKind::O);
        state.current.as_mut().unwrap().row = 18;
        assert!(state.tick(900));
        assert!(state.board.is_occupied(18, 4));
        assert_eq!(state.current.unwrap().row, -1);
    }

    #[test]
    fn test_blocked_move_is_idempotent() {
        let mut state = running_with(PieceKind::O);
        while state.move_horizontal(-1) {}
        let before = state.current.unwrap();
        assert!(!state.move_horizontal(-1));
        assert_eq!(state.current.unwrap(), before);
        assert_eq!(before.col, -1);
    }

    #[test]
    fn test_pause_gates_commands() {
        let mut state = running_with(PieceKind::T);
        assert!(state.toggle_pause());
        assert!(state.paused());

        let before = state.current;
        assert!(!state.tick(10_000));
        assert!(!state.move_horizontal(1));
        assert!(!state.rotate());
        assert!(!state.soft_drop());
        assert_eq!(state.hard_drop(), 0);
        assert_eq!(state.current, before);

        assert!(state.toggle_pause());
        assert!(state.running());
        // The paused tick did not leak into the accumulator.
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_top_out_ends_game() {
        let mut state = running_with(PieceKind::O);
        state.next = Some(Piece::spawn(PieceKind::T));
        // Occupy the spawn area of the T (row 0, cols 3..=5) but leave a home
        // for the O lower down.
        state.board.set(0, 4, GRAY);
        state.current.as_mut().unwrap().row = 5;

        state.lock_current_piece();
        assert!(state.game_over());
        assert_eq!(state.current.unwrap().kind, PieceKind::T);
        assert_eq!(
            state.take_events().as_slice(),
            &[GameEvent::PieceLocked, GameEvent::GameOver]
        );

        // Terminal: nothing but a new game moves it.
        let snapshot = state.snapshot();
        assert!(!state.tick(10_000));
        assert!(!state.toggle_pause());
        assert!(!state.apply(Command::HardDrop));
        assert_eq!(state.snapshot(), snapshot);

        state.apply(Command::StartNewGame);
        assert!(state.running());
        assert!(state.board.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_lock_ignored_while_paused() {
        let mut state = running_with(PieceKind::O);
        assert!(state.apply(Command::TogglePause));
        let before = state.snapshot();

        state.lock_current_piece();
        assert!(state.paused());
        assert!(state.board.is_empty());
        assert!(state.events().is_empty());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_lock_ignored_after_game_over() {
        let mut state = GameState::with_seed(99);
        state.start_new_game();
        while !state.game_over() {
            state.hard_drop();
        }
        let _ = state.take_events();
        let before = state.snapshot();

        state.lock_current_piece();
        assert!(state.game_over());
        assert!(state.events().is_empty());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_advance_time_reports_gravity_step() {
        let mut state = running_with(PieceKind::T);
        // Accumulating only: nothing visible.
        assert!(!state.apply(Command::AdvanceTime(500)));
        // Crossing the interval moves the piece without locking.
        assert!(state.apply(Command::AdvanceTime(400)));
        assert_eq!(state.current.unwrap().row, 0);
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_ghost_row_is_read_only() {
        let state = running_with(PieceKind::O);
        let before = state.snapshot();
        assert_eq!(state.ghost_row(), Some(18));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_apply_soft_drop_reports_change() {
        let mut state = running_with(PieceKind::O);
        assert!(state.apply(Command::SoftDrop));
        state.toggle_pause();
        assert!(!state.apply(Command::SoftDrop));
    }

    #[test]
    fn test_event_buffer_keeps_latest() {
        let mut state = GameState::with_seed(5);
        state.start_new_game();
        for _ in 0..EVENT_CAPACITY + 4 {
            state.push_event(GameEvent::PieceLocked);
        }
        state.push_event(GameEvent::GameOver);
        let events = state.take_events();
        assert_eq!(events.len(), EVENT_CAPACITY);
        assert_eq!(events.last(), Some(&GameEvent::GameOver));
        assert!(state.events().is_empty());
    }
}
