//! Minimal terminal front end: a monochrome character dump of a snapshot.
//!
//! Only what a player needs to play; colors, effects and sound belong to
//! richer collaborators.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::Print,
    terminal, QueueableCommand,
};

use blockfall::core::GameSnapshot;
use blockfall::types::{Phase, BOARD_HEIGHT, BOARD_WIDTH};

const BLOCK: &str = "[]";
const GHOST: &str = "::";
const EMPTY: &str = " .";

/// Render a snapshot into text lines (no I/O).
pub fn render_lines(snapshot: &GameSnapshot, out: &mut Vec<String>) {
    out.clear();

    for row in 0..BOARD_HEIGHT as usize {
        let mut line = String::with_capacity(48);
        line.push_str("<!");
        for col in 0..BOARD_WIDTH as usize {
            let cell = if snapshot.cell_with_current(row, col).is_some() {
                BLOCK
            } else if snapshot.is_ghost(row, col) {
                GHOST
            } else {
                EMPTY
            };
            line.push_str(cell);
        }
        line.push_str("!>");
        line.push_str(&side_panel(snapshot, row));
        out.push(line);
    }
    out.push(format!("<!{}!>", "=".repeat(BOARD_WIDTH as usize * 2)));
}

fn side_panel(snapshot: &GameSnapshot, row: usize) -> String {
    match row {
        0 => format!("  score {}", snapshot.score),
        1 => format!("  lines {}", snapshot.lines),
        2 => format!("  level {}", snapshot.level),
        4 => "  next".to_string(),
        5..=8 => {
            let Some(next) = snapshot.next else {
                return String::new();
            };
            let shape_row = &next.shape[row - 5];
            let cells: String = shape_row
                .iter()
                .map(|&filled| if filled { BLOCK } else { "  " })
                .collect();
            format!("  {}", cells)
        }
        10 => match snapshot.phase {
            Phase::Idle => "  enter: new game".to_string(),
            Phase::Paused => "  PAUSED".to_string(),
            Phase::GameOver => "  GAME OVER (enter)".to_string(),
            Phase::Running => String::new(),
        },
        12 => "  arrows/hjkl move, space drop".to_string(),
        13 => "  p pause, q quit".to_string(),
        _ => String::new(),
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    lines: Vec<String>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            lines: Vec::with_capacity(BOARD_HEIGHT as usize + 1),
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        render_lines(snapshot, &mut self.lines);

        self.buf.clear();
        self.buf.queue(cursor::MoveTo(0, 0))?;
        for line in &self.lines {
            self.buf.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
            self.buf.queue(Print(line))?;
            self.buf.queue(Print("\r\n"))?;
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}
