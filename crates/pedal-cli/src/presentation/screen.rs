//! Full-screen monitor display on the alternate screen.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use super::bars::{Frame, render_frame};

/// Redraws frames in place; restores the terminal when dropped.
pub struct MonitorScreen {
    out: Stdout,
}

impl MonitorScreen {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self { out })
    }

    pub fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let (columns, _) = terminal::size().unwrap_or((80, 24));
        let mut lock = self.out.lock();
        queue!(lock, MoveTo(0, 0))?;
        render_frame(&mut lock, frame, columns)?;
        queue!(lock, Clear(ClearType::FromCursorDown))?;
        lock.flush()
    }
}

impl Drop for MonitorScreen {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
    }
}
