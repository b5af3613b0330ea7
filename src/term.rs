use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use tracing::warn;

use crate::error::AppError;
use crate::render::Frame;

pub struct TermManager {
    stdout: Stdout,
    active: bool,
    drawn_lines: usize,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false, drawn_lines: 0 }
    }

    pub fn setup(&mut self) -> Result<(), AppError> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), AppError> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn size(&self) -> Result<(u16, u16), AppError> {
        Ok(terminal::size()?)
    }

    /// Returns at most one key press, waiting up to `timeout` for it.
    pub fn poll_key(&self, timeout: Duration) -> Result<Option<KeyEvent>, AppError> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<(), AppError> {
        // The window may have shrunk since start-up; a wrapped line would
        // scroll the whole frame
        let (cols, _) = terminal::size()?;

        let mut y = 0;
        for line in frame.lines() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                style::Print(clip(line, cols as usize)),
                terminal::Clear(ClearType::UntilNewLine)
            )?;
            y += 1;
        }

        // Wipe whatever a taller previous frame left below us
        if (y as usize) < self.drawn_lines {
            queue!(self.stdout, cursor::MoveTo(0, y), terminal::Clear(ClearType::FromCursorDown))?;
        }
        self.drawn_lines = y as usize;

        self.stdout.flush()?;
        Ok(())
    }
}

fn clip(line: &str, cols: usize) -> &str {
    match line.char_indices().nth(cols) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_cuts_at_column_count() {
        assert_eq!(clip("Game over! Final score: 40", 10), "Game over!");
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("", 3), "");
        assert_eq!(clip("abc", 0), "");
    }
}
