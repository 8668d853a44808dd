//! Terminal display and input handling

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufWriter, Stdout, Write, stdout};

/// Terminal display handler with buffered output
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        // Enter alternate screen first to get accurate dimensions
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;
        let adjusted_height = height.saturating_sub(2); // Leave room for status line

        Ok(Self {
            width,
            height: adjusted_height,
            buffer: BufWriter::new(stdout),
        })
    }

    /// Current grid size as (columns, rows).
    pub fn size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Re-query the terminal size; true if it changed since the last check.
    pub fn check_resize(&mut self) -> bool {
        if let Ok((new_width, new_height)) = terminal::size() {
            let new_height = new_height.saturating_sub(2);
            if new_width != self.width || new_height != self.height {
                self.width = new_width;
                self.height = new_height;
                return true;
            }
        }
        false
    }

    /// Write a full frame plus a status line.
    ///
    /// Each row is positioned explicitly so an over-long line cannot corrupt
    /// the rows after it, then everything below the frame is cleared.
    pub fn draw(&mut self, frame: &str, status: &str) -> io::Result<()> {
        // \x1b[?25l = hide cursor, \x1b[?7l = disable line wrap
        write!(self.buffer, "\x1b[?25l\x1b[?7l")?;

        for (i, line) in frame.lines().enumerate() {
            write!(self.buffer, "\x1b[{};1H{}", i + 1, line)?;
        }

        // Clear leftovers from larger frames, then place the status line
        write!(self.buffer, "\x1b[J")?;
        let status_row = frame.lines().count() + 1;
        write!(self.buffer, "\x1b[{};1H\x1b[K{}", status_row, status)?;

        // \x1b[?25h = show cursor, \x1b[?7h = enable line wrap
        write!(self.buffer, "\x1b[?25h\x1b[?7h")?;
        self.buffer.flush()?;

        Ok(())
    }

    /// Block until the next key event. Non-key events (resize, focus, mouse)
    /// are swallowed so the caller always gets exactly one keystroke.
    pub fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                return Ok(key_event);
            }
        }
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        // Flush buffer before leaving alternate screen
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), LeaveAlternateScreen);
    }
}

/// Key actions for the render loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('w') => Action::Forward,
        KeyCode::Char('s') => Action::Back,
        KeyCode::Char('a') => Action::Left,
        KeyCode::Char('d') => Action::Right,
        KeyCode::Char('f') => Action::Up,
        KeyCode::Char('r') => Action::Down,
        _ => Action::None,
    }
}
