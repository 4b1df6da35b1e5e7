//! Crossterm terminal output backend.
//!
//! The `Driver` wraps a buffered stdout writer: raw mode plus alternate
//! screen on setup, queued cell writes per frame, explicit flush. A panic
//! hook restores the terminal so a crash on the render thread never leaves
//! the user's shell in raw mode.

use std::io::{self, BufWriter, Stdout, Write};
use std::panic;
use std::sync::Once;

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::surface::view::Frame;

/// Columns reserved for the navigation sidebar.
pub const SIDEBAR_WIDTH: u16 = 24;

static PANIC_HOOK: Once = Once::new();

/// Terminal output backend using crossterm.
pub struct Driver {
    writer: BufWriter<Stdout>,
}

impl Driver {
    /// Create a new driver wrapping stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(io::stdout()),
        })
    }

    /// Enter raw mode and the alternate screen, hide the cursor, and make
    /// sure a panic anywhere restores the terminal.
    pub fn setup(&mut self) -> io::Result<()> {
        PANIC_HOOK.call_once(|| {
            let original = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal();
                original(info);
            }));
        });
        terminal::enable_raw_mode()?;
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    /// Leave the alternate screen and raw mode, showing the cursor again.
    pub fn restore(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Show)?;
        restore_terminal()
    }

    /// The terminal size (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draw a full frame: title row, sidebar column, separator, content
    /// column. Everything previously on screen is cleared first.
    pub fn draw(&mut self, frame: &Frame, width: u16, height: u16) -> io::Result<()> {
        queue!(
            self.writer,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            Print(truncate(&frame.title, width)),
            SetAttribute(Attribute::Reset),
        )?;

        let body_rows = height.saturating_sub(2);
        let content_x = SIDEBAR_WIDTH + 2;
        let content_width = width.saturating_sub(content_x);
        for row in 0..body_rows {
            let y = row + 2;
            if let Some(line) = frame.sidebar.get(row as usize) {
                queue!(self.writer, cursor::MoveTo(0, y))?;
                self.print_line(&line.text, SIDEBAR_WIDTH, line.selected)?;
            }
            queue!(self.writer, cursor::MoveTo(SIDEBAR_WIDTH, y), Print('|'))?;
            if let Some(line) = frame.content.get(row as usize) {
                queue!(self.writer, cursor::MoveTo(content_x, y))?;
                self.print_line(&line.text, content_width, line.selected)?;
            }
        }
        self.writer.flush()
    }

    fn print_line(&mut self, text: &str, width: u16, selected: bool) -> io::Result<()> {
        if selected {
            queue!(self.writer, SetAttribute(Attribute::Reverse))?;
        }
        queue!(self.writer, Print(truncate(text, width)))?;
        if selected {
            queue!(self.writer, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Restore the terminal to its original state. Also called from the panic
/// hook, so it must not rely on any `Driver` instance.
fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Truncate a string to `width` characters.
fn truncate(s: &str, width: u16) -> String {
    s.chars().take(width as usize).collect()
}
