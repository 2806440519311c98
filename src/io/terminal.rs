//! # Terminal I/O
//!
//! The crossterm-backed implementations of [`EventStream`] and
//! [`RenderStream`]. Nothing outside this file talks to the real terminal.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, queue, Command};
use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

/// Key and resize events from stdin
#[derive(Debug, Default)]
pub struct TerminalEventStream;

impl TerminalEventStream {
    pub fn new() -> Self {
        Self
    }
}

impl EventStream for TerminalEventStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(event::read()?)
    }
}

/// Output to the terminal
///
/// Cursor and screen commands are queued on the writer and reach the
/// terminal on the next flush, so a whole frame goes out at once. Raw mode
/// is tracked and switched off again on drop, which keeps the shell usable
/// if a skin panics mid-frame.
pub struct TerminalRenderStream<W: Write> {
    writer: W,
    raw_mode: bool,
}

impl TerminalRenderStream<BufWriter<Stdout>> {
    pub fn new() -> Self {
        Self::with_writer(BufWriter::new(io::stdout()))
    }
}

impl<W: Write> TerminalRenderStream<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            raw_mode: false,
        }
    }

    fn queue(&mut self, command: impl Command) -> Result<()> {
        queue!(self.writer, command)?;
        Ok(())
    }

    /// Queue `command` and push it out immediately
    fn apply(&mut self, command: impl Command) -> Result<()> {
        self.queue(command)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn clear_screen(&mut self) -> Result<()> {
        self.queue(terminal::Clear(ClearType::All))
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.queue(cursor::MoveTo(x, y))
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.queue(cursor::Hide)
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.queue(cursor::Show)
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(terminal::size()?)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.apply(EnterAlternateScreen)
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.apply(LeaveAlternateScreen)
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.raw_mode = false;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderStream<W> {
    fn drop(&mut self) {
        if !self.raw_mode {
            return;
        }
        let _ = self.queue(cursor::Show);
        let _ = self.apply(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Default for TerminalRenderStream<BufWriter<Stdout>> {
    fn default() -> Self {
        Self::new()
    }
}
