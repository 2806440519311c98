//! # I/O Abstraction Layer
//!
//! Trait seams for terminal input and output, so the chooser and the retro
//! skin run against a real terminal in production and against scripted
//! events and a recording screen in tests.
//!
//! ```text
//! Production:  controller ──▶ TerminalEventStream ──▶ crossterm::event::read()
//!                         ──▶ TerminalRenderStream ──▶ crossterm::queue!() + flush
//!
//! Testing:     controller ──▶ MockEventStream     ──▶ VecDeque<Event>
//!                         ──▶ MockRenderStream    ──▶ shared transcript
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::io::Write;
use std::time::Duration;

pub mod mock;
pub mod renderer;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, RenderCommand};
pub use renderer::{FrameLine, FrameRenderer, LineStyle};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// Terminal size as (columns, rows)
pub type TerminalSize = (u16, u16);

/// Input event stream
pub trait EventStream: Send {
    /// Whether an event is ready within `timeout`
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event; only call after `poll` returned true
    fn read(&mut self) -> Result<Event>;
}

/// Output stream with the few screen operations the skins need
pub trait RenderStream: Write + Send {
    fn clear_screen(&mut self) -> Result<()>;

    /// Move the cursor to (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    fn get_size(&self) -> Result<TerminalSize>;

    fn enter_alternate_screen(&mut self) -> Result<()>;

    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;

    fn disable_raw_mode(&mut self) -> Result<()>;
}
