//! # Frame Renderer
//!
//! Paints whole frames of styled lines through a [`RenderStream`]. Both the
//! chooser and the retro skin compose their screens as plain data and hand
//! them here, so composition can be tested without a terminal.

use super::{RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use unicode_width::UnicodeWidthChar;

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

/// How a frame line is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Normal,
    Title,
    Dim,
    Link,
    Highlight,
    Status,
    Error,
}

impl LineStyle {
    fn color(self) -> Color {
        match self {
            LineStyle::Normal => Color::Green,
            LineStyle::Title => Color::Green,
            LineStyle::Dim => Color::DarkGreen,
            LineStyle::Link => Color::Cyan,
            LineStyle::Highlight => Color::Green,
            LineStyle::Status => Color::Green,
            LineStyle::Error => Color::Red,
        }
    }

    fn reversed(self) -> bool {
        matches!(self, LineStyle::Highlight | LineStyle::Status)
    }

    fn bold(self) -> bool {
        matches!(self, LineStyle::Title | LineStyle::Error)
    }
}

/// One row of a frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameLine {
    pub text: String,
    pub style: LineStyle,
}

impl FrameLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Normal)
    }

    pub fn blank() -> Self {
        Self::default()
    }
}

/// Clip `text` to `width` display columns and pad it with spaces to exactly
/// that width
///
/// Control characters never reach the terminal: a tab becomes a space and
/// anything else (ESC, BEL, ...) becomes U+FFFD.
pub fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars().map(printable) {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

fn printable(ch: char) -> char {
    match ch {
        '\t' => ' ',
        c if c.is_control() => '\u{FFFD}',
        c => c,
    }
}

/// Full-screen renderer over a [`RenderStream`]
pub struct FrameRenderer<RS: RenderStream> {
    stream: RS,
    terminal_size: TerminalSize,
    active: bool,
}

impl<RS: RenderStream> FrameRenderer<RS> {
    /// The size is re-read on [`initialize`](Self::initialize); until then a
    /// missing terminal (e.g. output piped) falls back to 80x24
    pub fn new(stream: RS) -> Result<Self> {
        let terminal_size = stream.get_size().unwrap_or_else(|e| {
            tracing::debug!("Terminal size unavailable ({}), assuming 80x24", e);
            (80, 24)
        });
        Ok(Self {
            stream,
            terminal_size,
            active: false,
        })
    }

    pub fn terminal_size(&self) -> TerminalSize {
        self.terminal_size
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Whether the terminal is currently taken over
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn initialize(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        self.stream.enable_raw_mode()?;
        self.stream.enter_alternate_screen()?;
        self.stream.hide_cursor()?;
        self.stream.clear_screen()?;
        self.terminal_size = self.stream.get_size()?;
        self.active = true;
        tracing::debug!("Terminal initialized at {:?}", self.terminal_size);
        Ok(())
    }

    /// Paint `lines` top to bottom, then park the cursor at `cursor` (shown)
    /// or hide it
    pub fn draw(&mut self, lines: &[FrameLine], cursor: Option<(u16, u16)>) -> Result<()> {
        let (width, height) = self.terminal_size;
        self.stream.hide_cursor()?;
        self.stream.clear_screen()?;

        for (row, line) in lines.iter().take(height as usize).enumerate() {
            self.stream.move_cursor(0, row as u16)?;
            let text = fit_width(&line.text, width as usize);
            queue_term!(self.stream, SetForegroundColor(line.style.color()))?;
            if line.style.reversed() {
                queue_term!(self.stream, SetAttribute(Attribute::Reverse))?;
            }
            if line.style.bold() {
                queue_term!(self.stream, SetAttribute(Attribute::Bold))?;
            }
            queue_term!(
                self.stream,
                Print(text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }

        if let Some((x, y)) = cursor {
            self.stream.move_cursor(x.min(width.saturating_sub(1)), y)?;
            self.stream.show_cursor()?;
        }
        self.stream.flush().map_err(anyhow::Error::from)
    }

    /// Give the terminal back
    pub fn cleanup(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.stream.show_cursor()?;
        self.stream.leave_alternate_screen()?;
        self.stream.disable_raw_mode()?;
        self.stream.flush().map_err(anyhow::Error::from)
    }
}
