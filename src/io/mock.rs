//! # Mock I/O
//!
//! Scripted input and a recording screen for driving the chooser and the
//! retro skin in tests. `MockRenderStream` is cheaply cloneable and every
//! clone shares one recording, so a test can keep a handle while the
//! application owns the stream.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Scripted event stream
///
/// `poll` reports readiness only while scripted events remain, and `read` past
/// the end is an error. A loop that never sees a quit key keeps polling, so
/// every script must end with one.
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Queue a plain key press
    pub fn press(&mut self, code: KeyCode) -> &mut Self {
        self.push_event(key_event(code, KeyModifiers::NONE));
        self
    }

    /// Queue a key press with modifiers, e.g. Ctrl+C
    pub fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> &mut Self {
        self.push_event(key_event(code, modifiers));
        self
    }

    /// Queue one key press per character of `text`
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
        self
    }

    /// Queue `command` followed by Enter
    pub fn submit(&mut self, command: &str) -> &mut Self {
        self.type_text(command).press(KeyCode::Enter)
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(Vec<u8>),
    Flush,
}

#[derive(Debug)]
struct Recording {
    commands: Vec<RenderCommand>,
    screen: Vec<u8>,
    transcript: Vec<u8>,
    size: TerminalSize,
    raw_mode: bool,
    alternate_screen: bool,
}

/// Recording render stream
#[derive(Debug, Clone)]
pub struct MockRenderStream {
    recording: Arc<Mutex<Recording>>,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            recording: Arc::new(Mutex::new(Recording {
                commands: Vec::new(),
                screen: Vec::new(),
                transcript: Vec::new(),
                size,
                raw_mode: false,
                alternate_screen: false,
            })),
        }
    }

    fn recording(&self) -> MutexGuard<'_, Recording> {
        self.recording
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.recording().commands.push(command);
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.recording().commands.clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.recording().commands.contains(command)
    }

    /// Bytes written since the last `clear_screen`
    pub fn screen_text(&self) -> String {
        String::from_utf8_lossy(&self.recording().screen).into_owned()
    }

    /// Every byte ever written
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.recording().transcript).into_owned()
    }

    pub fn is_raw_mode(&self) -> bool {
        self.recording().raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.recording().alternate_screen
    }

    pub fn resize(&self, size: TerminalSize) {
        self.recording().size = size;
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut recording = self.recording();
        recording.screen.extend_from_slice(buf);
        recording.transcript.extend_from_slice(buf);
        recording.commands.push(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::ClearScreen);
        recording.screen.clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.recording().size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::EnterAlternateScreen);
        recording.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::LeaveAlternateScreen);
        recording.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::EnableRawMode);
        recording.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::DisableRawMode);
        recording.raw_mode = false;
        Ok(())
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}
