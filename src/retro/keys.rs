//! # Key Commands
//!
//! Maps raw key presses to retro actions. Each binding is a small [`KeyCommand`]
//! checked in registration order; the first relevant one wins.

use super::command::RetroCommand;
use super::views::View;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the key handler needs to know about the session
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext {
    /// The command line holds text, so shortcut characters are typed instead
    pub typing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
}

/// Outcome of a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Insert(char),
    Backspace,
    Submit,
    Run(RetroCommand),
    Scroll(Scroll),
}

pub trait KeyCommand: Send + Sync {
    fn is_relevant(&self, event: &KeyEvent, context: &KeyContext) -> bool;

    fn execute(&self, event: &KeyEvent, context: &KeyContext) -> KeyAction;

    fn name(&self) -> &'static str;
}

fn is_ctrl(event: &KeyEvent, c: char) -> bool {
    event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

/// Quit (Ctrl+C)
pub struct QuitKey;

impl KeyCommand for QuitKey {
    fn is_relevant(&self, event: &KeyEvent, _context: &KeyContext) -> bool {
        is_ctrl(event, 'c')
    }

    fn execute(&self, _event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        KeyAction::Run(RetroCommand::Quit)
    }

    fn name(&self) -> &'static str {
        "Quit"
    }
}

/// Clear the output (Ctrl+L)
pub struct ClearKey;

impl KeyCommand for ClearKey {
    fn is_relevant(&self, event: &KeyEvent, _context: &KeyContext) -> bool {
        is_ctrl(event, 'l')
    }

    fn execute(&self, _event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        KeyAction::Run(RetroCommand::Clear)
    }

    fn name(&self) -> &'static str {
        "Clear"
    }
}

/// Back to the chooser (Esc)
pub struct ChooserKey;

impl KeyCommand for ChooserKey {
    fn is_relevant(&self, event: &KeyEvent, _context: &KeyContext) -> bool {
        event.code == KeyCode::Esc
    }

    fn execute(&self, _event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        KeyAction::Run(RetroCommand::Chooser)
    }

    fn name(&self) -> &'static str {
        "Chooser"
    }
}

/// Help (F1 anytime, `?` when not typing)
pub struct HelpKey;

impl KeyCommand for HelpKey {
    fn is_relevant(&self, event: &KeyEvent, context: &KeyContext) -> bool {
        match event.code {
            KeyCode::F(1) => true,
            KeyCode::Char('?') => !context.typing,
            _ => false,
        }
    }

    fn execute(&self, _event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        KeyAction::Run(RetroCommand::Show(View::Help))
    }

    fn name(&self) -> &'static str {
        "Help"
    }
}

/// Digits 1-6 switch to the primary views when not typing
pub struct SectionKey;

impl SectionKey {
    fn view(event: &KeyEvent) -> Option<View> {
        match event.code {
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|n| View::primary(n as usize)),
            _ => None,
        }
    }
}

impl KeyCommand for SectionKey {
    fn is_relevant(&self, event: &KeyEvent, context: &KeyContext) -> bool {
        !context.typing && event.modifiers.is_empty() && Self::view(event).is_some()
    }

    fn execute(&self, event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        Self::view(event)
            .map(|view| KeyAction::Run(RetroCommand::Show(view)))
            .unwrap_or(KeyAction::Submit)
    }

    fn name(&self) -> &'static str {
        "Section"
    }
}

pub struct SubmitKey;

impl KeyCommand for SubmitKey {
    fn is_relevant(&self, event: &KeyEvent, _context: &KeyContext) -> bool {
        event.code == KeyCode::Enter
    }

    fn execute(&self, _event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        KeyAction::Submit
    }

    fn name(&self) -> &'static str {
        "Submit"
    }
}

pub struct BackspaceKey;

impl KeyCommand for BackspaceKey {
    fn is_relevant(&self, event: &KeyEvent, _context: &KeyContext) -> bool {
        event.code == KeyCode::Backspace
    }

    fn execute(&self, _event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        KeyAction::Backspace
    }

    fn name(&self) -> &'static str {
        "Backspace"
    }
}

/// Scroll the output with the arrow and page keys
pub struct ScrollKey;

impl KeyCommand for ScrollKey {
    fn is_relevant(&self, event: &KeyEvent, _context: &KeyContext) -> bool {
        matches!(
            event.code,
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown
        )
    }

    fn execute(&self, event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        KeyAction::Scroll(match event.code {
            KeyCode::Up => Scroll::LineUp,
            KeyCode::PageUp => Scroll::PageUp,
            KeyCode::PageDown => Scroll::PageDown,
            _ => Scroll::LineDown,
        })
    }

    fn name(&self) -> &'static str {
        "Scroll"
    }
}

/// Printable characters go to the command line
pub struct InsertKey;

impl KeyCommand for InsertKey {
    fn is_relevant(&self, event: &KeyEvent, _context: &KeyContext) -> bool {
        matches!(event.code, KeyCode::Char(c) if !c.is_control())
            && !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    fn execute(&self, event: &KeyEvent, _context: &KeyContext) -> KeyAction {
        match event.code {
            KeyCode::Char(c) => KeyAction::Insert(c),
            _ => KeyAction::Backspace,
        }
    }

    fn name(&self) -> &'static str {
        "Insert"
    }
}

/// Ordered key bindings of the retro skin
pub struct KeyRegistry {
    commands: Vec<Box<dyn KeyCommand>>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.add_command(Box::new(QuitKey));
        registry.add_command(Box::new(ClearKey));
        registry.add_command(Box::new(ChooserKey));
        registry.add_command(Box::new(HelpKey));
        registry.add_command(Box::new(SectionKey));
        registry.add_command(Box::new(SubmitKey));
        registry.add_command(Box::new(BackspaceKey));
        registry.add_command(Box::new(ScrollKey));
        registry.add_command(Box::new(InsertKey));
        registry
    }

    pub fn add_command(&mut self, command: Box<dyn KeyCommand>) {
        self.commands.push(command);
    }

    /// Action of the first relevant binding; key releases are ignored
    pub fn process(&self, event: &KeyEvent, context: &KeyContext) -> Option<KeyAction> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let command = self
            .commands
            .iter()
            .find(|command| command.is_relevant(event, context))?;
        tracing::debug!("Key {:?} handled by {}", event.code, command.name());
        Some(command.execute(event, context))
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    const IDLE: KeyContext = KeyContext { typing: false };
    const TYPING: KeyContext = KeyContext { typing: true };

    #[test]
    fn ctrl_c_should_quit_and_plain_c_should_type() {
        let registry = KeyRegistry::new();
        assert_eq!(
            registry.process(&ctrl('c'), &IDLE),
            Some(KeyAction::Run(RetroCommand::Quit))
        );
        assert_eq!(
            registry.process(&key(KeyCode::Char('c')), &IDLE),
            Some(KeyAction::Insert('c'))
        );
    }

    #[test]
    fn ctrl_l_should_clear() {
        let registry = KeyRegistry::new();
        assert_eq!(
            registry.process(&ctrl('l'), &TYPING),
            Some(KeyAction::Run(RetroCommand::Clear))
        );
    }

    #[test]
    fn digits_should_switch_views_only_when_idle() {
        let registry = KeyRegistry::new();
        assert_eq!(
            registry.process(&key(KeyCode::Char('3')), &IDLE),
            Some(KeyAction::Run(RetroCommand::Show(View::Publications)))
        );
        assert_eq!(
            registry.process(&key(KeyCode::Char('3')), &TYPING),
            Some(KeyAction::Insert('3'))
        );
        assert_eq!(
            registry.process(&key(KeyCode::Char('7')), &IDLE),
            Some(KeyAction::Insert('7'))
        );
    }

    #[test]
    fn help_keys_should_respect_typing() {
        let registry = KeyRegistry::new();
        let help = Some(KeyAction::Run(RetroCommand::Show(View::Help)));
        assert_eq!(registry.process(&key(KeyCode::F(1)), &TYPING), help);
        assert_eq!(registry.process(&key(KeyCode::Char('?')), &IDLE), help);
        assert_eq!(
            registry.process(&key(KeyCode::Char('?')), &TYPING),
            Some(KeyAction::Insert('?'))
        );
    }

    #[test]
    fn escape_should_go_to_the_chooser() {
        let registry = KeyRegistry::new();
        assert_eq!(
            registry.process(&key(KeyCode::Esc), &TYPING),
            Some(KeyAction::Run(RetroCommand::Chooser))
        );
    }

    #[test]
    fn editing_and_scroll_keys_should_map() {
        let registry = KeyRegistry::new();
        assert_eq!(registry.process(&key(KeyCode::Enter), &IDLE), Some(KeyAction::Submit));
        assert_eq!(
            registry.process(&key(KeyCode::Backspace), &TYPING),
            Some(KeyAction::Backspace)
        );
        assert_eq!(
            registry.process(&key(KeyCode::PageDown), &IDLE),
            Some(KeyAction::Scroll(Scroll::PageDown))
        );
        assert_eq!(registry.process(&key(KeyCode::Tab), &IDLE), None);
    }

    #[test]
    fn releases_should_be_ignored() {
        let registry = KeyRegistry::new();
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(registry.process(&release, &IDLE), None);
    }
}
