//! # Skin Chooser
//!
//! Picks between the modern and retro skins and remembers the choice in the
//! state store.

pub mod controller;
pub mod screen;

use crate::storage::{keys, KeyValueStore};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;
use std::sync::Arc;

pub use controller::run_chooser;

/// One of the two presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skin {
    Modern,
    Retro,
}

impl Skin {
    /// Case-insensitive; anything but `modern` or `retro` is no skin
    pub fn parse(value: &str) -> Option<Skin> {
        match value.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(Skin::Modern),
            "retro" => Some(Skin::Retro),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Skin::Modern => "modern",
            Skin::Retro => "retro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Skin::Modern => "Modern",
            Skin::Retro => "Retro",
        }
    }
}

impl fmt::Display for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skin to launch straight away for a `--ui` value, skipping the chooser
pub fn redirect_target(ui: Option<&str>) -> Option<Skin> {
    ui.and_then(Skin::parse)
}

/// The persisted skin preference
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved skin; unknown stored values count as none
    pub fn saved(&self) -> Option<Skin> {
        self.store
            .get(keys::UI_CHOICE)
            .as_deref()
            .and_then(Skin::parse)
    }

    pub fn save(&self, skin: Skin) {
        tracing::debug!("Saving skin preference {}", skin);
        self.store.set(keys::UI_CHOICE, skin.as_str());
    }

    pub fn clear(&self) {
        tracing::debug!("Clearing skin preference");
        self.store.remove(keys::UI_CHOICE);
    }
}

/// Control holding keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    Card(Skin),
    Remember,
    ClearSaved,
}

/// What the chooser wants after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserOutcome {
    Stay,
    Launch(Skin),
    Quit,
}

/// State of the chooser screen
pub struct Chooser {
    preferences: Preferences,
    saved: Option<Skin>,
    remember: bool,
    focus: Focus,
}

impl Chooser {
    /// Remember starts checked when a choice is already saved
    pub fn new(preferences: Preferences) -> Self {
        let saved = preferences.saved();
        Self {
            preferences,
            saved,
            remember: saved.is_some(),
            focus: Focus::None,
        }
    }

    pub fn saved(&self) -> Option<Skin> {
        self.saved
    }

    pub fn remember(&self) -> bool {
        self.remember
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Focus order; the clear button only exists while a choice is saved
    fn focus_ring(&self) -> Vec<Focus> {
        let mut ring = vec![
            Focus::Card(Skin::Modern),
            Focus::Card(Skin::Retro),
            Focus::Remember,
        ];
        if self.saved.is_some() {
            ring.push(Focus::ClearSaved);
        }
        ring
    }

    fn move_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        let position = ring.iter().position(|f| *f == self.focus);
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => ring.len() - 1,
            (Some(i), true) => (i + 1) % ring.len(),
            (Some(i), false) => (i + ring.len() - 1) % ring.len(),
        };
        self.focus = ring[next];
    }

    /// Launch `skin`, saving it first when remember is checked
    pub fn launch(&mut self, skin: Skin) -> ChooserOutcome {
        if self.remember {
            self.preferences.save(skin);
            self.saved = Some(skin);
        }
        tracing::info!("Launching {} skin", skin);
        ChooserOutcome::Launch(skin)
    }

    pub fn toggle_remember(&mut self) {
        self.remember = !self.remember;
    }

    /// Forget the saved choice and hide its indicator
    pub fn clear_saved(&mut self) {
        self.preferences.clear();
        self.saved = None;
        if self.focus == Focus::ClearSaved {
            self.focus = Focus::None;
        }
    }

    fn activate(&mut self) -> ChooserOutcome {
        match self.focus {
            Focus::Card(skin) => return self.launch(skin),
            Focus::Remember => self.toggle_remember(),
            Focus::ClearSaved => self.clear_saved(),
            Focus::None => {}
        }
        ChooserOutcome::Stay
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> ChooserOutcome {
        if key.kind == KeyEventKind::Release {
            return ChooserOutcome::Stay;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => ChooserOutcome::Quit,
                _ => ChooserOutcome::Stay,
            };
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => ChooserOutcome::Quit,
            KeyCode::Char('1') | KeyCode::Char('m') | KeyCode::Char('M') => {
                self.launch(Skin::Modern)
            }
            KeyCode::Char('2') | KeyCode::Char('r') | KeyCode::Char('R') => {
                self.launch(Skin::Retro)
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => {
                self.move_focus(true);
                ChooserOutcome::Stay
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => {
                self.move_focus(false);
                ChooserOutcome::Stay
            }
            KeyCode::Char(' ') => self.activate(),
            KeyCode::Enter => match (self.focus, self.saved) {
                (Focus::None, Some(saved)) => {
                    tracing::info!("Continuing with saved {} skin", saved);
                    ChooserOutcome::Launch(saved)
                }
                _ => self.activate(),
            },
            _ => ChooserOutcome::Stay,
        }
    }
}
