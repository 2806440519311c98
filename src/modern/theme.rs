//! Light/dark theme preference of the modern page.

use crate::storage::{keys, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Value of the `data-theme` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Light becomes dark; dark and unset become light
    pub fn toggled(current: Option<Theme>) -> Theme {
        match current {
            Some(Theme::Light) => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Theme requested on the command line; `System` forgets any stored theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSetting {
    Light,
    Dark,
    System,
}

pub fn stored_theme(store: &dyn KeyValueStore) -> Option<Theme> {
    store.get(keys::THEME).as_deref().and_then(Theme::parse)
}

/// Apply an explicit setting and/or a toggle, returning the theme to render
pub fn resolve_theme(
    store: &dyn KeyValueStore,
    setting: Option<ThemeSetting>,
    toggle: bool,
) -> Option<Theme> {
    match setting {
        Some(ThemeSetting::Light) => store.set(keys::THEME, Theme::Light.as_str()),
        Some(ThemeSetting::Dark) => store.set(keys::THEME, Theme::Dark.as_str()),
        Some(ThemeSetting::System) => store.remove(keys::THEME),
        None => {}
    }

    let current = stored_theme(store);
    if !toggle {
        return current;
    }
    let next = Theme::toggled(current);
    tracing::debug!("Theme toggled to {}", next.as_str());
    store.set(keys::THEME, next.as_str());
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn toggle_should_cycle_between_two_values() {
        assert_eq!(Theme::toggled(Some(Theme::Light)), Theme::Dark);
        assert_eq!(Theme::toggled(Some(Theme::Dark)), Theme::Light);
        assert_eq!(Theme::toggled(None), Theme::Light);
    }

    #[test]
    fn unset_theme_should_defer_to_the_system() {
        let store = MemoryStore::new();
        assert_eq!(resolve_theme(&store, None, false), None);
    }

    #[test]
    fn toggle_should_persist() {
        let store = MemoryStore::new();
        assert_eq!(resolve_theme(&store, None, true), Some(Theme::Light));
        assert_eq!(resolve_theme(&store, None, true), Some(Theme::Dark));
        assert_eq!(store.get(keys::THEME).as_deref(), Some("dark"));
        assert_eq!(resolve_theme(&store, None, false), Some(Theme::Dark));
    }

    #[test]
    fn explicit_setting_should_win_and_system_should_clear() {
        let store = MemoryStore::new();
        assert_eq!(
            resolve_theme(&store, Some(ThemeSetting::Dark), false),
            Some(Theme::Dark)
        );
        assert_eq!(resolve_theme(&store, Some(ThemeSetting::System), false), None);
        assert_eq!(store.get(keys::THEME), None);
    }

    #[test]
    fn garbage_theme_should_be_ignored() {
        let store = MemoryStore::new();
        store.set(keys::THEME, "sepia");
        assert_eq!(stored_theme(&store), None);
    }
}
