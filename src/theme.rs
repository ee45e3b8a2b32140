//! Light/dark theme preference

use crate::config::STORAGE_KEY_THEME;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `dark` reads as light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Persisted theme choice. Unlike the session it survives logout.
#[derive(Debug, Clone)]
pub struct ThemePreference<S> {
    storage: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemePreference<S> {
    pub fn load(storage: S) -> Self {
        let current = Theme::from_stored(storage.get(STORAGE_KEY_THEME).as_deref());
        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist the new value
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.storage.set(STORAGE_KEY_THEME, self.current.as_str());
        self.current
    }
}
