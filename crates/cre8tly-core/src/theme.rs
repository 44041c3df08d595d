//! Light/dark theme preference.

use crate::storage::{SharedStore, StorageResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// UI color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {:?}", other)),
        }
    }
}

/// The active theme, persisted under [`THEME_KEY`].
///
/// Owned by the application context and lent to whatever needs to read or
/// flip the theme.
pub struct ThemePreference {
    store: SharedStore,
    current: Theme,
}

impl ThemePreference {
    /// Load the stored preference, falling back to [`Theme::default`] when the
    /// value is missing, unreadable or unknown.
    pub fn load(store: SharedStore) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                log::warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        };
        Self { store, current }
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    /// Switch to `theme` and persist it.
    ///
    /// The in-memory theme changes even if persisting fails.
    pub fn set(&mut self, theme: Theme) -> StorageResult<()> {
        if theme != self.current {
            log::info!("Theme changed to {}", theme);
        }
        self.current = theme;
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Flip between light and dark. Returns the new theme.
    pub fn toggle(&mut self) -> StorageResult<Theme> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreference")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
