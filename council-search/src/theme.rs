//! Theme preference

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore, THEME_KEY};

/// Browser chrome colour for dark pages.
pub const DARK_THEME_COLOR: &str = "#0F172A";
/// Browser chrome colour for light pages.
pub const LIGHT_THEME_COLOR: &str = "#FFFFFF";

/// User theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the system colour scheme
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    /// The next theme in the toggle cycle: auto, light, dark, auto.
    pub fn next(self) -> Self {
        match self {
            Theme::Auto => Theme::Light,
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
        }
    }

    /// Stored name
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Whether pages render dark under this preference.
    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self {
            Theme::Auto => system_prefers_dark,
            Theme::Light => false,
            Theme::Dark => true,
        }
    }

    /// `theme-color` meta value for this preference.
    pub fn theme_color(&self, system_prefers_dark: bool) -> &'static str {
        if self.is_dark(system_prefers_dark) {
            DARK_THEME_COLOR
        } else {
            LIGHT_THEME_COLOR
        }
    }

    /// Load the stored preference, falling back to `Auto`.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        storage::read_logged(store, THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// Persist this preference. Failures are logged only.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        storage::write_logged(store, THEME_KEY, self.as_str());
    }

}

/// The theme toggle's state.
///
/// The current theme lives in memory and is written back on every change,
/// so the toggle keeps cycling when storage is blocked or full.
pub struct ThemePreference<S: KeyValueStore> {
    store: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemePreference<S> {
    /// Read the stored theme once, falling back to `Auto`.
    pub fn new(store: S) -> Self {
        let current = Theme::load(&store);
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switch to `theme` and persist it.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        theme.save(&mut self.store);
        log::debug!("[Theme] switched to {}", theme);
    }

    /// Advance one step and return the new theme.
    pub fn cycle(&mut self) -> Theme {
        let next = self.current.next();
        self.set(next);
        next
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown theme name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme;

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme")
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Theme::Auto),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme),
        }
    }
}
