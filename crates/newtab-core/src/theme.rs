//! Light/dark theme selection.
//!
//! The theme is persisted separately from the configuration, under its own
//! `"theme"` storage key, as the literal class name the page toggles on its
//! root element.

use std::fmt;
use std::str::FromStr;

use crate::config::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Stored value / root element class.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark-mode",
            Theme::Light => "light-mode",
        }
    }

    /// Interprets a stored value.  Anything other than `"dark-mode"` is light.
    pub fn from_stored(value: &str) -> Self {
        if value == Theme::Dark.as_str() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// The theme a page starts in: the stored choice if there is a non-empty
    /// one, otherwise the system dark-mode preference.
    pub fn resolve_initial(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored.filter(|value| !value.is_empty()) {
            Some(value) => Self::from_stored(value),
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Catppuccin flavour the palette colours resolve against.
    pub fn palette_prefix(self) -> &'static str {
        match self {
            Theme::Dark => "mocha",
            Theme::Light => "latte",
        }
    }

    /// Label of the toggle button: the theme a click switches to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the short names used on the command line (`dark`, `light`) as well
/// as the stored class names.
impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" | "dark-mode" => Ok(Theme::Dark),
            "light" | "light-mode" => Ok(Theme::Light),
            other => Err(ConfigError::unknown("theme", other)),
        }
    }
}
