//! Typed configuration schema and its default values.
//!
//! The JSON shape is fixed by what the page has always persisted under the
//! `"config"` storage key:
//!
//! ```json
//! {
//!   "colors":    { "accent": null, "clock": "red", "greeting": null },
//!   "styles":    { "clockFontSize": "2.5", "clockFormat": "{HH}:{mm}", ... },
//!   "positions": { "clock": { "anchor": "center", "x": "0vw", "y": "-5vh" }, ... },
//!   "searchEngines": { "!g": "https://www.google.com/search?q=", ... },
//!   "defaultSearchEngine": "https://www.google.com/search?q="
//! }
//! ```
//!
//! Each record has a flattened `extra` map.  Keys that a previous version of
//! the page wrote but this version does not model are kept there verbatim and
//! written back on the next save.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ConfigError;

/// Clock format used when `styles.clockFormat` is empty.
pub const DEFAULT_CLOCK_FORMAT: &str = "it's {HH}:{mm}:{ss} now!";

/// Engine used when the query has no recognised prefix.
pub const DEFAULT_SEARCH_ENGINE: &str = "https://www.google.com/search?q=";

/// Prefix that navigates straight to the typed address.
pub const DIRECT_NAVIGATION_PREFIX: &str = "!";

/// Engine URL paired with [`DIRECT_NAVIGATION_PREFIX`].
pub const DIRECT_NAVIGATION_URL: &str = "https://";

// ── Config schema types ───────────────────────────────────────────────────────

/// The complete set of user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub colors: Colors,
    pub styles: Styles,
    pub positions: Positions,
    /// Prefix token (e.g. `"!gh"`) → URL the query is appended to.
    ///
    /// Empty by default: entries merge per prefix, so a default entry could
    /// never be deleted for good.
    pub search_engines: BTreeMap<String, String>,
    pub default_search_engine: String,
    /// Top-level keys not modelled by this version.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Palette colour chosen for each colour slot; `None` keeps the theme colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    pub accent: Option<PaletteColor>,
    pub clock: Option<PaletteColor>,
    pub greeting: Option<PaletteColor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Font sizes, texts and visibility flags.
///
/// Numeric settings are stored as strings, exactly as the settings sliders
/// report them, so `"2.5"` round-trips without float formatting drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styles {
    /// rem
    pub clock_font_size: String,
    /// rem
    pub search_font_size: String,
    /// vw
    pub search_width: String,
    pub clock_format: String,
    pub greeting_text: String,
    /// rem
    pub greeting_font_size: String,
    pub show_credit: bool,
    pub show_settings_button: bool,
    pub show_theme_button: bool,
    pub show_greeting: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Placement of every positionable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    pub clock: Position,
    pub search: Position,
    pub greeting: Position,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where one element is pinned, plus CSS length offsets from that anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub anchor: Anchor,
    /// Horizontal offset, any CSS length (e.g. `"0vw"`, `"12px"`).
    pub x: String,
    /// Vertical offset, any CSS length.
    pub y: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Position {
    pub fn new(anchor: Anchor, x: &str, y: &str) -> Self {
        Self {
            anchor,
            x: x.to_string(),
            y: y.to_string(),
            extra: Map::new(),
        }
    }
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for Configuration {
    fn default() -> Self {
        Self {
            colors: Colors::default(),
            styles: Styles::default(),
            positions: Positions::default(),
            search_engines: BTreeMap::new(),
            default_search_engine: DEFAULT_SEARCH_ENGINE.to_string(),
            extra: Map::new(),
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            accent: None,
            clock: None,
            greeting: None,
            extra: Map::new(),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            clock_font_size: "2.5".to_string(),
            search_font_size: "1".to_string(),
            search_width: "50".to_string(),
            clock_format: DEFAULT_CLOCK_FORMAT.to_string(),
            greeting_text: "Hello, Homie!".to_string(),
            greeting_font_size: "1.5".to_string(),
            show_credit: true,
            show_settings_button: true,
            show_theme_button: true,
            show_greeting: true,
            extra: Map::new(),
        }
    }
}

impl Default for Positions {
    fn default() -> Self {
        Self {
            clock: Position::new(Anchor::Center, "0vw", "-5vh"),
            search: Position::new(Anchor::Center, "0vw", "5vh"),
            greeting: Position::new(Anchor::TopCenter, "0vw", "5vh"),
            extra: Map::new(),
        }
    }
}

// ── Slots and elements ────────────────────────────────────────────────────────

/// The three colour pickers in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Accent,
    Clock,
    Greeting,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 3] = [ColorSlot::Accent, ColorSlot::Greeting, ColorSlot::Clock];

    /// JSON key inside `colors`.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorSlot::Accent => "accent",
            ColorSlot::Clock => "clock",
            ColorSlot::Greeting => "greeting",
        }
    }
}

impl Colors {
    pub fn get(&self, slot: ColorSlot) -> Option<PaletteColor> {
        match slot {
            ColorSlot::Accent => self.accent,
            ColorSlot::Clock => self.clock,
            ColorSlot::Greeting => self.greeting,
        }
    }

    pub fn slot_mut(&mut self, slot: ColorSlot) -> &mut Option<PaletteColor> {
        match slot {
            ColorSlot::Accent => &mut self.accent,
            ColorSlot::Clock => &mut self.clock,
            ColorSlot::Greeting => &mut self.greeting,
        }
    }
}

/// Page elements that carry a [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionedElement {
    Greeting,
    Clock,
    Search,
}

impl PositionedElement {
    pub const ALL: [PositionedElement; 3] = [
        PositionedElement::Greeting,
        PositionedElement::Clock,
        PositionedElement::Search,
    ];

    /// JSON key inside `positions`.
    pub fn as_str(self) -> &'static str {
        match self {
            PositionedElement::Greeting => "greeting",
            PositionedElement::Clock => "clock",
            PositionedElement::Search => "search",
        }
    }
}

impl FromStr for PositionedElement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ConfigError::unknown("element", s))
    }
}

impl Positions {
    pub fn get(&self, element: PositionedElement) -> &Position {
        match element {
            PositionedElement::Greeting => &self.greeting,
            PositionedElement::Clock => &self.clock,
            PositionedElement::Search => &self.search,
        }
    }

    pub fn get_mut(&mut self, element: PositionedElement) -> &mut Position {
        match element {
            PositionedElement::Greeting => &mut self.greeting,
            PositionedElement::Clock => &mut self.clock,
            PositionedElement::Search => &mut self.search,
        }
    }
}

// ── Palette ───────────────────────────────────────────────────────────────────

/// Catppuccin accent colours offered by the swatch pickers.
///
/// Only the name is stored; the concrete shade depends on the active theme
/// (`mocha` for dark, `latte` for light), see [`crate::appearance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteColor {
    Rosewater,
    Flamingo,
    Pink,
    Mauve,
    Red,
    Maroon,
    Peach,
    Yellow,
    Green,
    Teal,
    Sky,
    Sapphire,
    Blue,
    Lavender,
}

impl PaletteColor {
    /// All swatches in the order the picker shows them.
    pub const ALL: [PaletteColor; 14] = [
        PaletteColor::Rosewater,
        PaletteColor::Flamingo,
        PaletteColor::Pink,
        PaletteColor::Mauve,
        PaletteColor::Red,
        PaletteColor::Maroon,
        PaletteColor::Peach,
        PaletteColor::Yellow,
        PaletteColor::Green,
        PaletteColor::Teal,
        PaletteColor::Sky,
        PaletteColor::Sapphire,
        PaletteColor::Blue,
        PaletteColor::Lavender,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteColor::Rosewater => "rosewater",
            PaletteColor::Flamingo => "flamingo",
            PaletteColor::Pink => "pink",
            PaletteColor::Mauve => "mauve",
            PaletteColor::Red => "red",
            PaletteColor::Maroon => "maroon",
            PaletteColor::Peach => "peach",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Green => "green",
            PaletteColor::Teal => "teal",
            PaletteColor::Sky => "sky",
            PaletteColor::Sapphire => "sapphire",
            PaletteColor::Blue => "blue",
            PaletteColor::Lavender => "lavender",
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConfigError::unknown("palette color", s))
    }
}

// ── Anchor ────────────────────────────────────────────────────────────────────

/// Compass point an element is pinned to.
///
/// Serialised as `"top-left"`, `"top-center"`, ... `"center"`, ...
/// `"bottom-right"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// All anchors in the order the layout select lists them.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopCenter => "top-center",
            Anchor::TopRight => "top-right",
            Anchor::CenterLeft => "center-left",
            Anchor::Center => "center",
            Anchor::CenterRight => "center-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomCenter => "bottom-center",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ConfigError::unknown("anchor", s))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
