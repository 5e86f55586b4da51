//! Typed handles for the individual settings the panel edits.
//!
//! The settings panel addresses values by their JSON name (`"clockFontSize"`,
//! `"showCredit"`, ...).  [`Setting`] turns such a name into a typed handle
//! that knows which field it writes, how the value is validated, and whether
//! the write is persisted immediately or deferred to a commit.

use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;
use super::schema::{ColorSlot, Styles};

/// When a write through the settings panel reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Saved as soon as the value changes (swatches, checkboxes, selects).
    Immediate,
    /// Applied live, saved on commit (slider release, text blur).
    Deferred,
}

/// A numeric style edited with a range slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    GreetingFontSize,
    ClockFontSize,
    SearchFontSize,
    SearchWidth,
}

impl Slider {
    pub const ALL: [Slider; 4] = [
        Slider::GreetingFontSize,
        Slider::ClockFontSize,
        Slider::SearchFontSize,
        Slider::SearchWidth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Slider::GreetingFontSize => "greetingFontSize",
            Slider::ClockFontSize => "clockFontSize",
            Slider::SearchFontSize => "searchFontSize",
            Slider::SearchWidth => "searchWidth",
        }
    }

    /// `(min, max, step)` as offered by the slider control.
    pub fn range(self) -> (f64, f64, f64) {
        match self {
            Slider::GreetingFontSize => (0.5, 5.0, 0.1),
            Slider::ClockFontSize => (1.0, 8.0, 0.1),
            Slider::SearchFontSize => (0.5, 2.0, 0.05),
            Slider::SearchWidth => (20.0, 95.0, 1.0),
        }
    }

    /// CSS unit appended when the value is applied.
    pub fn unit(self) -> &'static str {
        match self {
            Slider::SearchWidth => "vw",
            _ => "rem",
        }
    }

    /// Returns `true` if `value` lies inside the slider's range.
    pub fn accepts(self, value: f64) -> bool {
        let (min, max, _) = self.range();
        value.is_finite() && value >= min && value <= max
    }

    pub fn value(self, styles: &Styles) -> &str {
        match self {
            Slider::GreetingFontSize => &styles.greeting_font_size,
            Slider::ClockFontSize => &styles.clock_font_size,
            Slider::SearchFontSize => &styles.search_font_size,
            Slider::SearchWidth => &styles.search_width,
        }
    }

    pub fn value_mut(self, styles: &mut Styles) -> &mut String {
        match self {
            Slider::GreetingFontSize => &mut styles.greeting_font_size,
            Slider::ClockFontSize => &mut styles.clock_font_size,
            Slider::SearchFontSize => &mut styles.search_font_size,
            Slider::SearchWidth => &mut styles.search_width,
        }
    }
}

/// A free-text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    GreetingText,
    ClockFormat,
}

impl TextField {
    pub const ALL: [TextField; 2] = [TextField::GreetingText, TextField::ClockFormat];

    pub fn as_str(self) -> &'static str {
        match self {
            TextField::GreetingText => "greetingText",
            TextField::ClockFormat => "clockFormat",
        }
    }

    pub fn value(self, styles: &Styles) -> &str {
        match self {
            TextField::GreetingText => &styles.greeting_text,
            TextField::ClockFormat => &styles.clock_format,
        }
    }

    pub fn value_mut(self, styles: &mut Styles) -> &mut String {
        match self {
            TextField::GreetingText => &mut styles.greeting_text,
            TextField::ClockFormat => &mut styles.clock_format,
        }
    }
}

/// A visibility checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    ShowGreeting,
    ShowCredit,
    ShowSettingsButton,
    ShowThemeButton,
}

impl Toggle {
    pub const ALL: [Toggle; 4] = [
        Toggle::ShowGreeting,
        Toggle::ShowCredit,
        Toggle::ShowSettingsButton,
        Toggle::ShowThemeButton,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Toggle::ShowGreeting => "showGreeting",
            Toggle::ShowCredit => "showCredit",
            Toggle::ShowSettingsButton => "showSettingsButton",
            Toggle::ShowThemeButton => "showThemeButton",
        }
    }

    pub fn value(self, styles: &Styles) -> bool {
        match self {
            Toggle::ShowGreeting => styles.show_greeting,
            Toggle::ShowCredit => styles.show_credit,
            Toggle::ShowSettingsButton => styles.show_settings_button,
            Toggle::ShowThemeButton => styles.show_theme_button,
        }
    }

    pub fn value_mut(self, styles: &mut Styles) -> &mut bool {
        match self {
            Toggle::ShowGreeting => &mut styles.show_greeting,
            Toggle::ShowCredit => &mut styles.show_credit,
            Toggle::ShowSettingsButton => &mut styles.show_settings_button,
            Toggle::ShowThemeButton => &mut styles.show_theme_button,
        }
    }
}

/// Any single value the settings panel can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Color(ColorSlot),
    Slider(Slider),
    Text(TextField),
    Toggle(Toggle),
}

impl Setting {
    /// Every setting, grouped the way the panel lays them out.
    pub fn all() -> impl Iterator<Item = Setting> {
        ColorSlot::ALL
            .into_iter()
            .map(Setting::Color)
            .chain(Slider::ALL.into_iter().map(Setting::Slider))
            .chain(TextField::ALL.into_iter().map(Setting::Text))
            .chain(Toggle::ALL.into_iter().map(Setting::Toggle))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Setting::Color(slot) => slot.as_str(),
            Setting::Slider(slider) => slider.as_str(),
            Setting::Text(field) => field.as_str(),
            Setting::Toggle(toggle) => toggle.as_str(),
        }
    }

    pub fn kind(self) -> SettingKind {
        match self {
            Setting::Color(_) | Setting::Toggle(_) => SettingKind::Immediate,
            Setting::Slider(_) | Setting::Text(_) => SettingKind::Deferred,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Setting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|setting| setting.as_str() == s)
            .ok_or_else(|| ConfigError::unknown("setting", s))
    }
}
