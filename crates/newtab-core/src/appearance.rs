//! CSS custom properties and element visibility derived from the
//! configuration.
//!
//! Values that are unset (`None` colours) or empty (blank font sizes) produce
//! no property at all, so the stylesheet's own fallback stays in effect.

use crate::config::fields::{Slider, Toggle};
use crate::config::schema::{ColorSlot, Configuration};
use crate::theme::Theme;

/// One `--name: value` declaration for the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssVariable {
    pub name: &'static str,
    pub value: String,
}

impl CssVariable {
    pub fn to_css(&self) -> String {
        format!("{}: {};", self.name, self.value)
    }
}

/// Page elements whose visibility is a user setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageElement {
    CreditText,
    SettingsToggle,
    ThemeToggle,
    Greeting,
}

impl PageElement {
    pub const ALL: [PageElement; 4] = [
        PageElement::CreditText,
        PageElement::SettingsToggle,
        PageElement::ThemeToggle,
        PageElement::Greeting,
    ];

    /// DOM id of the element.
    pub fn id(self) -> &'static str {
        match self {
            PageElement::CreditText => "credit-text",
            PageElement::SettingsToggle => "settings-toggle",
            PageElement::ThemeToggle => "theme-toggle",
            PageElement::Greeting => "greeting",
        }
    }

    fn toggle(self) -> Toggle {
        match self {
            PageElement::CreditText => Toggle::ShowCredit,
            PageElement::SettingsToggle => Toggle::ShowSettingsButton,
            PageElement::ThemeToggle => Toggle::ShowThemeButton,
            PageElement::Greeting => Toggle::ShowGreeting,
        }
    }
}

fn color_variable(slot: ColorSlot) -> &'static str {
    match slot {
        ColorSlot::Accent => "--accent-color",
        ColorSlot::Clock => "--clock-color",
        ColorSlot::Greeting => "--greeting-color",
    }
}

fn slider_variable(slider: Slider) -> &'static str {
    match slider {
        Slider::ClockFontSize => "--clock-font-size",
        Slider::GreetingFontSize => "--greeting-font-size",
        Slider::SearchFontSize => "--search-font-size",
        Slider::SearchWidth => "--search-width",
    }
}

/// Root CSS variables for `config` under `theme`.
///
/// Colours come first (accent, clock, greeting), then sizes.
pub fn css_variables(config: &Configuration, theme: Theme) -> Vec<CssVariable> {
    let colors = [ColorSlot::Accent, ColorSlot::Clock, ColorSlot::Greeting]
        .into_iter()
        .filter_map(|slot| {
            config.colors.get(slot).map(|color| CssVariable {
                name: color_variable(slot),
                value: format!("var(--ctp-{}-{})", theme.palette_prefix(), color),
            })
        });

    let sizes = [
        Slider::ClockFontSize,
        Slider::GreetingFontSize,
        Slider::SearchFontSize,
        Slider::SearchWidth,
    ]
    .into_iter()
    .filter_map(|slider| {
        let value = slider.value(&config.styles);
        (!value.is_empty()).then(|| CssVariable {
            name: slider_variable(slider),
            value: format!("{value}{}", slider.unit()),
        })
    });

    colors.chain(sizes).collect()
}

/// `(element, visible)` for every toggleable element.
pub fn element_visibility(config: &Configuration) -> Vec<(PageElement, bool)> {
    PageElement::ALL
        .into_iter()
        .map(|element| (element, element.toggle().value(&config.styles)))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
