//! PageView: what the new-tab page currently shows.
//!
//! [`RenderedPage`] is a snapshot of every configuration-driven part of the
//! page (greeting, CSS variables, element visibility, placements) for one
//! theme.  [`PageView`] keeps the latest snapshot and re-renders it whenever
//! the [`ConfigStore`] notifies.  The clock line is rendered separately
//! because it changes every second without any configuration change.
//!
//! The view is shared between the host and the store's listener through an
//! `Rc<RefCell<PageView>>`; everything runs on one thread.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::Timelike;
use newtab_core::{
    css_variables, element_visibility, format_clock, Configuration, CssVariable, PageElement,
    Placement, PositionedElement, Theme,
};
use tracing::debug;

use super::config_store::{ConfigStore, SubscriptionId};
use super::ports::KeyValueStore;

/// Everything the page shows for one configuration and theme, except the
/// clock text.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub theme: Theme,
    pub theme_icon: &'static str,
    pub greeting: String,
    pub css_variables: Vec<CssVariable>,
    pub visibility: Vec<(PageElement, bool)>,
    pub placements: Vec<(PositionedElement, Placement)>,
}

impl RenderedPage {
    pub fn render(config: &Configuration, theme: Theme) -> Self {
        Self {
            theme,
            theme_icon: theme.icon(),
            greeting: config.styles.greeting_text.clone(),
            css_variables: css_variables(config, theme),
            visibility: element_visibility(config),
            placements: PositionedElement::ALL
                .into_iter()
                .map(|element| {
                    let placement = Placement::for_position(config.positions.get(element));
                    (element, placement)
                })
                .collect(),
        }
    }

    pub fn is_visible(&self, element: PageElement) -> bool {
        self.visibility
            .iter()
            .find(|(e, _)| *e == element)
            .map_or(true, |(_, visible)| *visible)
    }

    pub fn placement(&self, element: PositionedElement) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, placement)| placement)
    }
}

impl fmt::Display for RenderedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "theme:    {} {}", self.theme, self.theme_icon)?;
        if self.is_visible(PageElement::Greeting) {
            writeln!(f, "greeting: {}", self.greeting)?;
        }
        writeln!(f, "variables:")?;
        for var in &self.css_variables {
            writeln!(f, "  {}", var.to_css())?;
        }
        writeln!(f, "visibility:")?;
        for (element, visible) in &self.visibility {
            let state = if *visible { "shown" } else { "hidden" };
            writeln!(f, "  #{:<16} {state}", element.id())?;
        }
        writeln!(f, "placement:")?;
        for (element, placement) in &self.placements {
            writeln!(f, "  #{:<9} {}", element.as_str(), placement.to_css())?;
        }
        Ok(())
    }
}

/// Clock line for `now` under the configured format.
pub fn clock_text<T: Timelike>(config: &Configuration, now: &T) -> String {
    format_clock(&config.styles.clock_format, now)
}

/// The latest rendering of the page.
#[derive(Debug)]
pub struct PageView {
    page: RenderedPage,
    renders: u64,
}

impl PageView {
    pub fn new(config: &Configuration, theme: Theme) -> Self {
        Self {
            page: RenderedPage::render(config, theme),
            renders: 1,
        }
    }

    pub fn page(&self) -> &RenderedPage {
        &self.page
    }

    pub fn theme(&self) -> Theme {
        self.page.theme
    }

    /// How many times the page has been rendered.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Re-renders against `config` in the current theme.
    pub fn refresh(&mut self, config: &Configuration) {
        self.page = RenderedPage::render(config, self.page.theme);
        self.renders += 1;
        debug!(renders = self.renders, "page re-rendered");
    }

    /// Switches theme and re-renders.
    pub fn set_theme(&mut self, theme: Theme, config: &Configuration) {
        self.page = RenderedPage::render(config, theme);
        self.renders += 1;
    }

    /// Registers the view's render step with `store`.
    pub fn attach<S: KeyValueStore>(
        view: &Rc<RefCell<PageView>>,
        store: &mut ConfigStore<S>,
    ) -> SubscriptionId {
        let view = Rc::clone(view);
        store.subscribe(move |config| view.borrow_mut().refresh(config))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
