//! # newtab-core
//!
//! Domain library for the newtab page: the configuration schema and its
//! defaults, the deep-merge algorithm that reconciles persisted preferences
//! with the current schema, and the pure render models that turn a
//! configuration into what the page shows.
//!
//! This crate performs no I/O.  Persistence, subscriptions and the settings
//! panel live in the `newtab` crate, which depends on this one.
//!
//! # Architecture overview (for beginners)
//!
//! The new-tab page shows a greeting, a live clock and a search bar, all of
//! which the user can restyle and reposition.  Every customisation lives in a
//! single nested [`Configuration`] record.  This crate defines:
//!
//! - **`config`** – The typed schema, the default values, the recursive
//!   [`deep_merge`] over JSON values, and validation of imported documents.
//!
//! - **`appearance`** – CSS custom properties and element visibility derived
//!   from `colors` and `styles`.
//!
//! - **`layout`** – Turns a compass [`Anchor`] plus x/y offsets into concrete
//!   `top`/`left`/`bottom`/`right`/`transform` placement.
//!
//! - **`clock`**, **`search`**, **`theme`** – The clock line, prefix-routed
//!   search targets, and the light/dark theme.

pub mod appearance;
pub mod clock;
pub mod config;
pub mod layout;
pub mod search;
pub mod theme;

// Re-export the most-used types at the crate root so callers can write
// `newtab_core::Configuration` instead of `newtab_core::config::schema::Configuration`.
pub use appearance::{css_variables, element_visibility, CssVariable, PageElement};
pub use clock::format_clock;
pub use config::document::RejectedLeaf;
pub use config::error::ConfigError;
pub use config::fields::{Setting, SettingKind, Slider, TextField, Toggle};
pub use config::merge::{deep_merge, merge_onto_defaults, validate_import};
pub use config::schema::{
    Anchor, ColorSlot, Colors, Configuration, PaletteColor, Position, PositionedElement,
    Positions, Styles,
};
pub use layout::Placement;
pub use search::{resolve_search, SearchTarget};
pub use theme::Theme;
