//! Theme use cases: restore, apply and toggle the light/dark theme.
//!
//! The theme lives under its own storage key, next to the configuration, so
//! it is neither exported nor cleared by a settings reset.

use newtab_core::Theme;
use tracing::{info, warn};

use super::config_store::{ConfigStore, StoreError, THEME_KEY};
use super::ports::KeyValueStore;

/// Theme the page starts in.  A storage read failure is logged and treated
/// as "nothing stored".
pub fn load_theme<S: KeyValueStore>(store: &ConfigStore<S>, prefers_dark: bool) -> Theme {
    let stored = store.storage().get(THEME_KEY).unwrap_or_else(|e| {
        warn!("could not read stored theme: {e}");
        None
    });
    Theme::resolve_initial(stored.as_deref(), prefers_dark)
}

/// Persists `theme` and notifies subscribers so colour variables are
/// re-resolved against the new palette.
pub fn apply_theme<S: KeyValueStore>(
    store: &mut ConfigStore<S>,
    theme: Theme,
) -> Result<(), StoreError> {
    store.storage_mut().set(THEME_KEY, theme.as_str())?;
    info!(theme = theme.as_str(), "theme applied");
    store.notify();
    Ok(())
}

/// Switches from `current` to the other theme and applies it.
pub fn toggle_theme<S: KeyValueStore>(
    store: &mut ConfigStore<S>,
    current: Theme,
) -> Result<Theme, StoreError> {
    let next = current.toggled();
    apply_theme(store, next)?;
    Ok(next)
}
