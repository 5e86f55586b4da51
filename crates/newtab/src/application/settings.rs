//! SettingsPanel: every write path of the settings modal.
//!
//! # Immediate vs deferred writes
//!
//! Swatches, checkboxes, anchor selects and the search-engine list are saved
//! as soon as they change.  Sliders, text fields and offset inputs update the
//! live configuration on every keystroke for instant feedback, but only reach
//! storage on [`SettingsPanel::commit`], the equivalent of the control
//! losing focus.  Either way the write goes through [`ConfigStore::update`],
//! so the page view re-renders.
//!
//! Import, export and reset work on whole documents and talk to the user
//! through a [`Prompt`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use newtab_core::{
    Anchor, ColorSlot, PaletteColor, PositionedElement, Setting, SettingKind, Slider, TextField,
    Toggle,
};
use thiserror::Error;
use tracing::{debug, info};

use super::config_store::{ConfigStore, ImportError, LoadOutcome, StoreError};
use super::ports::{KeyValueStore, Prompt};

/// File name offered for exports.
pub const EXPORT_FILE_NAME: &str = "config.json";

pub const IMPORT_SUCCESS_MESSAGE: &str =
    "Configuration imported successfully! The page will now reload.";

pub const RESET_CONFIRM_MESSAGE: &str =
    "Are you sure you want to reset all settings to default? This cannot be undone.";

/// Error type for settings panel writes.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("\"{0}\" is not a number")]
    InvalidNumber(String),

    #[error("{setting} must be between {min} and {max}, got {value}")]
    OutOfRange {
        setting: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown setting \"{0}\"")]
    UnknownSetting(String),

    #[error("invalid value \"{value}\" for {setting}: expected {expected}")]
    InvalidValue {
        setting: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Offset input of a positioned element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Result of a reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The user declined; nothing changed.
    Declined,
    /// Storage was cleared and the page reloaded.
    Reset(LoadOutcome),
}

/// Parses a checkbox value typed as text.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

pub struct SettingsPanel<'a, S: KeyValueStore> {
    store: &'a mut ConfigStore<S>,
}

impl<'a, S: KeyValueStore> SettingsPanel<'a, S> {
    pub fn new(store: &'a mut ConfigStore<S>) -> Self {
        Self { store }
    }

    // ── Immediate writes ──────────────────────────────────────────────────────

    pub fn select_color(&mut self, slot: ColorSlot, color: PaletteColor) -> Result<(), StoreError> {
        debug!(slot = slot.as_str(), color = color.as_str(), "color selected");
        self.store
            .update_and_save(|config| *config.colors.slot_mut(slot) = Some(color))
    }

    pub fn set_toggle(&mut self, toggle: Toggle, on: bool) -> Result<(), StoreError> {
        self.store
            .update_and_save(|config| *toggle.value_mut(&mut config.styles) = on)
    }

    pub fn set_anchor(&mut self, element: PositionedElement, anchor: Anchor) -> Result<(), StoreError> {
        self.store
            .update_and_save(|config| config.positions.get_mut(element).anchor = anchor)
    }

    /// Replaces the whole engine table from editor rows.
    ///
    /// Both cells are trimmed; rows with an empty prefix or URL are dropped.
    /// A later row wins over an earlier one with the same prefix.
    pub fn apply_search_engines<P, U>(&mut self, rows: &[(P, U)]) -> Result<(), StoreError>
    where
        P: AsRef<str>,
        U: AsRef<str>,
    {
        let engines: BTreeMap<String, String> = rows
            .iter()
            .map(|(prefix, url)| (prefix.as_ref().trim(), url.as_ref().trim()))
            .filter(|(prefix, url)| !prefix.is_empty() && !url.is_empty())
            .map(|(prefix, url)| (prefix.to_string(), url.to_string()))
            .collect();
        self.store
            .update_and_save(|config| config.search_engines = engines)
    }

    /// Deletes one engine row.  Returns `false` if the prefix was not present.
    pub fn remove_search_engine(&mut self, prefix: &str) -> Result<bool, StoreError> {
        let mut removed = false;
        self.store.update_and_save(|config| {
            removed = config.search_engines.remove(prefix).is_some();
        })?;
        Ok(removed)
    }

    // ── Deferred writes ───────────────────────────────────────────────────────

    /// Applies a slider value live.  The value must parse as a number inside
    /// the slider's range; it is stored as typed.
    pub fn preview_slider(&mut self, slider: Slider, raw: &str) -> Result<(), SettingsError> {
        let raw = raw.trim();
        let value: f64 = raw
            .parse()
            .map_err(|_| SettingsError::InvalidNumber(raw.to_string()))?;
        if !slider.accepts(value) {
            let (min, max, _) = slider.range();
            return Err(SettingsError::OutOfRange {
                setting: slider.as_str(),
                value,
                min,
                max,
            });
        }
        self.store
            .update(|config| *slider.value_mut(&mut config.styles) = raw.to_string());
        Ok(())
    }

    pub fn preview_text(&mut self, field: TextField, value: &str) {
        self.store
            .update(|config| *field.value_mut(&mut config.styles) = value.to_string());
    }

    pub fn preview_offset(&mut self, element: PositionedElement, axis: Axis, value: &str) {
        self.store.update(|config| {
            let position = config.positions.get_mut(element);
            match axis {
                Axis::X => position.x = value.to_string(),
                Axis::Y => position.y = value.to_string(),
            }
        });
    }

    /// Persists the live configuration, as a slider release or text blur does.
    pub fn commit(&mut self) -> Result<(), StoreError> {
        self.store.save()
    }

    // ── By name ───────────────────────────────────────────────────────────────

    /// Writes `raw` to `setting` and persists it, whatever the control's
    /// usual timing.
    pub fn apply(&mut self, setting: Setting, raw: &str) -> Result<(), SettingsError> {
        match setting {
            Setting::Color(slot) => {
                let color: PaletteColor = raw.trim().parse().map_err(|_| SettingsError::InvalidValue {
                    setting: slot.as_str(),
                    value: raw.to_string(),
                    expected: "a palette color name",
                })?;
                self.select_color(slot, color)?;
            }
            Setting::Toggle(toggle) => {
                let on = parse_flag(raw).ok_or_else(|| SettingsError::InvalidValue {
                    setting: toggle.as_str(),
                    value: raw.to_string(),
                    expected: "true or false",
                })?;
                self.set_toggle(toggle, on)?;
            }
            Setting::Slider(slider) => self.preview_slider(slider, raw)?,
            Setting::Text(field) => self.preview_text(field, raw),
        }
        if setting.kind() == SettingKind::Deferred {
            self.commit()?;
        }
        info!(setting = setting.as_str(), "setting changed");
        Ok(())
    }

    /// [`apply`](Self::apply) addressed by JSON name (`"clockFontSize"`).
    pub fn apply_named(&mut self, name: &str, raw: &str) -> Result<Setting, SettingsError> {
        let setting: Setting = name
            .parse()
            .map_err(|_| SettingsError::UnknownSetting(name.to_string()))?;
        self.apply(setting, raw)?;
        Ok(setting)
    }

    // ── Whole-document actions ────────────────────────────────────────────────

    /// Writes the pretty-printed configuration to `dir/config.json`.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, SettingsError> {
        let text = self.store.export()?;
        let path = dir.join(EXPORT_FILE_NAME);
        std::fs::write(&path, text).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "configuration exported");
        Ok(path)
    }

    /// Reads `path` asynchronously and imports it.
    ///
    /// On success the user is told the page will reload, and it does.  On
    /// failure the reason is shown and nothing changes.
    pub async fn import_from<P: Prompt>(
        &mut self,
        path: &Path,
        prompt: &mut P,
    ) -> Result<LoadOutcome, ImportError> {
        let result = match tokio::fs::read_to_string(path).await {
            Ok(text) => self.store.import(&text),
            Err(source) => Err(ImportError::Read {
                path: path.to_path_buf(),
                source,
            }),
        };

        match result {
            Ok(()) => {
                prompt.alert(IMPORT_SUCCESS_MESSAGE);
                Ok(self.store.reload())
            }
            Err(e) => {
                prompt.alert(&format!("Error importing configuration: {e}"));
                Err(e)
            }
        }
    }

    /// Asks for confirmation, then clears the persisted configuration and
    /// reloads.
    pub fn reset<P: Prompt>(&mut self, prompt: &mut P) -> Result<ResetOutcome, StoreError> {
        if !prompt.confirm(RESET_CONFIRM_MESSAGE) {
            debug!("reset declined");
            return Ok(ResetOutcome::Declined);
        }
        self.store.reset()?;
        Ok(ResetOutcome::Reset(self.store.reload()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use newtab_core::Configuration;

    use super::*;
    use crate::application::config_store::CONFIG_KEY;
    use crate::application::ports::MockPrompt;
    use crate::infrastructure::storage::MemoryStorage;

    fn store() -> ConfigStore<MemoryStorage> {
        ConfigStore::new(MemoryStorage::new())
    }

    fn persisted(store: &ConfigStore<MemoryStorage>) -> Option<Configuration> {
        store
            .storage()
            .get(CONFIG_KEY)
            .unwrap()
            .map(|text| serde_json::from_str(&text).unwrap())
    }

    // ── Immediate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_select_color_saves_immediately() {
        // Arrange
        let mut store = store();

        // Act
        SettingsPanel::new(&mut store)
            .select_color(ColorSlot::Greeting, PaletteColor::Mauve)
            .unwrap();

        // Assert
        let saved = persisted(&store).expect("saved");
        assert_eq!(saved.colors.greeting, Some(PaletteColor::Mauve));
    }

    #[test]
    fn test_set_toggle_and_anchor_save_immediately() {
        let mut store = store();
        let mut panel = SettingsPanel::new(&mut store);

        panel.set_toggle(Toggle::ShowThemeButton, false).unwrap();
        panel
            .set_anchor(PositionedElement::Search, Anchor::BottomCenter)
            .unwrap();

        let saved = persisted(&store).unwrap();
        assert!(!saved.styles.show_theme_button);
        assert_eq!(saved.positions.search.anchor, Anchor::BottomCenter);
    }

    #[test]
    fn test_apply_search_engines_trims_and_drops_incomplete_rows() {
        // Arrange
        let mut store = store();
        let rows = [
            (" !gh ", " https://github.com/search?q= "),
            ("", "https://nowhere/?q="),
            ("!empty", "   "),
            ("!", "https://"),
        ];

        // Act
        SettingsPanel::new(&mut store).apply_search_engines(&rows).unwrap();

        // Assert
        let engines = &persisted(&store).unwrap().search_engines;
        assert_eq!(engines.len(), 2);
        assert_eq!(engines["!gh"], "https://github.com/search?q=");
        assert_eq!(engines["!"], "https://");
    }

    #[test]
    fn test_apply_search_engines_replaces_previous_table() {
        let mut store = store();
        let mut panel = SettingsPanel::new(&mut store);
        panel.apply_search_engines(&[("!a", "https://a/?q=")]).unwrap();

        panel.apply_search_engines(&[("!b", "https://b/?q=")]).unwrap();

        assert!(!store.get().search_engines.contains_key("!a"));
        assert!(store.get().search_engines.contains_key("!b"));
    }

    #[test]
    fn test_remove_search_engine_reports_presence() {
        let mut store = store();
        let mut panel = SettingsPanel::new(&mut store);
        panel.apply_search_engines(&[("!a", "https://a/?q=")]).unwrap();

        assert!(panel.remove_search_engine("!a").unwrap());
        assert!(!panel.remove_search_engine("!a").unwrap());
        assert!(persisted(&store).unwrap().search_engines.is_empty());
    }

    // ── Deferred ──────────────────────────────────────────────────────────────

    #[test]
    fn test_preview_slider_is_live_but_not_persisted_until_commit() {
        // Arrange
        let mut store = store();
        let mut panel = SettingsPanel::new(&mut store);

        // Act
        panel.preview_slider(Slider::ClockFontSize, "4.2").unwrap();
        panel.preview_text(TextField::GreetingText, "Yo");
        panel.preview_offset(PositionedElement::Clock, Axis::Y, "12vh");

        // Assert: live, not saved
        assert_eq!(store.get().styles.clock_font_size, "4.2");
        assert_eq!(store.get().styles.greeting_text, "Yo");
        assert_eq!(store.get().positions.clock.y, "12vh");
        assert!(persisted(&store).is_none());

        // Act: commit
        SettingsPanel::new(&mut store).commit().unwrap();

        // Assert: saved
        let saved = persisted(&store).unwrap();
        assert_eq!(saved.styles.clock_font_size, "4.2");
        assert_eq!(saved.positions.clock.y, "12vh");
    }

    #[test]
    fn test_preview_slider_rejects_out_of_range_and_garbage() {
        let mut store = store();
        let mut panel = SettingsPanel::new(&mut store);

        let too_wide = panel.preview_slider(Slider::SearchWidth, "120").unwrap_err();
        let garbage = panel.preview_slider(Slider::SearchWidth, "wide").unwrap_err();

        assert!(matches!(too_wide, SettingsError::OutOfRange { max, .. } if max == 95.0));
        assert!(matches!(garbage, SettingsError::InvalidNumber(_)));
        assert_eq!(store.get().styles.search_width, "50");
    }

    // ── By name ───────────────────────────────────────────────────────────────

    #[test]
    fn test_apply_named_commits_every_kind() {
        let mut store = store();
        let mut panel = SettingsPanel::new(&mut store);

        panel.apply_named("accent", "teal").unwrap();
        panel.apply_named("showCredit", "off").unwrap();
        panel.apply_named("searchFontSize", "1.25").unwrap();
        panel.apply_named("clockFormat", "{HH}h").unwrap();

        let saved = persisted(&store).unwrap();
        assert_eq!(saved.colors.accent, Some(PaletteColor::Teal));
        assert!(!saved.styles.show_credit);
        assert_eq!(saved.styles.search_font_size, "1.25");
        assert_eq!(saved.styles.clock_format, "{HH}h");
    }

    #[test]
    fn test_apply_named_rejects_unknown_setting_and_bad_values() {
        let mut store = store();
        let mut panel = SettingsPanel::new(&mut store);

        assert!(matches!(
            panel.apply_named("fontFamily", "serif"),
            Err(SettingsError::UnknownSetting(_))
        ));
        assert!(matches!(
            panel.apply_named("clock", "purple"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            panel.apply_named("showGreeting", "maybe"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(persisted(&store).is_none());
    }

    // ── Export / import / reset ───────────────────────────────────────────────

    #[test]
    fn test_export_to_writes_config_json() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut store = store();
        store.get_mut().styles.greeting_text = "Exported".into();

        // Act
        let path = SettingsPanel::new(&mut store).export_to(dir.path()).unwrap();

        // Assert
        assert!(path.ends_with("config.json"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"greetingText\": \"Exported\""));
    }

    #[tokio::test]
    async fn test_import_from_alerts_success_and_reloads() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.json");
        std::fs::write(&file, r#"{"styles":{"greetingText":"Imported"}}"#).unwrap();
        let mut store = store();
        let mut prompt = MockPrompt::new();
        prompt
            .expect_alert()
            .with(eq(IMPORT_SUCCESS_MESSAGE))
            .times(1)
            .return_const(());

        // Act
        let outcome = SettingsPanel::new(&mut store)
            .import_from(&file, &mut prompt)
            .await
            .unwrap();

        // Assert
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(store.get().styles.greeting_text, "Imported");
    }

    #[tokio::test]
    async fn test_import_from_alerts_reason_and_changes_nothing() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        std::fs::write(&file, r#"{"foo": 1}"#).unwrap();
        let mut store = store();
        let mut prompt = MockPrompt::new();
        prompt
            .expect_alert()
            .withf(|message: &str| {
                message.starts_with("Error importing configuration: ")
                    && message.contains("styles")
            })
            .times(1)
            .return_const(());

        // Act
        let result = SettingsPanel::new(&mut store)
            .import_from(&file, &mut prompt)
            .await;

        // Assert
        assert!(matches!(result, Err(ImportError::Invalid(_))));
        assert!(store.storage().is_empty());
        assert_eq!(*store.get(), Configuration::default());
    }

    #[tokio::test]
    async fn test_import_from_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store();
        let mut prompt = MockPrompt::new();
        prompt.expect_alert().times(1).return_const(());

        let result = SettingsPanel::new(&mut store)
            .import_from(&dir.path().join("absent.json"), &mut prompt)
            .await;

        assert!(matches!(result, Err(ImportError::Read { .. })));
    }

    #[test]
    fn test_reset_declined_changes_nothing() {
        // Arrange
        let mut store = store();
        store.get_mut().styles.show_greeting = false;
        store.save().unwrap();
        let mut prompt = MockPrompt::new();
        prompt
            .expect_confirm()
            .with(eq(RESET_CONFIRM_MESSAGE))
            .times(1)
            .return_const(false);

        // Act
        let outcome = SettingsPanel::new(&mut store).reset(&mut prompt).unwrap();

        // Assert
        assert_eq!(outcome, ResetOutcome::Declined);
        assert!(persisted(&store).is_some());
        assert!(!store.get().styles.show_greeting);
    }

    #[test]
    fn test_reset_confirmed_clears_and_reloads_defaults() {
        let mut store = store();
        store.get_mut().styles.show_greeting = false;
        store.save().unwrap();
        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().times(1).return_const(true);

        let outcome = SettingsPanel::new(&mut store).reset(&mut prompt).unwrap();

        assert_eq!(outcome, ResetOutcome::Reset(LoadOutcome::NotFound));
        assert!(persisted(&store).is_none());
        assert_eq!(*store.get(), Configuration::default());
    }
}
