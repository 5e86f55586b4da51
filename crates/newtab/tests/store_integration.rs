//! Integration tests for the configuration store.
//!
//! These tests exercise the public API only: a `ConfigStore` over both
//! storage adapters, the settings panel write paths, and the page view
//! subscription, the way the host wires them together.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use newtab::application::config_store::{ConfigStore, LoadOutcome, CONFIG_KEY};
use newtab::application::page::PageView;
use newtab::application::ports::{KeyValueStore, Prompt};
use newtab::application::settings::{Axis, ResetOutcome, SettingsPanel};
use newtab::infrastructure::storage::{FileStorage, MemoryStorage};
use newtab_core::{Anchor, Configuration, PaletteColor, PositionedElement, Slider, Theme, Toggle};
use serde_json::{json, Value};

/// Prompt that answers every confirmation with `answer` and records alerts.
struct ScriptedPrompt {
    answer: bool,
    alerts: Vec<String>,
}

impl ScriptedPrompt {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, _message: &str) -> bool {
        self.answer
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

fn memory_with(document: Value) -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    storage.set(CONFIG_KEY, &document.to_string()).unwrap();
    storage
}

fn stored_json<S: KeyValueStore>(store: &ConfigStore<S>) -> Option<Value> {
    store
        .storage()
        .get(CONFIG_KEY)
        .unwrap()
        .map(|text| serde_json::from_str(&text).unwrap())
}

// ── Load semantics ────────────────────────────────────────────────────────────

#[test]
fn test_partial_persisted_document_is_backfilled_with_defaults() {
    // Arrange
    let storage = memory_with(json!({ "styles": { "clockFormat": "{HH}:{mm}" } }));

    // Act
    let (store, outcome) = ConfigStore::open(storage);

    // Assert
    assert_eq!(outcome, LoadOutcome::Restored);
    assert_eq!(store.get().styles.clock_format, "{HH}:{mm}");
    assert!(store.get().styles.show_credit);
    assert_eq!(store.get().positions, Configuration::default().positions);
}

#[test]
fn test_persisted_values_override_defaults_at_every_shared_leaf() {
    let storage = memory_with(json!({
        "colors": { "accent": "maroon", "clock": "sky", "greeting": "green" },
        "positions": { "search": { "anchor": "bottom-center", "x": "1vw", "y": "2vh" } },
        "styles": { "searchWidth": "75", "showThemeButton": false }
    }));

    let (store, _) = ConfigStore::open(storage);
    let config = store.get();

    assert_eq!(config.colors.accent, Some(PaletteColor::Maroon));
    assert_eq!(config.colors.clock, Some(PaletteColor::Sky));
    assert_eq!(config.colors.greeting, Some(PaletteColor::Green));
    assert_eq!(config.positions.search.anchor, Anchor::BottomCenter);
    assert_eq!(config.styles.search_width, "75");
    assert!(!config.styles.show_theme_button);
}

#[test]
fn test_persisted_array_replaces_rather_than_merges() {
    // Arrange: a legacy top-level array, saved twice with different content
    let mut store = ConfigStore::new(memory_with(json!({ "styles": {}, "recent": [1, 2, 3] })));
    store.load();
    store
        .storage_mut()
        .set(CONFIG_KEY, &json!({ "recent": [9] }).to_string())
        .unwrap();

    // Act
    store.reload();

    // Assert
    assert_eq!(store.get().extra.get("recent"), Some(&json!([9])));
}

#[test]
fn test_save_then_load_in_fresh_store_is_identical() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::new(FileStorage::new(dir.path()));
    store.update(|config| {
        config.colors.accent = Some(PaletteColor::Flamingo);
        config.styles.greeting_text = "Round trip".into();
        config.positions.greeting.anchor = Anchor::CenterRight;
        config
            .search_engines
            .insert("!gh".into(), "https://github.com/search?q=".into());
    });

    // Act
    store.save().unwrap();
    let (fresh, outcome) = ConfigStore::open(FileStorage::new(dir.path()));

    // Assert
    assert_eq!(outcome, LoadOutcome::Restored);
    assert_eq!(fresh.get(), store.get());
}

#[test]
fn test_repeated_loads_are_idempotent() {
    let storage = memory_with(json!({ "styles": { "greetingFontSize": "3" }, "x": { "y": 1 } }));
    let mut store = ConfigStore::new(storage);

    store.load();
    let first = store.get().clone();
    store.load();
    store.load();

    assert_eq!(*store.get(), first);
}

#[test]
fn test_legacy_keys_survive_load_and_save_at_every_level() {
    // Arrange
    let storage = memory_with(json!({
        "styles": { "fontFamily": "serif" },
        "positions": { "clock": { "zIndex": 3 } },
        "keybinds": { "settings": "Ctrl+," }
    }));
    let (mut store, _) = ConfigStore::open(storage);

    // Act
    store.save().unwrap();

    // Assert
    let saved = stored_json(&store).unwrap();
    assert_eq!(saved["styles"]["fontFamily"], json!("serif"));
    assert_eq!(saved["positions"]["clock"]["zIndex"], json!(3));
    assert_eq!(saved["keybinds"]["settings"], json!("Ctrl+,"));
}

#[test]
fn test_corrupt_file_loads_as_defaults_and_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_KEY), "{\"styles\": ").unwrap();

    // Act
    let (store, outcome) = ConfigStore::open(FileStorage::new(dir.path()));

    // Assert
    assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
    assert_eq!(*store.get(), Configuration::default());
}

#[test]
fn test_unreadable_config_entry_loads_as_defaults_and_is_reported() {
    // Arrange: a directory where the config file should be
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(CONFIG_KEY)).unwrap();

    // Act
    let (store, outcome) = ConfigStore::open(FileStorage::new(dir.path()));

    // Assert
    assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
    assert_eq!(*store.get(), Configuration::default());
}

#[test]
fn test_one_unusable_value_does_not_cost_the_rest_on_load_or_next_save() {
    // Arrange
    let storage = memory_with(json!({
        "styles": { "greetingText": "Mine", "searchWidth": "80", "clockFontSize": 3, "showGreeting": "no" },
        "searchEngines": { "!gh": "https://github.com/search?q=" }
    }));

    // Act
    let (mut store, outcome) = ConfigStore::open(storage);
    SettingsPanel::new(&mut store)
        .set_toggle(Toggle::ShowCredit, false)
        .unwrap();

    // Assert: in memory
    assert_eq!(outcome, LoadOutcome::Restored);
    assert_eq!(store.get().styles.greeting_text, "Mine");
    assert_eq!(store.get().styles.clock_font_size, "3");
    assert!(store.get().styles.show_greeting);

    // Assert: in storage after the next immediate write
    let saved = stored_json(&store).unwrap();
    assert_eq!(saved["styles"]["greetingText"], json!("Mine"));
    assert_eq!(saved["styles"]["searchWidth"], json!("80"));
    assert_eq!(saved["styles"]["showCredit"], json!(false));
    assert_eq!(saved["searchEngines"]["!gh"], json!("https://github.com/search?q="));
}

// ── Reset and import ──────────────────────────────────────────────────────────

#[test]
fn test_reset_clears_persistence_but_not_memory() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::new(FileStorage::new(dir.path()));
    store.update(|config| config.styles.show_greeting = false);
    store.save().unwrap();

    store.reset().unwrap();

    assert!(!dir.path().join(CONFIG_KEY).exists());
    assert!(!store.get().styles.show_greeting);
    store.reload();
    assert!(store.get().styles.show_greeting);
}

#[test]
fn test_malformed_import_changes_nothing() {
    // Arrange
    let storage = memory_with(json!({ "styles": { "searchWidth": "60" } }));
    let (mut store, _) = ConfigStore::open(storage);
    let persisted_before = stored_json(&store);
    let memory_before = store.get().clone();

    // Act
    let result = store.import(r#"{"foo": 1}"#);

    // Assert
    assert!(result.is_err());
    assert_eq!(stored_json(&store), persisted_before);
    assert_eq!(*store.get(), memory_before);
}

#[test]
fn test_import_needs_only_a_styles_key() {
    // Arrange
    let mut store = ConfigStore::new(MemoryStorage::new());

    // Act
    store
        .import(r#"{"styles":{"greetingText":"Hi","clockFontSize":3},"colors":{"accent":"purple"}}"#)
        .unwrap();
    let outcome = store.reload();

    // Assert
    assert_eq!(outcome, LoadOutcome::Restored);
    assert_eq!(store.get().styles.greeting_text, "Hi");
    assert_eq!(store.get().styles.clock_font_size, "3");
    assert_eq!(store.get().colors.accent, None);
}

#[tokio::test]
async fn test_export_import_reload_reproduces_configuration() {
    // Arrange: customise and export from one data directory
    let source_dir = tempfile::tempdir().unwrap();
    let export_dir = tempfile::tempdir().unwrap();
    let mut source = ConfigStore::new(FileStorage::new(source_dir.path()));
    {
        let mut panel = SettingsPanel::new(&mut source);
        panel.select_color(newtab_core::ColorSlot::Clock, PaletteColor::Yellow).unwrap();
        panel.set_anchor(PositionedElement::Clock, Anchor::BottomLeft).unwrap();
        panel.preview_slider(Slider::ClockFontSize, "6").unwrap();
        panel.commit().unwrap();
    }
    let exported = SettingsPanel::new(&mut source)
        .export_to(export_dir.path())
        .unwrap();

    // Act: import into a different, empty data directory
    let target_dir = tempfile::tempdir().unwrap();
    let mut target = ConfigStore::new(FileStorage::new(target_dir.path()));
    let mut prompt = ScriptedPrompt::answering(true);
    let outcome = SettingsPanel::new(&mut target)
        .import_from(&exported, &mut prompt)
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome, LoadOutcome::Restored);
    assert_eq!(target.get(), source.get());
    assert_eq!(
        prompt.alerts,
        vec!["Configuration imported successfully! The page will now reload.".to_string()]
    );
}

#[test]
fn test_declined_reset_keeps_persisted_configuration() {
    let mut store = ConfigStore::new(memory_with(json!({ "styles": { "greetingText": "Keep" } })));
    store.load();
    let mut prompt = ScriptedPrompt::answering(false);

    let outcome = SettingsPanel::new(&mut store).reset(&mut prompt).unwrap();

    assert_eq!(outcome, ResetOutcome::Declined);
    assert!(stored_json(&store).is_some());
    assert_eq!(store.get().styles.greeting_text, "Keep");
}

// ── Subscriptions and write timing ────────────────────────────────────────────

#[test]
fn test_subscribers_follow_update_load_and_reload_but_not_get_mut() {
    // Arrange
    let mut store = ConfigStore::new(memory_with(json!({ "styles": {} })));
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    let id = store.subscribe(move |_| seen.set(seen.get() + 1));

    // Act / Assert
    store.get_mut().styles.show_credit = false;
    assert_eq!(calls.get(), 0);

    store.update(|_| {});
    store.load();
    store.reload();
    assert_eq!(calls.get(), 3);

    store.unsubscribe(id);
    store.update(|_| {});
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_deferred_writes_wait_for_commit_and_immediate_ones_do_not() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::new(FileStorage::new(dir.path()));

    // Act: deferred
    {
        let mut panel = SettingsPanel::new(&mut store);
        panel.preview_slider(Slider::SearchWidth, "80").unwrap();
        panel.preview_offset(PositionedElement::Search, Axis::X, "4vw");
    }

    // Assert: nothing on disk yet
    assert!(stored_json(&store).is_none());

    // Act: immediate
    SettingsPanel::new(&mut store)
        .set_toggle(Toggle::ShowCredit, false)
        .unwrap();

    // Assert: the immediate save wrote the whole live configuration
    let saved = stored_json(&store).unwrap();
    assert_eq!(saved["styles"]["showCredit"], json!(false));
    assert_eq!(saved["styles"]["searchWidth"], json!("80"));
}

#[test]
fn test_page_view_rerenders_through_settings_writes() {
    // Arrange
    let mut store = ConfigStore::new(MemoryStorage::new());
    let view = Rc::new(RefCell::new(PageView::new(store.get(), Theme::Light)));
    PageView::attach(&view, &mut store);

    // Act
    SettingsPanel::new(&mut store)
        .set_anchor(PositionedElement::Greeting, Anchor::BottomRight)
        .unwrap();

    // Assert
    let view = view.borrow();
    let placement = view.page().placement(PositionedElement::Greeting).unwrap();
    assert_eq!(placement.bottom, "5vh");
    assert_eq!(placement.right, "0vw");
    assert_eq!(placement.text_align, "right");
}
