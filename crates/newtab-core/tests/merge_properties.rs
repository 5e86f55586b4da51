//! Integration tests for the newtab-core merge and render pipeline.
//!
//! These tests go through the public API only: a persisted JSON document is
//! merged onto the defaults and the resulting configuration is fed to the
//! render models the page uses.

use chrono::NaiveTime;
use newtab_core::config::merge::default_document;
use newtab_core::{
    css_variables, deep_merge, format_clock, merge_onto_defaults, resolve_search,
    validate_import, Anchor, Configuration, PaletteColor, Placement, SearchTarget, Theme,
};
use serde_json::{json, Map, Value};

fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

/// Collects every key path (`a.b.c`) of a JSON object.
fn key_paths(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        if let Value::Object(nested) = value {
            key_paths(nested, &path, out);
        }
        out.push(path);
    }
}

#[test]
fn test_partial_document_keeps_every_default_key() {
    // Arrange
    let persisted = obj(json!({
        "styles": { "clockFormat": "{HH}:{mm}" },
        "positions": { "search": { "y": "10vh" } }
    }));
    let mut default_paths = Vec::new();
    key_paths(&default_document(), "", &mut default_paths);

    // Act
    let (config, _) = merge_onto_defaults(&persisted);
    let merged = obj(serde_json::to_value(&config).unwrap());
    let mut merged_paths = Vec::new();
    key_paths(&merged, "", &mut merged_paths);

    // Assert
    for path in &default_paths {
        assert!(merged_paths.contains(path), "missing default key {path}");
    }
    assert_eq!(config.styles.clock_format, "{HH}:{mm}");
    assert!(config.styles.show_credit);
    assert_eq!(config.positions.search.y, "10vh");
    assert_eq!(config.positions.search.x, "0vw");
}

#[test]
fn test_override_wins_at_every_shared_leaf() {
    let persisted = obj(json!({
        "colors": { "accent": "lavender" },
        "styles": { "greetingText": "Morning", "showGreeting": false, "searchWidth": "80" },
        "positions": { "greeting": { "anchor": "bottom-left", "x": "1vw", "y": "1vh" } },
        "defaultSearchEngine": "https://duckduckgo.com/?q="
    }));

    let (config, rejected) = merge_onto_defaults(&persisted);

    assert!(rejected.is_empty());
    assert_eq!(config.colors.accent, Some(PaletteColor::Lavender));
    assert_eq!(config.styles.greeting_text, "Morning");
    assert!(!config.styles.show_greeting);
    assert_eq!(config.styles.search_width, "80");
    assert_eq!(config.positions.greeting.anchor, Anchor::BottomLeft);
    assert_eq!(config.default_search_engine, "https://duckduckgo.com/?q=");
}

#[test]
fn test_persisted_array_replaces_default_array() {
    // Arrange: a defaults-like base holding an array
    let mut target = default_document();
    target.insert("pinned".into(), json!(["a", "b", "c"]));
    let source = obj(json!({ "pinned": ["z"] }));

    // Act
    deep_merge(&mut target, &source);

    // Assert
    assert_eq!(target["pinned"], json!(["z"]));
}

#[test]
fn test_repeated_merge_is_idempotent() {
    let persisted = obj(json!({ "styles": { "clockFontSize": "4" }, "legacy": { "k": 1 } }));

    let (first, _) = merge_onto_defaults(&persisted);
    let reserialized = obj(serde_json::to_value(&first).unwrap());
    let (second, _) = merge_onto_defaults(&reserialized);

    assert_eq!(first, second);
}

#[test]
fn test_out_of_domain_leaves_cost_only_themselves() {
    // Arrange: one value of each kind that cannot be used
    let persisted = obj(json!({
        "colors": { "accent": "purple", "greeting": "green" },
        "styles": { "greetingText": "Mine", "searchWidth": "80", "clockFontSize": 3, "showCredit": 1 },
        "positions": { "search": { "anchor": "middle", "y": "9vh" } },
        "searchEngines": { "!gh": "https://github.com/search?q=" }
    }));

    // Act
    let (config, rejected) = merge_onto_defaults(&persisted);

    // Assert: usable overrides survive
    assert_eq!(config.colors.greeting, Some(PaletteColor::Green));
    assert_eq!(config.styles.greeting_text, "Mine");
    assert_eq!(config.styles.search_width, "80");
    assert_eq!(config.styles.clock_font_size, "3");
    assert_eq!(config.positions.search.y, "9vh");
    assert_eq!(config.search_engines.len(), 1);

    // Assert: unusable ones fell back and were reported
    assert_eq!(config.colors.accent, None);
    assert!(config.styles.show_credit);
    assert_eq!(config.positions.search.anchor, Anchor::Center);
    let mut paths: Vec<&str> = rejected.iter().map(|r| r.path.as_str()).collect();
    paths.sort_unstable();
    assert_eq!(
        paths,
        vec!["colors.accent", "positions.search.anchor", "styles.showCredit"]
    );
}

#[test]
fn test_imported_document_drives_render_models() {
    // Arrange
    let text = r#"{
        "colors": { "clock": "sky" },
        "styles": { "clockFormat": "{HH}.{mm}" },
        "positions": { "clock": { "anchor": "top-left", "x": "3vw", "y": "4vh" } },
        "searchEngines": { "!w": "https://en.wikipedia.org/wiki/Special:Search?search=" }
    }"#;

    // Act
    let document = validate_import(text).expect("valid import");
    let (config, _): (Configuration, _) = merge_onto_defaults(&document);

    // Assert
    let now = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
    assert_eq!(format_clock(&config.styles.clock_format, &now), "08.30");

    let placement = Placement::for_position(&config.positions.clock);
    assert_eq!(placement.top, "4vh");
    assert_eq!(placement.left, "3vw");

    let vars = css_variables(&config, Theme::Light);
    assert!(vars
        .iter()
        .any(|v| v.name == "--clock-color" && v.value == "var(--ctp-latte-sky)"));

    assert_eq!(
        resolve_search(&config, "!w Ferris"),
        Some(SearchTarget::Engine(
            "https://en.wikipedia.org/wiki/Special:Search?search=Ferris".into()
        ))
    );
}
