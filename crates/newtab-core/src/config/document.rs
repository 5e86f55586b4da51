//! Reading a merged JSON document into the typed [`Configuration`].
//!
//! # One bad value costs one value (for beginners)
//!
//! A derived `Deserialize` is all-or-nothing: one `"anchor": "middle"` and
//! the whole record fails.  For a page that must never throw away a user's
//! preferences that is the wrong trade, so the document is read field by
//! field instead:
//!
//! - a field that fits its type is taken as is;
//! - a field that does not fit keeps that field's default and is reported as
//!   a [`RejectedLeaf`];
//! - a group (`styles`, `positions.clock`, ...) that is not an object keeps
//!   the whole group's defaults and is reported once;
//! - everything left over after the known fields are taken becomes the
//!   record's `extra` map.
//!
//! Numbers are accepted where the schema stores numeric text
//! (`"clockFontSize": 3` reads as `"3"`), since that is what the page's
//! script would have rendered.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::schema::{Colors, Configuration, Position, Positions, Styles};

/// A persisted value that did not fit the schema and was replaced by the
/// default for its path.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLeaf {
    /// Dotted JSON path, e.g. `"styles.clockFontSize"`.
    pub path: String,
    pub value: Value,
}

/// Collects field values out of JSON objects, recording what it rejects.
struct LeafReader {
    rejected: Vec<RejectedLeaf>,
}

impl LeafReader {
    fn reject(&mut self, path: String, value: Value) {
        self.rejected.push(RejectedLeaf { path, value });
    }

    /// Removes `parent[key]` as an object.  `None` when absent or rejected,
    /// in which case the caller keeps its default group.
    fn group(&mut self, parent: &mut Map<String, Value>, key: &str, path: &str) -> Option<Map<String, Value>> {
        match parent.remove(key)? {
            Value::Object(map) => Some(map),
            other => {
                self.reject(join(path, key), other);
                None
            }
        }
    }

    fn typed<T: DeserializeOwned>(
        &mut self,
        map: &mut Map<String, Value>,
        key: &str,
        path: &str,
        default: T,
    ) -> T {
        let Some(value) = map.remove(key) else {
            return default;
        };
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => parsed,
            Err(_) => {
                self.reject(join(path, key), value);
                default
            }
        }
    }

    /// A string field that also takes numbers.
    fn text(&mut self, map: &mut Map<String, Value>, key: &str, path: &str, default: String) -> String {
        match map.remove(key) {
            None => default,
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                self.reject(join(path, key), other);
                default
            }
        }
    }

    fn colors(&mut self, mut map: Map<String, Value>, default: Colors) -> Colors {
        const PATH: &str = "colors";
        Colors {
            accent: self.typed(&mut map, "accent", PATH, default.accent),
            clock: self.typed(&mut map, "clock", PATH, default.clock),
            greeting: self.typed(&mut map, "greeting", PATH, default.greeting),
            extra: map,
        }
    }

    fn styles(&mut self, mut map: Map<String, Value>, default: Styles) -> Styles {
        const PATH: &str = "styles";
        Styles {
            clock_font_size: self.text(&mut map, "clockFontSize", PATH, default.clock_font_size),
            search_font_size: self.text(&mut map, "searchFontSize", PATH, default.search_font_size),
            search_width: self.text(&mut map, "searchWidth", PATH, default.search_width),
            clock_format: self.text(&mut map, "clockFormat", PATH, default.clock_format),
            greeting_text: self.text(&mut map, "greetingText", PATH, default.greeting_text),
            greeting_font_size: self.text(
                &mut map,
                "greetingFontSize",
                PATH,
                default.greeting_font_size,
            ),
            show_credit: self.typed(&mut map, "showCredit", PATH, default.show_credit),
            show_settings_button: self.typed(
                &mut map,
                "showSettingsButton",
                PATH,
                default.show_settings_button,
            ),
            show_theme_button: self.typed(&mut map, "showThemeButton", PATH, default.show_theme_button),
            show_greeting: self.typed(&mut map, "showGreeting", PATH, default.show_greeting),
            extra: map,
        }
    }

    fn position(&mut self, parent: &mut Map<String, Value>, key: &str, default: Position) -> Position {
        let Some(mut map) = self.group(parent, key, "positions") else {
            return default;
        };
        let path = join("positions", key);
        Position {
            anchor: self.typed(&mut map, "anchor", &path, default.anchor),
            x: self.text(&mut map, "x", &path, default.x),
            y: self.text(&mut map, "y", &path, default.y),
            extra: map,
        }
    }

    fn positions(&mut self, mut map: Map<String, Value>, default: Positions) -> Positions {
        Positions {
            clock: self.position(&mut map, "clock", default.clock),
            search: self.position(&mut map, "search", default.search),
            greeting: self.position(&mut map, "greeting", default.greeting),
            extra: map,
        }
    }

    /// Keeps every prefix mapped to a string; drops the rest one by one.
    fn search_engines(&mut self, map: Map<String, Value>) -> BTreeMap<String, String> {
        let mut engines = BTreeMap::new();
        for (prefix, url) in map {
            match url {
                Value::String(url) => {
                    engines.insert(prefix, url);
                }
                other => self.reject(join("searchEngines", &prefix), other),
            }
        }
        engines
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

impl Configuration {
    /// Builds a configuration from a JSON object, falling back to the default
    /// for every field that is absent or does not fit.
    ///
    /// Never fails.  The second element lists the values that were present
    /// but unusable, in document order per group.
    pub fn from_document(mut document: Map<String, Value>) -> (Self, Vec<RejectedLeaf>) {
        let defaults = Configuration::default();
        let mut reader = LeafReader {
            rejected: Vec::new(),
        };

        let colors = match reader.group(&mut document, "colors", "") {
            Some(map) => reader.colors(map, defaults.colors),
            None => defaults.colors,
        };
        let styles = match reader.group(&mut document, "styles", "") {
            Some(map) => reader.styles(map, defaults.styles),
            None => defaults.styles,
        };
        let positions = match reader.group(&mut document, "positions", "") {
            Some(map) => reader.positions(map, defaults.positions),
            None => defaults.positions,
        };
        let search_engines = match reader.group(&mut document, "searchEngines", "") {
            Some(map) => reader.search_engines(map),
            None => defaults.search_engines,
        };
        let default_search_engine = reader.text(
            &mut document,
            "defaultSearchEngine",
            "",
            defaults.default_search_engine,
        );

        let config = Configuration {
            colors,
            styles,
            positions,
            search_engines,
            default_search_engine,
            extra: document,
        };
        (config, reader.rejected)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
