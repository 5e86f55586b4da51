//! Recursive JSON merge and the load/import entry points built on it.
//!
//! [`deep_merge`] overlays a source object onto a target object:
//!
//! - a source value that is a JSON object (not an array, not `null`) is merged
//!   key by key into the target's object at the same key, replacing whatever
//!   non-object the target held there;
//! - every other source value (string, number, bool, `null`, array) replaces
//!   the target value outright.
//!
//! Arrays are therefore atomic: a persisted array never merges element-wise
//! with a default array.  Recursion depth is bounded by the nesting depth of
//! the source document.

use serde_json::{Map, Value};
use tracing::debug;

use super::document::RejectedLeaf;
use super::error::ConfigError;
use super::schema::Configuration;

/// Merges `source` into `target` in place and returns `target`.
///
/// `source` is never modified.  Keys present only in `target` are untouched,
/// keys present only in `source` are added.
///
/// # Example
///
/// ```rust
/// use newtab_core::deep_merge;
/// use serde_json::json;
///
/// let mut target = json!({ "styles": { "a": 1, "b": 2 } });
/// let source = json!({ "styles": { "b": 3 } });
/// deep_merge(
///     target.as_object_mut().unwrap(),
///     source.as_object().unwrap(),
/// );
/// assert_eq!(target, json!({ "styles": { "a": 1, "b": 3 } }));
/// ```
pub fn deep_merge<'a>(
    target: &'a mut Map<String, Value>,
    source: &Map<String, Value>,
) -> &'a mut Map<String, Value> {
    for (key, value) in source {
        match value {
            Value::Object(nested) => {
                let slot = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(slot_map) = slot {
                    deep_merge(slot_map, nested);
                }
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    target
}

/// The default configuration as an untyped JSON object: the base every
/// persisted document is merged onto.
pub fn default_document() -> Map<String, Value> {
    // Every key in the schema is a string and every value is a plain
    // string/bool/null/map, so serialisation cannot fail.
    match serde_json::to_value(Configuration::default())
        .expect("default configuration always serializes")
    {
        Value::Object(map) => map,
        _ => unreachable!("Configuration serializes to a JSON object"),
    }
}

/// Parses `text` as a JSON document whose root must be an object.
///
/// # Errors
///
/// [`ConfigError::Parse`] for invalid JSON, [`ConfigError::NotAnObject`] when
/// the root is an array, string, number, bool or `null`.
pub fn parse_document(text: &str) -> Result<Map<String, Value>, ConfigError> {
    match serde_json::from_str::<Value>(text).map_err(ConfigError::Parse)? {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject),
    }
}

/// Builds a complete [`Configuration`]: a fresh copy of the defaults with
/// `persisted` deep-merged on top.
///
/// Values that do not fit the schema (`"anchor": "middle"`, `"styles": null`)
/// keep their defaults and are returned alongside; every other persisted
/// value still wins.
pub fn merge_onto_defaults(persisted: &Map<String, Value>) -> (Configuration, Vec<RejectedLeaf>) {
    let mut merged = default_document();
    deep_merge(&mut merged, persisted);
    Configuration::from_document(merged)
}

/// Validates an imported configuration file and returns the document to be
/// stored verbatim.
///
/// The only requirement is a truthy top-level `styles` key.  Anything else a
/// later load cannot use falls back per value, like any persisted document.
///
/// # Errors
///
/// [`ConfigError::Parse`], [`ConfigError::NotAnObject`] or
/// [`ConfigError::MissingKey`].
pub fn validate_import(text: &str) -> Result<Map<String, Value>, ConfigError> {
    let document = parse_document(text)?;
    if !document.get("styles").is_some_and(is_truthy) {
        return Err(ConfigError::MissingKey("styles"));
    }
    debug!(keys = document.len(), "import document validated");
    Ok(document)
}

/// Truthiness as the page's script evaluates it: `null`, `false`, `0` and
/// `""` are falsy, everything else (including empty objects) is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
