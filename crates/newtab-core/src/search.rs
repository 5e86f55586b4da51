//! Search bar routing: turns what the user typed into a navigation target.
//!
//! A query may start with a prefix token registered in
//! `Configuration::search_engines` (`"!gh rust"` → GitHub search for `rust`).
//! Anything else goes to the default engine.  The special pair
//! `"!" → "https://"` navigates straight to the typed address.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::schema::{Configuration, DIRECT_NAVIGATION_PREFIX, DIRECT_NAVIGATION_URL};

/// Where the browser should go after a search submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// Engine URL with the encoded query appended.
    Engine(String),
    /// Address typed after the direct-navigation prefix.
    Direct(String),
}

impl SearchTarget {
    pub fn url(&self) -> &str {
        match self {
            SearchTarget::Engine(url) | SearchTarget::Direct(url) => url,
        }
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

/// Resolves `raw` against the configured engines.
///
/// Returns `None` for a query that is empty after trimming.
pub fn resolve_search(config: &Configuration, raw: &str) -> Option<SearchTarget> {
    route(&config.search_engines, &config.default_search_engine, raw)
}

fn route(
    engines: &BTreeMap<String, String>,
    default_engine: &str,
    raw: &str,
) -> Option<SearchTarget> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut parts = raw.split(' ');
    let prefix = parts.next().unwrap_or_default();

    let (engine, query) = match engines.get(prefix).filter(|url| !url.is_empty()) {
        Some(url) => (url.as_str(), parts.collect::<Vec<_>>().join(" ")),
        None => (default_engine, raw.to_string()),
    };

    if prefix == DIRECT_NAVIGATION_PREFIX && engine == DIRECT_NAVIGATION_URL {
        let address = if query.starts_with("http") {
            query
        } else {
            format!("{DIRECT_NAVIGATION_URL}{query}")
        };
        return Some(SearchTarget::Direct(address));
    }

    Some(SearchTarget::Engine(format!(
        "{engine}{}",
        encode_uri_component(&query)
    )))
}

/// Percent-encodes `input` the way a browser's `encodeURIComponent` does.
///
/// ASCII letters, digits and `- _ . ! ~ * ' ( )` pass through; every other
/// byte of the UTF-8 encoding becomes `%XX` with upper-case hex digits.
pub fn encode_uri_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
