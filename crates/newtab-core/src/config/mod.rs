//! The configuration record, its defaults, and how persisted data is merged
//! back into it.
//!
//! # Why merge instead of plain deserialisation? (for beginners)
//!
//! A user's saved preferences were written by whatever version of the page
//! they were using at the time.  Newer versions add settings (the greeting
//! colour, element positions, ...).  Deserialising an old document straight
//! into today's struct would either fail or silently drop the new fields.
//!
//! Instead, loading works on untyped JSON first:
//!
//! 1. Serialise [`schema::Configuration::default()`] to a JSON object.
//! 2. Recursively overlay the persisted object on top of it with
//!    [`merge::deep_merge`].
//! 3. Read the merged object into the typed record one field at a time
//!    ([`document`]), so a single unusable value only costs that value.
//!
//! Every key the defaults define is therefore present, every usable value the
//! user saved wins, and keys this version no longer knows about are carried
//! along in each record's `extra` map.

pub mod document;
pub mod error;
pub mod fields;
pub mod merge;
pub mod schema;
