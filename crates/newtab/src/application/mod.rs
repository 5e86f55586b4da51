//! Application layer use cases for the newtab host.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The *application* layer sits between the domain (`newtab_core`: pure
//! schema, merge and render rules) and the infrastructure (files, terminal).
//! Code here:
//!
//! - **Orchestrates** domain functions to fulfil a user goal, such as "move
//!   the clock to the top-right corner and remember it".
//! - **Depends on abstractions** ([`ports::KeyValueStore`],
//!   [`ports::Prompt`]) rather than on concrete storage or dialogs.
//! - **Contains no direct file-system or terminal access**; the one
//!   exception is reading and writing the import/export files the user picks.
//!
//! # Sub-modules
//!
//! - **`ports`**        – The storage and prompt traits.
//! - **`config_store`** – Owns the live configuration: load, save, reset,
//!   import/export and change subscriptions.
//! - **`settings`**     – Every write path of the settings modal.
//! - **`theme`**        – Restoring and switching the light/dark theme.
//! - **`page`**         – The rendered page and its subscription to the store.

pub mod config_store;
pub mod page;
pub mod ports;
pub mod settings;
pub mod theme;
