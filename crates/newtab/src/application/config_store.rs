//! ConfigStore: the single source of truth for the page configuration.
//!
//! The store owns the live [`Configuration`], the persistence boundary (the
//! `"config"` key of a [`KeyValueStore`]) and the list of subscribers that
//! re-render when the configuration changes.
//!
//! # Lifecycle (for beginners)
//!
//! ```text
//!   new()            defaults in memory, nothing read yet
//!     │
//!   load()           persisted JSON deep-merged onto a fresh copy of the
//!     │              defaults; malformed data falls back to defaults
//!     │
//!   get_mut()/update()   consumers mutate the live value
//!     │
//!   save()           whole configuration written back as compact JSON
//! ```
//!
//! `reset()` and `import()` only touch storage.  The page reloads afterwards
//! to pick up the new state; here that is [`ConfigStore::reload`].
//!
//! # Subscriptions
//!
//! Listeners registered with [`ConfigStore::subscribe`] run after `update`,
//! `load` and `reload` replace or change the configuration.  Writes made
//! through the raw [`ConfigStore::get_mut`] handle do not notify; the caller
//! re-renders itself or calls [`ConfigStore::notify`].

use std::path::PathBuf;

use newtab_core::config::merge::parse_document;
use newtab_core::{merge_onto_defaults, validate_import, ConfigError, Configuration};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::ports::{KeyValueStore, StorageError};

/// Storage key holding the serialized configuration.
pub const CONFIG_KEY: &str = "config";

/// Storage key holding the theme class name.
pub const THEME_KEY: &str = "theme";

/// Error type for store writes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error type for importing a configuration document.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The import file could not be read.
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document was rejected; nothing was stored.
    #[error("{0}")]
    Invalid(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// What [`ConfigStore::load`] found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing persisted; the in-memory configuration was left as it was.
    NotFound,
    /// The persisted configuration was merged onto the defaults.
    Restored,
    /// The persisted value was unusable; the defaults are now in memory.
    Recovered { reason: String },
}

/// Handle returned by [`ConfigStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Configuration)>;

/// Live configuration plus its persistence and subscribers.
pub struct ConfigStore<S: KeyValueStore> {
    storage: S,
    config: Configuration,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> ConfigStore<S> {
    /// Creates a store holding the defaults.  Storage is not read.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: Configuration::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates a store and immediately loads the persisted configuration,
    /// the way the page initialises on startup.
    pub fn open(storage: S) -> (Self, LoadOutcome) {
        let mut store = Self::new(storage);
        let outcome = store.load();
        (store, outcome)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn get(&self) -> &Configuration {
        &self.config
    }

    /// Mutable access to the live configuration.  Does not notify.
    pub fn get_mut(&mut self) -> &mut Configuration {
        &mut self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    /// Reads the persisted configuration and merges it onto the defaults.
    ///
    /// Never fails.  A storage read error, invalid JSON or a non-object root
    /// leaves the defaults in memory and is reported as
    /// [`LoadOutcome::Recovered`].  Individual values that do not fit the
    /// schema keep their defaults and are logged; the rest is still restored.
    pub fn load(&mut self) -> LoadOutcome {
        let stored = match self.storage.get(CONFIG_KEY) {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                debug!("no persisted configuration");
                return LoadOutcome::NotFound;
            }
            Err(e) => return self.recover(e.to_string()),
        };

        let document = match parse_document(&stored) {
            Ok(document) => document,
            Err(e) => return self.recover(e.to_string()),
        };

        let (config, rejected) = merge_onto_defaults(&document);
        for leaf in &rejected {
            warn!(path = %leaf.path, value = %leaf.value, "persisted value unusable, keeping default");
        }
        self.config = config;
        debug!(rejected = rejected.len(), "persisted configuration restored");
        self.notify();
        LoadOutcome::Restored
    }

    fn recover(&mut self, reason: String) -> LoadOutcome {
        warn!(%reason, "persisted configuration unusable, falling back to defaults");
        self.config = Configuration::default();
        self.notify();
        LoadOutcome::Recovered { reason }
    }

    /// Writes the whole in-memory configuration to storage.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let text = serde_json::to_string(&self.config)?;
        self.storage.set(CONFIG_KEY, &text)?;
        debug!(bytes = text.len(), "configuration saved");
        Ok(())
    }

    /// Deletes the persisted configuration.  Memory is untouched until the
    /// next [`reload`](Self::reload).
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.storage.remove(CONFIG_KEY)?;
        info!("persisted configuration removed");
        Ok(())
    }

    /// Reinitialises memory to the defaults and loads again, as a page
    /// reload would.
    pub fn reload(&mut self) -> LoadOutcome {
        self.config = Configuration::default();
        match self.load() {
            // `load` only notifies when it replaced the configuration.
            LoadOutcome::NotFound => {
                self.notify();
                LoadOutcome::NotFound
            }
            outcome => outcome,
        }
    }

    // ── Import / export ───────────────────────────────────────────────────────

    /// Validates `text` and stores it as the persisted configuration.
    ///
    /// The document replaces the stored value wholesale; it is not merged
    /// with what was stored before.  Memory is untouched until the next
    /// [`reload`](Self::reload).  On error nothing is written.
    pub fn import(&mut self, text: &str) -> Result<(), ImportError> {
        let document = validate_import(text)?;
        let compact = Value::Object(document).to_string();
        self.storage.set(CONFIG_KEY, &compact)?;
        info!("configuration imported");
        Ok(())
    }

    /// The live configuration as pretty-printed JSON.
    pub fn export(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }

    // ── Writes with notification ──────────────────────────────────────────────

    /// Applies `f` to the live configuration and notifies subscribers.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Configuration),
    {
        f(&mut self.config);
        self.notify();
    }

    /// [`update`](Self::update) followed by [`save`](Self::save).
    pub fn update_and_save<F>(&mut self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Configuration),
    {
        self.update(f);
        self.save()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Configuration) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener.  Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Runs every listener against the current configuration.
    pub fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.config);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
