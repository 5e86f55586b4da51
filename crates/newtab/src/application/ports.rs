//! Abstractions the application layer depends on.
//!
//! The store and the settings panel never touch the file system or the
//! terminal directly.  They talk to these traits, and the host injects the
//! concrete adapters from `crate::infrastructure` at startup.  Tests inject
//! [`MemoryStorage`](crate::infrastructure::storage::MemoryStorage), or a
//! mocked store when a storage failure is needed, and a mocked [`Prompt`].

use std::path::PathBuf;

use thiserror::Error;

/// Error type for key-value storage adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing storage at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters the adapter cannot store.
    #[error("invalid storage key \"{0}\": only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey(String),
}

/// Durable string-keyed storage, the role `localStorage` plays for the page.
///
/// `set` fully overwrites the previous value.  `remove` on a missing key
/// succeeds.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Blocking user dialogs: the page's `confirm()` and `alert()`.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Asks a yes/no question.  Returns `true` only on an explicit yes.
    fn confirm(&mut self, message: &str) -> bool;

    /// Shows a message the user must acknowledge.
    fn alert(&mut self, message: &str);
}
