//! Storage infrastructure: adapters for the [`KeyValueStore`] port.
//!
//! - **`memory`** – A `HashMap` that lives as long as the process.  Used by
//!   tests and as a session-only fallback.
//! - **`file`** – One file per key inside a data directory, written
//!   atomically.  This is what the host uses by default.
//!
//! [`KeyValueStore`]: crate::application::ports::KeyValueStore

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
