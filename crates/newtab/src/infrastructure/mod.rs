//! Infrastructure layer for the newtab host.
//!
//! Contains OS-facing adapters: key-value storage on disk (or in memory),
//! the host's own TOML settings, and terminal dialogs.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `newtab_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.

pub mod host_config;
pub mod storage;
pub mod terminal;
