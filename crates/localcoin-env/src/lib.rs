//! Persisted key-value store bridging sequential operator runs.
//!
//! Every pipeline run that discovers new object ids writes them into a
//! shared `.env`-style file so that later runs can reference them. The
//! store is plain UTF-8 text, one `KEY='value'` assignment per line, with
//! comments and blank lines preserved verbatim.
//!
//! The write contract is deliberately strict:
//!
//! - [`EnvFile::upsert`] replaces the value of an *existing* key and fails
//!   with [`EnvError::KeyNotFound`] otherwise. Keys are bootstrapped once
//!   as placeholder lines when the environment is created; a typo'd key
//!   must fail loudly instead of silently leaving the file unchanged.
//! - [`EnvFile::save`] replaces the whole file atomically (temp file +
//!   rename), so a crash mid-write never leaves a half-written store.

pub mod store;

pub use store::{EnvError, EnvFile};
