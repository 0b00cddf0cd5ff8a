//! Key-value namespaces for userlist.
//!
//! The record store never touches a global preferences handle. It is handed a
//! [`KeyValueStore`] instead, which is either an in-memory map (tests) or a
//! `SQLite`-backed namespace that survives restarts.

pub mod migrations;
pub mod schema;
mod sqlite;

use std::collections::HashMap;

use tracing::warn;

use crate::error::{Error, Result};

pub use sqlite::SqlitePrefs;

/// A string-keyed, string-valued persistent namespace.
///
/// Implementations must make `set` all-or-nothing at the key granularity:
/// after a failed `set`, `get` returns the previous value.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Reject `value` if it is larger than `limit` bytes. A limit of 0 is unlimited.
pub(crate) fn check_quota(key: &str, value: &str, limit: usize) -> Result<()> {
    if limit > 0 && value.len() > limit {
        warn!(
            "Rejecting write of {} bytes to '{}' (quota {})",
            value.len(),
            key,
            limit
        );
        return Err(Error::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            limit,
        });
    }
    Ok(())
}

/// In-process namespace backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    entries: HashMap<String, String>,
    max_value_bytes: usize,
}

impl MemoryPrefs {
    /// Create an empty, unlimited namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the size of any single value. 0 means unlimited.
    #[must_use]
    pub fn with_max_value_bytes(mut self, limit: usize) -> Self {
        self.max_value_bytes = limit;
        self
    }

    /// Number of keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryPrefs {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_quota(key, value, self.max_value_bytes)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
