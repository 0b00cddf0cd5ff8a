//! The append-only record store.
//!
//! All records live as one JSON array under [`RECORD_LIST_KEY`]. Reading
//! treats an absent key as an empty list; appending is a read-modify-write
//! that replaces the whole value with a single `set`.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::{decode_list, encode_list, Record, EMPTY_LIST};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized record list.
pub const RECORD_LIST_KEY: &str = "user_list";

/// Durable, append-only storage of the record list.
#[derive(Debug)]
pub struct RecordStore<S> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Create a record store over the given namespace.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Read every record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedState`] if the stored value is not an array of
    /// records, or a backend error if the namespace cannot be read.
    pub fn load_all(&self) -> Result<Vec<Record>> {
        let raw = self.backend.get(RECORD_LIST_KEY)?;
        let raw = raw.as_deref().unwrap_or(EMPTY_LIST);

        let records = decode_list(raw).map_err(|source| {
            warn!("Stored record list under '{}' is unreadable", RECORD_LIST_KEY);
            Error::malformed_state(RECORD_LIST_KEY, source)
        })?;

        debug!("Loaded {} records", records.len());
        Ok(records)
    }

    /// Append a record at the end of the list.
    ///
    /// The record is stored as given; callers decide what counts as valid input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedState`] if the existing list cannot be read, or
    /// [`Error::WriteFailure`] if the namespace rejects the write. In both cases
    /// the stored list is left unchanged.
    pub fn append(&mut self, record: Record) -> Result<()> {
        let mut records = self.load_all()?;
        records.push(record);

        let encoded = encode_list(&records)?;
        self.backend
            .set(RECORD_LIST_KEY, &encoded)
            .map_err(|source| Error::write_failure(RECORD_LIST_KEY, source))?;

        debug!(
            "Appended record; list now holds {} records ({} bytes)",
            records.len(),
            encoded.len()
        );
        Ok(())
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::load_all`].
    pub fn len(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }

    /// Whether no record has been stored yet.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::load_all`].
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Borrow the underlying namespace.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Consume the store and return the underlying namespace.
    pub fn into_inner(self) -> S {
        self.backend
    }
}
