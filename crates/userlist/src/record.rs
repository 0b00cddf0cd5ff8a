//! Core record types for userlist.
//!
//! A [`Record`] is a single name/email pair. The record list is persisted as a
//! compact JSON array, and this module owns the typed encode/decode pair for it.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A submitted name and email.
///
/// Both fields are free-form text. Records carry no identifier or timestamp
/// and are never modified after they are appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Display name as typed by the user.
    pub name: String,
    /// Email address as typed by the user.
    pub email: String,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Serialized form of an empty record list.
pub const EMPTY_LIST: &str = "[]";

/// Encode a record list as a compact JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_list(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Decode a JSON array into a record list.
///
/// Every element must be an object with string `name` and `email` fields.
/// Unknown fields are ignored.
///
/// # Errors
///
/// Returns the raw decode error; callers attach the storage key.
pub fn decode_list(raw: &str) -> std::result::Result<Vec<Record>, serde_json::Error> {
    serde_json::from_str(raw)
}
