//! Error types for userlist.
//!
//! This module defines all error types used throughout the userlist crate,
//! from the key-value backends up to the record store and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for userlist operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Store Errors ===
    /// The persisted record list exists but is not a well-formed array of records.
    #[error("malformed record list under key '{key}'")]
    MalformedState {
        /// Storage key holding the unreadable value.
        key: String,
        /// The decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// The key-value backend rejected a write; nothing was persisted.
    #[error("failed to write key '{key}'")]
    WriteFailure {
        /// Storage key that could not be written.
        key: String,
        /// The backend error that caused the rejection.
        #[source]
        source: Box<Error>,
    },

    // === Backend Errors ===
    /// A value exceeded the namespace's configured size limit.
    #[error("value for key '{key}' is {size} bytes, exceeding the {limit} byte quota")]
    QuotaExceeded {
        /// Storage key being written.
        key: String,
        /// Size of the rejected value in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Failed to open or create the database.
    #[error("failed to open database at {path}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for userlist operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a malformed state error for the given key.
    #[must_use]
    pub fn malformed_state(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedState {
            key: key.into(),
            source,
        }
    }

    /// Wrap a backend error as a rejected write of the given key.
    #[must_use]
    pub fn write_failure(key: impl Into<String>, source: Error) -> Self {
        Self::WriteFailure {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error means the stored record list is unusable.
    #[must_use]
    pub fn is_malformed_state(&self) -> bool {
        matches!(self, Self::MalformedState { .. })
    }

    /// Check if this error means a write was rejected.
    #[must_use]
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::WriteFailure { .. })
    }
}
