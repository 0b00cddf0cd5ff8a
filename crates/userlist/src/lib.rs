//! `userlist` - An append-only list of names and emails
//!
//! Records are kept as one JSON array under a fixed key in a local key-value
//! namespace. The namespace is injected, so the same [`RecordStore`] runs over
//! a `SQLite` preferences file in the binary and over a plain map in tests.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod screen;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::Record;
pub use screen::{ListFormat, Screen, Submit};
pub use storage::{KeyValueStore, MemoryPrefs, SqlitePrefs};
pub use store::{RecordStore, RECORD_LIST_KEY};
