//! `SQLite`-backed preferences namespace.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{check_quota, migrations, KeyValueStore};
use crate::error::{Error, Result};

/// A named, durable key-value namespace stored in a `SQLite` file.
///
/// Several namespaces may share one database file; each `SqlitePrefs` only
/// sees the keys of its own namespace. Every `set` is a single row upsert, so
/// a rejected or failed write leaves the previous value in place.
#[derive(Debug)]
pub struct SqlitePrefs {
    /// Path to the database file.
    path: PathBuf,
    /// Namespace this handle reads and writes.
    namespace: String,
    /// Maximum size of a single value in bytes (0 = unlimited).
    max_value_bytes: usize,
    /// Database connection.
    conn: Connection,
}

impl SqlitePrefs {
    /// Open or create a preferences database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>, namespace: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening preferences database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        let namespace = namespace.into();
        info!(
            "Preferences namespace '{}' opened at {}",
            namespace,
            path.display()
        );
        Ok(Self {
            path,
            namespace,
            max_value_bytes: 0,
            conn,
        })
    }

    /// Create an in-memory namespace for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory(namespace: impl Into<String>) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            namespace: namespace.into(),
            max_value_bytes: 0,
            conn,
        })
    }

    /// Limit the size of any single value. 0 means unlimited.
    #[must_use]
    pub fn with_max_value_bytes(mut self, limit: usize) -> Self {
        self.max_value_bytes = limit;
        self
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the namespace name.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// List the keys present in this namespace, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM preferences WHERE namespace = ?1 ORDER BY key")?;

        let keys = stmt
            .query_map([&self.namespace], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(keys)
    }
}

impl KeyValueStore for SqlitePrefs {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE namespace = ?1 AND key = ?2",
                params![self.namespace, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_quota(key, value, self.max_value_bytes)?;

        self.conn.execute(
            r"
            INSERT OR REPLACE INTO preferences (namespace, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ",
            params![self.namespace, key, value],
        )?;

        debug!(
            "Wrote {} bytes to '{}/{}'",
            value.len(),
            self.namespace,
            key
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_prefs() -> SqlitePrefs {
        SqlitePrefs::open_in_memory("mypref").expect("failed to create test prefs")
    }

    #[test]
    fn test_open_in_memory() {
        let prefs = create_test_prefs();
        assert_eq!(prefs.path().to_string_lossy(), ":memory:");
        assert_eq!(prefs.namespace(), "mypref");
    }

    #[test]
    fn test_get_absent() {
        let prefs = create_test_prefs();
        assert_eq!(prefs.get("user_list").unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut prefs = create_test_prefs();
        prefs.set("user_list", "[]").unwrap();
        assert_eq!(prefs.get("user_list").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_replaces() {
        let mut prefs = create_test_prefs();
        prefs.set("k", "first").unwrap();
        prefs.set("k", "second").unwrap();

        assert_eq!(prefs.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(prefs.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_keys_sorted() {
        let mut prefs = create_test_prefs();
        prefs.set("b", "2").unwrap();
        prefs.set("a", "1").unwrap();

        assert_eq!(prefs.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_quota_rejects_without_writing() {
        let mut prefs = create_test_prefs().with_max_value_bytes(8);
        prefs.set("k", "short").unwrap();

        let err = prefs.set("k", "much too long").unwrap_err();
        assert!(matches!(err, Error::QuotaExceeded { limit: 8, .. }));
        assert_eq!(prefs.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("prefs.db");

        {
            let mut prefs = SqlitePrefs::open(&db_path, "mypref").unwrap();
            prefs.set("user_list", r#"[{"name":"A","email":"a@x"}]"#).unwrap();
        }

        let prefs = SqlitePrefs::open(&db_path, "mypref").unwrap();
        assert_eq!(
            prefs.get("user_list").unwrap().as_deref(),
            Some(r#"[{"name":"A","email":"a@x"}]"#)
        );
        assert_eq!(prefs.path(), db_path);
    }

    #[test]
    fn test_namespaces_isolated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("prefs.db");

        let mut first = SqlitePrefs::open(&db_path, "first").unwrap();
        first.set("user_list", "[]").unwrap();
        drop(first);

        let second = SqlitePrefs::open(&db_path, "second").unwrap();
        assert_eq!(second.get("user_list").unwrap(), None);
        assert!(second.keys().unwrap().is_empty());
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/deeper/prefs.db");

        let prefs = SqlitePrefs::open(&nested_path, "mypref").unwrap();
        assert!(nested_path.exists());
        drop(prefs);
    }

    #[test]
    fn test_unicode_and_large_values() {
        let mut prefs = create_test_prefs();
        let large = "x".repeat(100_000);
        prefs.set("unicode", "Hello 世界 🌍").unwrap();
        prefs.set("large", &large).unwrap();

        assert_eq!(prefs.get("unicode").unwrap().as_deref(), Some("Hello 世界 🌍"));
        assert_eq!(prefs.get("large").unwrap().map(|v| v.len()), Some(100_000));
    }
}
