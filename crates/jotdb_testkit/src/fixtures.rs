//! Test fixtures and database helpers.
//!
//! Provides convenience functions for setting up test databases
//! and common test scenarios.

use jotdb_core::{Config, Database, FieldType, Schema};
use jotdb_storage::InMemoryBackend;
use std::path::PathBuf;
use tempfile::TempDir;

/// A test database with automatic cleanup.
pub struct TestDatabase {
    /// The database instance.
    pub db: Database,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestDatabase {
    /// Creates a new memory-only test database (no flushes happen).
    #[must_use]
    pub fn memory() -> Self {
        Self {
            db: Database::open_in_memory(),
            _temp_dir: None,
        }
    }

    /// Creates a test database over an in-memory backend, so tests can
    /// still observe flush behavior without touching disk.
    pub fn backed() -> Self {
        Self {
            db: Database::open_with_backend(Box::new(InMemoryBackend::new()), Config::default())
                .expect("Failed to open backed database"),
            _temp_dir: None,
        }
    }

    /// Creates a new file-backed test database in a temp directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("store.json");

        let db = Database::open(&path).expect("Failed to open file database");

        Self {
            db,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the backing file path if file-based, `None` otherwise.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        self._temp_dir.as_ref().map(|d| d.path().join("store.json"))
    }
}

impl std::ops::Deref for TestDatabase {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

/// The stock "users" schema used across test scenarios:
/// `{name: string, age: number}`.
#[must_use]
pub fn user_schema() -> Schema {
    Schema::new()
        .field("name", FieldType::String)
        .field("age", FieldType::Number)
}

/// Runs a test with a temporary file-backed database.
///
/// The temp directory lives for the duration of the closure.
pub fn with_temp_db<F>(f: F)
where
    F: FnOnce(&Database),
{
    let test_db = TestDatabase::file();
    f(&test_db.db);
}
