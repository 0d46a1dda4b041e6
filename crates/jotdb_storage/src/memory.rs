//! In-memory storage backend for testing.

use crate::backend::StorageBackend;
use crate::error::StorageResult;
use parking_lot::RwLock;

/// An in-memory storage backend.
///
/// This backend keeps the blob in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Observing what a flush would have written to disk
///
/// # Thread Safety
///
/// This backend is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use jotdb_storage::{StorageBackend, InMemoryBackend};
///
/// let mut backend = InMemoryBackend::new();
/// backend.write_all("{}").unwrap();
/// assert_eq!(backend.data(), "{}");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<String>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend with a pre-existing blob.
    ///
    /// Useful for testing load scenarios.
    #[must_use]
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: RwLock::new(data.into()),
        }
    }

    /// Returns a copy of the stored blob.
    ///
    /// Useful for asserting on flush output in tests.
    #[must_use]
    pub fn data(&self) -> String {
        self.data.read().clone()
    }
}

impl StorageBackend for InMemoryBackend {
    fn read_all(&self) -> StorageResult<String> {
        Ok(self.data.read().clone())
    }

    fn write_all(&mut self, text: &str) -> StorageResult<()> {
        let mut data = self.data.write();
        data.clear();
        data.push_str(text);
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.read().len() as u64)
    }
}
