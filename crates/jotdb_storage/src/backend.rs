//! Storage backend trait definition.

use crate::error::StorageResult;

/// A low-level storage backend for JotDB.
///
/// Storage backends are **opaque blob stores**. They hold exactly one
/// text blob and expose read-everything and overwrite-everything
/// operations. JotDB owns all format interpretation - backends do not
/// understand collections or documents.
///
/// # Invariants
///
/// - `read_all` returns exactly the blob last passed to `write_all`
///   (or the pre-existing file contents for a freshly opened backend)
/// - `write_all` replaces the whole blob; partial writes are not
///   exposed
/// - Backends must be `Send + Sync` so a database handle can be shared
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads the entire stored blob.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs or the blob is not
    /// valid UTF-8.
    fn read_all(&self) -> StorageResult<String>;

    /// Overwrites the entire stored blob with `text`.
    ///
    /// The previous contents are discarded. There is no temp-file
    /// swap and no durability guarantee beyond what the OS provides
    /// for a plain write.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn write_all(&mut self, text: &str) -> StorageResult<()>;

    /// Returns the current size of the stored blob in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;
}
