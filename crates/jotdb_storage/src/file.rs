//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::StorageResult;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file-based storage backend.
///
/// This backend keeps the blob in a single file on disk. Data survives
/// process restarts.
///
/// # Durability
///
/// `write_all` truncates the file and writes the new blob in place.
/// There is no rename swap, no fsync, and no lock file; a crash mid
/// write can leave a torn blob.
///
/// # Thread Safety
///
/// The file handle is guarded by an internal lock, so a backend can be
/// shared across threads.
///
/// # Example
///
/// ```no_run
/// use jotdb_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("store.json")).unwrap();
/// backend.write_all("{}").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileBackend {
    /// Opens or creates a file backend at the given path.
    ///
    /// If the file exists, its contents are kept. If it doesn't exist,
    /// an empty file is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Opens or creates a file backend, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file
    /// cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read_all(&self) -> StorageResult<String> {
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(0))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        Ok(String::from_utf8(bytes)?)
    }

    fn write_all(&mut self, text: &str) -> StorageResult<()> {
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        let file = self.file.lock();
        Ok(file.metadata()?.len())
    }
}
