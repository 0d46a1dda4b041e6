//! # JotDB Storage
//!
//! Storage backend trait and implementations for JotDB.
//!
//! This crate provides the lowest-level storage abstraction for JotDB.
//! Storage backends are **opaque blob stores** - they hold one text
//! blob and do not interpret it. JotDB owns all format knowledge.
//!
//! ## Design Principles
//!
//! - Backends hold a single text blob (read all, overwrite all)
//! - No knowledge of the JotDB file format or document tree
//! - Must be `Send + Sync` so backends can be shared across threads
//! - Overwrites are in place: no temp file, no rename swap, no fsync
//!   guarantee, no lock file
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use jotdb_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.write_all("{}").unwrap();
//! assert_eq!(backend.read_all().unwrap(), "{}");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
