//! # JotDB Core
//!
//! Core document store engine for JotDB.
//!
//! JotDB is an embedded, file-backed JSON document store. A process
//! holds an in-memory tree of named collections, each collection
//! holding uniquely identified documents; after every mutation the
//! whole tree is re-serialized and written over the backing file.
//!
//! This crate provides:
//! - The [`Database`] facade owning the collection tree and backing file
//! - [`CollectionHandle`] for document CRUD and queries
//! - The recursive partial-match predicate ([`matches`]) used by all queries
//! - Digest-derived document identity ([`DocumentId`])
//! - The validator seam ([`Validator`], [`Schema`], [`ValidatorSpec`])
//!
//! ## Example
//!
//! ```rust
//! use jotdb_core::{Database, FieldType, Schema};
//! use serde_json::json;
//!
//! let db = Database::open_in_memory();
//! let users = db.collect("users", Schema::new().field("name", FieldType::String).into());
//!
//! let doc = users.create(json!({"name": "ada"})).unwrap();
//! users.save(&doc).unwrap();
//!
//! let found = users.find_one(&json!({"name": "ada"})).unwrap();
//! assert_eq!(found.id(), doc.id());
//! ```
//!
//! ## What JotDB is not
//!
//! There is no write-ahead log, no atomic file replacement, no fsync
//! guarantee, and no lock file. Flush failure leaves memory and file
//! diverged; the caller owns reconciliation.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod database;
mod document;
mod error;
mod matcher;
mod persist;
mod schema;
mod types;

pub use collection::CollectionHandle;
pub use config::{Config, DecodeHook, EncodeHook};
pub use database::Database;
pub use document::{Document, DocumentId};
pub use error::{CoreError, CoreResult};
pub use matcher::matches;
pub use schema::{FieldType, Schema, Validator, ValidatorSpec};
pub use types::{DocumentMap, Tree};
