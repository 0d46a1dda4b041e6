//! Shared type aliases for the collection tree.

use crate::document::Document;
use indexmap::IndexMap;

/// One collection's documents, keyed by id.
///
/// `IndexMap` rather than a hash or btree map because scans must run
/// in insertion order.
pub type DocumentMap = IndexMap<String, Document>;

/// The whole in-memory store: collection name to document map.
///
/// Serializes to the backing-file shape
/// `{ [collectionName]: { [documentId]: { "id", "data" } } }`.
pub type Tree = IndexMap<String, DocumentMap>;
