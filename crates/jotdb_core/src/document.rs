//! Documents and digest-derived document identity.

use crate::error::CoreResult;
use crate::types::DocumentMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha384};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a document within its collection.
///
/// Ids generated by [`DocumentId::generate`] are 96 lowercase hex
/// characters (a SHA-384 digest), derived from the current time, the
/// collection's contents, and the collection name. Ids loaded from a
/// backing file are kept verbatim, whatever their shape.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Derives a fresh id for a document about to join a collection.
    ///
    /// The digest input is the current timestamp at nanosecond
    /// resolution, a deterministic serialization of the collection's
    /// current document map, and the collection name. Collisions are
    /// not detected: a same-instant, same-content collision silently
    /// overwrites on save.
    ///
    /// # Errors
    ///
    /// Returns an error if the document map cannot be serialized.
    pub fn generate(collection: &str, documents: &DocumentMap) -> CoreResult<Self> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let snapshot = serde_json::to_string(documents)?;

        let mut hasher = Sha384::new();
        hasher.update(nanos.to_string().as_bytes());
        hasher.update(snapshot.as_bytes());
        hasher.update(collection.as_bytes());

        let hex: String = hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();
        Ok(Self(hex))
    }

    /// Wraps an existing id string.
    ///
    /// No derivation or shape check is performed; this is the escape
    /// hatch for ids that came from outside the generator.
    #[must_use]
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An id plus validated payload stored inside a collection.
///
/// The collection map is the single owner of a document; values handed
/// out by queries are clones, never a second writable view into the
/// store. Both fields are read-only from outside the engine, so the
/// payload can only change through the validating operations - there
/// is no way to assign unvalidated data and save it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Content-derived identifier, unique within the collection.
    pub(crate) id: DocumentId,
    /// The validated payload.
    pub(crate) data: Value,
}

impl Document {
    /// Creates a document from its parts.
    ///
    /// Engine-internal: documents reach callers only via `create` (which
    /// validates) or deserialization of the backing file.
    #[must_use]
    pub(crate) fn new(id: DocumentId, data: Value) -> Self {
        Self { id, data }
    }

    /// Returns the document's identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the validated payload.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }
}
