//! Error types for JotDB core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in JotDB core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    ///
    /// For mutating operations this surfaces *after* the in-memory
    /// change has been applied, so memory and file may have diverged.
    #[error("storage error: {0}")]
    Storage(#[from] jotdb_storage::StorageError),

    /// Encoding or decoding the store tree failed.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Raw input did not satisfy the bound validator.
    ///
    /// Raised before any mutation or flush occurs.
    #[error("validation failed: {message}")]
    Validation {
        /// Description of the violation.
        message: String,
    },

    /// No document matched the given pattern or id.
    ///
    /// Raised before attempting a merge or rewrite.
    #[error("not found in collection `{collection}`: {target}")]
    NotFound {
        /// Name of the collection searched.
        collection: String,
        /// The id or pattern description that had no match.
        target: String,
    },
}

impl CoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(collection: impl Into<String>, target: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            target: target.into(),
        }
    }
}
