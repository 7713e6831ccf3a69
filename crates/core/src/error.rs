//! Unified error types for the versioning engine.
//!
//! Every failure class a caller must distinguish gets its own variant;
//! in particular a version conflict is never folded into a generic
//! error, so callers can offer a reload-and-retry path.

use thiserror::Error;

use crate::types::{RecordId, RecordKind};

/// All engine errors.
///
/// Propagation policy: any error aborts the whole unit of work; no
/// record is mutated without its history entry and vice versa.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed or semantically-invalid input (e.g. an inverted
    /// frequency range). Rejected before any mutation is attempted.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced record does not exist or is already soft-deleted.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Kind of the missing record.
        kind: RecordKind,
        /// Id that was looked up.
        id: RecordId,
    },

    /// Expected-version mismatch, detected by the advisory check or by
    /// the store's conditional write. The record and its history are
    /// unchanged; reloading and retrying is the caller's decision.
    #[error("version conflict on {kind} {id}: expected {expected}, found {actual}")]
    Conflict {
        /// Kind of the contended record.
        kind: RecordKind,
        /// Id of the contended record.
        id: RecordId,
        /// Version the caller based its edit on.
        expected: u64,
        /// Version currently persisted.
        actual: u64,
    },

    /// Unexpected storage-layer failure that is not a lock-check miss.
    #[error("storage error: {0}")]
    Storage(String),

    /// Bug or invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Conflicts may succeed on retry with a freshly loaded record.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// Check if this is a version conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
