//! Version history queries.

use std::sync::Arc;

use spectra_core::{RecordId, RecordKind};
use spectra_ledger::VersionEntry;

/// Version history queries.
///
/// History is append-only and outlives its records: deleting a record
/// does not delete its version entries, and the final pre-delete
/// snapshot stays queryable.
#[derive(Clone)]
pub struct History {
    inner: Arc<spectra_engine::Database>,
}

impl History {
    pub(crate) fn new(inner: Arc<spectra_engine::Database>) -> Self {
        Self { inner }
    }

    /// All versions of one record, most recent first.
    pub fn versions_of(&self, kind: RecordKind, id: impl Into<RecordId>) -> Vec<VersionEntry> {
        self.inner.versions_of(kind, id.into())
    }

    /// Global change feed across all records, newest first.
    ///
    /// Use [`VersionEntry::describe`] to render the per-field change
    /// lines of each entry.
    pub fn recent(&self) -> Vec<VersionEntry> {
        self.inner.recent_changes()
    }
}
