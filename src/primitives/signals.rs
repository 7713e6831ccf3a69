//! Signal record operations.

use std::sync::Arc;

use spectra_core::{RecordId, Result, Signal, SignalChange, SignalDraft};

use crate::primitives::UpdateOutcome;

/// Signal record operations.
///
/// Every mutation takes the acting user as an opaque string (resolved
/// by the caller's authentication layer) and, for edits, the lock
/// version the caller observed when it loaded the record.
#[derive(Clone)]
pub struct Signals {
    inner: Arc<spectra_engine::Database>,
}

impl Signals {
    pub(crate) fn new(inner: Arc<spectra_engine::Database>) -> Self {
        Self { inner }
    }

    /// Create a signal.
    ///
    /// The record starts at lock version 1 with a version-1 create
    /// entry in its history.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`](crate::Error::Validation) if the
    ///   frequency range is inverted
    pub fn create(&self, draft: SignalDraft, actor: &str) -> Result<Signal> {
        self.inner.create_signal(draft, actor)
    }

    /// Update a signal.
    ///
    /// `expected_version` must equal the record's current lock version.
    /// Writing back identical values is reported as `changed: false`
    /// and advances nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound) if the id is
    ///   unknown or the record is deleted
    /// - [`Error::Conflict`](crate::Error::Conflict) if another editor
    ///   got there first: reload and retry
    /// - [`Error::Validation`](crate::Error::Validation) if the
    ///   resulting frequency range would be inverted
    pub fn update(
        &self,
        id: impl Into<RecordId>,
        expected_version: u64,
        change: SignalChange,
        actor: &str,
    ) -> Result<UpdateOutcome<Signal>> {
        let (record, changed) =
            self.inner
                .update_signal(id.into(), expected_version, change, actor)?;
        Ok(UpdateOutcome { record, changed })
    }

    /// Soft-delete a signal.
    ///
    /// Subject to the same version check as an update. The record
    /// disappears from [`Signals::list`] but keeps its row, its
    /// associations, and its full history.
    pub fn delete(
        &self,
        id: impl Into<RecordId>,
        expected_version: u64,
        actor: &str,
    ) -> Result<()> {
        self.inner.delete_signal(id.into(), expected_version, actor)
    }

    /// Load a live signal.
    pub fn get(&self, id: impl Into<RecordId>) -> Result<Signal> {
        self.inner.signal(id.into())
    }

    /// All live signals, newest first.
    pub fn list(&self) -> Vec<Signal> {
        self.inner.signals()
    }
}
