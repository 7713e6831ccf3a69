//! Asset record operations.

use std::sync::Arc;

use spectra_core::{Asset, AssetChange, AssetDraft, RecordId, Result};

use crate::primitives::UpdateOutcome;

/// Asset record operations.
///
/// Assets hold a set of signal references. The relationship is part of
/// the versioned content: replacing the reference set is a real update
/// and shows up in history as a `signal_ids` diff entry even when no
/// scalar field changed.
#[derive(Clone)]
pub struct Assets {
    inner: Arc<spectra_engine::Database>,
}

impl Assets {
    pub(crate) fn new(inner: Arc<spectra_engine::Database>) -> Self {
        Self { inner }
    }

    /// Create an asset.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`](crate::Error::Validation) if the name is
    ///   blank
    /// - [`Error::NotFound`](crate::Error::NotFound) if a referenced
    ///   signal is unknown or deleted
    pub fn create(&self, draft: AssetDraft, actor: &str) -> Result<Asset> {
        self.inner.create_asset(draft, actor)
    }

    /// Update an asset, relationship included.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`](crate::Error::NotFound) if the id is
    ///   unknown, the record is deleted, or a referenced signal is not
    ///   live
    /// - [`Error::Conflict`](crate::Error::Conflict) if another editor
    ///   got there first: reload and retry
    /// - [`Error::Validation`](crate::Error::Validation) if the name
    ///   would become blank
    pub fn update(
        &self,
        id: impl Into<RecordId>,
        expected_version: u64,
        change: AssetChange,
        actor: &str,
    ) -> Result<UpdateOutcome<Asset>> {
        let (record, changed) = self
            .inner
            .update_asset(id.into(), expected_version, change, actor)?;
        Ok(UpdateOutcome { record, changed })
    }

    /// Soft-delete an asset; its signal associations stay in place.
    pub fn delete(
        &self,
        id: impl Into<RecordId>,
        expected_version: u64,
        actor: &str,
    ) -> Result<()> {
        self.inner.delete_asset(id.into(), expected_version, actor)
    }

    /// Load a live asset.
    pub fn get(&self, id: impl Into<RecordId>) -> Result<Asset> {
        self.inner.asset(id.into())
    }

    /// All live assets, newest first.
    pub fn list(&self) -> Vec<Asset> {
        self.inner.assets()
    }
}
