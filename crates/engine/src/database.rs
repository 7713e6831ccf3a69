//! The engine database: commit coordination over store and ledger.
//!
//! Every mutation runs as one unit of work: load, advisory version
//! check, in-memory field change, then commit. The commit section is
//! serialized by a single lock so that the interceptor's
//! classification, the store's conditional writes, and the ledger
//! appends act as one atomic step: either the record mutation and its
//! version entry both land, or neither does.

use chrono::Utc;
use parking_lot::Mutex;

use spectra_core::{
    check_frequency_range, Asset, AssetChange, AssetDraft, Error, RecordId, RecordKind, Result,
    Signal, SignalChange, SignalDraft, TrackedRecord,
};
use spectra_ledger::{VersionEntry, VersionLedger};

use crate::interceptor::ChangeInterceptor;
use crate::lock::check_expected_version;
use crate::store::{RecordStore, TrashItem};
use crate::unit_of_work::{PendingOp, RecordDraft, StoredRecord, UnitOfWork};

/// Result of a committed unit of work.
#[derive(Debug)]
pub struct Committed {
    /// Applied operations, with created records populated.
    pub ops: Vec<PendingOp>,
    /// (kind, id) of updates dropped by no-op suppression.
    pub suppressed: Vec<(RecordKind, RecordId)>,
}

/// The versioned record database.
#[derive(Debug, Default)]
pub struct Database {
    store: RecordStore,
    ledger: VersionLedger,
    commit_lock: Mutex<()>,
}

impl Database {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Create a signal. The new record starts at lock version 1 and
    /// gets a version-1 create entry.
    pub fn create_signal(&self, draft: SignalDraft, actor: &str) -> Result<Signal> {
        draft.validate()?;
        let mut uow = UnitOfWork::new(actor);
        uow.stage_create(RecordDraft::Signal(draft));
        let committed = self.commit(uow)?;
        match committed.ops.into_iter().next() {
            Some(PendingOp::Create {
                created: Some(StoredRecord::Signal(signal)),
                ..
            }) => Ok(signal),
            _ => Err(Error::Internal("create did not yield a signal".into())),
        }
    }

    /// Update a signal. Returns the current record and whether anything
    /// actually changed; a write-back of identical values reports
    /// `false` and advances nothing.
    pub fn update_signal(
        &self,
        id: RecordId,
        expected_version: u64,
        change: SignalChange,
        actor: &str,
    ) -> Result<(Signal, bool)> {
        let before = self.signal(id)?;
        check_expected_version(&before, expected_version)?;
        let mut after = before.clone();
        after.apply_change(&change);
        check_frequency_range(after.frequency_from, after.frequency_to)?;

        let unchanged = before.clone();
        let mut uow = UnitOfWork::new(actor);
        uow.stage_update(StoredRecord::Signal(before), StoredRecord::Signal(after));
        let committed = self.commit(uow)?;
        match committed.ops.into_iter().next() {
            Some(PendingOp::Update {
                after: StoredRecord::Signal(signal),
                ..
            }) => Ok((signal, true)),
            None => Ok((unchanged, false)),
            _ => Err(Error::Internal("update did not yield a signal".into())),
        }
    }

    /// Soft-delete a signal under the same lock guard as any mutation.
    pub fn delete_signal(&self, id: RecordId, expected_version: u64, actor: &str) -> Result<()> {
        let before = self.signal(id)?;
        check_expected_version(&before, expected_version)?;
        let mut uow = UnitOfWork::new(actor);
        uow.stage_delete(StoredRecord::Signal(before));
        self.commit(uow)?;
        Ok(())
    }

    /// Load a live signal.
    pub fn signal(&self, id: RecordId) -> Result<Signal> {
        self.store
            .signal(id)
            .filter(|signal| !signal.is_deleted())
            .ok_or(Error::NotFound {
                kind: RecordKind::Signals,
                id,
            })
    }

    /// All live signals, newest first.
    pub fn signals(&self) -> Vec<Signal> {
        self.store.live_signals()
    }

    // =========================================================================
    // Assets
    // =========================================================================

    /// Create an asset. Referenced signals must exist and be live.
    pub fn create_asset(&self, draft: AssetDraft, actor: &str) -> Result<Asset> {
        draft.validate()?;
        for signal_id in &draft.signal_ids {
            self.signal(*signal_id)?;
        }
        let mut uow = UnitOfWork::new(actor);
        uow.stage_create(RecordDraft::Asset(draft));
        let committed = self.commit(uow)?;
        match committed.ops.into_iter().next() {
            Some(PendingOp::Create {
                created: Some(StoredRecord::Asset(asset)),
                ..
            }) => Ok(asset),
            _ => Err(Error::Internal("create did not yield an asset".into())),
        }
    }

    /// Update an asset, relationship included. A pure membership change
    /// is a real update and produces a `signal_ids` diff entry.
    pub fn update_asset(
        &self,
        id: RecordId,
        expected_version: u64,
        change: AssetChange,
        actor: &str,
    ) -> Result<(Asset, bool)> {
        let before = self.asset(id)?;
        check_expected_version(&before, expected_version)?;
        if let Some(name) = &change.name {
            if name.trim().is_empty() {
                return Err(Error::Validation("asset name must not be empty".into()));
            }
        }
        if let Some(signal_ids) = &change.signal_ids {
            for signal_id in signal_ids {
                self.signal(*signal_id)?;
            }
        }
        let mut after = before.clone();
        after.apply_change(&change);

        let unchanged = before.clone();
        let mut uow = UnitOfWork::new(actor);
        uow.stage_update(StoredRecord::Asset(before), StoredRecord::Asset(after));
        let committed = self.commit(uow)?;
        match committed.ops.into_iter().next() {
            Some(PendingOp::Update {
                after: StoredRecord::Asset(asset),
                ..
            }) => Ok((asset, true)),
            None => Ok((unchanged, false)),
            _ => Err(Error::Internal("update did not yield an asset".into())),
        }
    }

    /// Soft-delete an asset; its signal associations stay in place.
    pub fn delete_asset(&self, id: RecordId, expected_version: u64, actor: &str) -> Result<()> {
        let before = self.asset(id)?;
        check_expected_version(&before, expected_version)?;
        let mut uow = UnitOfWork::new(actor);
        uow.stage_delete(StoredRecord::Asset(before));
        self.commit(uow)?;
        Ok(())
    }

    /// Load a live asset.
    pub fn asset(&self, id: RecordId) -> Result<Asset> {
        self.store
            .asset(id)
            .filter(|asset| !asset.is_deleted())
            .ok_or(Error::NotFound {
                kind: RecordKind::Assets,
                id,
            })
    }

    /// All live assets, newest first.
    pub fn assets(&self) -> Vec<Asset> {
        self.store.live_assets()
    }

    // =========================================================================
    // History and trash
    // =========================================================================

    /// Version history of one record, most recent first. History
    /// outlives the record: a tombstoned record keeps its full list.
    pub fn versions_of(&self, kind: RecordKind, id: RecordId) -> Vec<VersionEntry> {
        self.ledger.versions_of(kind, id)
    }

    /// Global change feed across all records, newest first.
    pub fn recent_changes(&self) -> Vec<VersionEntry> {
        self.ledger.recent()
    }

    /// Tombstoned records, newest deletion first.
    pub fn trash(&self) -> Vec<TrashItem> {
        self.store.trash_items()
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Commit one unit of work atomically.
    fn commit(&self, mut uow: UnitOfWork) -> Result<Committed> {
        let _guard = self.commit_lock.lock();
        let now = Utc::now();
        let interceptor = ChangeInterceptor::new(&self.ledger);
        interceptor.before_commit(&mut uow, now);
        if !uow.is_empty() {
            self.store.apply(&mut uow, now)?;
            let entries = interceptor.after_commit(&uow, now)?;
            tracing::debug!(
                actor = uow.actor(),
                ops = uow.ops().len(),
                versions = entries.len(),
                "unit of work committed"
            );
        }
        Ok(Committed {
            ops: uow.ops,
            suppressed: uow.suppressed,
        })
    }
}
