//! Record store with conditional-write semantics.
//!
//! The store is the single unit of contention: one record table per
//! kind, keyed by id, plus the association table for the many-to-many
//! relationship. Every update or delete is a conditional write: the
//! row is only written if its lock counter still equals the value the
//! caller loaded, and the counter is incremented as part of the same
//! write. The check-and-write runs under one write-lock acquisition,
//! which is what makes it the authoritative layer of the optimistic
//! lock guard.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use spectra_core::{
    check_frequency_range, Asset, Error, RecordId, RecordKind, Result, Signal, TrackedRecord,
};

use crate::unit_of_work::{PendingOp, RecordDraft, StoredRecord, UnitOfWork};

/// A soft-deleted record as surfaced by the trash view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrashItem {
    /// Kind of the deleted record.
    pub kind: RecordKind,
    /// Id of the deleted record.
    pub id: RecordId,
    /// Human-readable label derived from the record's domain fields.
    pub label: String,
    /// When the record was deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Who deleted the record.
    pub deleted_by: Option<String>,
}

#[derive(Debug, Default)]
struct StoreInner {
    signals: BTreeMap<RecordId, Signal>,
    assets: BTreeMap<RecordId, Asset>,
    asset_signals: BTreeSet<(RecordId, RecordId)>,
    next_signal_id: i64,
    next_asset_id: i64,
}

/// In-memory relational-style store for tracked records.
#[derive(Debug, Default)]
pub struct RecordStore {
    inner: RwLock<StoreInner>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a signal row, tombstoned or not.
    pub fn signal(&self, id: RecordId) -> Option<Signal> {
        self.inner.read().signals.get(&id).cloned()
    }

    /// Load an asset row, tombstoned or not.
    pub fn asset(&self, id: RecordId) -> Option<Asset> {
        self.inner.read().assets.get(&id).cloned()
    }

    /// All live signals, newest id first.
    pub fn live_signals(&self) -> Vec<Signal> {
        self.inner
            .read()
            .signals
            .values()
            .rev()
            .filter(|s| !s.is_deleted())
            .cloned()
            .collect()
    }

    /// All live assets, newest id first.
    pub fn live_assets(&self) -> Vec<Asset> {
        self.inner
            .read()
            .assets
            .values()
            .rev()
            .filter(|a| !a.is_deleted())
            .cloned()
            .collect()
    }

    /// All tombstoned records across kinds, newest deletion first.
    pub fn trash_items(&self) -> Vec<TrashItem> {
        let inner = self.inner.read();
        let signals = inner
            .signals
            .values()
            .filter(|s| s.is_deleted())
            .map(|s| trash_item(s));
        let assets = inner
            .assets
            .values()
            .filter(|a| a.is_deleted())
            .map(|a| trash_item(a));
        let mut items: Vec<TrashItem> = signals.chain(assets).collect();
        items.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        items
    }

    /// Apply a unit of work: validate every write, then write.
    ///
    /// Validation of the whole unit happens before any row changes, so
    /// a rejected unit of work leaves the store untouched: the
    /// all-or-nothing half of the commit contract. A lock-counter
    /// mismatch at this point means another transaction won the race
    /// after the advisory check and surfaces as a conflict.
    pub fn apply(&self, uow: &mut UnitOfWork, now: DateTime<Utc>) -> Result<()> {
        let mut inner = self.inner.write();

        for op in uow.ops() {
            match op {
                PendingOp::Create { draft, .. } => inner.check_create(draft)?,
                PendingOp::Update { before, after, .. } => inner.check_write(before, Some(after))?,
                PendingOp::Delete { before, .. } => inner.check_write(before, None)?,
            }
        }

        let actor = uow.actor().to_string();
        for op in &mut uow.ops {
            match op {
                PendingOp::Create { draft, created } => {
                    *created = Some(inner.insert(draft, &actor, now));
                }
                PendingOp::Update { before, after, .. } => inner.write_back(before, after)?,
                PendingOp::Delete { before, after } => inner.write_back(before, after)?,
            }
        }
        Ok(())
    }
}

fn trash_item<R: TrackedRecord>(record: &R) -> TrashItem {
    TrashItem {
        kind: record.kind(),
        id: record.id(),
        label: record.trash_label(),
        deleted_at: record.meta().deleted_at,
        deleted_by: record.meta().deleted_by.clone(),
    }
}

impl StoreInner {
    fn check_create(&self, draft: &RecordDraft) -> Result<()> {
        match draft {
            RecordDraft::Signal(draft) => {
                check_frequency_range(draft.frequency_from, draft.frequency_to)
            }
            RecordDraft::Asset(draft) => self.check_signal_refs(draft.signal_ids.iter()),
        }
    }

    /// Conditional-write check plus the store-side constraints.
    fn check_write(&self, before: &StoredRecord, after: Option<&StoredRecord>) -> Result<()> {
        let loaded_version = before.lock_version();
        let stored_version = match before {
            StoredRecord::Signal(signal) => self
                .signals
                .get(&signal.id)
                .map(|s| s.lock_version()),
            StoredRecord::Asset(asset) => self.assets.get(&asset.id).map(|a| a.lock_version()),
        }
        .ok_or_else(|| {
            Error::Storage(format!(
                "{} {} missing at write time",
                before.kind(),
                before.id()
            ))
        })?;

        if stored_version != loaded_version {
            return Err(Error::Conflict {
                kind: before.kind(),
                id: before.id(),
                expected: loaded_version,
                actual: stored_version,
            });
        }

        if let Some(after) = after {
            match after {
                StoredRecord::Signal(signal) => {
                    check_frequency_range(signal.frequency_from, signal.frequency_to)?
                }
                StoredRecord::Asset(asset) => self.check_signal_refs(asset.signal_ids.iter())?,
            }
        }
        Ok(())
    }

    fn check_signal_refs<'a>(&self, ids: impl Iterator<Item = &'a RecordId>) -> Result<()> {
        for id in ids {
            if !self.signals.contains_key(id) {
                return Err(Error::NotFound {
                    kind: RecordKind::Signals,
                    id: *id,
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, draft: &RecordDraft, actor: &str, now: DateTime<Utc>) -> StoredRecord {
        match draft {
            RecordDraft::Signal(draft) => {
                self.next_signal_id += 1;
                let signal = Signal::create(RecordId::new(self.next_signal_id), draft, actor, now);
                self.signals.insert(signal.id, signal.clone());
                StoredRecord::Signal(signal)
            }
            RecordDraft::Asset(draft) => {
                self.next_asset_id += 1;
                let asset = Asset::create(RecordId::new(self.next_asset_id), draft, actor, now);
                for signal_id in &asset.signal_ids {
                    self.asset_signals.insert((asset.id, *signal_id));
                }
                self.assets.insert(asset.id, asset.clone());
                StoredRecord::Asset(asset)
            }
        }
    }

    /// Write the post-image, incrementing the lock counter as part of
    /// the same write.
    fn write_back(&mut self, before: &StoredRecord, after: &mut StoredRecord) -> Result<()> {
        match (before, after) {
            (StoredRecord::Signal(before), StoredRecord::Signal(after)) => {
                after.meta.lock_version = before.meta.lock_version + 1;
                self.signals.insert(after.id, after.clone());
            }
            (StoredRecord::Asset(before), StoredRecord::Asset(after)) => {
                after.meta.lock_version = before.meta.lock_version + 1;
                self.asset_signals.retain(|(asset_id, _)| *asset_id != after.id);
                for signal_id in &after.signal_ids {
                    self.asset_signals.insert((after.id, *signal_id));
                }
                self.assets.insert(after.id, after.clone());
            }
            _ => {
                return Err(Error::Internal(
                    "mismatched record kinds in write-back".into(),
                ))
            }
        }
        Ok(())
    }
}
