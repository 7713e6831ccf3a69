//! Append-only store of version entries.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use spectra_core::{Diff, Operation, RecordId, RecordKind, Snapshot};

use crate::entry::VersionEntry;

/// The append-only version ledger.
///
/// Entries are held in commit order; per-key version numbers are
/// assigned as `max(existing) + 1` at append time. Callers serialize
/// appends for a given record through the engine's commit lock, so
/// version assignment can never race with a conflicting mutation: the
/// optimistic lock guard rejects the loser before it reaches the
/// ledger.
///
/// No update or delete operation is exposed.
#[derive(Debug, Default)]
pub struct VersionLedger {
    entries: RwLock<Vec<VersionEntry>>,
}

impl VersionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next version entry for (kind, id) and return it.
    #[allow(clippy::too_many_arguments)]
    pub fn append(
        &self,
        record_kind: RecordKind,
        record_id: RecordId,
        operation: Operation,
        snapshot: Snapshot,
        diff: Diff,
        hash: String,
        actor: &str,
        at: DateTime<Utc>,
    ) -> VersionEntry {
        let mut entries = self.entries.write();
        let version = entries
            .iter()
            .filter(|e| e.record_kind == record_kind && e.record_id == record_id)
            .map(|e| e.version)
            .max()
            .unwrap_or(0)
            + 1;
        let entry = VersionEntry {
            record_kind,
            record_id,
            version,
            operation,
            snapshot,
            diff,
            hash,
            changed_at: at,
            changed_by: actor.to_string(),
        };
        tracing::trace!(
            kind = %record_kind,
            id = %record_id,
            version,
            operation = %operation,
            "version entry appended"
        );
        entries.push(entry.clone());
        entry
    }

    /// All versions for one record, most recent first.
    pub fn versions_of(&self, record_kind: RecordKind, record_id: RecordId) -> Vec<VersionEntry> {
        let entries = self.entries.read();
        let mut matching: Vec<VersionEntry> = entries
            .iter()
            .filter(|e| e.record_kind == record_kind && e.record_id == record_id)
            .cloned()
            .collect();
        matching.reverse();
        matching
    }

    /// The latest snapshot for one record, if any version exists.
    pub fn latest_snapshot(
        &self,
        record_kind: RecordKind,
        record_id: RecordId,
    ) -> Option<Snapshot> {
        let entries = self.entries.read();
        entries
            .iter()
            .rev()
            .find(|e| e.record_kind == record_kind && e.record_id == record_id)
            .map(|e| e.snapshot.clone())
    }

    /// Global change feed across all records, newest first.
    ///
    /// Commits are serialized, so reverse append order is descending
    /// `changed_at` order (and breaks timestamp ties by commit order).
    pub fn recent(&self) -> Vec<VersionEntry> {
        let entries = self.entries.read();
        entries.iter().rev().cloned().collect()
    }
}
