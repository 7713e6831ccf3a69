//! Immutable version ledger entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use spectra_core::{Diff, Operation, RecordId, RecordKind, Snapshot};

/// One immutable history entry: a single create/update/delete of a
/// tracked record.
///
/// Entries are keyed by (record kind, record id, version); version
/// numbers start at 1 and increase strictly with no reuse. Once
/// appended, an entry is never mutated or deleted: history outlives
/// its source record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Kind component of the composite key.
    pub record_kind: RecordKind,
    /// Id component of the composite key.
    pub record_id: RecordId,
    /// Version component of the composite key; equals the record's
    /// lock counter after the mutation.
    pub version: u64,
    /// Which mutation class produced this entry.
    pub operation: Operation,
    /// Full canonical snapshot at the time of the operation. For a
    /// delete this is the pre-delete content.
    pub snapshot: Snapshot,
    /// Field-level delta from the previous version. Empty for create
    /// and delete; non-empty for update by construction.
    pub diff: Diff,
    /// SHA-256 integrity fingerprint of the snapshot, lowercase hex.
    pub hash: String,
    /// When the mutation committed.
    pub changed_at: DateTime<Utc>,
    /// Actor behind the mutation.
    pub changed_by: String,
}

impl VersionEntry {
    /// Render a human-readable change description, one line per field.
    ///
    /// - update: `field: old -> new` from the diff
    /// - create: every snapshot field with a synthetic old of `none`
    /// - delete: no per-field detail
    pub fn describe(&self) -> Vec<String> {
        match self.operation {
            Operation::Create => self
                .snapshot
                .iter()
                .map(|(field, value)| format!("{}: none -> {}", field, render(value)))
                .collect(),
            Operation::Update => self
                .diff
                .iter()
                .map(|(field, change)| {
                    format!("{}: {} -> {}", field, render(&change.old), render(&change.new))
                })
                .collect(),
            Operation::Delete => Vec::new(),
        }
    }
}

/// Render a JSON value for the change feed: nulls as `none`, strings
/// bare, everything else in compact JSON form.
fn render(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "none".to_string(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
