//! Field-level diffing of canonical snapshots.
//!
//! The diff engine compares two snapshots by value equality over the
//! union of their field names and produces a minimal delta of
//! `{old, new}` pairs. An empty diff is the signal for no-op
//! suppression: the mutation wrote back identical content and must not
//! advance the version counter or create history.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};

use crate::snapshot::Snapshot;

/// Old and new value of a single changed field. Absent-on-one-side
/// fields render the missing side as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Value before the mutation.
    pub old: JsonValue,
    /// Value after the mutation.
    pub new: JsonValue,
}

/// Minimal field-level delta between two snapshots.
pub type Diff = BTreeMap<String, FieldChange>;

/// Compute the value-equality diff between two snapshots.
///
/// This is the authoritative strategy: it works over full snapshots and
/// is the only one able to detect relationship changes, since
/// relationship membership is carried in the snapshot (`signal_ids`)
/// rather than in a scalar column.
pub fn snapshot_diff(previous: &Snapshot, current: &Snapshot) -> Diff {
    let fields: BTreeSet<&String> = previous.keys().chain(current.keys()).collect();
    fields
        .into_iter()
        .filter_map(|field| {
            let old = previous.get(field);
            let new = current.get(field);
            if old == new {
                return None;
            }
            Some((
                field.clone(),
                FieldChange {
                    old: old.cloned().unwrap_or(JsonValue::Null),
                    new: new.cloned().unwrap_or(JsonValue::Null),
                },
            ))
        })
        .collect()
}
