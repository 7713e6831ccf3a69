//! Canonical snapshot construction for tracked records.
//!
//! A snapshot is the deterministic, order-independent representation of
//! a record's versioned content: an ordered map from field name to a
//! JSON-representable value. It is the input to both the diff engine
//! and the integrity hash, so two records with equal content must
//! always produce byte-identical serializations.
//!
//! ## Exclusion set
//!
//! Audit metadata, the lock counter, and the tombstone metadata are not
//! versioned content:
//!
//! - audit stamps would turn every touch into a metadata-only diff and
//!   defeat no-op suppression;
//! - the lock counter cannot be part of the content it guards;
//! - deletion is recorded as an operation kind, never as a
//!   tombstone-field diff, which keeps the delete entry's snapshot
//!   equal to the pre-delete content.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::record::TrackedRecord;

/// Ordered field-name → value map. `BTreeMap` iteration order gives the
/// stable key ordering the hash computer relies on.
pub type Snapshot = BTreeMap<String, JsonValue>;

/// Field names excluded from every canonical snapshot.
pub const VERSION_EXCLUDE: &[&str] = &[
    "created_at",
    "created_by",
    "updated_at",
    "updated_by",
    "lock_version",
    "is_deleted",
    "deleted_at",
    "deleted_by",
];

/// Build the canonical snapshot of a record: all persisted fields minus
/// the exclusion set.
pub fn build_snapshot<R: TrackedRecord + ?Sized>(record: &R) -> Snapshot {
    record
        .field_values()
        .into_iter()
        .filter(|(name, _)| !VERSION_EXCLUDE.contains(name))
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Render a timestamp as an ISO-8601 string, the deterministic form
/// used for any date/time value that crosses into a snapshot.
pub fn iso8601(at: DateTime<Utc>) -> JsonValue {
    JsonValue::String(at.to_rfc3339_opts(SecondsFormat::Micros, true))
}
