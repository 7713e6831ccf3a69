//! Tracked domain records: signals, assets, and their shared
//! versioned/lock-guarded/soft-deleted capability set.
//!
//! Both record kinds implement [`TrackedRecord`]; the snapshot builder,
//! diff engine, and version ledger operate only on that trait and never
//! on the concrete kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::snapshot::{build_snapshot, iso8601, Snapshot};
use crate::types::{RecordId, RecordKind};

/// Audit, concurrency, and soft-delete metadata shared by every tracked
/// record. None of these fields are versioned content (see the snapshot
/// exclusion set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// Actor that created the record.
    pub created_by: String,
    /// When the record last changed for real (no-op writes don't count).
    pub updated_at: DateTime<Utc>,
    /// Actor behind the last real change.
    pub updated_by: String,
    /// Optimistic-concurrency token. Starts at 1, +1 per successful
    /// mutation.
    pub lock_version: u64,
    /// Tombstone flag; soft-deleted records keep their row and history.
    pub is_deleted: bool,
    /// When the record was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Actor that soft-deleted the record.
    pub deleted_by: Option<String>,
}

impl RecordMeta {
    /// Fresh metadata for a newly created record.
    pub fn new(actor: &str, at: DateTime<Utc>) -> Self {
        Self {
            created_at: at,
            created_by: actor.to_string(),
            updated_at: at,
            updated_by: actor.to_string(),
            lock_version: 1,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        }
    }

    fn field_values(&self) -> Vec<(&'static str, JsonValue)> {
        vec![
            ("created_at", iso8601(self.created_at)),
            ("created_by", json!(self.created_by)),
            ("updated_at", iso8601(self.updated_at)),
            ("updated_by", json!(self.updated_by)),
            ("lock_version", json!(self.lock_version)),
            ("is_deleted", json!(self.is_deleted)),
            ("deleted_at", self.deleted_at.map(iso8601).unwrap_or(JsonValue::Null)),
            ("deleted_by", self.deleted_by.as_deref().map(|a| json!(a)).unwrap_or(JsonValue::Null)),
        ]
    }
}

/// Capability set shared by every versioned record kind.
///
/// The trait exposes exactly what the cross-cutting components need:
/// canonical-snapshot input, lock-version access, audit stamping, and
/// the soft-delete fields. Domain fields stay on the concrete types.
pub trait TrackedRecord {
    /// The record's kind; pairs with [`TrackedRecord::id`] to form
    /// every history key.
    fn kind(&self) -> RecordKind;

    /// Store-assigned identity.
    fn id(&self) -> RecordId;

    /// Shared metadata, read-only.
    fn meta(&self) -> &RecordMeta;

    /// Shared metadata, for stamping.
    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Every persisted field by name, metadata included; the snapshot
    /// builder filters the exclusion set on top of this.
    fn field_values(&self) -> Vec<(&'static str, JsonValue)>;

    /// Human-readable label for trash listings, derived from domain
    /// fields rather than the bare id.
    fn trash_label(&self) -> String;

    /// Current optimistic-lock counter.
    fn lock_version(&self) -> u64 {
        self.meta().lock_version
    }

    /// Whether the record is tombstoned.
    fn is_deleted(&self) -> bool {
        self.meta().is_deleted
    }

    /// Canonical snapshot of the record's versioned content.
    fn snapshot(&self) -> Snapshot
    where
        Self: Sized,
    {
        build_snapshot(self)
    }

    /// Stamp the update audit fields. Called only after the diff engine
    /// has confirmed a real change.
    fn stamp_updated(&mut self, actor: &str, at: DateTime<Utc>) {
        let meta = self.meta_mut();
        meta.updated_at = at;
        meta.updated_by = actor.to_string();
    }

    /// Set the tombstone. The row and its relationships stay in place.
    fn stamp_deleted(&mut self, actor: &str, at: DateTime<Utc>) {
        let meta = self.meta_mut();
        meta.is_deleted = true;
        meta.deleted_at = Some(at);
        meta.deleted_by = Some(actor.to_string());
    }
}

/// Validate the frequency-range invariant: lower bound never above the
/// upper bound. Checked at the boundary and again by the store.
pub fn check_frequency_range(frequency_from: f64, frequency_to: f64) -> Result<()> {
    if !(frequency_from <= frequency_to) {
        return Err(Error::Validation(format!(
            "frequency_to {} must be >= frequency_from {}",
            frequency_to, frequency_from
        )));
    }
    Ok(())
}

// =============================================================================
// Signal
// =============================================================================

/// An RF signal: a frequency range with modulation and power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Lower bound of the frequency range.
    pub frequency_from: f64,
    /// Upper bound of the frequency range; never below `frequency_from`.
    pub frequency_to: f64,
    /// Modulation scheme, e.g. "AM" or "FM".
    pub modulation: String,
    /// Transmit power.
    pub power: f64,
    /// Shared audit / lock / tombstone metadata.
    #[serde(flatten)]
    pub meta: RecordMeta,
}

/// Field values for creating a signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDraft {
    /// Lower bound of the frequency range.
    pub frequency_from: f64,
    /// Upper bound of the frequency range.
    pub frequency_to: f64,
    /// Modulation scheme.
    pub modulation: String,
    /// Transmit power.
    pub power: f64,
}

impl SignalDraft {
    /// Boundary validation; rejected drafts never reach the store.
    pub fn validate(&self) -> Result<()> {
        check_frequency_range(self.frequency_from, self.frequency_to)
    }
}

/// Partial update of a signal; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalChange {
    /// New lower bound, if changing.
    pub frequency_from: Option<f64>,
    /// New upper bound, if changing.
    pub frequency_to: Option<f64>,
    /// New modulation, if changing.
    pub modulation: Option<String>,
    /// New power, if changing.
    pub power: Option<f64>,
}

impl Signal {
    /// Build a new signal from a draft with fresh metadata.
    pub fn create(id: RecordId, draft: &SignalDraft, actor: &str, at: DateTime<Utc>) -> Self {
        Self {
            id,
            frequency_from: draft.frequency_from,
            frequency_to: draft.frequency_to,
            modulation: draft.modulation.clone(),
            power: draft.power,
            meta: RecordMeta::new(actor, at),
        }
    }

    /// Apply a partial change to the domain fields.
    pub fn apply_change(&mut self, change: &SignalChange) {
        if let Some(frequency_from) = change.frequency_from {
            self.frequency_from = frequency_from;
        }
        if let Some(frequency_to) = change.frequency_to {
            self.frequency_to = frequency_to;
        }
        if let Some(modulation) = &change.modulation {
            self.modulation = modulation.clone();
        }
        if let Some(power) = change.power {
            self.power = power;
        }
    }
}

impl TrackedRecord for Signal {
    fn kind(&self) -> RecordKind {
        RecordKind::Signals
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn field_values(&self) -> Vec<(&'static str, JsonValue)> {
        let mut fields = vec![
            ("id", json!(self.id.as_i64())),
            ("frequency_from", json!(self.frequency_from)),
            ("frequency_to", json!(self.frequency_to)),
            ("modulation", json!(self.modulation)),
            ("power", json!(self.power)),
        ];
        fields.extend(self.meta.field_values());
        fields
    }

    fn trash_label(&self) -> String {
        format!(
            "{} {}-{}",
            self.modulation, self.frequency_from, self.frequency_to
        )
    }
}

// =============================================================================
// Asset
// =============================================================================

/// A named asset holding a set of signal references.
///
/// The relationship is many-to-many, order-irrelevant, and pair-unique;
/// the `BTreeSet` representation enforces both uniqueness and the
/// sorted order the canonical snapshot requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Referenced signal ids.
    pub signal_ids: BTreeSet<RecordId>,
    /// Shared audit / lock / tombstone metadata.
    #[serde(flatten)]
    pub meta: RecordMeta,
}

/// Field values for creating an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDraft {
    /// Display name; must be non-empty.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Referenced signal ids; duplicates collapse.
    pub signal_ids: Vec<RecordId>,
}

impl AssetDraft {
    /// Boundary validation; rejected drafts never reach the store.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("asset name must not be empty".into()));
        }
        Ok(())
    }
}

/// Partial update of an asset; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetChange {
    /// New name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// Replacement signal reference set, if changing.
    pub signal_ids: Option<Vec<RecordId>>,
}

impl Asset {
    /// Build a new asset from a draft with fresh metadata.
    pub fn create(id: RecordId, draft: &AssetDraft, actor: &str, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            signal_ids: draft.signal_ids.iter().copied().collect(),
            meta: RecordMeta::new(actor, at),
        }
    }

    /// Apply a partial change to the domain fields and relationship.
    pub fn apply_change(&mut self, change: &AssetChange) {
        if let Some(name) = &change.name {
            self.name = name.clone();
        }
        if let Some(description) = &change.description {
            self.description = description.clone();
        }
        if let Some(signal_ids) = &change.signal_ids {
            self.signal_ids = signal_ids.iter().copied().collect();
        }
    }
}

impl TrackedRecord for Asset {
    fn kind(&self) -> RecordKind {
        RecordKind::Assets
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn field_values(&self) -> Vec<(&'static str, JsonValue)> {
        let signal_ids: Vec<JsonValue> =
            self.signal_ids.iter().map(|id| json!(id.as_i64())).collect();
        let mut fields = vec![
            ("id", json!(self.id.as_i64())),
            ("name", json!(self.name)),
            ("description", json!(self.description)),
            ("signal_ids", JsonValue::Array(signal_ids)),
        ];
        fields.extend(self.meta.field_values());
        fields
    }

    fn trash_label(&self) -> String {
        self.name.clone()
    }
}
