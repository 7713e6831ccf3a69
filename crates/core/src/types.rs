//! Core identifier and classification types for tracked records.
//!
//! This module defines the fundamental types used throughout the system:
//! - [`RecordId`]: Store-assigned integer identity of a tracked record
//! - [`RecordKind`]: The two concrete record kinds (signals, assets)
//! - [`Operation`]: The three mutation classes recorded in history

use serde::{Deserialize, Serialize};

/// Store-assigned identity of a tracked record.
///
/// Ids are allocated by the record store on insert and are immutable for
/// the lifetime of the record. They are only unique within a
/// [`RecordKind`]; history keys are always the (kind, id) pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw id value.
    pub fn new(raw: i64) -> Self {
        RecordId(raw)
    }

    /// Get the raw id value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        RecordId(raw)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The record kinds tracked by the versioning engine.
///
/// Both kinds share the full versioned / lock-guarded / soft-deleted
/// capability set and differ only in their domain fields. The string
/// forms (`"signals"`, `"assets"`) are the persisted `record_kind`
/// values in the version ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// RF signal: frequency range, modulation, power.
    Signals,
    /// Asset: named entity holding a set of signal references.
    Assets,
}

impl RecordKind {
    /// Stable string form used as the ledger key component.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Signals => "signals",
            RecordKind::Assets => "assets",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutation class of a single version ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record inserted; diff is empty by definition.
    Create,
    /// Field values changed; diff is non-empty by construction.
    Update,
    /// Record tombstoned; diff is empty, snapshot is the pre-delete content.
    Delete,
}

impl Operation {
    /// Stable string form used in the persisted ledger entry.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
