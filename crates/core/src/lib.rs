//! Core domain model for the Spectra versioning engine.
//!
//! This crate defines the tracked record kinds and the leaf components
//! of the versioning pipeline:
//! - [`record`]: Signal / Asset and the shared [`TrackedRecord`] trait
//! - [`snapshot`]: canonical, order-independent content representation
//! - [`hash`]: SHA-256 integrity fingerprint of a snapshot
//! - [`diff`]: minimal field-level delta between snapshots
//! - [`error`]: the failure taxonomy every caller must distinguish

pub mod diff;
pub mod error;
pub mod hash;
pub mod record;
pub mod snapshot;
pub mod types;

pub use diff::{snapshot_diff, Diff, FieldChange};
pub use error::{Error, Result};
pub use hash::integrity_hash;
pub use record::{
    check_frequency_range, Asset, AssetChange, AssetDraft, RecordMeta, Signal, SignalChange,
    SignalDraft, TrackedRecord,
};
pub use snapshot::{build_snapshot, iso8601, Snapshot, VERSION_EXCLUDE};
pub use types::{Operation, RecordId, RecordKind};
