//! # Spectra
//!
//! Versioned record store with optimistic concurrency control.
//!
//! Spectra manages a small set of mutable domain records (RF signals,
//! assets, and their many-to-many association) while keeping a
//! complete, tamper-evident change history and preventing silently-lost
//! updates under concurrent editing.
//!
//! ## Quick Start
//!
//! ```
//! use spectradb::prelude::*;
//!
//! let db = Spectra::new();
//!
//! // Create a signal
//! let signal = db.signals.create(
//!     SignalDraft {
//!         frequency_from: 100.0,
//!         frequency_to: 200.0,
//!         modulation: "AM".into(),
//!         power: 5.0,
//!     },
//!     "alice",
//! )?;
//!
//! // Edit it, holding the version we loaded
//! let outcome = db.signals.update(
//!     signal.id,
//!     signal.lock_version(),
//!     SignalChange { power: Some(10.0), ..SignalChange::default() },
//!     "alice",
//! )?;
//! assert!(outcome.changed);
//!
//! // Inspect its history
//! let versions = db.history.versions_of(RecordKind::Signals, signal.id);
//! assert_eq!(versions.len(), 2);
//! # Ok::<(), spectradb::Error>(())
//! ```
//!
//! ## Concurrency model
//!
//! Every mutation carries the version the caller last observed. A stale
//! version fails with [`Error::Conflict`], distinguishable from
//! not-found and validation failures, and leaves the record and its
//! history untouched; reloading and retrying is the caller's decision.
//!
//! ## Primitives
//!
//! - [`Signals`] - signal records
//! - [`Assets`] - asset records and their signal references
//! - [`History`] - per-record version lists and the global change feed
//! - [`Trash`] - soft-deleted records

#![warn(missing_docs)]

mod database;
mod primitives;

pub mod prelude;

// Re-export main entry point
pub use database::Spectra;

// Re-export primitives
pub use primitives::{Assets, History, Signals, Trash, UpdateOutcome};

// Re-export the shared domain surface
pub use spectra_core::{
    Asset, AssetChange, AssetDraft, Diff, Error, FieldChange, Operation, RecordId, RecordKind,
    RecordMeta, Result, Signal, SignalChange, SignalDraft, Snapshot, TrackedRecord,
};
pub use spectra_engine::TrashItem;
pub use spectra_ledger::VersionEntry;
