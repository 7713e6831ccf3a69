//! Convenience re-exports for Spectra users.
//!
//! ```
//! use spectradb::prelude::*;
//!
//! let db = Spectra::new();
//! assert!(db.trash.list().is_empty());
//! ```

pub use crate::{
    Asset, AssetChange, AssetDraft, Error, Operation, RecordId, RecordKind, Result, Signal,
    SignalChange, SignalDraft, Spectra, TrackedRecord, TrashItem, UpdateOutcome, VersionEntry,
};
