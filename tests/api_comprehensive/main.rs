//! Comprehensive API tests for the Spectra facade.
//!
//! Organized by area:
//! - signals: lifecycle, no-op suppression, optimistic locking
//! - assets: relationship versioning and referential checks
//! - history: version ledger queries, hashes, change descriptions
//! - concurrency: racing editors, one winner per version
//! - trash: soft-delete visibility rules

mod assets;
mod history;
mod trash;

use spectradb::prelude::*;

/// Fresh empty database.
pub fn db() -> Spectra {
    Spectra::new()
}

/// The canonical AM test signal: a single-point frequency range.
pub fn am_signal() -> SignalDraft {
    SignalDraft {
        frequency_from: 100.0,
        frequency_to: 100.0,
        modulation: "AM".into(),
        power: 5.0,
    }
}

/// A draft for an asset referencing the given signals.
pub fn asset_with(name: &str, signal_ids: Vec<RecordId>) -> AssetDraft {
    AssetDraft {
        name: name.into(),
        description: "test asset".into(),
        signal_ids,
    }
}

/// Change only the power of a signal.
pub fn power_change(power: f64) -> SignalChange {
    SignalChange {
        power: Some(power),
        ..SignalChange::default()
    }
}
