//! Main database entry point for Spectra.

use std::sync::Arc;

use crate::primitives::{Assets, History, Signals, Trash};

/// The Spectra database.
///
/// This is the main entry point for all operations. The handle owns an
/// in-memory engine and exposes one facade per primitive; clones of the
/// primitives share the same engine.
///
/// # Example
///
/// ```
/// use spectradb::prelude::*;
///
/// let db = Spectra::new();
/// let signals = db.signals.list();
/// assert!(signals.is_empty());
/// ```
pub struct Spectra {
    /// Signal record operations.
    pub signals: Signals,

    /// Asset record operations.
    pub assets: Assets,

    /// Version history queries.
    pub history: History,

    /// Soft-deleted record view.
    pub trash: Trash,
}

impl Spectra {
    /// Create an empty database.
    pub fn new() -> Self {
        let inner = Arc::new(spectra_engine::Database::new());
        Spectra {
            signals: Signals::new(Arc::clone(&inner)),
            assets: Assets::new(Arc::clone(&inner)),
            history: History::new(Arc::clone(&inner)),
            trash: Trash::new(inner),
        }
    }
}

impl Default for Spectra {
    fn default() -> Self {
        Self::new()
    }
}
