//! Soft-deleted record view.

use std::sync::Arc;

use spectra_engine::TrashItem;

/// Soft-deleted record view.
///
/// Default listings exclude tombstoned records; this view surfaces
/// them, newest deletion first, labelled by their domain fields rather
/// than their bare ids.
#[derive(Clone)]
pub struct Trash {
    inner: Arc<spectra_engine::Database>,
}

impl Trash {
    pub(crate) fn new(inner: Arc<spectra_engine::Database>) -> Self {
        Self { inner }
    }

    /// All tombstoned records across kinds, newest deletion first.
    pub fn list(&self) -> Vec<TrashItem> {
        self.inner.trash()
    }
}
