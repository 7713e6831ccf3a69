//! Optimistic lock guard, advisory layer.
//!
//! Two enforcement layers back every mutation:
//!
//! 1. **Advisory** (this module): compare the caller-supplied expected
//!    version against the freshly loaded record before any field is
//!    touched. A mismatch aborts with a precise conflict and no
//!    mutation is attempted.
//! 2. **Authoritative** (the store's conditional write): the row is
//!    only written if its persisted lock counter still equals the value
//!    read at load time, incremented atomically as part of the same
//!    write. This closes the race window the advisory check cannot.

use spectra_core::{Error, Result, TrackedRecord};

/// Advisory expected-version check against the loaded record.
pub fn check_expected_version(record: &dyn TrackedRecord, expected: u64) -> Result<()> {
    let actual = record.lock_version();
    if expected != actual {
        return Err(Error::Conflict {
            kind: record.kind(),
            id: record.id(),
            expected,
            actual,
        });
    }
    Ok(())
}
