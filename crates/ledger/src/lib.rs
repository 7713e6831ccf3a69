//! Append-only version ledger for the Spectra engine.
//!
//! The ledger owns every [`VersionEntry`] ever written and outlives the
//! records that produced them. It exposes an append contract with
//! monotonic per-key version assignment, plus the two query surfaces
//! the history views need: per-record version lists and a global
//! "recent changes" feed.

mod entry;
mod ledger;

pub use entry::VersionEntry;
pub use ledger::VersionLedger;
