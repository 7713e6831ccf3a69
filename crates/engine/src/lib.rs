//! Transactional engine for the Spectra versioned record store.
//!
//! This crate wires the core components into atomic units of work:
//!
//! - [`store`]: record tables with conditional-write semantics, the
//!   authoritative optimistic-lock layer
//! - [`lock`]: the advisory expected-version check
//! - [`unit_of_work`]: pending-operation collection per mutation
//! - [`interceptor`]: the `before_commit` / `after_commit` hook that
//!   diffs, suppresses no-ops, stamps audit metadata, and writes history
//! - [`database`]: the public engine surface and commit coordinator

pub mod database;
pub mod interceptor;
pub mod lock;
pub mod store;
pub mod unit_of_work;

pub use database::{Committed, Database};
pub use interceptor::ChangeInterceptor;
pub use lock::check_expected_version;
pub use store::{RecordStore, TrashItem};
pub use unit_of_work::{PendingOp, RecordDraft, StoredRecord, UnitOfWork};
