//! Change interceptor: the transactional hook around every commit.
//!
//! `before_commit` classifies each pending operation, runs the diff
//! engine, drops no-op updates, and stamps audit metadata.
//! `after_commit` materializes the corresponding version ledger
//! entries once the store has applied the writes (record ids are only
//! known then for creates).
//!
//! ## Diff strategy priority
//!
//! 1. Snapshot-diff against the latest ledger snapshot: authoritative,
//!    and the only strategy that sees relationship changes.
//! 2. Field-history diff against the unit of work's loaded pre-image,
//!    the fallback for a record that has no ledger entry yet.

use chrono::{DateTime, Utc};

use spectra_core::{integrity_hash, snapshot_diff, Diff, Error, Result};
use spectra_ledger::{VersionEntry, VersionLedger};

use crate::unit_of_work::{PendingOp, UnitOfWork};

/// Observes a unit of work around its commit and writes history.
pub struct ChangeInterceptor<'a> {
    ledger: &'a VersionLedger,
}

impl<'a> ChangeInterceptor<'a> {
    /// Hook up the interceptor to the ledger it writes to.
    pub fn new(ledger: &'a VersionLedger) -> Self {
        Self { ledger }
    }

    /// Classify pending operations and decide whether history must be
    /// written, immediately before the store applies the unit of work.
    ///
    /// Updates whose diff computes to empty are removed here: writing
    /// back identical values must not advance the lock counter or
    /// create history. Real updates get their audit stamp; deletes get
    /// their tombstone.
    pub fn before_commit(&self, uow: &mut UnitOfWork, now: DateTime<Utc>) {
        let actor = uow.actor().to_string();
        let staged = std::mem::take(&mut uow.ops);
        let mut kept = Vec::with_capacity(staged.len());
        for mut op in staged {
            match &mut op {
                PendingOp::Create { .. } => kept.push(op),
                PendingOp::Update {
                    before,
                    after,
                    diff,
                } => {
                    let current = after.snapshot();
                    let previous = self
                        .ledger
                        .latest_snapshot(before.kind(), before.id())
                        .unwrap_or_else(|| before.snapshot());
                    let delta = snapshot_diff(&previous, &current);
                    if delta.is_empty() {
                        tracing::debug!(
                            kind = %before.kind(),
                            id = %before.id(),
                            "no-op update suppressed"
                        );
                        uow.suppressed.push((before.kind(), before.id()));
                        continue;
                    }
                    after.as_tracked_mut().stamp_updated(&actor, now);
                    *diff = Some(delta);
                    kept.push(op);
                }
                PendingOp::Delete { after, .. } => {
                    after.as_tracked_mut().stamp_deleted(&actor, now);
                    kept.push(op);
                }
            }
        }
        uow.ops = kept;
    }

    /// Materialize one version entry per applied operation.
    ///
    /// Runs after the store's conditional writes succeeded, inside the
    /// same commit section, so a rejected unit of work never leaves a
    /// ledger entry behind.
    pub fn after_commit(
        &self,
        uow: &UnitOfWork,
        now: DateTime<Utc>,
    ) -> Result<Vec<VersionEntry>> {
        let mut entries = Vec::with_capacity(uow.ops.len());
        for op in &uow.ops {
            let (record, diff) = match op {
                PendingOp::Create {
                    created: Some(record),
                    ..
                } => (record, Diff::new()),
                PendingOp::Create { created: None, .. } => {
                    return Err(Error::Internal(
                        "create committed without a stored record".into(),
                    ))
                }
                PendingOp::Update { after, diff, .. } => {
                    (after, diff.clone().unwrap_or_default())
                }
                // The tombstone is outside the canonical snapshot, so
                // this is the pre-delete content.
                PendingOp::Delete { after, .. } => (after, Diff::new()),
            };
            let snapshot = record.snapshot();
            let hash = integrity_hash(&snapshot)?;
            entries.push(self.ledger.append(
                record.kind(),
                record.id(),
                op.operation(),
                snapshot,
                diff,
                hash,
                uow.actor(),
                now,
            ));
        }
        Ok(entries)
    }
}
