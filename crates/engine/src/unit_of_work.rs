//! Unit of work: the pending operations of one mutation request.
//!
//! The persistence-layer lifecycle hooks of the original design are
//! modeled explicitly: a [`UnitOfWork`] collects pending operations,
//! and the commit coordinator invokes the change interceptor's
//! `before_commit` / `after_commit` extension points around the store
//! application. No ambient state is involved; the acting user travels
//! with the unit of work.

use spectra_core::{
    Asset, AssetDraft, Operation, RecordId, RecordKind, Signal, SignalDraft, Snapshot,
    TrackedRecord,
};

/// Draft of a record about to be created; the store assigns the id.
#[derive(Debug, Clone)]
pub enum RecordDraft {
    /// A new signal.
    Signal(SignalDraft),
    /// A new asset.
    Asset(AssetDraft),
}

impl RecordDraft {
    /// Kind of the record this draft will become.
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordDraft::Signal(_) => RecordKind::Signals,
            RecordDraft::Asset(_) => RecordKind::Assets,
        }
    }
}

/// A concrete tracked record, kind-erased for the cross-cutting
/// components but still concretely typed for store write-back.
#[derive(Debug, Clone)]
pub enum StoredRecord {
    /// A signal row.
    Signal(Signal),
    /// An asset row.
    Asset(Asset),
}

impl StoredRecord {
    /// View as the shared capability trait.
    pub fn as_tracked(&self) -> &dyn TrackedRecord {
        match self {
            StoredRecord::Signal(signal) => signal,
            StoredRecord::Asset(asset) => asset,
        }
    }

    /// Mutable view as the shared capability trait.
    pub fn as_tracked_mut(&mut self) -> &mut dyn TrackedRecord {
        match self {
            StoredRecord::Signal(signal) => signal,
            StoredRecord::Asset(asset) => asset,
        }
    }

    /// Record kind.
    pub fn kind(&self) -> RecordKind {
        self.as_tracked().kind()
    }

    /// Record id.
    pub fn id(&self) -> RecordId {
        self.as_tracked().id()
    }

    /// Current lock counter.
    pub fn lock_version(&self) -> u64 {
        self.as_tracked().lock_version()
    }

    /// Canonical snapshot of the record.
    pub fn snapshot(&self) -> Snapshot {
        match self {
            StoredRecord::Signal(signal) => signal.snapshot(),
            StoredRecord::Asset(asset) => asset.snapshot(),
        }
    }
}

/// One pending operation inside a unit of work.
#[derive(Debug)]
pub enum PendingOp {
    /// Insert a new record. `created` is populated by the store once
    /// the id is assigned.
    Create {
        /// The draft to insert.
        draft: RecordDraft,
        /// The stored record, after application.
        created: Option<StoredRecord>,
    },
    /// Write changed field values. `diff` is computed by the change
    /// interceptor in `before_commit`; an op whose diff comes back
    /// empty never reaches the store.
    Update {
        /// The record as loaded; its lock counter is the conditional-write guard.
        before: StoredRecord,
        /// The record with changes applied.
        after: StoredRecord,
        /// Field-level delta, filled in by the interceptor.
        diff: Option<spectra_core::Diff>,
    },
    /// Tombstone a record, keeping its row and relationships.
    Delete {
        /// The record as loaded.
        before: StoredRecord,
        /// The record with the tombstone stamped.
        after: StoredRecord,
    },
}

impl PendingOp {
    /// The mutation class recorded in history for this op.
    pub fn operation(&self) -> Operation {
        match self {
            PendingOp::Create { .. } => Operation::Create,
            PendingOp::Update { .. } => Operation::Update,
            PendingOp::Delete { .. } => Operation::Delete,
        }
    }

    /// Kind of the record this op touches.
    pub fn kind(&self) -> RecordKind {
        match self {
            PendingOp::Create { draft, .. } => draft.kind(),
            PendingOp::Update { before, .. } => before.kind(),
            PendingOp::Delete { before, .. } => before.kind(),
        }
    }
}

/// Collects the pending operations of one mutation request, together
/// with the acting user.
#[derive(Debug)]
pub struct UnitOfWork {
    actor: String,
    pub(crate) ops: Vec<PendingOp>,
    pub(crate) suppressed: Vec<(RecordKind, RecordId)>,
}

impl UnitOfWork {
    /// Start an empty unit of work on behalf of `actor`.
    pub fn new(actor: &str) -> Self {
        Self {
            actor: actor.to_string(),
            ops: Vec::new(),
            suppressed: Vec::new(),
        }
    }

    /// The acting user, as resolved by the caller's authentication
    /// layer. The engine treats it as an opaque string.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Stage a record creation.
    pub fn stage_create(&mut self, draft: RecordDraft) {
        self.ops.push(PendingOp::Create {
            draft,
            created: None,
        });
    }

    /// Stage an update from the loaded `before` image to `after`.
    pub fn stage_update(&mut self, before: StoredRecord, after: StoredRecord) {
        self.ops.push(PendingOp::Update {
            before,
            after,
            diff: None,
        });
    }

    /// Stage a soft delete; the interceptor stamps the tombstone.
    pub fn stage_delete(&mut self, before: StoredRecord) {
        let after = before.clone();
        self.ops.push(PendingOp::Delete { before, after });
    }

    /// Pending operations, in staging order.
    pub fn ops(&self) -> &[PendingOp] {
        &self.ops
    }

    /// True when nothing is left to apply.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
