//! Soft-delete visibility rules.

use crate::*;

#[test]
fn test_deleted_record_moves_to_trash() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    db.signals.delete(signal.id, 1, "bob").unwrap();

    assert!(db.signals.list().is_empty());
    assert!(db.signals.get(signal.id).unwrap_err().is_not_found());

    let items = db.trash.list();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.kind, RecordKind::Signals);
    assert_eq!(item.id, signal.id);
    assert_eq!(item.label, "AM 100-100", "label derives from domain fields");
    assert_eq!(item.deleted_by.as_deref(), Some("bob"));
    assert!(item.deleted_at.is_some());
}

#[test]
fn test_trash_spans_kinds_newest_deletion_first() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    let asset = db.assets.create(asset_with("rig", vec![]), "alice").unwrap();

    db.signals.delete(signal.id, 1, "alice").unwrap();
    db.assets.delete(asset.id, 1, "alice").unwrap();

    let items = db.trash.list();
    assert_eq!(items.len(), 2);
    assert!(
        items[0].deleted_at >= items[1].deleted_at,
        "newest deletion first"
    );
    let kinds: Vec<RecordKind> = items.iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&RecordKind::Signals));
    assert!(kinds.contains(&RecordKind::Assets));
}

#[test]
fn test_delete_requires_matching_version() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    let err = db.signals.delete(signal.id, 5, "alice").unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(db.signals.list().len(), 1, "record is still live");
    assert!(db.trash.list().is_empty());
}

#[test]
fn test_deleting_twice_is_not_found() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    db.signals.delete(signal.id, 1, "alice").unwrap();
    let err = db.signals.delete(signal.id, 2, "alice").unwrap_err();
    assert!(err.is_not_found());
}

/// Soft-deleting an asset keeps its signal associations: the final
/// snapshot in history still carries the reference list.
#[test]
fn test_asset_delete_keeps_relationships_in_history() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    let asset = db
        .assets
        .create(asset_with("rig", vec![signal.id]), "alice")
        .unwrap();
    db.assets.delete(asset.id, 1, "alice").unwrap();

    let versions = db.history.versions_of(RecordKind::Assets, asset.id);
    assert_eq!(versions[0].operation, Operation::Delete);
    assert_eq!(
        versions[0].snapshot["signal_ids"],
        serde_json::json!([signal.id.as_i64()])
    );
}

/// The mutation surface stays closed for tombstoned records.
#[test]
fn test_deleted_records_reject_further_edits() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    db.signals.delete(signal.id, 1, "alice").unwrap();

    let err = db
        .signals
        .update(signal.id, 2, power_change(9.0), "alice")
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        db.history.versions_of(RecordKind::Signals, signal.id).len(),
        2,
        "create + delete only"
    );
}
