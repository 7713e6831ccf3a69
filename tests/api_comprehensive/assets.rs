//! Asset relationship versioning and referential checks.

use crate::*;
use serde_json::json;

fn three_signals(db: &Spectra) -> Vec<RecordId> {
    (0..3)
        .map(|_| db.signals.create(am_signal(), "alice").unwrap().id)
        .collect()
}

/// A pure membership change is a real update: the diff carries a
/// `signal_ids` entry even though no scalar field changed.
#[test]
fn test_relationship_change_produces_diff_entry() {
    let db = db();
    let ids = three_signals(&db);
    let (s1, s2, s3) = (ids[0], ids[1], ids[2]);

    let asset = db
        .assets
        .create(asset_with("north mast", vec![s1, s3]), "alice")
        .unwrap();
    let outcome = db
        .assets
        .update(
            asset.id,
            1,
            AssetChange {
                signal_ids: Some(vec![s1, s2, s3]),
                ..AssetChange::default()
            },
            "alice",
        )
        .unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.record.lock_version(), 2);

    let versions = db.history.versions_of(RecordKind::Assets, asset.id);
    assert_eq!(versions.len(), 2);
    let entry = &versions[0];
    assert_eq!(entry.diff.len(), 1, "only the relationship changed");
    let change = &entry.diff["signal_ids"];
    assert_eq!(
        change.old,
        json!([s1.as_i64(), s3.as_i64()]),
        "previous membership, sorted"
    );
    assert_eq!(change.new, json!([s1.as_i64(), s2.as_i64(), s3.as_i64()]));
}

/// Asset snapshots carry the sorted reference list regardless of the
/// order the caller supplied.
#[test]
fn test_snapshot_signal_ids_are_sorted_and_deduplicated() {
    let db = db();
    let ids = three_signals(&db);
    let (s1, s3) = (ids[0], ids[2]);

    let asset = db
        .assets
        .create(asset_with("rig", vec![s3, s1, s3]), "alice")
        .unwrap();
    let versions = db.history.versions_of(RecordKind::Assets, asset.id);
    assert_eq!(
        versions[0].snapshot["signal_ids"],
        json!([s1.as_i64(), s3.as_i64()])
    );
}

/// Re-submitting the same membership in a different order is a no-op.
#[test]
fn test_reordered_membership_is_noop() {
    let db = db();
    let ids = three_signals(&db);
    let (s1, s3) = (ids[0], ids[2]);

    let asset = db
        .assets
        .create(asset_with("rig", vec![s1, s3]), "alice")
        .unwrap();
    let outcome = db
        .assets
        .update(
            asset.id,
            1,
            AssetChange {
                name: Some("rig".into()),
                description: Some("test asset".into()),
                signal_ids: Some(vec![s3, s1]),
            },
            "alice",
        )
        .unwrap();
    assert!(!outcome.changed);
    assert_eq!(
        db.history.versions_of(RecordKind::Assets, asset.id).len(),
        1
    );
}

#[test]
fn test_unknown_signal_reference_is_rejected() {
    let db = db();
    let err = db
        .assets
        .create(asset_with("rig", vec![RecordId::new(42)]), "alice")
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(db.assets.list().is_empty());
}

#[test]
fn test_deleted_signal_cannot_be_referenced() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    db.signals.delete(signal.id, 1, "alice").unwrap();

    let err = db
        .assets
        .create(asset_with("rig", vec![signal.id]), "alice")
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_blank_name_is_rejected() {
    let db = db();
    let err = db.assets.create(asset_with("  ", vec![]), "alice").unwrap_err();
    assert!(err.is_validation());

    let asset = db.assets.create(asset_with("rig", vec![]), "alice").unwrap();
    let err = db
        .assets
        .update(
            asset.id,
            1,
            AssetChange {
                name: Some("".into()),
                ..AssetChange::default()
            },
            "alice",
        )
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(db.assets.get(asset.id).unwrap().name, "rig");
}

#[test]
fn test_asset_conflicts_are_distinguishable() {
    let db = db();
    let asset = db.assets.create(asset_with("rig", vec![]), "alice").unwrap();
    db.assets
        .update(
            asset.id,
            1,
            AssetChange {
                description: Some("updated".into()),
                ..AssetChange::default()
            },
            "alice",
        )
        .unwrap();

    let err = db
        .assets
        .update(
            asset.id,
            1,
            AssetChange {
                description: Some("stale edit".into()),
                ..AssetChange::default()
            },
            "bob",
        )
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(db.assets.get(asset.id).unwrap().description, "updated");
}
