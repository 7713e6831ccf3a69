//! Version ledger queries, integrity hashes, change descriptions.

use crate::*;
use serde_json::json;

/// Version numbers and lock versions stay equal and gap-free across an
/// arbitrary run of successful mutations.
#[test]
fn test_versions_and_lock_counter_march_together() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();

    let mut lock_version = signal.lock_version();
    for step in 0..5 {
        let outcome = db
            .signals
            .update(signal.id, lock_version, power_change(10.0 + step as f64), "alice")
            .unwrap();
        assert_eq!(outcome.record.lock_version(), lock_version + 1);
        lock_version = outcome.record.lock_version();
    }

    let versions = db.history.versions_of(RecordKind::Signals, signal.id);
    let numbers: Vec<u64> = versions.iter().map(|e| e.version).collect();
    assert_eq!(numbers, vec![6, 5, 4, 3, 2, 1], "descending, no gaps");
    assert_eq!(lock_version, 6, "lock counter equals latest version");
}

/// The hash is a pure function of snapshot content: returning to a
/// previous content state reproduces the previous hash.
#[test]
fn test_hash_depends_only_on_content() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    db.signals
        .update(signal.id, 1, power_change(10.0), "alice")
        .unwrap();
    db.signals
        .update(signal.id, 2, power_change(5.0), "alice")
        .unwrap();

    let versions = db.history.versions_of(RecordKind::Signals, signal.id);
    let hash_of = |version: u64| {
        versions
            .iter()
            .find(|e| e.version == version)
            .map(|e| e.hash.clone())
            .unwrap()
    };
    assert_eq!(
        hash_of(1),
        hash_of(3),
        "identical content states hash identically"
    );
    assert_ne!(hash_of(1), hash_of(2), "changed content changes the hash");

    let hash = hash_of(1);
    assert_eq!(hash.len(), 64);
    assert!(hash
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

/// The global feed interleaves kinds, newest first.
#[test]
fn test_recent_feed_is_global_and_newest_first() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    let asset = db.assets.create(asset_with("rig", vec![]), "bob").unwrap();
    db.signals
        .update(signal.id, 1, power_change(9.0), "carol")
        .unwrap();

    let feed = db.history.recent();
    assert_eq!(feed.len(), 3);
    assert_eq!(feed[0].operation, Operation::Update);
    assert_eq!(feed[0].changed_by, "carol");
    assert_eq!(feed[1].record_kind, RecordKind::Assets);
    assert_eq!(feed[1].record_id, asset.id);
    assert_eq!(feed[2].record_kind, RecordKind::Signals);
    assert!(feed[0].changed_at >= feed[2].changed_at);
}

/// Change descriptions: update lines come from the diff, create lines
/// from the full snapshot with a synthetic "none" old, delete has no
/// per-field detail.
#[test]
fn test_change_descriptions() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    db.signals
        .update(signal.id, 1, power_change(10.0), "alice")
        .unwrap();
    db.signals.delete(signal.id, 2, "alice").unwrap();

    let versions = db.history.versions_of(RecordKind::Signals, signal.id);
    let delete = &versions[0];
    let update = &versions[1];
    let create = &versions[2];

    assert_eq!(update.describe(), vec!["power: 5.0 -> 10.0"]);

    let create_lines = create.describe();
    assert!(create_lines.contains(&"modulation: none -> AM".to_string()));
    assert!(create_lines.contains(&"power: none -> 5.0".to_string()));
    assert_eq!(
        create_lines.len(),
        create.snapshot.len(),
        "one line per snapshot field"
    );

    assert!(delete.describe().is_empty());
}

/// History outlives the record: a deleted record keeps all entries,
/// including its final pre-delete snapshot.
#[test]
fn test_history_survives_soft_delete() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    db.signals
        .update(signal.id, 1, power_change(10.0), "alice")
        .unwrap();
    db.signals.delete(signal.id, 2, "bob").unwrap();

    assert!(db.signals.get(signal.id).unwrap_err().is_not_found());

    let versions = db.history.versions_of(RecordKind::Signals, signal.id);
    assert_eq!(versions.len(), 3);
    let delete = &versions[0];
    assert_eq!(delete.version, 3);
    assert_eq!(delete.operation, Operation::Delete);
    assert!(delete.diff.is_empty());
    assert_eq!(delete.changed_by, "bob");
    assert_eq!(
        delete.snapshot["power"],
        json!(10.0),
        "pre-delete content is captured"
    );
    assert!(
        !delete.snapshot.contains_key("is_deleted"),
        "tombstone metadata is not versioned content"
    );
}

/// A failed mutation writes nothing: conflicts and validation failures
/// leave the feed untouched.
#[test]
fn test_failed_mutations_write_no_history() {
    let db = db();
    let signal = db.signals.create(am_signal(), "alice").unwrap();
    let baseline = db.history.recent().len();

    let _ = db
        .signals
        .update(signal.id, 9, power_change(1.0), "alice")
        .unwrap_err();
    let _ = db
        .signals
        .update(
            signal.id,
            1,
            SignalChange {
                frequency_to: Some(1.0),
                ..SignalChange::default()
            },
            "alice",
        )
        .unwrap_err();

    assert_eq!(db.history.recent().len(), baseline);
}
