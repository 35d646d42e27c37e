use keepsake_core::db::open_db_in_memory;
use keepsake_core::{Note, Partner, Record, RecordStore, SqliteRecordStore, StoreError};
use rusqlite::Connection;

const COLLECTION: &str = "love_notes";

fn note(id: &str, content: &str) -> Note {
    Note {
        id: id.to_string(),
        author: Partner::Aldo,
        content: content.to_string(),
        voice_clip: None,
        date: "2024-02-25".to_string(),
        is_pinned: false,
    }
}

#[test]
fn never_written_collection_lists_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let notes: Vec<Note> = store.list("unknown_collection").unwrap();
    assert!(notes.is_empty());
}

#[test]
fn put_twice_with_same_item_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let item = note("n-1", "hello");
    store.put(COLLECTION, &item).unwrap();
    store.put(COLLECTION, &item).unwrap();

    let listed: Vec<Note> = store.list(COLLECTION).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], item);
}

#[test]
fn put_with_existing_id_replaces_in_place() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    store.put(COLLECTION, &note("n-1", "first")).unwrap();
    store.put(COLLECTION, &note("n-2", "second")).unwrap();
    store.put(COLLECTION, &note("n-1", "rewritten")).unwrap();

    let listed: Vec<Note> = store.list(COLLECTION).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].record_id(), "n-1");
    assert_eq!(listed[0].content, "rewritten");
    assert_eq!(listed[1].record_id(), "n-2");
}

#[test]
fn list_preserves_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    for id in ["c", "a", "b"] {
        store.put(COLLECTION, &note(id, id)).unwrap();
    }

    let ids: Vec<String> = store
        .list::<Note>(COLLECTION)
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn remove_is_a_no_op_for_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    store.put(COLLECTION, &note("n-1", "keep me")).unwrap();
    store.remove(COLLECTION, "ghost").unwrap();
    store.remove(COLLECTION, "n-1").unwrap();
    store.remove(COLLECTION, "n-1").unwrap();

    let listed: Vec<Note> = store.list(COLLECTION).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn seed_if_empty_populates_once() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let defaults = [note("s-1", "starter one"), note("s-2", "starter two")];
    assert!(store.seed_if_empty(COLLECTION, &defaults).unwrap());

    let listed: Vec<Note> = store.list(COLLECTION).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, "s-1");

    // Non-empty collection: seeding must change nothing.
    assert!(!store.seed_if_empty(COLLECTION, &defaults).unwrap());
    let unchanged: Vec<Note> = store.list(COLLECTION).unwrap();
    assert_eq!(unchanged.len(), 2);
}

#[test]
fn malformed_stored_body_degrades_to_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    store.put(COLLECTION, &note("n-1", "fine")).unwrap();
    conn.execute(
        "INSERT INTO records (collection, id, position, body) VALUES (?1, 'bad', 99, '{not json');",
        [COLLECTION],
    )
    .unwrap();

    let listed: Vec<Note> = store.list(COLLECTION).unwrap();
    assert!(listed.is_empty(), "parse failure must fail soft, not raise");

    // The degraded read drops the corrupt row; intact records come back
    // on the next read.
    let recovered: Vec<Note> = store.list(COLLECTION).unwrap();
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].id, "n-1");
}

#[test]
fn corrupt_row_does_not_mask_later_writes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    conn.execute(
        "INSERT INTO records (collection, id, position, body) VALUES (?1, 'zzz-corrupt', 0, 'garbage');",
        [COLLECTION],
    )
    .unwrap();
    store.put(COLLECTION, &note("n-1", "written after corruption")).unwrap();

    // Seeding under ids unrelated to the corrupt row must still leave
    // the collection readable.
    assert!(store
        .seed_if_empty(COLLECTION, &[note("s-1", "starter")])
        .unwrap());

    let ids: Vec<String> = store
        .list::<Note>(COLLECTION)
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert!(ids.contains(&"n-1".to_string()));
    assert!(ids.contains(&"s-1".to_string()));
}

#[test]
fn caller_can_reseed_after_a_parse_failure() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    conn.execute(
        "INSERT INTO records (collection, id, position, body) VALUES (?1, 's-1', 0, 'garbage');",
        [COLLECTION],
    )
    .unwrap();

    // The collection lists empty, so seeding runs and upserts over the
    // broken row.
    assert!(store
        .seed_if_empty(COLLECTION, &[note("s-1", "repaired")])
        .unwrap());
    let listed: Vec<Note> = store.list(COLLECTION).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "repaired");
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteRecordStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_records_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 3;").unwrap();

    assert!(matches!(
        SqliteRecordStore::try_new(&conn),
        Err(StoreError::MissingRequiredTable("records"))
    ));
}
