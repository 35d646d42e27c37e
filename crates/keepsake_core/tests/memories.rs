use chrono::NaiveDate;
use keepsake_core::db::open_db_in_memory;
use keepsake_core::{
    starter_memories, FixedClock, MemoryKind, MemoryService, SqliteMemoryStore, StoreError,
    UploadError, MAX_MEMORY_PAYLOAD_BYTES,
};
use std::fs;
use std::path::PathBuf;

fn clock_on(y: i32, m: u32, d: u32) -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap(),
    )
}

#[test]
fn first_load_seeds_the_starter_set_once() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoryStore::try_new(&conn).unwrap();
    let service = MemoryService::new(&store);

    let seeded = service.load_or_seed().unwrap();
    assert_eq!(seeded.len(), starter_memories().len());
    assert_eq!(seeded[0].id, "starter-call");

    service.delete("starter-call").unwrap();
    // A later load must not re-seed over user edits.
    let after_delete = service.load_or_seed().unwrap();
    assert_eq!(after_delete.len(), starter_memories().len() - 1);
}

#[test]
fn caption_edits_keep_position_and_payload_semantics() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoryStore::try_new(&conn).unwrap();
    let service = MemoryService::new(&store);

    let mut memories = service.load_or_seed().unwrap();
    memories[1].caption = "Golden hour".to_string();
    service.save(&memories[1]).unwrap();

    let reloaded = service.list().unwrap();
    assert_eq!(reloaded[1].id, memories[1].id);
    assert_eq!(reloaded[1].caption, "Golden hour");
    // Seeded entries are remote urls with no stored bytes.
    assert!(service.payload(&reloaded[1].id).unwrap().is_none());
}

#[test]
fn uploads_convert_per_file_and_store_payloads() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoryStore::try_new(&conn).unwrap();
    let service = MemoryService::new(&store);
    let clock = clock_on(2025, 5, 20);

    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("beach.JPG");
    let clip = dir.path().join("laugh.mp4");
    fs::write(&photo, b"jpeg bytes").unwrap();
    fs::write(&clip, b"mp4 bytes").unwrap();

    let report = service.upload_files(&clock, vec![photo, clip]);
    assert_eq!(report.saved.len(), 2);
    assert!(report.failed.is_empty());

    let image = &report.saved[0];
    assert_eq!(image.kind, MemoryKind::Image);
    assert_eq!(image.date, "2025-05-20");
    assert_eq!(image.caption, "New Memory");
    assert_eq!(image.url, format!("blob:{}", image.id));
    assert_eq!(
        service.payload(&image.id).unwrap().as_deref(),
        Some(b"jpeg bytes".as_slice())
    );

    assert_eq!(report.saved[1].kind, MemoryKind::Video);
}

#[test]
fn one_unreadable_file_does_not_sink_the_batch() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoryStore::try_new(&conn).unwrap();
    let service = MemoryService::new(&store);
    let clock = clock_on(2025, 5, 20);

    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("ok.png");
    fs::write(&good, b"png bytes").unwrap();
    let missing = PathBuf::from(dir.path().join("gone.png"));

    let report = service.upload_files(&clock, vec![missing.clone(), good]);
    assert_eq!(report.saved.len(), 1);
    assert_eq!(report.failed.len(), 1);
    match &report.failed[0] {
        UploadError::Read { path, .. } => assert_eq!(path, &missing),
        other => panic!("expected read failure, got {other}"),
    }

    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn oversized_payloads_are_rejected_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoryStore::try_new(&conn).unwrap();
    let service = MemoryService::new(&store);
    let clock = clock_on(2025, 5, 20);

    let dir = tempfile::tempdir().unwrap();
    let huge = dir.path().join("huge.mov");
    fs::write(&huge, vec![0u8; MAX_MEMORY_PAYLOAD_BYTES + 1]).unwrap();

    let report = service.upload_files(&clock, vec![huge]);
    assert!(report.saved.is_empty());
    match &report.failed[0] {
        UploadError::Store { source, .. } => {
            assert!(matches!(source, StoreError::PayloadTooLarge { .. }));
        }
        other => panic!("expected store failure, got {other}"),
    }
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn corrupt_metadata_row_is_dropped_on_read() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoryStore::try_new(&conn).unwrap();
    let service = MemoryService::new(&store);

    let keeper = starter_memories().remove(0);
    service.save(&keeper).unwrap();
    conn.execute(
        "INSERT INTO media_blobs (id, position, body) VALUES ('bad', 99, 'garbage');",
        [],
    )
    .unwrap();

    assert!(service.list().unwrap().is_empty());

    let recovered = service.list().unwrap();
    assert_eq!(recovered.len(), 1);
    assert_eq!(recovered[0].id, keeper.id);
}

#[test]
fn delete_removes_metadata_and_payload() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteMemoryStore::try_new(&conn).unwrap();
    let service = MemoryService::new(&store);
    let clock = clock_on(2025, 6, 1);

    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("gone-soon.jpg");
    fs::write(&photo, b"bytes").unwrap();

    let report = service.upload_files(&clock, vec![photo]);
    let id = report.saved[0].id.clone();

    service.delete(&id).unwrap();
    assert!(service.list().unwrap().is_empty());
    assert!(service.payload(&id).unwrap().is_none());
}
