//! Blob-capable store for photo/video memories.
//!
//! # Responsibility
//! - Persist memory metadata plus an optional large binary payload.
//! - Honor the same list/put/remove/seed semantics as the record store.
//!
//! # Invariants
//! - Payloads above [`MAX_MEMORY_PAYLOAD_BYTES`] are rejected before any
//!   write happens.
//! - Metadata updates without a payload keep the stored bytes.
//! - Listing never pages payloads in; bytes are fetched per id.

use crate::db::migrations::latest_version;
use crate::model::memory::Memory;
use crate::store::{StoreError, StoreResult};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};

/// Per-item payload cap. Memories are phone photos and short clips, so a
/// row approaching this size indicates a runaway upload, not real use.
pub const MAX_MEMORY_PAYLOAD_BYTES: usize = 24 * 1024 * 1024;

/// Storage contract for the memory collection.
///
/// Split from [`crate::store::RecordStore`] because items carry an
/// out-of-band binary payload, but the list/put/remove/seed semantics
/// are deliberately identical.
pub trait MemoryStore {
    fn list(&self) -> StoreResult<Vec<Memory>>;
    fn put(&self, memory: &Memory, payload: Option<&[u8]>) -> StoreResult<()>;
    fn remove(&self, id: &str) -> StoreResult<()>;
    fn payload(&self, id: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Seeds starter memories only when the collection lists empty.
    fn seed_if_empty(&self, defaults: &[Memory]) -> StoreResult<bool> {
        if !self.list()?.is_empty() {
            return Ok(false);
        }
        for memory in defaults {
            self.put(memory, None)?;
        }
        Ok(true)
    }
}

impl<S: MemoryStore + ?Sized> MemoryStore for &S {
    fn list(&self) -> StoreResult<Vec<Memory>> {
        (**self).list()
    }

    fn put(&self, memory: &Memory, payload: Option<&[u8]>) -> StoreResult<()> {
        (**self).put(memory, payload)
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        (**self).remove(id)
    }

    fn payload(&self, id: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).payload(id)
    }
}

/// SQLite-backed memory store over the `media_blobs` table.
pub struct SqliteMemoryStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoryStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(StoreError::UninitializedConnection {
                expected_version: latest_version(),
                actual_version,
            });
        }
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'media_blobs';",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(StoreError::MissingRequiredTable("media_blobs"));
        }
        Ok(Self { conn })
    }
}

impl MemoryStore for SqliteMemoryStore<'_> {
    fn list(&self) -> StoreResult<Vec<Memory>> {
        let mut memories = Vec::new();
        let mut corrupt_ids: Vec<String> = Vec::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT id, body FROM media_blobs ORDER BY position ASC, id ASC;",
            )?;
            let mut rows = stmt.query([])?;

            while let Some(row) = rows.next()? {
                let id: String = row.get("id")?;
                let body: String = row.get("body")?;
                match serde_json::from_str::<Memory>(&body) {
                    Ok(memory) => memories.push(memory),
                    Err(err) => {
                        warn!(
                            "event=memory_parse_failed module=store status=degraded id={id} error={err}"
                        );
                        corrupt_ids.push(id);
                    }
                }
            }
        }

        if corrupt_ids.is_empty() {
            return Ok(memories);
        }

        // Deleting the corrupt rows lets the collection converge: later
        // puts and reseeds are visible on the next read.
        for id in &corrupt_ids {
            self.conn
                .execute("DELETE FROM media_blobs WHERE id = ?1;", [id])?;
        }
        Ok(Vec::new())
    }

    fn put(&self, memory: &Memory, payload: Option<&[u8]>) -> StoreResult<()> {
        if let Some(bytes) = payload {
            if bytes.len() > MAX_MEMORY_PAYLOAD_BYTES {
                return Err(StoreError::PayloadTooLarge {
                    id: memory.id.clone(),
                    size_bytes: bytes.len(),
                    max_bytes: MAX_MEMORY_PAYLOAD_BYTES,
                });
            }
        }

        let body = serde_json::to_string(memory).map_err(StoreError::Serialize)?;
        // COALESCE keeps stored bytes on metadata-only updates.
        self.conn.execute(
            "INSERT INTO media_blobs (id, position, body, payload)
             VALUES (
                ?1,
                COALESCE((SELECT MAX(position) + 1 FROM media_blobs), 0),
                ?2,
                ?3
             )
             ON CONFLICT(id) DO UPDATE SET
                body = excluded.body,
                payload = COALESCE(excluded.payload, media_blobs.payload),
                updated_at = (strftime('%s', 'now') * 1000);",
            params![memory.id, body, payload],
        )?;
        Ok(())
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM media_blobs WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn payload(&self, id: &str) -> StoreResult<Option<Vec<u8>>> {
        let bytes: Option<Option<Vec<u8>>> = self
            .conn
            .query_row("SELECT payload FROM media_blobs WHERE id = ?1;", [id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(bytes.flatten())
    }
}
