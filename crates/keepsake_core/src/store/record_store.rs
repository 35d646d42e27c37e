//! SQLite implementation of the record-store contract.
//!
//! # Responsibility
//! - Persist JSON record bodies in the `records` table.
//! - Hold the settings sub-store consumed by the effective clock.
//!
//! # Invariants
//! - `position` is assigned once at insert and survives replacement.
//! - Read paths never raise on malformed bodies; the read degrades to an
//!   empty collection, the corrupt rows are deleted and the incident is
//!   logged, so later writes and reseeds become visible again.

use crate::clock::{OverrideSource, DEBUG_DATE_KEY};
use crate::db::migrations::latest_version;
use crate::model::Record;
use crate::store::{RecordStore, StoreError, StoreResult};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Record store backed by an already-migrated SQLite connection.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Wraps a connection after verifying it was opened through
    /// [`crate::db::open_db`] (migrations applied, tables present).
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        for table in ["records", "settings"] {
            if !table_exists(conn, table)? {
                return Err(StoreError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }

    /// Stores or replaces the debug date override.
    pub fn set_debug_override(&self, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![DEBUG_DATE_KEY, value],
        )?;
        Ok(())
    }

    /// Removes the debug date override; no-op when absent.
    pub fn clear_debug_override(&self) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?1;", [DEBUG_DATE_KEY])?;
        Ok(())
    }
}

impl OverrideSource for SqliteRecordStore<'_> {
    fn debug_override(&self) -> Option<String> {
        let result = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1;",
                [DEBUG_DATE_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional();
        match result {
            Ok(value) => value,
            Err(err) => {
                // Clock callers cannot fail; a broken settings read just
                // means no override is active.
                warn!("event=override_read_failed module=store status=fallback error={err}");
                None
            }
        }
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn list<T>(&self, collection: &str) -> StoreResult<Vec<T>>
    where
        T: Record + DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut corrupt_ids: Vec<String> = Vec::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT id, body FROM records
                 WHERE collection = ?1
                 ORDER BY position ASC, id ASC;",
            )?;
            let mut rows = stmt.query([collection])?;

            while let Some(row) = rows.next()? {
                let id: String = row.get("id")?;
                let body: String = row.get("body")?;
                match serde_json::from_str::<T>(&body) {
                    Ok(item) => items.push(item),
                    Err(err) => {
                        warn!(
                            "event=record_parse_failed module=store status=degraded collection={collection} id={id} error={err}"
                        );
                        corrupt_ids.push(id);
                    }
                }
            }
        }

        if corrupt_ids.is_empty() {
            return Ok(items);
        }

        // Deleting the corrupt rows lets the collection converge: later
        // puts and reseeds are visible on the next read.
        for id in &corrupt_ids {
            self.conn.execute(
                "DELETE FROM records WHERE collection = ?1 AND id = ?2;",
                params![collection, id],
            )?;
        }
        Ok(Vec::new())
    }

    fn put<T>(&self, collection: &str, item: &T) -> StoreResult<()>
    where
        T: Record + Serialize,
    {
        let body = serde_json::to_string(item).map_err(StoreError::Serialize)?;
        self.conn.execute(
            "INSERT INTO records (collection, id, position, body)
             VALUES (
                ?1,
                ?2,
                COALESCE((SELECT MAX(position) + 1 FROM records WHERE collection = ?1), 0),
                ?3
             )
             ON CONFLICT(collection, id) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![collection, item.record_id(), body],
        )?;
        Ok(())
    }

    fn remove(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2;",
            params![collection, id],
        )?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
