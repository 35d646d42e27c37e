//! Persistence contract for the keepsake collections.
//!
//! # Responsibility
//! - Define the store-agnostic list/put/remove/seed contract all feature
//!   services use.
//! - Isolate SQLite and JSON details from service orchestration.
//!
//! # Invariants
//! - `put` replaces an existing id in place, preserving list position.
//! - Malformed persisted bodies degrade to an empty collection instead
//!   of surfacing errors (fail-soft policy); corrupt entries are dropped
//!   during that read so the collection recovers on the next write.

use crate::db::DbError;
use crate::model::Record;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod media_store;
pub mod record_store;

pub use media_store::{MemoryStore, SqliteMemoryStore, MAX_MEMORY_PAYLOAD_BYTES};
pub use record_store::SqliteRecordStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for persistence and schema problems.
///
/// Body parse failures are intentionally absent: they are handled inside
/// `list` by the fail-soft policy and never reach callers.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Bounded-growth guard on the blob store.
    PayloadTooLarge {
        id: String,
        size_bytes: usize,
        max_bytes: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "record serialization failed: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::PayloadTooLarge {
                id,
                size_bytes,
                max_bytes,
            } => write!(
                f,
                "media payload for `{id}` is {size_bytes} bytes, above the {max_bytes} byte cap"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Generic persistence contract over named collections of JSON records.
pub trait RecordStore {
    /// All items in stored (insertion) order; `[]` for never-written or
    /// unparseable collections. A read that hits corrupt entries drops
    /// them, so the collection converges after a rewrite or reseed.
    fn list<T>(&self, collection: &str) -> StoreResult<Vec<T>>
    where
        T: Record + DeserializeOwned;

    /// Inserts a new id at the tail or replaces the existing id in
    /// place. Idempotent.
    fn put<T>(&self, collection: &str, item: &T) -> StoreResult<()>
    where
        T: Record + Serialize;

    /// Deletes by id; silently does nothing when absent.
    fn remove(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Writes `defaults` via `put`, in order, only when the collection
    /// lists empty. Returns whether seeding happened.
    fn seed_if_empty<T>(&self, collection: &str, defaults: &[T]) -> StoreResult<bool>
    where
        T: Record + Serialize + DeserializeOwned,
    {
        if !self.list::<T>(collection)?.is_empty() {
            return Ok(false);
        }
        for item in defaults {
            self.put(collection, item)?;
        }
        Ok(true)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn list<T>(&self, collection: &str) -> StoreResult<Vec<T>>
    where
        T: Record + DeserializeOwned,
    {
        (**self).list(collection)
    }

    fn put<T>(&self, collection: &str, item: &T) -> StoreResult<()>
    where
        T: Record + Serialize,
    {
        (**self).put(collection, item)
    }

    fn remove(&self, collection: &str, id: &str) -> StoreResult<()> {
        (**self).remove(collection, id)
    }
}
