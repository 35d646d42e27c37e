//! Domain model for the shared keepsake collections.
//!
//! # Responsibility
//! - Define the record shapes persisted by the record store.
//! - Keep the two-party ownership rules (`Partner`) compiler-checked.
//!
//! # Invariants
//! - Every record carries a stable string id (time-ordered UUIDv7 unless
//!   the collection is naturally keyed, like calendar days).
//! - A `FutureLetter` is always addressed to the author's partner.

pub mod calendar;
pub mod letter;
pub mod media;
pub mod memory;
pub mod note;
pub mod partner;

/// Minimal identity contract every stored record satisfies.
///
/// The record store keys items by this id within a named collection.
pub trait Record {
    fn record_id(&self) -> &str;
}

/// Generates a fresh time-ordered record id.
///
/// UUIDv7 embeds a millisecond timestamp, so lexicographic id order is
/// creation order for ids minted by the same process.
pub fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
