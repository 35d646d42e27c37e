//! Sealed future-letter record.

use crate::model::partner::Partner;
use crate::model::Record;
use serde::{Deserialize, Serialize};

/// A letter written now and sealed until `unlock_date`.
///
/// # Invariants
/// - `to` is always `from.partner()`; the compose path derives it and
///   nothing ever updates a letter after creation.
/// - Content must not be shown while `today < unlock_date` (date-only
///   comparison, unlock day inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureLetter {
    pub id: String,
    pub from: Partner,
    pub to: Partner,
    pub title: String,
    pub content: String,
    /// `YYYY-MM-DD`; the first day the letter is readable.
    pub unlock_date: String,
    /// `YYYY-MM-DD` creation stamp.
    pub created_at: String,
}

impl Record for FutureLetter {
    fn record_id(&self) -> &str {
        &self.id
    }
}
