//! Sealed-letters use-case service.
//!
//! # Responsibility
//! - Compose and list letters in the `future_letters` collection.
//! - Gate letter content behind the unlock date.
//!
//! # Invariants
//! - `to` is derived as the author's partner; callers never choose it.
//! - Content is readable only when `today >= unlock_date` (unlock day
//!   inclusive, date-only comparison).
//! - A letter with an unparseable unlock date stays sealed.

use crate::clock::Clock;
use crate::model::letter::FutureLetter;
use crate::model::new_record_id;
use crate::model::partner::Partner;
use crate::store::{RecordStore, StoreError, StoreResult};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const LETTERS_COLLECTION: &str = "future_letters";

/// Service error for letter use-cases.
#[derive(Debug)]
pub enum LetterServiceError {
    /// Title, content or unlock date is missing/blank.
    IncompleteLetter,
    /// Unlock date input is not a `YYYY-MM-DD` calendar date.
    InvalidUnlockDate(String),
    /// Read attempt before the unlock date.
    StillSealed { unlock_date: String },
    Store(StoreError),
}

impl Display for LetterServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompleteLetter => {
                write!(f, "a letter needs a title, content and an unlock date")
            }
            Self::InvalidUnlockDate(value) => {
                write!(f, "invalid unlock date `{value}`; expected YYYY-MM-DD")
            }
            Self::StillSealed { unlock_date } => {
                write!(f, "letter is sealed until {unlock_date}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LetterServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for LetterServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Letter compose/list/read over any record-store implementation.
pub struct LetterService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> LetterService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Composes and stores a sealed letter addressed to the author's
    /// partner. Letters are never updated or deleted afterwards.
    pub fn compose<C: Clock>(
        &self,
        clock: &C,
        from: Partner,
        title: &str,
        content: &str,
        unlock_date: &str,
    ) -> Result<FutureLetter, LetterServiceError> {
        let title = title.trim();
        let content = content.trim();
        let unlock_date = unlock_date.trim();
        if title.is_empty() || content.is_empty() || unlock_date.is_empty() {
            return Err(LetterServiceError::IncompleteLetter);
        }
        if NaiveDate::parse_from_str(unlock_date, "%Y-%m-%d").is_err() {
            return Err(LetterServiceError::InvalidUnlockDate(
                unlock_date.to_string(),
            ));
        }

        let letter = FutureLetter {
            id: new_record_id(),
            from,
            to: from.partner(),
            title: title.to_string(),
            content: content.to_string(),
            unlock_date: unlock_date.to_string(),
            created_at: clock.today().format("%Y-%m-%d").to_string(),
        };
        self.store.put(LETTERS_COLLECTION, &letter)?;
        info!(
            "event=letter_composed module=letters status=ok from={} unlock_date={}",
            letter.from, letter.unlock_date
        );
        Ok(letter)
    }

    /// All letters in composition order.
    pub fn list_letters(&self) -> StoreResult<Vec<FutureLetter>> {
        self.store.list(LETTERS_COLLECTION)
    }

    /// Whether the letter may be opened today.
    pub fn is_unlocked<C: Clock>(&self, letter: &FutureLetter, clock: &C) -> bool {
        match NaiveDate::parse_from_str(&letter.unlock_date, "%Y-%m-%d") {
            Ok(unlock) => clock.today() >= unlock,
            Err(err) => {
                warn!(
                    "event=unlock_date_parse_failed module=letters status=sealed id={} error={err}",
                    letter.id
                );
                false
            }
        }
    }

    /// Returns the content when unlocked, or the seal error otherwise.
    pub fn read_letter<'l, C: Clock>(
        &self,
        letter: &'l FutureLetter,
        clock: &C,
    ) -> Result<&'l str, LetterServiceError> {
        if self.is_unlocked(letter, clock) {
            Ok(&letter.content)
        } else {
            Err(LetterServiceError::StillSealed {
                unlock_date: letter.unlock_date.clone(),
            })
        }
    }

    /// First-run sample letter; a no-op on every later start.
    pub fn seed_starter_letter(&self) -> StoreResult<bool> {
        let starter = FutureLetter {
            id: "starter-letter".to_string(),
            from: Partner::Aldo,
            to: Partner::Fiona,
            title: "A message for our 5th anniversary".to_string(),
            content: "I hope we are sitting on a porch somewhere...".to_string(),
            unlock_date: "2029-02-25".to_string(),
            created_at: "2024-02-25".to_string(),
        };
        self.store.seed_if_empty(LETTERS_COLLECTION, &[starter])
    }
}
