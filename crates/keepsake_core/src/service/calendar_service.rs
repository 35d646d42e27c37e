//! Shared-calendar use-case service.
//!
//! # Responsibility
//! - Maintain per-day availability answers in the `couple_calendar`
//!   collection.
//!
//! # Invariants
//! - Day records are created lazily on the first write for that date.
//! - Each partner's slot is merge-updated independently; writing one
//!   never touches the other.

use crate::model::calendar::{Availability, CalendarDay};
use crate::model::partner::Partner;
use crate::store::{RecordStore, StoreError, StoreResult};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const CALENDAR_COLLECTION: &str = "couple_calendar";

/// Service error for calendar use-cases.
#[derive(Debug)]
pub enum CalendarServiceError {
    /// Date key is not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    Store(StoreError),
}

impl Display for CalendarServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid calendar date `{value}`; expected YYYY-MM-DD")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CalendarServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidDate(_) => None,
        }
    }
}

impl From<StoreError> for CalendarServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Calendar day reads/writes over any record-store implementation.
pub struct CalendarService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> CalendarService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Sets one partner's availability for a day, creating the day
    /// record on first touch.
    pub fn set_availability(
        &self,
        date: &str,
        partner: Partner,
        status: Availability,
    ) -> Result<CalendarDay, CalendarServiceError> {
        let date = validated_date(date)?;
        let mut day = self
            .day(date)?
            .unwrap_or_else(|| CalendarDay::empty(date));
        match partner {
            Partner::Aldo => day.aldo_status = status,
            Partner::Fiona => day.fiona_status = status,
        }
        self.store.put(CALENDAR_COLLECTION, &day)?;
        Ok(day)
    }

    /// Attaches or clears the shared note for a day.
    pub fn set_note(
        &self,
        date: &str,
        note: Option<String>,
    ) -> Result<CalendarDay, CalendarServiceError> {
        let date = validated_date(date)?;
        let mut day = self
            .day(date)?
            .unwrap_or_else(|| CalendarDay::empty(date));
        day.note = note.filter(|text| !text.trim().is_empty());
        self.store.put(CALENDAR_COLLECTION, &day)?;
        Ok(day)
    }

    /// The stored record for a date, if any partner has answered.
    pub fn day(&self, date: &str) -> StoreResult<Option<CalendarDay>> {
        let days: Vec<CalendarDay> = self.store.list(CALENDAR_COLLECTION)?;
        Ok(days.into_iter().find(|day| day.date == date))
    }

    /// Every answered day, in first-touch order.
    pub fn days(&self) -> StoreResult<Vec<CalendarDay>> {
        self.store.list(CALENDAR_COLLECTION)
    }
}

fn validated_date(date: &str) -> Result<&str, CalendarServiceError> {
    let date = date.trim();
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(CalendarServiceError::InvalidDate(date.to_string()));
    }
    Ok(date)
}
