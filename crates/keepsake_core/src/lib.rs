//! Core domain logic for Keepsake, a private two-person memory app.
//! This crate is the single source of truth for date resolution, the
//! recurring-event catalog and collection persistence.

pub mod clock;
pub mod countdown;
pub mod db;
pub mod events;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use clock::{
    is_anniversary, is_date_match, is_splash_day, is_valentines, Clock, EffectiveClock,
    FixedClock, OverrideSource, DEBUG_DATE_KEY,
};
pub use countdown::CountdownTicker;
pub use events::{
    elapsed_since, event_on, ordinal_suffix, time_together, upcoming_events, Elapsed,
    EventDefinition, EventKind, EventOccurrence, EVENTS, START_DATE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::calendar::{Availability, CalendarDay};
pub use model::letter::FutureLetter;
pub use model::media::{MediaItem, MediaKind, WatchStatus};
pub use model::memory::{Memory, MemoryKind};
pub use model::note::Note;
pub use model::partner::Partner;
pub use model::{new_record_id, Record};
pub use service::calendar_service::{CalendarService, CalendarServiceError, CALENDAR_COLLECTION};
pub use service::letter_service::{LetterService, LetterServiceError, LETTERS_COLLECTION};
pub use service::memory_service::{
    starter_memories, MemoryService, UploadError, UploadReport,
};
pub use service::note_service::{NoteService, NoteServiceError, NOTES_COLLECTION};
pub use service::session::SessionState;
pub use service::watchlist_service::{
    SuggestionPick, WatchlistService, WatchlistServiceError, PLACEHOLDER_POSTER_URL,
    WATCHLIST_COLLECTION,
};
pub use store::{
    MemoryStore, RecordStore, SqliteMemoryStore, SqliteRecordStore, StoreError, StoreResult,
    MAX_MEMORY_PAYLOAD_BYTES,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
