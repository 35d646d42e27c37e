//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Sealed letter content never crosses the boundary before its
//!   unlock date.

use keepsake_core::db::open_db;
use keepsake_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, is_anniversary,
    is_splash_day, is_valentines, ping as ping_inner, time_together as time_together_inner,
    upcoming_events as upcoming_events_inner, Availability, CalendarService, Clock,
    EffectiveClock, FutureLetter, LetterService, MediaKind, MemoryService, Note, NoteService,
    Partner, SqliteMemoryStore, SqliteRecordStore, SuggestionPick, WatchlistService,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "keepsake.sqlite3";
const UPCOMING_WINDOW_DAYS: u32 = 45;
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for command-style calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Optional id of the record the operation touched or created.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: Some(id.into()),
            message: message.into(),
        }
    }

    fn done(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Elapsed relationship time for the home-screen counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeTogetherView {
    pub years: i32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// One upcoming catalog event resolved against the effective date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEventView {
    pub title: String,
    /// `anniversary|holiday|birthday`.
    pub kind: String,
    /// `YYYY-MM-DD` of the next occurrence.
    pub date: String,
    pub days_until: u32,
}

/// Special-day flags driving the celebratory splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashView {
    pub show: bool,
    pub is_valentines: bool,
    pub is_anniversary: bool,
}

/// Home-screen counter snapshot per the effective clock.
///
/// # FFI contract
/// - Sync call, DB-backed (reads the debug override).
/// - Never panics; returns a zeroed view on DB failure.
#[flutter_rust_bridge::frb(sync)]
pub fn home_time_together() -> TimeTogetherView {
    with_record_store(|store| {
        let clock = EffectiveClock::new(store);
        let elapsed = time_together_inner(&clock);
        Ok(TimeTogetherView {
            years: elapsed.years,
            days: elapsed.days,
            hours: elapsed.hours,
            minutes: elapsed.minutes,
            seconds: elapsed.seconds,
        })
    })
    .unwrap_or_default()
}

/// Events within the home-screen window, soonest first.
///
/// # FFI contract
/// - Sync call, DB-backed (reads the debug override).
/// - Never panics; returns an empty list on DB failure.
#[flutter_rust_bridge::frb(sync)]
pub fn home_upcoming_events() -> Vec<UpcomingEventView> {
    with_record_store(|store| {
        let clock = EffectiveClock::new(store);
        Ok(upcoming_events_inner(&clock, UPCOMING_WINDOW_DAYS)
            .into_iter()
            .map(|occurrence| UpcomingEventView {
                title: occurrence.title,
                kind: occurrence.definition.kind.label().to_string(),
                date: occurrence.next_date.format("%Y-%m-%d").to_string(),
                days_until: occurrence.days_until,
            })
            .collect())
    })
    .unwrap_or_default()
}

/// Splash flags for today per the effective clock.
///
/// # FFI contract
/// - Sync call, DB-backed (reads the debug override).
/// - Never panics; all flags false on DB failure.
#[flutter_rust_bridge::frb(sync)]
pub fn home_splash() -> SplashView {
    with_record_store(|store| {
        let clock = EffectiveClock::new(store);
        Ok(SplashView {
            show: is_splash_day(&clock),
            is_valentines: is_valentines(&clock),
            is_anniversary: is_anniversary(&clock),
        })
    })
    .unwrap_or(SplashView {
        show: false,
        is_valentines: false,
        is_anniversary: false,
    })
}

/// One love note for list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub id: String,
    pub author: String,
    pub content: String,
    pub voice_clip: Option<String>,
    /// `YYYY-MM-DD` effective date at creation.
    pub date: String,
    pub is_pinned: bool,
}

/// Creates a love note stamped with the effective date.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; rejects unknown authors and empty submissions.
#[flutter_rust_bridge::frb(sync)]
pub fn note_add(author: String, content: String, voice_clip: Option<String>) -> ActionResponse {
    let author = match Partner::parse(&author) {
        Some(partner) => partner,
        None => return ActionResponse::failure(format!("unknown partner `{author}`")),
    };
    let result = with_record_store(|store| {
        let clock = EffectiveClock::new(store);
        let service = NoteService::new(store);
        service
            .add_note(&clock, author, &content, voice_clip.clone())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(note) => ActionResponse::success("Note created.", note.id),
        Err(err) => ActionResponse::failure(format!("note_add failed: {err}")),
    }
}

/// All love notes, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list on DB failure.
#[flutter_rust_bridge::frb(sync)]
pub fn note_list() -> Vec<NoteView> {
    with_record_store(|store| {
        let service = NoteService::new(store);
        Ok(service
            .list_notes()
            .map_err(|err| err.to_string())?
            .into_iter()
            .map(to_note_view)
            .collect())
    })
    .unwrap_or_default()
}

/// Deletes a note by id; missing ids succeed silently.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: String) -> ActionResponse {
    let result = with_record_store(|store| {
        NoteService::new(store)
            .delete_note(&id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ActionResponse::done("Note deleted."),
        Err(err) => ActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

/// One sealed letter for list display.
///
/// `content` is populated only when the letter is unlocked per the
/// effective clock; sealed letters carry `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterView {
    pub id: String,
    pub from: String,
    pub to: String,
    pub title: String,
    pub unlock_date: String,
    pub created_at: String,
    pub is_unlocked: bool,
    pub content: Option<String>,
}

/// Composes a sealed letter to the author's partner.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; rejects unknown authors, blank fields and bad dates.
#[flutter_rust_bridge::frb(sync)]
pub fn letter_compose(
    from: String,
    title: String,
    content: String,
    unlock_date: String,
) -> ActionResponse {
    let from = match Partner::parse(&from) {
        Some(partner) => partner,
        None => return ActionResponse::failure(format!("unknown partner `{from}`")),
    };
    let result = with_record_store(|store| {
        let clock = EffectiveClock::new(store);
        LetterService::new(store)
            .compose(&clock, from, &title, &content, &unlock_date)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(letter) => ActionResponse::success("Letter sealed.", letter.id),
        Err(err) => ActionResponse::failure(format!("letter_compose failed: {err}")),
    }
}

/// All letters in composition order, seeding the starter letter first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; sealed content stays on the Rust side.
#[flutter_rust_bridge::frb(sync)]
pub fn letter_list() -> Vec<LetterView> {
    with_record_store(|store| {
        let clock = EffectiveClock::new(store);
        let service = LetterService::new(store);
        service
            .seed_starter_letter()
            .map_err(|err| err.to_string())?;
        Ok(service
            .list_letters()
            .map_err(|err| err.to_string())?
            .into_iter()
            .map(|letter| to_letter_view(&service, &clock, letter))
            .collect())
    })
    .unwrap_or_default()
}

/// Debug date override: pins the effective date to `YYYY-MM-DD`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; the raw value is stored as-is and validated on read.
#[flutter_rust_bridge::frb(sync)]
pub fn debug_set_date(date: String) -> ActionResponse {
    let result = with_record_store(|store| {
        store
            .set_debug_override(date.trim())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => {
            log::info!("event=debug_date_set module=ffi status=ok value={date}");
            ActionResponse::done("Debug date set.")
        }
        Err(err) => ActionResponse::failure(format!("debug_set_date failed: {err}")),
    }
}

/// Clears the debug date override, restoring real time.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; clearing an absent override succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn debug_clear_date() -> ActionResponse {
    let result =
        with_record_store(|store| store.clear_debug_override().map_err(|err| err.to_string()));
    match result {
        Ok(()) => ActionResponse::done("Debug date cleared."),
        Err(err) => ActionResponse::failure(format!("debug_clear_date failed: {err}")),
    }
}

/// One calendar day for grid display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDayView {
    pub date: String,
    /// `free|busy|maybe|none`.
    pub aldo_status: String,
    pub fiona_status: String,
    pub note: Option<String>,
    /// Both partners marked the day free.
    pub is_match: bool,
}

/// Sets one partner's availability for a day.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; rejects unknown partners, statuses and dates.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_set_availability(date: String, partner: String, status: String) -> ActionResponse {
    let partner = match Partner::parse(&partner) {
        Some(value) => value,
        None => return ActionResponse::failure(format!("unknown partner `{partner}`")),
    };
    let status = match Availability::parse(&status) {
        Some(value) => value,
        None => return ActionResponse::failure(format!("unknown availability `{status}`")),
    };
    let result = with_record_store(|store| {
        CalendarService::new(store)
            .set_availability(&date, partner, status)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(day) => ActionResponse::success("Availability saved.", day.date),
        Err(err) => ActionResponse::failure(format!("calendar_set_availability failed: {err}")),
    }
}

/// Attaches or clears the shared note for a day.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; blank notes clear the field.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_set_note(date: String, note: Option<String>) -> ActionResponse {
    let result = with_record_store(|store| {
        CalendarService::new(store)
            .set_note(&date, note.clone())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(day) => ActionResponse::success("Note saved.", day.date),
        Err(err) => ActionResponse::failure(format!("calendar_set_note failed: {err}")),
    }
}

/// Every answered day, in first-touch order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list on DB failure.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_days() -> Vec<CalendarDayView> {
    with_record_store(|store| {
        Ok(CalendarService::new(store)
            .days()
            .map_err(|err| err.to_string())?
            .into_iter()
            .map(|day| CalendarDayView {
                is_match: day.is_match(),
                date: day.date,
                aldo_status: day.aldo_status.label().to_string(),
                fiona_status: day.fiona_status.label().to_string(),
                note: day.note,
            })
            .collect())
    })
    .unwrap_or_default()
}

/// One watchlist item for list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItemView {
    pub id: String,
    pub title: String,
    /// `show|movie`.
    pub kind: String,
    pub poster_url: String,
    /// `watching|watched`.
    pub status: String,
    pub progress: String,
    pub year: String,
}

/// Adds a picked title with tracker defaults.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; rejects unknown kinds.
#[flutter_rust_bridge::frb(sync)]
pub fn watch_add(title: String, kind: String, year: String) -> ActionResponse {
    let kind = match MediaKind::parse(&kind) {
        Some(value) => value,
        None => return ActionResponse::failure(format!("unknown media kind `{kind}`")),
    };
    let result = with_record_store(|store| {
        WatchlistService::new(store)
            .add(SuggestionPick { title, kind, year })
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(item) => ActionResponse::success("Added to watchlist.", item.id),
        Err(err) => ActionResponse::failure(format!("watch_add failed: {err}")),
    }
}

/// All watchlist items, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list on DB failure.
#[flutter_rust_bridge::frb(sync)]
pub fn watch_list() -> Vec<MediaItemView> {
    with_record_store(|store| {
        Ok(WatchlistService::new(store)
            .list_items()
            .map_err(|err| err.to_string())?
            .into_iter()
            .map(|item| MediaItemView {
                id: item.id,
                title: item.title,
                kind: item.kind.label().to_string(),
                poster_url: item.poster_url,
                status: item.status.label().to_string(),
                progress: item.progress,
                year: item.year,
            })
            .collect())
    })
    .unwrap_or_default()
}

/// Flips watching/watched for an item.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown ids fail with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn watch_toggle(id: String) -> ActionResponse {
    let result = with_record_store(|store| {
        WatchlistService::new(store)
            .toggle_status(&id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(item) => ActionResponse::success(
            format!("Now {}.", item.status.label()),
            item.id,
        ),
        Err(err) => ActionResponse::failure(format!("watch_toggle failed: {err}")),
    }
}

/// Replaces the free-text progress marker.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown ids fail with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn watch_set_progress(id: String, progress: String) -> ActionResponse {
    let result = with_record_store(|store| {
        WatchlistService::new(store)
            .set_progress(&id, &progress)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(item) => ActionResponse::success("Progress saved.", item.id),
        Err(err) => ActionResponse::failure(format!("watch_set_progress failed: {err}")),
    }
}

/// Deletes a watchlist item; missing ids succeed silently.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn watch_delete(id: String) -> ActionResponse {
    let result = with_record_store(|store| {
        WatchlistService::new(store)
            .delete(&id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ActionResponse::done("Removed from watchlist."),
        Err(err) => ActionResponse::failure(format!("watch_delete failed: {err}")),
    }
}

/// One memory for gallery display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryView {
    pub id: String,
    /// Remote URL or `blob:` reference resolvable via [`memory_payload`].
    pub url: String,
    /// `image|video`.
    pub kind: String,
    pub caption: String,
    pub date: String,
}

/// Upload outcome: saved memories plus per-file failure messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub saved: Vec<MemoryView>,
    pub failed: Vec<String>,
}

/// All memories, seeding the starter set on a first run.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list on DB failure.
#[flutter_rust_bridge::frb(sync)]
pub fn memory_list() -> Vec<MemoryView> {
    with_memory_service(|service| {
        Ok(service
            .load_or_seed()
            .map_err(|err| err.to_string())?
            .into_iter()
            .map(to_memory_view)
            .collect())
    })
    .unwrap_or_default()
}

/// Uploads a batch of files as new memories.
///
/// # FFI contract
/// - Async export: batches can read many megabytes, so this runs on the
///   bridge worker pool and never blocks the calling isolate.
/// - Never panics; each file succeeds or fails independently.
pub fn memory_upload(paths: Vec<String>) -> UploadResponse {
    let result = with_connection(|conn| {
        let record_store = SqliteRecordStore::try_new(conn).map_err(|err| err.to_string())?;
        let memory_store = SqliteMemoryStore::try_new(conn).map_err(|err| err.to_string())?;
        let clock = EffectiveClock::new(&record_store);
        let service = MemoryService::new(&memory_store);
        let report =
            service.upload_files(&clock, paths.iter().map(PathBuf::from).collect());
        Ok(UploadResponse {
            saved: report.saved.into_iter().map(to_memory_view).collect(),
            failed: report.failed.iter().map(|err| err.to_string()).collect(),
        })
    });
    result.unwrap_or_else(|err| UploadResponse {
        saved: Vec::new(),
        failed: vec![format!("memory_upload failed: {err}")],
    })
}

/// Saves caption/date edits for a memory.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown ids and all-blank edits fail with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn memory_update(id: String, caption: String, date: String) -> ActionResponse {
    let caption = caption.trim().to_string();
    let date = date.trim().to_string();
    if caption.is_empty() && date.is_empty() {
        return ActionResponse::failure("memory_update needs a caption or a date");
    }
    let result = with_memory_service(|service| {
        let mut memory = service
            .list()
            .map_err(|err| err.to_string())?
            .into_iter()
            .find(|memory| memory.id == id)
            .ok_or_else(|| format!("memory not found: {id}"))?;
        memory.caption = caption;
        memory.date = date;
        service.save(&memory).map_err(|err| err.to_string())?;
        Ok(memory.id)
    });
    match result {
        Ok(id) => ActionResponse::success("Memory updated.", id),
        Err(err) => ActionResponse::failure(format!("memory_update failed: {err}")),
    }
}

/// Deletes a memory and its payload; missing ids succeed silently.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn memory_delete(id: String) -> ActionResponse {
    let result =
        with_memory_service(|service| service.delete(&id).map_err(|err| err.to_string()));
    match result {
        Ok(()) => ActionResponse::done("Memory deleted."),
        Err(err) => ActionResponse::failure(format!("memory_delete failed: {err}")),
    }
}

/// Stored payload bytes for a `blob:` memory.
///
/// # FFI contract
/// - Sync call; may move megabytes across the boundary.
/// - Never panics; `None` for remote-url memories and unknown ids.
#[flutter_rust_bridge::frb(sync)]
pub fn memory_payload(id: String) -> Option<Vec<u8>> {
    with_memory_service(|service| service.payload(&id).map_err(|err| err.to_string()))
        .unwrap_or_default()
}

fn to_note_view(note: Note) -> NoteView {
    NoteView {
        id: note.id,
        author: note.author.name().to_string(),
        content: note.content,
        voice_clip: note.voice_clip,
        date: note.date,
        is_pinned: note.is_pinned,
    }
}

fn to_letter_view<C: Clock>(
    service: &LetterService<&SqliteRecordStore<'_>>,
    clock: &C,
    letter: FutureLetter,
) -> LetterView {
    let is_unlocked = service.is_unlocked(&letter, clock);
    LetterView {
        id: letter.id,
        from: letter.from.name().to_string(),
        to: letter.to.name().to_string(),
        title: letter.title,
        unlock_date: letter.unlock_date,
        created_at: letter.created_at,
        is_unlocked,
        content: is_unlocked.then_some(letter.content),
    }
}

fn to_memory_view(memory: keepsake_core::Memory) -> MemoryView {
    MemoryView {
        id: memory.id,
        url: memory.url,
        kind: memory.kind.label().to_string(),
        caption: memory.caption,
        date: memory.date,
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("KEEPSAKE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(
    f: impl FnOnce(&rusqlite::Connection) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("DB open failed: {err}"))?;
    f(&conn)
}

fn with_record_store<T>(
    f: impl FnOnce(&SqliteRecordStore<'_>) -> Result<T, String>,
) -> Result<T, String> {
    with_connection(|conn| {
        let store =
            SqliteRecordStore::try_new(conn).map_err(|err| format!("store init failed: {err}"))?;
        f(&store)
    })
}

fn with_memory_service<T>(
    f: impl FnOnce(&MemoryService<&SqliteMemoryStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    with_connection(|conn| {
        let store =
            SqliteMemoryStore::try_new(conn).map_err(|err| format!("store init failed: {err}"))?;
        let service = MemoryService::new(&store);
        f(&service)
    })
}

#[cfg(test)]
mod tests {
    use super::{
        calendar_days, calendar_set_availability, core_version, debug_clear_date, debug_set_date,
        home_splash, home_upcoming_events, init_logging, letter_compose, letter_list,
        memory_list, memory_payload, memory_update, memory_upload, note_add, note_delete,
        note_list, ping, watch_add, watch_toggle,
    };
    use keepsake_core::db::open_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn note_round_trip_through_the_boundary() {
        let token = unique_token("ffi-note");
        let created = note_add("Fiona".to_string(), token.clone(), None);
        assert!(created.ok, "{}", created.message);
        let created_id = created.id.clone().expect("created note should return id");

        let notes = note_list();
        assert!(notes
            .iter()
            .any(|note| note.id == created_id && note.content == token));

        let deleted = note_delete(created_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!note_list().iter().any(|note| note.id == created_id));
    }

    #[test]
    fn note_add_rejects_unknown_author() {
        let response = note_add("Bob".to_string(), "hi".to_string(), None);
        assert!(!response.ok);
        assert!(response.message.contains("unknown partner"));
    }

    #[test]
    fn sealed_letter_content_never_crosses_the_boundary() {
        let token = unique_token("ffi-letter");
        let created = letter_compose(
            "Aldo".to_string(),
            token.clone(),
            "secret body".to_string(),
            "2999-01-01".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        let created_id = created.id.expect("composed letter should return id");

        let letters = letter_list();
        let sealed = letters
            .iter()
            .find(|letter| letter.id == created_id)
            .expect("composed letter should be listed");
        assert_eq!(sealed.title, token);
        assert!(!sealed.is_unlocked);
        assert!(sealed.content.is_none());
        assert_eq!(sealed.to, "Fiona");
    }

    #[test]
    fn debug_date_drives_home_views_and_is_stored() {
        let set = debug_set_date("2024-02-14".to_string());
        assert!(set.ok, "{}", set.message);

        let splash = home_splash();
        assert!(splash.show);
        assert!(splash.is_valentines);
        assert!(!splash.is_anniversary);

        let events = home_upcoming_events();
        assert!(events.iter().any(|event| event.days_until == 0));

        let conn = open_db(super::resolve_db_path()).expect("open db");
        let stored: String = conn
            .query_row(
                "SELECT value FROM settings WHERE key = 'debug_date'",
                [],
                |row| row.get(0),
            )
            .expect("query override row");
        assert_eq!(stored, "2024-02-14");

        let cleared = debug_clear_date();
        assert!(cleared.ok, "{}", cleared.message);
    }

    #[test]
    fn calendar_rejects_bad_inputs_and_lists_answers() {
        let bad_partner =
            calendar_set_availability("2025-08-01".to_string(), "Bob".to_string(), "free".to_string());
        assert!(!bad_partner.ok);
        let bad_status = calendar_set_availability(
            "2025-08-01".to_string(),
            "Aldo".to_string(),
            "sleepy".to_string(),
        );
        assert!(!bad_status.ok);

        let saved = calendar_set_availability(
            "2125-08-01".to_string(),
            "Aldo".to_string(),
            "free".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);
        assert!(calendar_days()
            .iter()
            .any(|day| day.date == "2125-08-01" && day.aldo_status == "free"));
    }

    #[test]
    fn watch_add_rejects_unknown_kind_and_toggle_reports_status() {
        let bad = watch_add("Heat".to_string(), "podcast".to_string(), "1995".to_string());
        assert!(!bad.ok);

        let added = watch_add(
            unique_token("ffi-watch"),
            "movie".to_string(),
            "1995".to_string(),
        );
        assert!(added.ok, "{}", added.message);
        let id = added.id.expect("added item should return id");

        let toggled = watch_toggle(id);
        assert!(toggled.ok, "{}", toggled.message);
        assert!(toggled.message.contains("watched"));
    }

    #[test]
    fn memory_upload_stores_payload_and_update_validates() {
        let path = std::env::temp_dir().join(format!("{}.jpg", unique_token("ffi-upload")));
        std::fs::write(&path, b"jpeg bytes").expect("write upload fixture");

        let response = memory_upload(vec![path.to_string_lossy().into_owned()]);
        assert!(response.failed.is_empty(), "{:?}", response.failed);
        let uploaded = response.saved[0].clone();
        assert_eq!(uploaded.kind, "image");
        assert_eq!(
            memory_payload(uploaded.id.clone()),
            Some(b"jpeg bytes".to_vec())
        );

        let rejected = memory_update(uploaded.id.clone(), "  ".to_string(), String::new());
        assert!(!rejected.ok);
        assert!(rejected.message.contains("caption"));

        let updated = memory_update(
            uploaded.id.clone(),
            "Beach day".to_string(),
            "2025-05-20".to_string(),
        );
        assert!(updated.ok, "{}", updated.message);
        assert!(memory_list()
            .iter()
            .any(|memory| memory.id == uploaded.id && memory.caption == "Beach day"));

        let _ = std::fs::remove_file(&path);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
