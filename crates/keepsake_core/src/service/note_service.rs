//! Love-notes use-case service.
//!
//! # Responsibility
//! - Create, list and delete notes in the `love_notes` collection.
//!
//! # Invariants
//! - A note needs non-empty content or an attached voice clip.
//! - Listing returns newest first (ids are time-ordered UUIDv7).

use crate::clock::Clock;
use crate::model::note::Note;
use crate::model::partner::Partner;
use crate::model::new_record_id;
use crate::store::{RecordStore, StoreError, StoreResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NOTES_COLLECTION: &str = "love_notes";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Neither text content nor a voice clip was provided.
    EmptyNote,
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(f, "a note needs text or a voice clip"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyNote => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Note CRUD over any record-store implementation.
pub struct NoteService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a note stamped with the effective date.
    ///
    /// Content is trimmed; an empty submission without a voice clip is
    /// rejected before anything is written.
    pub fn add_note<C: Clock>(
        &self,
        clock: &C,
        author: Partner,
        content: &str,
        voice_clip: Option<String>,
    ) -> Result<Note, NoteServiceError> {
        let content = content.trim();
        if content.is_empty() && voice_clip.is_none() {
            return Err(NoteServiceError::EmptyNote);
        }

        let note = Note {
            id: new_record_id(),
            author,
            content: content.to_string(),
            voice_clip,
            date: clock.today().format("%Y-%m-%d").to_string(),
            is_pinned: false,
        };
        self.store.put(NOTES_COLLECTION, &note)?;
        info!(
            "event=note_created module=notes status=ok author={} has_voice={}",
            note.author,
            note.voice_clip.is_some()
        );
        Ok(note)
    }

    /// All notes, newest first.
    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let mut notes: Vec<Note> = self.store.list(NOTES_COLLECTION)?;
        notes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(notes)
    }

    /// Deletes a note by id; no-op when absent.
    pub fn delete_note(&self, id: &str) -> StoreResult<()> {
        self.store.remove(NOTES_COLLECTION, id)
    }
}
