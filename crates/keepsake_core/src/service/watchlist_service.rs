//! Watchlist use-case service.
//!
//! # Responsibility
//! - Track shows/movies in the `couple_media` collection.
//!
//! # Invariants
//! - New items start as `Watching` with a kind-appropriate progress
//!   marker and the placeholder poster.
//! - Listing returns newest first.

use crate::model::media::{MediaItem, MediaKind, WatchStatus};
use crate::model::new_record_id;
use crate::store::{RecordStore, StoreError, StoreResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const WATCHLIST_COLLECTION: &str = "couple_media";

/// Poster shown until real artwork lookup (an external collaborator)
/// replaces it.
pub const PLACEHOLDER_POSTER_URL: &str =
    "https://images.unsplash.com/photo-1485846234645-a62644f84728?q=80&w=400&auto=format&fit=crop";

/// A pick from the external title-search suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPick {
    pub title: String,
    pub kind: MediaKind,
    pub year: String,
}

/// Service error for watchlist use-cases.
#[derive(Debug)]
pub enum WatchlistServiceError {
    ItemNotFound(String),
    Store(StoreError),
}

impl Display for WatchlistServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "watchlist item not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WatchlistServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::ItemNotFound(_) => None,
        }
    }
}

impl From<StoreError> for WatchlistServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Watchlist CRUD over any record-store implementation.
pub struct WatchlistService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> WatchlistService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds a picked suggestion with tracker defaults.
    pub fn add(&self, pick: SuggestionPick) -> StoreResult<MediaItem> {
        let progress = match pick.kind {
            MediaKind::Show => "S1 E1",
            MediaKind::Movie => "0:00",
        };
        let item = MediaItem {
            id: new_record_id(),
            title: pick.title,
            kind: pick.kind,
            poster_url: PLACEHOLDER_POSTER_URL.to_string(),
            status: WatchStatus::Watching,
            progress: progress.to_string(),
            year: pick.year,
        };
        self.store.put(WATCHLIST_COLLECTION, &item)?;
        Ok(item)
    }

    /// All items, newest first.
    pub fn list_items(&self) -> StoreResult<Vec<MediaItem>> {
        let mut items: Vec<MediaItem> = self.store.list(WATCHLIST_COLLECTION)?;
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items)
    }

    /// Flips watching/watched in place.
    pub fn toggle_status(&self, id: &str) -> Result<MediaItem, WatchlistServiceError> {
        self.update_item(id, |item| item.status = item.status.toggled())
    }

    /// Replaces the free-text progress marker in place.
    pub fn set_progress(
        &self,
        id: &str,
        progress: &str,
    ) -> Result<MediaItem, WatchlistServiceError> {
        let progress = progress.trim().to_string();
        self.update_item(id, move |item| item.progress = progress.clone())
    }

    /// Deletes an item by id; no-op when absent.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.remove(WATCHLIST_COLLECTION, id)
    }

    fn update_item(
        &self,
        id: &str,
        mutate: impl Fn(&mut MediaItem),
    ) -> Result<MediaItem, WatchlistServiceError> {
        let items: Vec<MediaItem> = self.store.list(WATCHLIST_COLLECTION)?;
        let mut item = items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| WatchlistServiceError::ItemNotFound(id.to_string()))?;
        mutate(&mut item);
        self.store.put(WATCHLIST_COLLECTION, &item)?;
        Ok(item)
    }
}
