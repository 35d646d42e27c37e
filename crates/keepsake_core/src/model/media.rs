//! Watchlist record for shows and movies.

use crate::model::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Show,
    Movie,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Movie => "movie",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "show" => Some(Self::Show),
            "movie" => Some(Self::Movie),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    Watching,
    Watched,
}

impl WatchStatus {
    /// Two-state toggle used by the tracker's check button.
    pub fn toggled(self) -> Self {
        match self {
            Self::Watching => Self::Watched,
            Self::Watched => Self::Watching,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Watched => "watched",
        }
    }
}

/// Something the couple is watching together.
///
/// `progress` is free text on purpose: episode markers ("S2 E4") and
/// timestamps ("01:20:00") both occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub kind: MediaKind,
    pub poster_url: String,
    pub status: WatchStatus,
    pub progress: String,
    pub year: String,
}

impl Record for MediaItem {
    fn record_id(&self) -> &str {
        &self.id
    }
}
