//! Love-note record.

use crate::model::partner::Partner;
use crate::model::Record;
use serde::{Deserialize, Serialize};

/// A short note left on the shared board, optionally with a voice clip.
///
/// `voice_clip` is an opaque audio reference (the UI records and encodes
/// it); the core only stores and returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Time-ordered UUIDv7 string.
    pub id: String,
    pub author: Partner,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_clip: Option<String>,
    /// Display date stamped at creation (`YYYY-MM-DD`).
    pub date: String,
    pub is_pinned: bool,
}

impl Record for Note {
    fn record_id(&self) -> &str {
        &self.id
    }
}
