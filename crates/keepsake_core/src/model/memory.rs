//! Photo/video memory record.

use crate::model::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    Image,
    Video,
}

impl MemoryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// A captioned photo or video.
///
/// `url` is an opaque media reference: a remote URL for seeded content,
/// or a `blob:` reference whose bytes live in the blob store next to the
/// metadata row. Caption and date are editable; the payload is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub url: String,
    pub kind: MemoryKind,
    pub caption: String,
    /// `YYYY-MM-DD` display date.
    pub date: String,
}

impl Memory {
    /// Reference scheme for payloads held in the blob store.
    pub fn blob_url(id: &str) -> String {
        format!("blob:{id}")
    }
}

impl Record for Memory {
    fn record_id(&self) -> &str {
        &self.id
    }
}
