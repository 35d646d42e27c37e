//! Shared-calendar day record.

use crate::model::Record;
use serde::{Deserialize, Serialize};

/// One partner's availability for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Free,
    Busy,
    Maybe,
    /// Not answered yet; the lazy-created default.
    #[default]
    None,
}

impl Availability {
    /// Stable storage/display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Busy => "busy",
            Self::Maybe => "maybe",
            Self::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "free" => Some(Self::Free),
            "busy" => Some(Self::Busy),
            "maybe" => Some(Self::Maybe),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Availability of both partners for one calendar day.
///
/// Keyed by the day itself; each partner's slot is written independently
/// so one answer never clobbers the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// `YYYY-MM-DD`; doubles as the record id.
    pub date: String,
    pub aldo_status: Availability,
    pub fiona_status: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CalendarDay {
    /// Lazy-creation default: both slots unanswered, no note.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            aldo_status: Availability::None,
            fiona_status: Availability::None,
            note: None,
        }
    }

    /// True when both partners marked the day free.
    pub fn is_match(&self) -> bool {
        self.aldo_status == Availability::Free && self.fiona_status == Availability::Free
    }
}

impl Record for CalendarDay {
    fn record_id(&self) -> &str {
        &self.date
    }
}
