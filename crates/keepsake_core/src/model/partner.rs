//! The two-party closed set owning every collection.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One of the two people sharing the app.
///
/// Kept as an enum rather than free-form strings so partner derivation
/// (letters addressed to "the other one") is exhaustive and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partner {
    Aldo,
    Fiona,
}

impl Partner {
    /// Returns the other member of the pair. Total by construction.
    pub fn partner(self) -> Self {
        match self {
            Self::Aldo => Self::Fiona,
            Self::Fiona => Self::Aldo,
        }
    }

    /// Stable display/storage name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aldo => "Aldo",
            Self::Fiona => "Fiona",
        }
    }

    /// Parses a stored or UI-provided partner name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Aldo" => Some(Self::Aldo),
            "Fiona" => Some(Self::Fiona),
            _ => None,
        }
    }
}

impl Display for Partner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
