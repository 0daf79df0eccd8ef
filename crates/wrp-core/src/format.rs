//! Wire format identity

use crate::WrpError;
use serde::{Deserialize, Serialize};

/// Identifies the wire serialization a byte sequence was produced with.
///
/// Two encodings are interchangeable only when their formats compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Human-readable JSON
    #[default]
    Json,
    /// Compact binary encoding
    Bincode,
}

impl Format {
    /// Every supported format
    pub const ALL: [Format; 2] = [Format::Json, Format::Bincode];

    /// MIME content type for this format
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Bincode => "application/octet-stream",
        }
    }

    /// Look up a format by MIME content type, ignoring any parameters
    pub fn from_content_type(content_type: &str) -> Option<Format> {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        Format::ALL
            .into_iter()
            .find(|format| format.content_type().eq_ignore_ascii_case(essence))
    }

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Bincode => "bincode",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Format {
    type Err = WrpError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| WrpError::UnsupportedFormat(value.to_string()))
    }
}

#[cfg(test)]
#[path = "format/format_tests.rs"]
mod format_tests;
