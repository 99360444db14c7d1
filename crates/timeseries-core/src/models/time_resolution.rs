//! Temporal resolution modes.
//!
//! The resolution determines the unit callers use for `start`/`end` and
//! which reference epoch (time-zero) maps to array index 0 when the caller
//! does not supply one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit in which a request expresses its time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeResolution {
    /// Raw array index
    #[default]
    Index,
    /// Imagery band number (1-based)
    Band,
    /// Calendar year
    Year,
    /// Any label that is not recognized
    Invalid,
}

impl TimeResolution {
    /// All recognized resolutions with their default time-zero
    const DEFAULT_TIME_ZERO: [(TimeResolution, &'static str); 3] = [
        (TimeResolution::Index, "0"),
        (TimeResolution::Band, "1"),
        (TimeResolution::Year, "1"),
    ];

    /// Parse a resolution label, case-insensitively.
    ///
    /// Unknown labels map to [`TimeResolution::Invalid`] so that the error is
    /// reported by validation rather than at assignment.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "index" => TimeResolution::Index,
            "band" => TimeResolution::Band,
            "year" => TimeResolution::Year,
            _ => TimeResolution::Invalid,
        }
    }

    /// Reference epoch used when the request does not carry one
    pub fn default_time_zero(self) -> Option<&'static str> {
        Self::DEFAULT_TIME_ZERO
            .iter()
            .find(|(resolution, _)| *resolution == self)
            .map(|(_, time_zero)| *time_zero)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeResolution::Index => "INDEX",
            TimeResolution::Band => "BAND",
            TimeResolution::Year => "YEAR",
            TimeResolution::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for TimeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
