//! Temporal precision scale

use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of a temporal literal was specified.
///
/// Ordered from coarsest to finest, so `Year < Month < ... < Nanosecond`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimePrecision {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// Fractional seconds, kept at nanosecond resolution
    Nanosecond,
}

impl DateTimePrecision {
    /// Every precision from coarsest to finest
    pub const ALL: [DateTimePrecision; 7] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Nanosecond,
    ];

    /// Clamp this precision into the inclusive band `lowest..=highest`
    pub fn clamp_to(self, lowest: DateTimePrecision, highest: DateTimePrecision) -> Self {
        self.clamp(lowest, highest)
    }

    /// Whether this precision includes a time-of-day component
    pub const fn has_time(self) -> bool {
        matches!(
            self,
            Self::Hour | Self::Minute | Self::Second | Self::Nanosecond
        )
    }

    /// The lowercase name used in diagnostics and CLI output
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Nanosecond => "nanosecond",
        }
    }
}

impl fmt::Display for DateTimePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
