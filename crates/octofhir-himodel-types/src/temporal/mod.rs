//! Temporal values with precision
//!
//! Three kinds share one model: [`FhirDate`], [`FhirDateTime`] and
//! [`FhirTime`]. Each remembers how much of its literal was specified and
//! keeps every field below that precision at its minimum, so a value built
//! from calendar fields at a given precision is indistinguishable from one
//! parsed from a literal of the same length.
//!
//! Comparison is implemented once against the [`Temporal`] capability:
//! strict equality requires equal precision, equivalence compares only the
//! resolved instant.

mod date;
mod date_time;
mod grammar;
mod time;

pub use date::FhirDate;
pub use date_time::FhirDateTime;
pub use time::FhirTime;

use crate::precision::DateTimePrecision;
use octofhir_himodel_diagnostics::{HIM0201, ModelError, Result};
use std::fmt;
use std::ops::RangeInclusive;

/// The capability shared comparison and formatting code needs from a temporal value
pub trait Temporal {
    /// The resolved point in time used for comparison
    type Instant: PartialEq;

    /// Coarsest precision the kind supports
    const LOWEST_PRECISION: DateTimePrecision;

    /// Finest precision the kind supports
    const HIGHEST_PRECISION: DateTimePrecision;

    fn is_absent(&self) -> bool;

    fn precision(&self) -> DateTimePrecision;

    /// `None` for absent values
    fn instant(&self) -> Option<Self::Instant>;

    fn lowest_precision(&self) -> DateTimePrecision {
        Self::LOWEST_PRECISION
    }
}

/// Same absence, same precision and, when present, the same instant
pub(crate) fn temporal_equal<T: Temporal>(left: &T, right: &T) -> bool {
    left.is_absent() == right.is_absent()
        && left.precision() == right.precision()
        && left.instant() == right.instant()
}

/// Two absent values are equivalent; otherwise both must be present at the same instant
pub(crate) fn temporal_equivalent<T: Temporal>(left: &T, right: &T) -> bool {
    match (left.is_absent(), right.is_absent()) {
        (true, true) => true,
        (false, false) => left.instant() == right.instant(),
        _ => false,
    }
}

pub(crate) fn check_field(name: &str, value: u32, range: RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ModelError::construction(
            HIM0201,
            format!(
                "{} {} is outside {}..={}",
                name,
                value,
                range.start(),
                range.end()
            ),
        ))
    }
}

pub(crate) fn check_year(year: i32) -> Result<()> {
    if (1..=9999).contains(&year) {
        Ok(())
    } else {
        Err(ModelError::construction(
            HIM0201,
            format!("year {} is outside 1..=9999", year),
        ))
    }
}

pub(crate) fn check_offset(offset_seconds: i32) -> Result<()> {
    if offset_seconds.abs() <= 14 * 3600 {
        Ok(())
    } else {
        Err(ModelError::construction(
            HIM0201,
            format!("UTC offset of {} seconds exceeds 14 hours", offset_seconds),
        ))
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub(crate) fn write_date_fields(
    f: &mut fmt::Formatter<'_>,
    year: i32,
    month: u32,
    day: u32,
    precision: DateTimePrecision,
) -> fmt::Result {
    write!(f, "{:04}", year)?;
    if precision >= DateTimePrecision::Month {
        write!(f, "-{:02}", month)?;
    }
    if precision >= DateTimePrecision::Day {
        write!(f, "-{:02}", day)?;
    }
    Ok(())
}

pub(crate) fn write_time_fields(
    f: &mut fmt::Formatter<'_>,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
    precision: DateTimePrecision,
) -> fmt::Result {
    write!(f, "{:02}", hour)?;
    if precision >= DateTimePrecision::Minute {
        write!(f, ":{:02}", minute)?;
    }
    if precision >= DateTimePrecision::Second {
        write!(f, ":{:02}", second)?;
    }
    if precision >= DateTimePrecision::Nanosecond {
        write!(f, ".{:09}", nanosecond)?;
    }
    Ok(())
}

/// Zero renders as `Z`, never `+00:00`
pub(crate) fn write_offset(f: &mut fmt::Formatter<'_>, offset_seconds: i32) -> fmt::Result {
    if offset_seconds == 0 {
        return f.write_str("Z");
    }
    let sign = if offset_seconds > 0 { '+' } else { '-' };
    let magnitude = offset_seconds.unsigned_abs();
    write!(
        f,
        "{}{:02}:{:02}",
        sign,
        magnitude / 3600,
        (magnitude % 3600) / 60
    )
}
