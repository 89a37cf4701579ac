//! Date-time with year to nanosecond precision and a fixed UTC offset

use super::{
    FhirDate, FhirTime, Temporal, check_field, check_offset, check_year, grammar, temporal_equal,
    temporal_equivalent, write_date_fields, write_offset, write_time_fields,
};
use crate::data_type::{Accessor, DataType, PrimitiveAccessor, ValueComparison};
use crate::precision::DateTimePrecision;
use crate::type_spec::TypeSpecId;
use crate::value::FhirValue;
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use octofhir_himodel_diagnostics::{HIM0002, ModelError, Result};
use std::fmt;
use std::str::FromStr;

/// A date-time such as `2021-03-15T17:22:21.5+01:00`.
///
/// The UTC offset is only meaningful at hour precision and above; coarser
/// values always carry a zero offset. Seconds may be 60 and are kept as
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FhirDateTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
    offset_seconds: i32,
    precision: DateTimePrecision,
    absent: bool,
}

impl FhirDateTime {
    pub const GRAMMAR: &'static str = "dateTime";

    /// A date-time at nanosecond precision.
    ///
    /// # Panics
    ///
    /// Panics if a field is out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
        offset: FixedOffset,
    ) -> Self {
        Self::with_precision(
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            offset,
            DateTimePrecision::Nanosecond,
        )
    }

    /// A date-time at the given precision.
    ///
    /// Fields below the precision are reset to their minimum and the offset
    /// is dropped below hour precision.
    ///
    /// # Panics
    ///
    /// Panics if a field is out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn with_precision(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
        offset: FixedOffset,
        precision: DateTimePrecision,
    ) -> Self {
        match Self::try_with_precision(
            year, month, day, hour, minute, second, nanosecond, offset, precision,
        ) {
            Ok(date_time) => date_time,
            Err(err) => panic!("{}", err),
        }
    }

    /// Checked variant of [`FhirDateTime::with_precision`]
    #[allow(clippy::too_many_arguments)]
    pub fn try_with_precision(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
        offset: FixedOffset,
        precision: DateTimePrecision,
    ) -> Result<Self> {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond,
            offset_seconds: offset.local_minus_utc(),
            precision,
            absent: false,
        }
        .clamped()
        .validated()
    }

    /// An absent date-time at nanosecond precision
    pub fn nil() -> Self {
        Self::nil_with_precision(DateTimePrecision::Nanosecond)
    }

    pub fn nil_with_precision(precision: DateTimePrecision) -> Self {
        Self {
            year: 1,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            offset_seconds: 0,
            precision: precision.clamp_to(Self::LOWEST_PRECISION, Self::HIGHEST_PRECISION),
            absent: true,
        }
    }

    /// Parse a date-time literal.
    ///
    /// A time component requires hours, minutes, seconds and an offset
    /// (`Z` or `+HH:MM` up to `+14:00`).
    pub fn parse(literal: &str) -> Result<Self> {
        let Some(caps) = grammar::DATE_TIME.captures(literal) else {
            log::debug!("rejected {} literal '{}'", Self::GRAMMAR, literal);
            return Err(ModelError::parse(HIM0002, Self::GRAMMAR, literal));
        };

        let mut precision = DateTimePrecision::Year;
        let mut field = |group: usize, reached: DateTimePrecision| {
            grammar::number(&caps, group).inspect(|_| precision = reached)
        };
        let month = field(2, DateTimePrecision::Month);
        let day = field(3, DateTimePrecision::Day);
        let hour = field(4, DateTimePrecision::Hour);
        let minute = field(5, DateTimePrecision::Minute);
        let second = field(6, DateTimePrecision::Second);
        let nanosecond = caps.get(7).map(|m| {
            precision = DateTimePrecision::Nanosecond;
            grammar::nanoseconds(m.as_str())
        });

        Ok(Self {
            year: grammar::number(&caps, 1).unwrap_or(1) as i32,
            month: month.unwrap_or(1),
            day: day.unwrap_or(1),
            hour: hour.unwrap_or(0),
            minute: minute.unwrap_or(0),
            second: second.unwrap_or(0),
            nanosecond: nanosecond.unwrap_or(0),
            offset_seconds: caps
                .get(8)
                .map_or(0, |m| grammar::offset_seconds(m.as_str())),
            precision,
            absent: false,
        })
    }

    /// Build from a literal that is already known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if the literal does not match the date-time grammar.
    pub fn from_trusted(literal: &str) -> Self {
        match Self::parse(literal) {
            Ok(date_time) => date_time,
            Err(err) => panic!("{}", err),
        }
    }

    /// The same instant description at a coarser (or equal) precision
    pub fn truncate(&self, precision: DateTimePrecision) -> Self {
        let precision = precision.min(self.precision);
        if self.absent {
            return Self::nil_with_precision(precision);
        }
        Self { precision, ..*self }.reset_below_precision()
    }

    fn clamped(self) -> Self {
        Self {
            precision: self
                .precision
                .clamp_to(Self::LOWEST_PRECISION, Self::HIGHEST_PRECISION),
            ..self
        }
        .reset_below_precision()
    }

    fn reset_below_precision(self) -> Self {
        let at = |p: DateTimePrecision| self.precision >= p;
        Self {
            month: if at(DateTimePrecision::Month) { self.month } else { 1 },
            day: if at(DateTimePrecision::Day) { self.day } else { 1 },
            hour: if at(DateTimePrecision::Hour) { self.hour } else { 0 },
            minute: if at(DateTimePrecision::Minute) { self.minute } else { 0 },
            second: if at(DateTimePrecision::Second) { self.second } else { 0 },
            nanosecond: if at(DateTimePrecision::Nanosecond) { self.nanosecond } else { 0 },
            offset_seconds: if at(DateTimePrecision::Hour) { self.offset_seconds } else { 0 },
            ..self
        }
    }

    fn validated(self) -> Result<Self> {
        check_year(self.year)?;
        check_field("month", self.month, 1..=12)?;
        check_field("day", self.day, 1..=31)?;
        check_field("hour", self.hour, 0..=23)?;
        check_field("minute", self.minute, 0..=59)?;
        check_field("second", self.second, 0..=60)?;
        check_field("nanosecond", self.nanosecond, 0..=999_999_999)?;
        check_offset(self.offset_seconds)?;
        Ok(self)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    /// Offset east of UTC in seconds; zero below hour precision
    pub fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.offset_seconds)
    }

    pub fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    /// The date part, at day precision at most
    pub fn date(&self) -> FhirDate {
        if self.absent {
            return FhirDate::nil_with_precision(self.precision);
        }
        FhirDate::with_precision(self.year, self.month, self.day, self.precision)
    }

    /// The time-of-day part, when the precision reaches hours
    pub fn time(&self) -> Option<FhirTime> {
        if self.absent || !self.precision.has_time() {
            return None;
        }
        Some(FhirTime::with_precision(
            self.hour,
            self.minute,
            self.second,
            self.nanosecond,
            self.precision,
        ))
    }

    /// The UTC instant. Overflowing days and a leap second roll forward.
    pub fn to_utc(&self) -> Option<NaiveDateTime> {
        if self.absent {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(self.year, self.month, 1)?
            .checked_add_days(Days::new(u64::from(self.day.saturating_sub(1))))?;
        let local = date.and_hms_nano_opt(self.hour, self.minute, 0, self.nanosecond)?
            + TimeDelta::seconds(i64::from(self.second));
        Some(local - TimeDelta::seconds(i64::from(self.offset_seconds)))
    }

    /// A chrono date-time, when the value is present and valid in the calendar
    pub fn to_chrono(&self) -> Option<DateTime<FixedOffset>> {
        if self.absent || self.second == 60 {
            return None;
        }
        let local = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_nano_opt(
            self.hour,
            self.minute,
            self.second,
            self.nanosecond,
        )?;
        local.and_local_timezone(self.offset()?).single()
    }
}

impl Temporal for FhirDateTime {
    type Instant = NaiveDateTime;

    const LOWEST_PRECISION: DateTimePrecision = DateTimePrecision::Year;
    const HIGHEST_PRECISION: DateTimePrecision = DateTimePrecision::Nanosecond;

    fn is_absent(&self) -> bool {
        self.absent
    }

    fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    fn instant(&self) -> Option<NaiveDateTime> {
        self.to_utc()
    }
}

impl Accessor for FhirDateTime {
    fn data_type(&self) -> DataType {
        DataType::DateTime
    }

    fn type_spec(&self) -> TypeSpecId {
        TypeSpecId::DATE_TIME
    }

    fn is_empty(&self) -> bool {
        self.absent
    }
}

impl PrimitiveAccessor for FhirDateTime {
    fn is_nil(&self) -> bool {
        self.absent
    }
}

impl ValueComparison for FhirDateTime {
    fn equal(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::DateTime(other) => temporal_equal(self, other),
            _ => false,
        }
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::DateTime(other) => temporal_equivalent(self, other),
            _ => false,
        }
    }
}

impl fmt::Display for FhirDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absent {
            return Ok(());
        }
        write_date_fields(f, self.year, self.month, self.day, self.precision)?;
        if self.precision.has_time() {
            f.write_str("T")?;
            write_time_fields(
                f,
                self.hour,
                self.minute,
                self.second,
                self.nanosecond,
                self.precision,
            )?;
            write_offset(f, self.offset_seconds)?;
        }
        Ok(())
    }
}

impl FromStr for FhirDateTime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<DateTime<FixedOffset>> for FhirDateTime {
    type Error = ModelError;

    fn try_from(value: DateTime<FixedOffset>) -> Result<Self> {
        let (second, nanosecond) = if value.nanosecond() >= 1_000_000_000 {
            (60, value.nanosecond() - 1_000_000_000)
        } else {
            (value.second(), value.nanosecond())
        };
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            hour: value.hour(),
            minute: value.minute(),
            second,
            nanosecond,
            offset_seconds: value.offset().local_minus_utc(),
            precision: DateTimePrecision::Nanosecond,
            absent: false,
        }
        .validated()
    }
}
