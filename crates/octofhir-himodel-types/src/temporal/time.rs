//! Time of day with hour to nanosecond precision

use super::{Temporal, check_field, grammar, temporal_equal, temporal_equivalent, write_time_fields};
use crate::data_type::{Accessor, DataType, PrimitiveAccessor, ValueComparison};
use crate::precision::DateTimePrecision;
use crate::type_spec::TypeSpecId;
use crate::value::FhirValue;
use chrono::{NaiveTime, Timelike};
use octofhir_himodel_diagnostics::{HIM0003, ModelError, Result};
use std::fmt;
use std::str::FromStr;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// A time of day such as `17:22:21.123`. No date, no offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FhirTime {
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
    precision: DateTimePrecision,
    absent: bool,
}

impl FhirTime {
    pub const GRAMMAR: &'static str = "time";

    /// A time at nanosecond precision.
    ///
    /// # Panics
    ///
    /// Panics if a field is out of range.
    pub fn new(hour: u32, minute: u32, second: u32, nanosecond: u32) -> Self {
        Self::with_precision(hour, minute, second, nanosecond, DateTimePrecision::Nanosecond)
    }

    /// A time at the given precision, clamped to `Hour..=Nanosecond`.
    ///
    /// # Panics
    ///
    /// Panics if a field is out of range.
    pub fn with_precision(
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
        precision: DateTimePrecision,
    ) -> Self {
        match Self::try_with_precision(hour, minute, second, nanosecond, precision) {
            Ok(time) => time,
            Err(err) => panic!("{}", err),
        }
    }

    /// Checked variant of [`FhirTime::with_precision`]
    pub fn try_with_precision(
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
        precision: DateTimePrecision,
    ) -> Result<Self> {
        let precision = precision.clamp_to(Self::LOWEST_PRECISION, Self::HIGHEST_PRECISION);
        let minute = if precision >= DateTimePrecision::Minute { minute } else { 0 };
        let second = if precision >= DateTimePrecision::Second { second } else { 0 };
        let nanosecond = if precision >= DateTimePrecision::Nanosecond { nanosecond } else { 0 };

        check_field("hour", hour, 0..=23)?;
        check_field("minute", minute, 0..=59)?;
        check_field("second", second, 0..=60)?;
        check_field("nanosecond", nanosecond, 0..=999_999_999)?;

        Ok(Self {
            hour,
            minute,
            second,
            nanosecond,
            precision,
            absent: false,
        })
    }

    /// An absent time at hour precision
    pub fn nil() -> Self {
        Self::nil_with_precision(DateTimePrecision::Hour)
    }

    pub fn nil_with_precision(precision: DateTimePrecision) -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            precision: precision.clamp_to(Self::LOWEST_PRECISION, Self::HIGHEST_PRECISION),
            absent: true,
        }
    }

    /// Parse a strict `HH:MM:SS[.fraction]` literal
    pub fn parse(literal: &str) -> Result<Self> {
        Self::parse_with(&grammar::TIME, literal)
    }

    /// Parse a lenient `HH[:MM[:SS[.fraction]]]` literal
    pub fn parse_fluent(literal: &str) -> Result<Self> {
        Self::parse_with(&grammar::FLUENT_TIME, literal)
    }

    fn parse_with(pattern: &regex::Regex, literal: &str) -> Result<Self> {
        let Some(caps) = pattern.captures(literal) else {
            log::debug!("rejected {} literal '{}'", Self::GRAMMAR, literal);
            return Err(ModelError::parse(HIM0003, Self::GRAMMAR, literal));
        };

        let mut precision = DateTimePrecision::Hour;
        let hour = grammar::number(&caps, 1).unwrap_or(0);
        let minute = grammar::number(&caps, 2).inspect(|_| precision = DateTimePrecision::Minute);
        let second = grammar::number(&caps, 3).inspect(|_| precision = DateTimePrecision::Second);
        let nanosecond = caps.get(4).map(|m| {
            precision = DateTimePrecision::Nanosecond;
            grammar::nanoseconds(m.as_str())
        });

        Ok(Self {
            hour,
            minute: minute.unwrap_or(0),
            second: second.unwrap_or(0),
            nanosecond: nanosecond.unwrap_or(0),
            precision,
            absent: false,
        })
    }

    /// Build from a strict literal that is already known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if the literal does not match the strict time grammar.
    pub fn from_trusted(literal: &str) -> Self {
        match Self::parse(literal) {
            Ok(time) => time,
            Err(err) => panic!("{}", err),
        }
    }

    /// The same time at a coarser (or equal) precision
    pub fn truncate(&self, precision: DateTimePrecision) -> Self {
        let precision = precision.min(self.precision);
        if self.absent {
            return Self::nil_with_precision(precision);
        }
        Self {
            minute: if precision >= DateTimePrecision::Minute { self.minute } else { 0 },
            second: if precision >= DateTimePrecision::Second { self.second } else { 0 },
            nanosecond: if precision >= DateTimePrecision::Nanosecond { self.nanosecond } else { 0 },
            precision: precision.max(Self::LOWEST_PRECISION),
            ..*self
        }
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

    pub fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    /// Nanoseconds since midnight; a leap second counts as the 61st second
    fn nanos_of_day(&self) -> u64 {
        (u64::from(self.hour) * 3600 + u64::from(self.minute) * 60 + u64::from(self.second))
            * NANOS_PER_SECOND
            + u64::from(self.nanosecond)
    }

    /// The chrono time, when present. A leap second maps to chrono's leap representation.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        if self.absent {
            return None;
        }
        if self.second == 60 {
            return NaiveTime::from_hms_nano_opt(
                self.hour,
                self.minute,
                59,
                self.nanosecond + NANOS_PER_SECOND as u32,
            );
        }
        NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nanosecond)
    }
}

impl Temporal for FhirTime {
    type Instant = u64;

    const LOWEST_PRECISION: DateTimePrecision = DateTimePrecision::Hour;
    const HIGHEST_PRECISION: DateTimePrecision = DateTimePrecision::Nanosecond;

    fn is_absent(&self) -> bool {
        self.absent
    }

    fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    fn instant(&self) -> Option<u64> {
        (!self.absent).then(|| self.nanos_of_day())
    }
}

impl Accessor for FhirTime {
    fn data_type(&self) -> DataType {
        DataType::Time
    }

    fn type_spec(&self) -> TypeSpecId {
        TypeSpecId::TIME
    }

    fn is_empty(&self) -> bool {
        self.absent
    }
}

impl PrimitiveAccessor for FhirTime {
    fn is_nil(&self) -> bool {
        self.absent
    }
}

impl ValueComparison for FhirTime {
    fn equal(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Time(other) => temporal_equal(self, other),
            _ => false,
        }
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Time(other) => temporal_equivalent(self, other),
            _ => false,
        }
    }
}

impl fmt::Display for FhirTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absent {
            return Ok(());
        }
        write_time_fields(
            f,
            self.hour,
            self.minute,
            self.second,
            self.nanosecond,
            self.precision,
        )
    }
}

impl FromStr for FhirTime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<NaiveTime> for FhirTime {
    fn from(time: NaiveTime) -> Self {
        let (second, nanosecond) = if time.nanosecond() >= NANOS_PER_SECOND as u32 {
            (60, time.nanosecond() - NANOS_PER_SECOND as u32)
        } else {
            (time.second(), time.nanosecond())
        };
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second,
            nanosecond,
            precision: DateTimePrecision::Nanosecond,
            absent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("17:22:21", DateTimePrecision::Second)]
    #[case("17:22:21.123456789", DateTimePrecision::Nanosecond)]
    #[case("00:00:60", DateTimePrecision::Second)]
    fn test_parse_strict(#[case] literal: &str, #[case] precision: DateTimePrecision) {
        let time = FhirTime::parse(literal).unwrap();
        assert_eq!(time.precision(), precision);
        assert_eq!(time.to_string(), literal);
    }

    #[rstest]
    #[case("17")]
    #[case("17:22")]
    #[case("24:00:00")]
    #[case("17:60:00")]
    #[case("17:22:61")]
    #[case("17:22:21.")]
    fn test_parse_strict_invalid(#[case] literal: &str) {
        assert_eq!(FhirTime::parse(literal).unwrap_err().code(), HIM0003);
    }

    #[rstest]
    #[case("17", DateTimePrecision::Hour)]
    #[case("17:22", DateTimePrecision::Minute)]
    #[case("17:22:21", DateTimePrecision::Second)]
    #[case("17:22:21.000000001", DateTimePrecision::Nanosecond)]
    fn test_parse_fluent(#[case] literal: &str, #[case] precision: DateTimePrecision) {
        let time = FhirTime::parse_fluent(literal).unwrap();
        assert_eq!(time.precision(), precision);
        assert_eq!(time.to_string(), literal);
    }

    #[rstest]
    #[case("17:")]
    #[case("17.5")]
    #[case("17:22.5")]
    #[case("7:22")]
    fn test_parse_fluent_invalid(#[case] literal: &str) {
        assert!(FhirTime::parse_fluent(literal).is_err());
    }

    #[test]
    fn test_fraction_truncated_not_rounded() {
        let time = FhirTime::parse("17:22:21.9999999999").unwrap();
        assert_eq!(time.nanosecond(), 999_999_999);
        assert_eq!(time.second(), 21);

        let short = FhirTime::parse("17:22:21.12").unwrap();
        assert_eq!(short.nanosecond(), 120_000_000);
        assert_eq!(short.to_string(), "17:22:21.120000000");
    }

    #[test]
    fn test_leap_second_stored_verbatim() {
        let time = FhirTime::parse("23:59:60").unwrap();
        assert_eq!((time.hour(), time.minute(), time.second()), (23, 59, 60));

        let round_trip = FhirTime::from(time.to_naive_time().unwrap());
        assert_eq!((round_trip.second(), round_trip.nanosecond()), (60, 0));
        assert_eq!(round_trip.precision(), DateTimePrecision::Nanosecond);
    }

    #[test]
    fn test_with_precision_resets_lower_fields() {
        let time = FhirTime::with_precision(17, 22, 21, 5, DateTimePrecision::Minute);
        assert_eq!((time.second(), time.nanosecond()), (0, 0));
        assert_eq!(time, FhirTime::parse_fluent("17:22").unwrap());
        assert_eq!(
            FhirTime::with_precision(1, 2, 3, 4, DateTimePrecision::Year).precision(),
            DateTimePrecision::Hour
        );
    }

    #[test]
    fn test_nil() {
        let nil = FhirTime::nil();
        assert_eq!(nil.precision(), DateTimePrecision::Hour);
        assert_eq!(nil.to_string(), "");
        assert!(nil.is_nil());
    }
}
