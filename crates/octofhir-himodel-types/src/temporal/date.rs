//! Calendar date with year, month or day precision

use super::{Temporal, check_field, check_year, grammar, temporal_equal, temporal_equivalent, write_date_fields};
use crate::data_type::{Accessor, DataType, PrimitiveAccessor, ValueComparison};
use crate::precision::DateTimePrecision;
use crate::type_spec::TypeSpecId;
use crate::value::FhirValue;
use chrono::{Datelike, Days, NaiveDate};
use octofhir_himodel_diagnostics::{HIM0001, ModelError, Result};
use std::fmt;
use std::str::FromStr;

/// A date such as `2021`, `2021-03` or `2021-03-15`.
///
/// Day values are only checked against `1..=31`; `2021-02-30` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FhirDate {
    year: i32,
    month: u32,
    day: u32,
    precision: DateTimePrecision,
    absent: bool,
}

impl FhirDate {
    /// Grammar name used in parse errors
    pub const GRAMMAR: &'static str = "date";

    /// A date at day precision.
    ///
    /// # Panics
    ///
    /// Panics if a field is out of range.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self::with_precision(year, month, day, DateTimePrecision::Day)
    }

    /// A date at the given precision, clamped to `Year..=Day`.
    ///
    /// Fields below the precision are reset to 1.
    ///
    /// # Panics
    ///
    /// Panics if a field is out of range. Use [`FhirDate::try_with_precision`]
    /// for unchecked input.
    pub fn with_precision(year: i32, month: u32, day: u32, precision: DateTimePrecision) -> Self {
        match Self::try_with_precision(year, month, day, precision) {
            Ok(date) => date,
            Err(err) => panic!("{}", err),
        }
    }

    /// Checked variant of [`FhirDate::with_precision`]
    pub fn try_with_precision(
        year: i32,
        month: u32,
        day: u32,
        precision: DateTimePrecision,
    ) -> Result<Self> {
        let precision = precision.clamp_to(Self::LOWEST_PRECISION, Self::HIGHEST_PRECISION);
        let month = if precision >= DateTimePrecision::Month { month } else { 1 };
        let day = if precision >= DateTimePrecision::Day { day } else { 1 };

        check_year(year)?;
        check_field("month", month, 1..=12)?;
        check_field("day", day, 1..=31)?;

        Ok(Self {
            year,
            month,
            day,
            precision,
            absent: false,
        })
    }

    /// An absent date at day precision
    pub fn nil() -> Self {
        Self::nil_with_precision(DateTimePrecision::Day)
    }

    /// An absent date remembering a precision
    pub fn nil_with_precision(precision: DateTimePrecision) -> Self {
        Self {
            year: 1,
            month: 1,
            day: 1,
            precision: precision.clamp_to(Self::LOWEST_PRECISION, Self::HIGHEST_PRECISION),
            absent: true,
        }
    }

    /// Parse a `YYYY[-MM[-DD]]` literal
    pub fn parse(literal: &str) -> Result<Self> {
        let Some(caps) = grammar::DATE.captures(literal) else {
            log::debug!("rejected {} literal '{}'", Self::GRAMMAR, literal);
            return Err(ModelError::parse(HIM0001, Self::GRAMMAR, literal));
        };

        let year = grammar::number(&caps, 1).unwrap_or(1) as i32;
        let mut precision = DateTimePrecision::Year;
        let month = grammar::number(&caps, 2).inspect(|_| precision = DateTimePrecision::Month);
        let day = grammar::number(&caps, 3).inspect(|_| precision = DateTimePrecision::Day);

        Ok(Self {
            year,
            month: month.unwrap_or(1),
            day: day.unwrap_or(1),
            precision,
            absent: false,
        })
    }

    /// Build from a literal that is already known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if the literal does not match the date grammar.
    pub fn from_trusted(literal: &str) -> Self {
        match Self::parse(literal) {
            Ok(date) => date,
            Err(err) => panic!("{}", err),
        }
    }

    /// The same date at a coarser (or equal) precision
    pub fn truncate(&self, precision: DateTimePrecision) -> Self {
        if self.absent {
            return Self::nil_with_precision(precision.min(self.precision));
        }
        let precision = precision.min(self.precision);
        Self {
            month: if precision >= DateTimePrecision::Month { self.month } else { 1 },
            day: if precision >= DateTimePrecision::Day { self.day } else { 1 },
            precision,
            ..*self
        }
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

    pub fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    /// The calendar date, when present and valid in the calendar
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        if self.absent {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Day count used for comparison. Overflowing days roll into the next month.
    fn resolve(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)?
            .checked_add_days(Days::new(u64::from(self.day.saturating_sub(1))))
    }
}

impl Temporal for FhirDate {
    type Instant = NaiveDate;

    const LOWEST_PRECISION: DateTimePrecision = DateTimePrecision::Year;
    const HIGHEST_PRECISION: DateTimePrecision = DateTimePrecision::Day;

    fn is_absent(&self) -> bool {
        self.absent
    }

    fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    fn instant(&self) -> Option<NaiveDate> {
        if self.absent { None } else { self.resolve() }
    }
}

impl Accessor for FhirDate {
    fn data_type(&self) -> DataType {
        DataType::Date
    }

    fn type_spec(&self) -> TypeSpecId {
        TypeSpecId::DATE
    }

    fn is_empty(&self) -> bool {
        self.absent
    }
}

impl PrimitiveAccessor for FhirDate {
    fn is_nil(&self) -> bool {
        self.absent
    }
}

impl ValueComparison for FhirDate {
    fn equal(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Date(other) => temporal_equal(self, other),
            _ => false,
        }
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Date(other) => temporal_equivalent(self, other),
            _ => false,
        }
    }
}

impl fmt::Display for FhirDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absent {
            return Ok(());
        }
        write_date_fields(f, self.year, self.month, self.day, self.precision)
    }
}

impl FromStr for FhirDate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<NaiveDate> for FhirDate {
    type Error = ModelError;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::try_with_precision(date.year(), date.month(), date.day(), DateTimePrecision::Day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2021", DateTimePrecision::Year, 2021, 1, 1)]
    #[case("2021-03", DateTimePrecision::Month, 2021, 3, 1)]
    #[case("2021-03-15", DateTimePrecision::Day, 2021, 3, 15)]
    #[case("0001-12-31", DateTimePrecision::Day, 1, 12, 31)]
    fn test_parse(
        #[case] literal: &str,
        #[case] precision: DateTimePrecision,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let date = FhirDate::parse(literal).unwrap();
        assert_eq!(date.precision(), precision);
        assert_eq!((date.year(), date.month(), date.day()), (year, month, day));
        assert_eq!(date.to_string(), literal);
    }

    #[rstest]
    #[case("0000")]
    #[case("2021-13")]
    #[case("2021-00")]
    #[case("2021-01-32")]
    #[case("2021-1-1")]
    #[case("2021-01-01T10:00:00Z")]
    #[case("")]
    fn test_parse_invalid(#[case] literal: &str) {
        let err = FhirDate::parse(literal).unwrap_err();
        assert_eq!(err.code(), HIM0001);
        assert_eq!(err.literal(), Some(literal));
    }

    #[test]
    fn test_relaxed_day_validation() {
        let date = FhirDate::parse("2021-02-30").unwrap();
        assert_eq!(date.day(), 30);
        assert_eq!(date.to_naive_date(), None);
        assert_eq!(date.to_string(), "2021-02-30");
    }

    #[test]
    fn test_with_precision_resets_lower_fields() {
        let date = FhirDate::with_precision(2021, 3, 15, DateTimePrecision::Year);
        assert_eq!((date.month(), date.day()), (1, 1));
        assert_eq!(date, FhirDate::parse("2021").unwrap());

        let clamped = FhirDate::with_precision(2021, 3, 15, DateTimePrecision::Nanosecond);
        assert_eq!(clamped.precision(), DateTimePrecision::Day);
    }

    #[test]
    fn test_try_with_precision_out_of_range() {
        assert!(FhirDate::try_with_precision(2021, 13, 1, DateTimePrecision::Day).is_err());
        assert!(FhirDate::try_with_precision(0, 1, 1, DateTimePrecision::Day).is_err());
        // month 13 is ignored below month precision
        assert!(FhirDate::try_with_precision(2021, 13, 1, DateTimePrecision::Year).is_ok());
    }

    #[test]
    #[should_panic(expected = "invalid date literal")]
    fn test_from_trusted_panics() {
        FhirDate::from_trusted("2021-1");
    }

    #[test]
    fn test_truncate() {
        let date = FhirDate::new(2021, 3, 15);
        assert_eq!(date.truncate(DateTimePrecision::Month).to_string(), "2021-03");
        assert_eq!(date.truncate(DateTimePrecision::Hour), date);
    }

    #[test]
    fn test_nil_renders_empty() {
        assert_eq!(FhirDate::nil().to_string(), "");
        assert!(FhirDate::nil().is_nil());
        assert!(FhirDate::nil().is_empty());
    }

    #[test]
    fn test_from_naive_date() {
        let date = FhirDate::try_from(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()).unwrap();
        assert_eq!(date.to_string(), "2020-02-29");
    }
}
