//! Literal grammars selectable on the command line

use clap::ValueEnum;
use octofhir_himodel_diagnostics::Result;
use octofhir_himodel_types::{
    DateTimePrecision, FhirDate, FhirDateTime, FhirDecimal, FhirString, FhirTime, FhirUri,
    FhirValue, StringKind,
};

/// Grammar used to read a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LiteralKind {
    Date,
    DateTime,
    /// Strict `HH:MM:SS[.fff]`
    Time,
    /// `HH[:MM[:SS[.fff]]]`
    FluentTime,
    Decimal,
    String,
    Code,
    Id,
    Markdown,
    Uri,
}

/// A parsed literal and, for temporal grammars, its precision
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLiteral {
    pub value: FhirValue,
    pub precision: Option<DateTimePrecision>,
}

impl ParsedLiteral {
    fn plain(value: impl Into<FhirValue>) -> Self {
        Self {
            value: value.into(),
            precision: None,
        }
    }
}

impl LiteralKind {
    pub fn parse(self, literal: &str) -> Result<ParsedLiteral> {
        Ok(match self {
            Self::Date => {
                let date = FhirDate::parse(literal)?;
                ParsedLiteral {
                    precision: Some(date.precision()),
                    value: date.into(),
                }
            }
            Self::DateTime => {
                let date_time = FhirDateTime::parse(literal)?;
                ParsedLiteral {
                    precision: Some(date_time.precision()),
                    value: date_time.into(),
                }
            }
            Self::Time | Self::FluentTime => {
                let time = if self == Self::Time {
                    FhirTime::parse(literal)?
                } else {
                    FhirTime::parse_fluent(literal)?
                };
                ParsedLiteral {
                    precision: Some(time.precision()),
                    value: time.into(),
                }
            }
            Self::Decimal => ParsedLiteral::plain(FhirDecimal::parse(literal)?),
            Self::String => ParsedLiteral::plain(FhirString::parse(StringKind::String, literal)?),
            Self::Code => ParsedLiteral::plain(FhirString::parse(StringKind::Code, literal)?),
            Self::Id => ParsedLiteral::plain(FhirString::parse(StringKind::Id, literal)?),
            Self::Markdown => {
                ParsedLiteral::plain(FhirString::parse(StringKind::Markdown, literal)?)
            }
            Self::Uri => ParsedLiteral::plain(FhirUri::parse(literal)?),
        })
    }
}
