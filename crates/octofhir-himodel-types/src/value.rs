//! The value sum type and the null-tolerant comparison entry points

use crate::collection::Collection;
use crate::data_type::{Accessor, DataType, ValueComparison};
use crate::decimal::FhirDecimal;
use crate::quantity::Quantity;
use crate::string::FhirString;
use crate::temporal::{FhirDate, FhirDateTime, FhirTime};
use crate::type_spec::TypeSpecId;
use crate::uri::FhirUri;
use std::fmt;

/// Any value of the model
#[derive(Debug, Clone, PartialEq)]
pub enum FhirValue {
    /// string, code, id or markdown
    String(FhirString),
    Uri(FhirUri),
    Decimal(FhirDecimal),
    Date(FhirDate),
    DateTime(FhirDateTime),
    Time(FhirTime),
    Quantity(Quantity),
    Collection(Collection),
}

impl FhirValue {
    fn as_accessor(&self) -> &dyn Accessor {
        match self {
            Self::String(v) => v,
            Self::Uri(v) => v,
            Self::Decimal(v) => v,
            Self::Date(v) => v,
            Self::DateTime(v) => v,
            Self::Time(v) => v,
            Self::Quantity(v) => v,
            Self::Collection(v) => v,
        }
    }

    fn as_comparison(&self) -> &dyn ValueComparison {
        match self {
            Self::String(v) => v,
            Self::Uri(v) => v,
            Self::Decimal(v) => v,
            Self::Date(v) => v,
            Self::DateTime(v) => v,
            Self::Time(v) => v,
            Self::Quantity(v) => v,
            Self::Collection(v) => v,
        }
    }

    /// Whether this is an absent primitive
    pub fn is_nil(&self) -> bool {
        self.data_type().is_primitive() && self.is_empty()
    }
}

impl Accessor for FhirValue {
    fn data_type(&self) -> DataType {
        self.as_accessor().data_type()
    }

    fn type_spec(&self) -> TypeSpecId {
        self.as_accessor().type_spec()
    }

    fn is_empty(&self) -> bool {
        self.as_accessor().is_empty()
    }
}

impl ValueComparison for FhirValue {
    fn equal(&self, other: &FhirValue) -> bool {
        self.as_comparison().equal(other)
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        self.as_comparison().equivalent(other)
    }
}

impl fmt::Display for FhirValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(v) => fmt::Display::fmt(v, f),
            Self::Uri(v) => fmt::Display::fmt(v, f),
            Self::Decimal(v) => fmt::Display::fmt(v, f),
            Self::Date(v) => fmt::Display::fmt(v, f),
            Self::DateTime(v) => fmt::Display::fmt(v, f),
            Self::Time(v) => fmt::Display::fmt(v, f),
            Self::Quantity(v) => fmt::Display::fmt(v, f),
            Self::Collection(v) => fmt::Display::fmt(v, f),
        }
    }
}

macro_rules! impl_from_value {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FhirValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_value! {
    String => FhirString,
    Uri => FhirUri,
    Decimal => FhirDecimal,
    Date => FhirDate,
    DateTime => FhirDateTime,
    Time => FhirTime,
    Quantity => Quantity,
    Collection => Collection,
}

/// Strict equality over possibly missing operands.
///
/// Two missing operands are equal; a missing operand never equals a present one.
pub fn equal(left: Option<&FhirValue>, right: Option<&FhirValue>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => left.equal(right),
        _ => false,
    }
}

/// Equivalence over possibly missing operands, with the same missing-operand rule as [`equal`]
pub fn equivalent(left: Option<&FhirValue>, right: Option<&FhirValue>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => left.equivalent(right),
        _ => false,
    }
}
