//! Measured amounts with an optional comparator and unit

use crate::data_type::{Accessor, DataType, ValueComparison};
use crate::decimal::FhirDecimal;
use crate::string::{FhirString, StringKind};
use crate::type_spec::TypeSpecId;
use crate::uri::FhirUri;
use crate::value::FhirValue;
use octofhir_himodel_diagnostics::{HIM0010, ModelError, Result};
use std::fmt;
use std::str::FromStr;

/// How an actual value relates to the stated one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityComparator {
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl QuantityComparator {
    pub const fn code_str(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        }
    }

    /// The comparator as a `code` value
    pub fn as_code(self) -> FhirString {
        FhirString::new_unchecked(StringKind::Code, self.code_str())
    }
}

impl FromStr for QuantityComparator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessOrEqual),
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterOrEqual),
            _ => Err(ModelError::parse(HIM0010, "quantity comparator", s)),
        }
    }
}

impl fmt::Display for QuantityComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code_str())
    }
}

/// A quantity. Every component is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quantity {
    value: Option<FhirDecimal>,
    comparator: Option<QuantityComparator>,
    unit: Option<FhirString>,
    system: Option<FhirUri>,
    code: Option<FhirString>,
}

impl Quantity {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(
        value: Option<FhirDecimal>,
        comparator: Option<QuantityComparator>,
        unit: Option<FhirString>,
        system: Option<FhirUri>,
        code: Option<FhirString>,
    ) -> Self {
        Self {
            value,
            comparator,
            unit,
            system,
            code,
        }
    }

    /// A UCUM quantity whose unit and code are both `ucum_code`
    pub fn ucum(value: FhirDecimal, ucum_code: &str) -> Self {
        Self {
            value: Some(value),
            comparator: None,
            unit: Some(FhirString::new_unchecked(StringKind::String, ucum_code)),
            system: Some(FhirUri::ucum()),
            code: Some(FhirString::new_unchecked(StringKind::Code, ucum_code)),
        }
    }

    pub fn value(&self) -> Option<&FhirDecimal> {
        self.value.as_ref()
    }

    pub fn comparator(&self) -> Option<QuantityComparator> {
        self.comparator
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&FhirUri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&FhirString> {
        self.code.as_ref()
    }

    pub fn set_value(&mut self, value: Option<FhirDecimal>) -> &mut Self {
        self.value = value;
        self
    }

    pub fn set_comparator(&mut self, comparator: Option<QuantityComparator>) -> &mut Self {
        self.comparator = comparator;
        self
    }

    pub fn set_unit(&mut self, unit: Option<FhirString>) -> &mut Self {
        self.unit = unit;
        self
    }

    pub fn set_system(&mut self, system: Option<FhirUri>) -> &mut Self {
        self.system = system;
        self
    }

    pub fn set_code(&mut self, code: Option<FhirString>) -> &mut Self {
        self.code = code;
        self
    }

    fn equal_quantity(&self, other: &Quantity) -> bool {
        both(&self.value, &other.value, FhirDecimal::equal_decimal)
            && self.comparator == other.comparator
            && both(&self.unit, &other.unit, FhirString::equal_string)
            && self.system == other.system
            && both(&self.code, &other.code, FhirString::equal_string)
    }

    /// Ignores comparator and unit; the value itself still compares strictly.
    fn equivalent_quantity(&self, other: &Quantity) -> bool {
        both(&self.value, &other.value, FhirDecimal::equal_decimal)
            && self.system == other.system
            && both(&self.code, &other.code, FhirString::equal_string)
    }
}

/// Missing matches missing; otherwise both present and `matches`
fn both<T>(left: &Option<T>, right: &Option<T>, matches: impl Fn(&T, &T) -> bool) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => matches(left, right),
        _ => false,
    }
}

impl Accessor for Quantity {
    fn data_type(&self) -> DataType {
        DataType::Quantity
    }

    fn type_spec(&self) -> TypeSpecId {
        TypeSpecId::QUANTITY
    }

    fn is_empty(&self) -> bool {
        self.value.is_none()
            && self.comparator.is_none()
            && self.unit.is_none()
            && self.system.is_none()
            && self.code.is_none()
    }
}

impl ValueComparison for Quantity {
    fn equal(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Quantity(other) => self.equal_quantity(other),
            _ => false,
        }
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Quantity(other) => self.equivalent_quantity(other),
            _ => false,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.as_ref().map(ToString::to_string).unwrap_or_default();
        f.write_str(&value)?;
        if let Some(code) = &self.code {
            if !value.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}
