//! URI primitive

use crate::data_type::{Accessor, DataType, PrimitiveAccessor, ValueComparison};
use crate::type_spec::TypeSpecId;
use crate::value::FhirValue;
use octofhir_himodel_diagnostics::{HIM0009, ModelError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// System URI of the Unified Code for Units of Measure
pub const UCUM_SYSTEM_URI: &str = "http://unitsofmeasure.org";

static URI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S*$").expect("valid uri pattern"));

/// A URI. Only compares equal to other URIs, never to string-like values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FhirUri {
    value: String,
    absent: bool,
}

impl FhirUri {
    pub const GRAMMAR: &'static str = "uri";

    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !URI_PATTERN.is_match(&value) {
            log::debug!("rejected {} literal '{}'", Self::GRAMMAR, value);
            return Err(ModelError::parse(HIM0009, Self::GRAMMAR, value));
        }
        Ok(Self::new_unchecked(value))
    }

    /// # Panics
    ///
    /// Panics if `value` contains whitespace.
    pub fn new(value: impl Into<String>) -> Self {
        match Self::parse(value) {
            Ok(uri) => uri,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            absent: false,
        }
    }

    pub fn nil() -> Self {
        Self {
            value: String::new(),
            absent: true,
        }
    }

    /// The UCUM code system
    pub fn ucum() -> Self {
        Self::new_unchecked(UCUM_SYSTEM_URI)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Accessor for FhirUri {
    fn data_type(&self) -> DataType {
        DataType::Uri
    }

    fn type_spec(&self) -> TypeSpecId {
        TypeSpecId::URI
    }

    fn is_empty(&self) -> bool {
        self.absent
    }
}

impl PrimitiveAccessor for FhirUri {
    fn is_nil(&self) -> bool {
        self.absent
    }
}

impl ValueComparison for FhirUri {
    fn equal(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Uri(other) => self == other,
            _ => false,
        }
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        self.equal(other)
    }
}

impl fmt::Display for FhirUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(FhirUri::parse("urn:oid:1.2.3").unwrap().as_str(), "urn:oid:1.2.3");
        assert!(FhirUri::parse("").is_ok());
        assert_eq!(FhirUri::parse("has space").unwrap_err().code(), HIM0009);
    }

    #[test]
    fn test_ucum() {
        assert_eq!(FhirUri::ucum().to_string(), "http://unitsofmeasure.org");
        assert!(!FhirUri::ucum().is_nil());
    }

    #[test]
    fn test_nil() {
        assert!(FhirUri::nil().is_empty());
        assert_ne!(FhirUri::nil(), FhirUri::new(""));
    }
}
