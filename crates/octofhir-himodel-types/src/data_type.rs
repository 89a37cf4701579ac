//! Data type tags and the capability traits every value implements

use crate::type_spec::TypeSpecId;
use crate::value::FhirValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The dynamic kind of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    String,
    Code,
    Id,
    Markdown,
    Uri,
    Decimal,
    Date,
    DateTime,
    Time,
    Quantity,
    Collection,
    Resource,
}

impl DataType {
    /// Primitive element types (everything that can be nil)
    pub const fn is_primitive(self) -> bool {
        !matches!(self, Self::Quantity | Self::Collection | Self::Resource)
    }

    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Time)
    }

    /// The four tags that compare as interchangeable strings
    pub const fn is_string_like(self) -> bool {
        matches!(self, Self::String | Self::Code | Self::Id | Self::Markdown)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Code => "code",
            Self::Id => "id",
            Self::Markdown => "markdown",
            Self::Uri => "uri",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Time => "time",
            Self::Quantity => "Quantity",
            Self::Collection => "Collection",
            Self::Resource => "Resource",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uniform read access to any value
pub trait Accessor {
    /// The dynamic kind of this value
    fn data_type(&self) -> DataType;

    /// The type specification node describing this value
    fn type_spec(&self) -> TypeSpecId;

    /// Whether the value is semantically empty
    fn is_empty(&self) -> bool;
}

/// Primitive values additionally distinguish "no data" from zero content
pub trait PrimitiveAccessor: Accessor {
    fn is_nil(&self) -> bool;
}

/// Strict and tolerant comparison against any other value.
///
/// Both operations return `false` when `other` is of an incompatible kind.
pub trait ValueComparison {
    /// Strict equality: same kind, same precision, same represented value
    fn equal(&self, other: &FhirValue) -> bool;

    /// Tolerant equality: differing precision or formatting is normalized first
    fn equivalent(&self, other: &FhirValue) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_like_tags() {
        assert!(DataType::String.is_string_like());
        assert!(DataType::Code.is_string_like());
        assert!(DataType::Id.is_string_like());
        assert!(DataType::Markdown.is_string_like());
        assert!(!DataType::Uri.is_string_like());
        assert!(!DataType::Decimal.is_string_like());
    }

    #[test]
    fn test_categories() {
        assert!(DataType::DateTime.is_temporal());
        assert!(DataType::Uri.is_primitive());
        assert!(!DataType::Quantity.is_primitive());
        assert_eq!(DataType::DateTime.to_string(), "dateTime");
    }
}
