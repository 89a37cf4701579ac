//! Precision-aware value model for health data interchange
//!
//! This crate provides:
//! - Temporal values (date, date-time, time of day) that remember how much of
//!   their literal was specified
//! - Fixed-point decimal values with least-precision equivalence
//! - String-like, URI, quantity and collection values
//! - The type specification forest with common-base-type resolution
//! - The `Equal` / `Equivalent` comparison contract shared by every value

pub mod collection;
pub mod config;
pub mod data_type;
pub mod decimal;
pub mod precision;
pub mod quantity;
pub mod string;
pub mod temporal;
pub mod type_spec;
pub mod uri;
pub mod value;

pub use collection::Collection;
pub use config::{TypeDefinition, TypeModelConfig};
pub use data_type::{Accessor, DataType, PrimitiveAccessor, ValueComparison};
pub use decimal::FhirDecimal;
pub use precision::DateTimePrecision;
pub use quantity::{Quantity, QuantityComparator};
pub use string::{FhirString, StringKind, normalize_whitespace};
pub use temporal::{FhirDate, FhirDateTime, FhirTime, Temporal};
pub use type_spec::{
    FHIR_NAMESPACE, FqTypeName, TypeRegistry, TypeRegistryBuilder, TypeSpec, TypeSpecId,
};
pub use uri::{FhirUri, UCUM_SYSTEM_URI};
pub use value::{FhirValue, equal, equivalent};

pub use octofhir_himodel_diagnostics::{ModelError, Result};
