//! Precision-aware value model for FHIR primitives
//!
//! This crate provides:
//! - Date, date-time and time values that remember their precision
//! - Decimals with least-precision equivalence
//! - String-like, URI, quantity and collection values
//! - A type specification registry with common-base resolution
//! - Dynamic resources backed by JSON
//!
//! # Example
//!
//! ```
//! use octofhir_himodel::{FhirTime, FhirValue, ValueComparison};
//!
//! let left = FhirValue::from(FhirTime::parse_fluent("17:22:00.00")?);
//! let right = FhirValue::from(FhirTime::parse_fluent("17:22")?);
//!
//! assert!(!left.equal(&right));
//! assert!(left.equivalent(&right));
//! # Ok::<(), octofhir_himodel::ModelError>(())
//! ```

// Re-export all public APIs from internal crates
pub use octofhir_himodel_diagnostics as diagnostics;
pub use octofhir_himodel_resource as resource;
pub use octofhir_himodel_types as types;

// Convenience re-exports
pub use octofhir_himodel_diagnostics::{ErrorCode, ModelError, Result};
pub use octofhir_himodel_resource::DynamicResource;
pub use octofhir_himodel_types::{
    Accessor, Collection, DataType, DateTimePrecision, FhirDate, FhirDateTime, FhirDecimal,
    FhirString, FhirTime, FhirUri, FhirValue, PrimitiveAccessor, Quantity, QuantityComparator,
    StringKind, Temporal, TypeModelConfig, TypeRegistry, TypeRegistryBuilder, TypeSpecId,
    ValueComparison, equal, equivalent,
};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
