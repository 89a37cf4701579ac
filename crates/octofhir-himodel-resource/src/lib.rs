//! Dynamic resources
//!
//! A [`DynamicResource`] is an untyped resource backed by an ordered JSON
//! object. Its type is taken from the `resourceType` member and resolved
//! against a [`TypeRegistry`] once, at construction.

mod dynamic;

pub use dynamic::{DynamicResource, RESOURCE_TYPE_KEY};

pub use octofhir_himodel_types::TypeRegistry;
