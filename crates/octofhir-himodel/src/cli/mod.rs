//! CLI functionality for the himodel tool
//!
//! This module contains all CLI-related functionality including:
//! - Literal parsing per grammar
//! - Value comparison
//! - Type registry queries
//! - Output formatting

pub mod compare;
pub mod literal;
pub mod output;
pub mod parse;
pub mod types;

use anyhow::{Context, Result};
use octofhir_himodel_types::{TypeModelConfig, TypeRegistry};
use std::path::Path;

/// The built-in registry, extended with a type model file when one is given
pub fn load_registry(types: Option<&Path>) -> Result<TypeRegistry> {
    let Some(path) = types else {
        return Ok(TypeRegistry::new());
    };
    let config = TypeModelConfig::from_file(path)
        .with_context(|| format!("Failed to load type model: {}", path.display()))?;
    let registry = config
        .build_registry()
        .with_context(|| format!("Invalid type model: {}", path.display()))?;
    log::debug!("registry holds {} types", registry.len());
    Ok(registry)
}
