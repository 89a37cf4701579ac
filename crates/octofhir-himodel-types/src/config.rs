//! Type model configuration
//!
//! Extra types are described in JSON and merged into a registry at startup:
//!
//! ```json
//! {
//!   "namespace": "FHIR",
//!   "types": [
//!     { "name": "Patient", "base": "DomainResource" },
//!     { "name": "Person", "base": "FHIR.DomainResource" }
//!   ]
//! }
//! ```

use crate::type_spec::{FHIR_NAMESPACE, FqTypeName, TypeRegistry, TypeRegistryBuilder};
use octofhir_himodel_diagnostics::{HIM0406, ModelError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A set of type definitions sharing one namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeModelConfig {
    /// Namespace of every defined type; empty for unqualified names
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

/// One type and the name of its base, if it has one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

fn default_namespace() -> String {
    FHIR_NAMESPACE.to_string()
}

impl Default for TypeModelConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            types: Vec::new(),
        }
    }
}

impl TypeModelConfig {
    /// Load a type model from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ModelError::system(HIM0406, format!("invalid type model: {}", e)))
    }

    /// Load a type model from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ModelError::io(path, &e))?;
        log::debug!("loading type model from {}", path.display());
        Self::from_json(&json).map_err(|e| e.with_context(path.display().to_string()))
    }

    /// Load a type model from a file, checking the extension first
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some(ext) => Err(ModelError::config(format!(
                "Unsupported file extension: .{}. Expected .json",
                ext
            ))),
            None => Err(ModelError::config(
                "No file extension found. Expected .json",
            )),
        }
    }

    /// Add a definition
    pub fn with_type(mut self, name: impl Into<String>, base: Option<&str>) -> Self {
        self.types.push(TypeDefinition {
            name: name.into(),
            base: base.map(str::to_string),
        });
        self
    }

    /// The fully-qualified name of a type defined by this model
    pub fn qualify(&self, name: &str) -> FqTypeName {
        FqTypeName::new(self.namespace.as_str(), name)
    }

    /// Build a registry holding the built-in types plus this model
    pub fn build_registry(&self) -> Result<TypeRegistry> {
        Ok(TypeRegistryBuilder::new().with_config(self)?.build())
    }
}
