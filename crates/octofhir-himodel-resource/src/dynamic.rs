use octofhir_himodel_diagnostics::{HIM0100, HIM0104, HIM0406, ModelError, Result};
use octofhir_himodel_types::{Accessor, DataType, TypeRegistry, TypeSpecId};
use serde_json::{Map, Value};

/// Member holding the name of the resource type
pub const RESOURCE_TYPE_KEY: &str = "resourceType";

/// A resource held as a JSON object, with its type resolved in a registry
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicResource {
    type_spec: TypeSpecId,
    properties: Map<String, Value>,
}

impl DynamicResource {
    /// An otherwise empty resource of the given type
    pub fn new(registry: &TypeRegistry, resource_type: &str) -> Result<Self> {
        let type_spec = resolve_resource_type(registry, resource_type)?;
        let mut properties = Map::new();
        properties.insert(
            RESOURCE_TYPE_KEY.to_string(),
            Value::String(resource_type.to_string()),
        );
        Ok(Self {
            type_spec,
            properties,
        })
    }

    /// Wrap an existing JSON object. `resourceType` must name a registered type.
    pub fn from_model(registry: &TypeRegistry, properties: Map<String, Value>) -> Result<Self> {
        let resource_type = match properties.get(RESOURCE_TYPE_KEY) {
            Some(Value::String(name)) => name.as_str(),
            _ => {
                return Err(ModelError::type_model(
                    HIM0100,
                    "resource has no string 'resourceType' member",
                ));
            }
        };
        let type_spec = resolve_resource_type(registry, resource_type)?;
        Ok(Self {
            type_spec,
            properties,
        })
    }

    /// Parse a JSON object text
    pub fn from_json(registry: &TypeRegistry, json: &str) -> Result<Self> {
        match serde_json::from_str(json) {
            Ok(Value::Object(properties)) => Self::from_model(registry, properties),
            Ok(other) => Err(ModelError::system(
                HIM0406,
                format!("expected a JSON object, found {}", json_kind(&other)),
            )),
            Err(e) => Err(ModelError::system(
                HIM0406,
                format!("invalid resource JSON: {}", e),
            )),
        }
    }

    /// The `resourceType` member, or `""` when it is not a string
    pub fn resource_type(&self) -> &str {
        self.properties
            .get(RESOURCE_TYPE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Raw value of a member
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.properties.get(field)
    }

    /// Members in document order, `resourceType` included
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn into_properties(self) -> Map<String, Value> {
        self.properties
    }
}

fn resolve_resource_type(registry: &TypeRegistry, resource_type: &str) -> Result<TypeSpecId> {
    let Some(type_spec) = registry.resolve(resource_type) else {
        log::debug!("unknown resource type '{}'", resource_type);
        return Err(ModelError::type_model_for(
            HIM0100,
            format!("unknown resource type '{}'", resource_type),
            resource_type,
        ));
    };
    if !registry.is_derived_from(type_spec, TypeSpecId::RESOURCE) {
        return Err(ModelError::type_model_for(
            HIM0104,
            format!("'{}' is not a resource type", resource_type),
            resource_type,
        ));
    }
    Ok(type_spec)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Accessor for DynamicResource {
    fn data_type(&self) -> DataType {
        DataType::Resource
    }

    fn type_spec(&self) -> TypeSpecId {
        self.type_spec
    }

    /// Nothing besides `resourceType` is set
    fn is_empty(&self) -> bool {
        self.properties.keys().all(|key| key == RESOURCE_TYPE_KEY)
    }
}
