//! Type specifications
//!
//! Type specification nodes form a forest of single-inheritance chains. Nodes
//! live in an arena owned by [`TypeRegistry`] and are referred to by
//! [`TypeSpecId`]. The built-in element and resource types are always seeded
//! first, so their ids are the same in every registry and values can report
//! them without holding a registry reference.
//!
//! A registry is assembled once through [`TypeRegistryBuilder`] and is
//! immutable afterwards, so it can be shared freely between threads.

use crate::config::{TypeDefinition, TypeModelConfig};
use indexmap::IndexMap;
use octofhir_himodel_diagnostics::{HIM0101, HIM0102, HIM0103, ModelError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt;

/// Namespace of the built-in element and resource types
pub const FHIR_NAMESPACE: &str = "FHIR";

/// A type name with an optional namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FqTypeName {
    namespace: Option<String>,
    name: String,
}

impl FqTypeName {
    /// Create a name; an empty namespace means "no namespace"
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            namespace: (!namespace.is_empty()).then_some(namespace),
            name: name.into(),
        }
    }

    /// Create a name without namespace
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Create a name in the FHIR namespace
    pub fn fhir(name: impl Into<String>) -> Self {
        Self::new(FHIR_NAMESPACE, name)
    }

    /// Split `ns.name` at the first dot; a name without a dot is unqualified
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once('.') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::unqualified(qualified),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FqTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}.{}", namespace, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Stable identity of a type specification node inside a [`TypeRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeSpecId(u32);

impl TypeSpecId {
    pub const ELEMENT: Self = Self(0);
    pub const STRING: Self = Self(1);
    pub const CODE: Self = Self(2);
    pub const ID: Self = Self(3);
    pub const MARKDOWN: Self = Self(4);
    pub const URI: Self = Self(5);
    pub const DECIMAL: Self = Self(6);
    pub const DATE: Self = Self(7);
    pub const DATE_TIME: Self = Self(8);
    pub const TIME: Self = Self(9);
    pub const QUANTITY: Self = Self(10);
    pub const COLLECTION: Self = Self(11);
    pub const RESOURCE: Self = Self(12);
    pub const DOMAIN_RESOURCE: Self = Self(13);

    /// Position of the node in its registry's arena
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Built-in nodes in arena order: (id, namespace, name, base)
const BUILTINS: &[(TypeSpecId, &str, &str, Option<TypeSpecId>)] = &[
    (TypeSpecId::ELEMENT, FHIR_NAMESPACE, "Element", None),
    (TypeSpecId::STRING, FHIR_NAMESPACE, "string", Some(TypeSpecId::ELEMENT)),
    (TypeSpecId::CODE, FHIR_NAMESPACE, "code", Some(TypeSpecId::STRING)),
    (TypeSpecId::ID, FHIR_NAMESPACE, "id", Some(TypeSpecId::STRING)),
    (TypeSpecId::MARKDOWN, FHIR_NAMESPACE, "markdown", Some(TypeSpecId::STRING)),
    (TypeSpecId::URI, FHIR_NAMESPACE, "uri", Some(TypeSpecId::ELEMENT)),
    (TypeSpecId::DECIMAL, FHIR_NAMESPACE, "decimal", Some(TypeSpecId::ELEMENT)),
    (TypeSpecId::DATE, FHIR_NAMESPACE, "date", Some(TypeSpecId::ELEMENT)),
    (TypeSpecId::DATE_TIME, FHIR_NAMESPACE, "dateTime", Some(TypeSpecId::ELEMENT)),
    (TypeSpecId::TIME, FHIR_NAMESPACE, "time", Some(TypeSpecId::ELEMENT)),
    (TypeSpecId::QUANTITY, FHIR_NAMESPACE, "Quantity", Some(TypeSpecId::ELEMENT)),
    (TypeSpecId::COLLECTION, "", "Collection", None),
    (TypeSpecId::RESOURCE, FHIR_NAMESPACE, "Resource", None),
    (TypeSpecId::DOMAIN_RESOURCE, FHIR_NAMESPACE, "DomainResource", Some(TypeSpecId::RESOURCE)),
];

/// An immutable type specification node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    id: TypeSpecId,
    name: FqTypeName,
    base: Option<TypeSpecId>,
}

impl TypeSpec {
    pub fn id(&self) -> TypeSpecId {
        self.id
    }

    pub fn name(&self) -> &FqTypeName {
        &self.name
    }

    /// The direct base node, if any
    pub fn base(&self) -> Option<TypeSpecId> {
        self.base
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Immutable arena of type specification nodes
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    specs: Vec<TypeSpec>,
    by_name: IndexMap<FqTypeName, TypeSpecId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistryBuilder::new().build()
    }
}

impl TypeRegistry {
    /// Registry holding only the built-in types
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    pub fn get(&self, id: TypeSpecId) -> Option<&TypeSpec> {
        self.specs.get(id.index())
    }

    /// Look up a node by exact fully-qualified name
    pub fn lookup(&self, name: &FqTypeName) -> Option<TypeSpecId> {
        self.by_name.get(name).copied()
    }

    /// Resolve a possibly-qualified name.
    ///
    /// `ns.name` is looked up as written. A bare name is tried in the FHIR
    /// namespace first and then without namespace.
    pub fn resolve(&self, name: &str) -> Option<TypeSpecId> {
        resolve_name(&self.by_name, name)
    }

    /// The fully-qualified name of a node
    pub fn name_of(&self, id: TypeSpecId) -> Option<&FqTypeName> {
        self.get(id).map(TypeSpec::name)
    }

    pub fn base_of(&self, id: TypeSpecId) -> Option<TypeSpecId> {
        self.get(id).and_then(TypeSpec::base)
    }

    /// Walk from `id` (inclusive) to the root of its chain
    pub fn ancestors(&self, id: TypeSpecId) -> Ancestors<'_> {
        Ancestors {
            registry: self,
            next: self.get(id).map(TypeSpec::id),
        }
    }

    /// The full chain from `id` to its root, collected
    pub fn ancestor_chain(&self, id: TypeSpecId) -> SmallVec<[TypeSpecId; 8]> {
        self.ancestors(id).collect()
    }

    /// Whether `ancestor` is reachable from `id` by following zero or more base links
    pub fn is_derived_from(&self, id: TypeSpecId, ancestor: TypeSpecId) -> bool {
        self.ancestors(id).any(|candidate| candidate == ancestor)
    }

    /// Nearest common ancestor of two nodes, or `None` when their chains never meet
    pub fn common_base(&self, left: TypeSpecId, right: TypeSpecId) -> Option<TypeSpecId> {
        let left_chain: HashSet<TypeSpecId> = self.ancestors(left).collect();
        let found = self
            .ancestors(right)
            .find(|candidate| left_chain.contains(candidate));
        if found.is_none() {
            log::trace!(
                "no common base for {:?} and {:?}",
                self.name_of(left),
                self.name_of(right)
            );
        }
        found
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// All nodes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TypeSpec> {
        self.specs.iter()
    }
}

fn resolve_name(by_name: &IndexMap<FqTypeName, TypeSpecId>, name: &str) -> Option<TypeSpecId> {
    let parsed = FqTypeName::parse(name);
    if parsed.namespace().is_some() {
        return by_name.get(&parsed).copied();
    }
    by_name
        .get(&FqTypeName::fhir(name))
        .or_else(|| by_name.get(&parsed))
        .copied()
}

/// Iterator over a node and its bases, produced by [`TypeRegistry::ancestors`]
pub struct Ancestors<'a> {
    registry: &'a TypeRegistry,
    next: Option<TypeSpecId>,
}

impl Iterator for Ancestors<'_> {
    type Item = TypeSpecId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.registry.base_of(current);
        Some(current)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Assembles a [`TypeRegistry`], starting from the built-in types.
///
/// Bases must be registered before the types that derive from them, which
/// keeps every chain acyclic.
#[derive(Debug, Clone)]
pub struct TypeRegistryBuilder {
    specs: Vec<TypeSpec>,
    by_name: IndexMap<FqTypeName, TypeSpecId>,
}

impl Default for TypeRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            specs: Vec::with_capacity(BUILTINS.len()),
            by_name: IndexMap::with_capacity(BUILTINS.len()),
        };
        for (id, namespace, name, base) in BUILTINS {
            let name = FqTypeName::new(*namespace, *name);
            builder.by_name.insert(name.clone(), *id);
            builder.specs.push(TypeSpec {
                id: *id,
                name,
                base: *base,
            });
        }
        builder
    }

    /// Add a node. Fails on duplicate names and on bases that are not registered.
    pub fn register(&mut self, name: FqTypeName, base: Option<TypeSpecId>) -> Result<TypeSpecId> {
        if self.by_name.contains_key(&name) {
            return Err(ModelError::type_model_for(
                HIM0101,
                format!("type '{}' is already defined", name),
                name.to_string(),
            ));
        }
        if let Some(base) = base
            && base.index() >= self.specs.len()
        {
            return Err(ModelError::type_model_for(
                HIM0102,
                format!("base of type '{}' is not registered", name),
                name.to_string(),
            ));
        }

        let id = TypeSpecId(self.specs.len() as u32);
        log::debug!("registered type {} with base {:?}", name, base);
        self.by_name.insert(name.clone(), id);
        self.specs.push(TypeSpec { id, name, base });
        Ok(id)
    }

    /// Add a node whose base is given by name
    pub fn register_named(&mut self, name: FqTypeName, base: Option<&str>) -> Result<TypeSpecId> {
        let base_id = match base {
            Some(base_name) => Some(self.resolve(base_name).ok_or_else(|| {
                ModelError::type_model_for(
                    HIM0102,
                    format!("base type '{}' of '{}' is not defined", base_name, name),
                    name.to_string(),
                )
            })?),
            None => None,
        };
        self.register(name, base_id)
    }

    /// Add every type of a type model. Definitions may appear in any order.
    pub fn with_config(mut self, config: &TypeModelConfig) -> Result<Self> {
        let mut pending: Vec<_> = config.types.iter().collect();

        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();

            for definition in pending {
                let name = config.qualify(&definition.name);
                match definition.base.as_deref() {
                    None => {
                        self.register(name, None)?;
                    }
                    Some(base) => match self.resolve_in(&config.namespace, base) {
                        Some(base_id) => {
                            self.register(name, Some(base_id))?;
                        }
                        None => deferred.push(definition),
                    },
                }
            }

            if deferred.len() == before {
                return Err(self.stuck_definitions_error(config, &deferred));
            }
            pending = deferred;
        }

        log::info!(
            "loaded {} types from namespace '{}'",
            config.types.len(),
            config.namespace
        );
        Ok(self)
    }

    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            specs: self.specs,
            by_name: self.by_name,
        }
    }

    fn lookup(&self, name: &FqTypeName) -> Option<TypeSpecId> {
        self.by_name.get(name).copied()
    }

    fn resolve(&self, name: &str) -> Option<TypeSpecId> {
        resolve_name(&self.by_name, name)
    }

    /// Resolve a base name, preferring the model's own namespace for bare names
    fn resolve_in(&self, namespace: &str, name: &str) -> Option<TypeSpecId> {
        if !name.contains('.')
            && let Some(id) = self.lookup(&FqTypeName::new(namespace, name))
        {
            return Some(id);
        }
        self.resolve(name)
    }

    fn stuck_definitions_error(
        &self,
        config: &TypeModelConfig,
        stuck: &[&TypeDefinition],
    ) -> ModelError {
        let stuck_names: HashSet<FqTypeName> =
            stuck.iter().map(|d| config.qualify(&d.name)).collect();
        let base_name = |base: &str| {
            if base.contains('.') {
                FqTypeName::parse(base)
            } else {
                config.qualify(base)
            }
        };

        if let Some(definition) = stuck.iter().find(|d| {
            d.base
                .as_deref()
                .is_some_and(|base| stuck_names.contains(&base_name(base)))
        }) {
            return ModelError::type_model_for(
                HIM0103,
                format!(
                    "type '{}' takes part in a circular base chain",
                    config.qualify(&definition.name)
                ),
                definition.name.clone(),
            );
        }

        match stuck.iter().find_map(|d| d.base.as_deref().map(|base| (d, base))) {
            Some((definition, base)) => ModelError::type_model_for(
                HIM0102,
                format!(
                    "base type '{}' of '{}' is not defined",
                    base,
                    config.qualify(&definition.name)
                ),
                definition.name.clone(),
            ),
            None => ModelError::type_model(HIM0102, "type model contains unresolvable definitions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource_forest() -> (TypeRegistry, TypeSpecId, TypeSpecId, TypeSpecId) {
        let mut builder = TypeRegistry::builder();
        let patient = builder
            .register(FqTypeName::fhir("Patient"), Some(TypeSpecId::DOMAIN_RESOURCE))
            .unwrap();
        let person = builder
            .register(FqTypeName::fhir("Person"), Some(TypeSpecId::DOMAIN_RESOURCE))
            .unwrap();
        let other = builder
            .register(FqTypeName::unqualified("Other"), None)
            .unwrap();
        (builder.build(), patient, person, other)
    }

    #[test]
    fn test_fq_type_name_display() {
        assert_eq!(FqTypeName::new("ns3", "test1").to_string(), "ns3.test1");
        assert_eq!(FqTypeName::new("", "test").to_string(), "test");
        assert_eq!(FqTypeName::new("", "test").namespace(), None);
        assert_eq!(FqTypeName::parse("FHIR.Patient"), FqTypeName::fhir("Patient"));
    }

    #[test]
    fn test_builtin_ids_are_stable() {
        let registry = TypeRegistry::new();
        for (id, _, name, _) in BUILTINS {
            assert_eq!(registry.get(*id).unwrap().name().name(), *name);
        }
        assert_eq!(registry.resolve("code"), Some(TypeSpecId::CODE));
        assert_eq!(registry.resolve("Collection"), Some(TypeSpecId::COLLECTION));
        assert_eq!(
            registry.name_of(TypeSpecId::COLLECTION).unwrap().to_string(),
            "Collection"
        );
    }

    #[test]
    fn test_common_base() {
        let (registry, patient, person, other) = resource_forest();
        assert_eq!(
            registry.common_base(patient, person),
            Some(TypeSpecId::DOMAIN_RESOURCE)
        );
        assert_eq!(registry.common_base(patient, patient), Some(patient));
        assert_eq!(registry.common_base(patient, other), None);
        assert_eq!(
            registry.common_base(TypeSpecId::CODE, TypeSpecId::ID),
            Some(TypeSpecId::STRING)
        );
    }

    #[test]
    fn test_is_derived_from() {
        let (registry, patient, _, _) = resource_forest();
        assert!(registry.is_derived_from(patient, patient));
        assert!(registry.is_derived_from(patient, TypeSpecId::RESOURCE));
        assert!(!registry.is_derived_from(TypeSpecId::RESOURCE, patient));
        assert_eq!(
            registry.ancestor_chain(patient).as_slice(),
            &[patient, TypeSpecId::DOMAIN_RESOURCE, TypeSpecId::RESOURCE]
        );
    }

    #[test]
    fn test_register_duplicate() {
        let mut builder = TypeRegistry::builder();
        let err = builder
            .register(FqTypeName::fhir("string"), None)
            .unwrap_err();
        assert_eq!(err.code(), HIM0101);
    }

    #[test]
    fn test_register_named_unknown_base() {
        let mut builder = TypeRegistry::builder();
        let err = builder
            .register_named(FqTypeName::fhir("Patient"), Some("Nope"))
            .unwrap_err();
        assert_eq!(err.code(), HIM0102);
    }
}
