//! Ordered, append-only collections of values

use crate::data_type::{Accessor, DataType, ValueComparison};
use crate::type_spec::{TypeRegistry, TypeSpecId};
use crate::value::FhirValue;
use std::fmt;

/// An ordered collection whose declared item type is fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    item_type: TypeSpecId,
    items: Vec<FhirValue>,
}

impl Collection {
    pub fn of(item_type: TypeSpecId) -> Self {
        Self {
            item_type,
            items: Vec::new(),
        }
    }

    pub fn with_items(item_type: TypeSpecId, items: impl IntoIterator<Item = FhirValue>) -> Self {
        Self {
            item_type,
            items: items.into_iter().collect(),
        }
    }

    pub fn item_type(&self) -> TypeSpecId {
        self.item_type
    }

    /// Append an item. The item type is not checked here; see [`Collection::conforms_to`].
    pub fn push(&mut self, item: impl Into<FhirValue>) {
        self.items.push(item.into());
    }

    /// Whether every item's type is the item type or derives from it
    pub fn conforms_to(&self, registry: &TypeRegistry) -> bool {
        self.items
            .iter()
            .all(|item| registry.is_derived_from(item.type_spec(), self.item_type))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FhirValue> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FhirValue> {
        self.items.iter()
    }

    fn equal_collection(&self, other: &Collection) -> bool {
        self.len() == other.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(left, right)| left.equal(right))
    }

    /// Every item is matched by a distinct equivalent item, in any order
    fn equivalent_collection(&self, other: &Collection) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut unmatched: Vec<&FhirValue> = other.items.iter().collect();
        self.items.iter().all(|item| {
            match unmatched.iter().position(|candidate| item.equivalent(candidate)) {
                Some(index) => {
                    unmatched.swap_remove(index);
                    true
                }
                None => false,
            }
        })
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a FhirValue;
    type IntoIter = std::slice::Iter<'a, FhirValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Accessor for Collection {
    fn data_type(&self) -> DataType {
        DataType::Collection
    }

    fn type_spec(&self) -> TypeSpecId {
        TypeSpecId::COLLECTION
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ValueComparison for Collection {
    fn equal(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Collection(other) => self.equal_collection(other),
            _ => false,
        }
    }

    fn equivalent(&self, other: &FhirValue) -> bool {
        match other {
            FhirValue::Collection(other) => self.equivalent_collection(other),
            _ => false,
        }
    }
}

/// Renders as `[a, b, c]`
impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}
