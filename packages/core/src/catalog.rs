//! The typed catalog produced by inspection.
//!
//! A [`TypeCatalog`] maps fully qualified type names to [`TypeDescriptor`]s.
//! Entries keep the order in which the inspector discovered them, and that
//! order is the iteration order everywhere downstream (validation passes,
//! rule export, rendering, JSON output).
//!
//! Catalogs are only built by [`crate::inspect`]; once returned they are
//! read-only.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One property (declared or navigation) of a structured type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PropertyDescriptor {
    /// Simple property name, unique within the owning type.
    pub name: String,
    /// Fully qualified value type, or element type for a collection.
    pub type_name: String,
    pub is_key: bool,
    pub is_nullable: bool,
    /// The resolved primitive type is `Edm.String`.
    pub is_string: bool,
    pub is_collection: bool,
    pub is_navigation: bool,
}

/// One structured type (entity or complex type) reached during inspection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TypeDescriptor {
    /// Fully qualified type name; the catalog key.
    pub name: String,
    /// Member of [`crate::inspect::REQUIRED_TYPES`].
    pub is_required: bool,
    /// Declared properties in declaration order, then navigation properties.
    pub properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, is_required: bool) -> Self {
        Self {
            name: name.into(),
            is_required,
            properties: Vec::new(),
        }
    }

    /// The first property named `name`.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }
}

/// Insertion-ordered map from fully qualified type name to descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCatalog {
    entries: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
}

impl TypeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its name. Returns the slot of the new
    /// entry, or `None` if the name is already present (the existing entry is
    /// left untouched).
    pub(crate) fn register(&mut self, descriptor: TypeDescriptor) -> Option<usize> {
        if self.index.contains_key(&descriptor.name) {
            return None;
        }
        let slot = self.entries.len();
        self.index.insert(descriptor.name.clone(), slot);
        self.entries.push(descriptor);
        Some(slot)
    }

    /// Append a property to the entry at `slot`.
    pub(crate) fn push_property(&mut self, slot: usize, property: PropertyDescriptor) {
        self.entries[slot].properties.push(property);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.entries.iter()
    }

    /// Type names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|t| t.name.as_str())
    }
}

impl<'a> IntoIterator for &'a TypeCatalog {
    type Item = &'a TypeDescriptor;
    type IntoIter = std::slice::Iter<'a, TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serialises as a JSON object keyed by type name, in discovery order.
impl Serialize for TypeCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, entry)?;
        }
        map.end()
    }
}

// --- tests -------------------------------------------------------------------
