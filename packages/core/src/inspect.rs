//! Type graph walker: turns a CSDL document into a [`TypeCatalog`].
//!
//! Starting from one named root type, the walker visits every structured
//! type reachable through declared properties, navigation properties and
//! collection element types, depth first.
//!
//! A type's descriptor is registered in the catalog *before* its properties
//! are walked. Re-entering a type that is already registered returns
//! immediately, which both deduplicates shared sub-types and terminates
//! cycles (self references, or loops through navigation properties).

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::catalog::{PropertyDescriptor, TypeCatalog, TypeDescriptor};
use crate::model::{
    EdmModel, ParseError, Property, PropertyKind, SchemaElement, StructuredType, EDM_STRING,
};

/// Types whose presence and property completeness the validation policy
/// requires.
pub const REQUIRED_TYPES: [&str; 4] = [
    "DigitaleDelta.Observation",
    "DigitaleDelta.ParameterContainer",
    "DigitaleDelta.Foi",
    "DigitaleDelta.Result",
];

/// Root type inspected when none is given.
pub const DEFAULT_ROOT_TYPE: &str = "Observation";

/// Errors returned by [`inspect`].
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("the provided CSDL cannot be empty or consist only of white-space characters")]
    EmptySchema,

    #[error("cannot find structured type {0:?} in the CSDL document")]
    TypeNotFound(String),

    #[error("failed to parse the CSDL document: {0}")]
    Parse(#[from] ParseError),
}

/// `true` if `full_name` is one of [`REQUIRED_TYPES`].
pub fn is_required_type(full_name: &str) -> bool {
    REQUIRED_TYPES.contains(&full_name)
}

/// Parse `schema_text` and catalog every type reachable from `root_type`.
///
/// `root_type` is a simple name (`Observation`, not
/// `DigitaleDelta.Observation`); the first top-level schema element with
/// that name is used, whatever its namespace.
pub fn inspect(schema_text: &str, root_type: &str) -> Result<TypeCatalog, InspectError> {
    if schema_text.trim().is_empty() {
        return Err(InspectError::EmptySchema);
    }
    let model = EdmModel::parse(schema_text)?;
    inspect_model(&model, root_type)
}

/// Catalog every type reachable from `root_type` in an already parsed model.
pub fn inspect_model(model: &EdmModel, root_type: &str) -> Result<TypeCatalog, InspectError> {
    let root = model
        .find_by_simple_name(root_type)
        .and_then(SchemaElement::as_structured)
        .ok_or_else(|| InspectError::TypeNotFound(root_type.to_string()))?;

    let mut walker = Walker {
        model,
        catalog: TypeCatalog::new(),
    };
    walker.walk(root);

    debug!(
        root = %root.name,
        types = walker.catalog.len(),
        "inspection complete"
    );
    Ok(walker.catalog)
}

struct Walker<'m> {
    model: &'m EdmModel,
    catalog: TypeCatalog,
}

/// A registered type whose properties are still being walked.
struct Frame<'m> {
    ty: &'m StructuredType,
    slot: usize,
    key: &'m [String],
    next: usize,
}

impl<'m> Frame<'m> {
    /// The next property in declared-then-navigation order.
    fn next_property(&mut self) -> Option<&'m Property> {
        let ty = self.ty;
        let property = match ty.properties.get(self.next) {
            Some(p) => p,
            None => ty
                .navigation_properties
                .get(self.next - ty.properties.len())?,
        };
        self.next += 1;
        Some(property)
    }
}

impl<'m> Walker<'m> {
    /// Depth-first walk with an explicit stack, so schema depth is bounded
    /// by heap rather than thread stack.
    fn walk(&mut self, root: &'m StructuredType) {
        let mut stack: Vec<Frame<'m>> = self.enter(root).into_iter().collect();

        while let Some(frame) = stack.last_mut() {
            let Some(property) = frame.next_property() else {
                stack.pop();
                continue;
            };
            let (slot, key) = (frame.slot, frame.key);
            self.catalog
                .push_property(slot, describe(self.model, property, key));
            if let Some(child) = self.structured_target(property).and_then(|t| self.enter(t)) {
                stack.push(child);
            }
        }
    }

    /// Register `ty` and return its frame, or `None` if it is already
    /// catalogued.
    fn enter(&mut self, ty: &'m StructuredType) -> Option<Frame<'m>> {
        let name = ty.full_name();
        let required = is_required_type(&name);
        let Some(slot) = self.catalog.register(TypeDescriptor::new(name, required)) else {
            trace!(r#type = %ty.name, "already catalogued");
            return None;
        };
        Some(Frame {
            ty,
            slot,
            key: self.model.key_of(ty),
            next: 0,
        })
    }

    /// The structured type a property's value (or collection element) has,
    /// if any.
    fn structured_target(&self, property: &Property) -> Option<&'m StructuredType> {
        if property.type_ref.is_primitive() {
            return None;
        }
        match self.model.element(&property.type_ref.name) {
            Some(SchemaElement::Structured(target)) => Some(target),
            Some(_) => None,
            None => {
                warn!(
                    property = %property.name,
                    r#type = %property.type_ref.name,
                    "property refers to a type that is not declared in the document"
                );
                None
            }
        }
    }
}

fn describe(model: &EdmModel, property: &Property, key: &[String]) -> PropertyDescriptor {
    let type_ref = &property.type_ref;
    PropertyDescriptor {
        name: property.name.clone(),
        type_name: type_ref.name.clone(),
        is_key: property.kind == PropertyKind::Structural && key.contains(&property.name),
        is_nullable: property.is_nullable(),
        is_string: !type_ref.is_collection
            && model.resolve_primitive(&type_ref.name) == Some(EDM_STRING),
        is_collection: type_ref.is_collection,
        is_navigation: property.kind == PropertyKind::Navigation,
    }
}

// --- tests -------------------------------------------------------------------
