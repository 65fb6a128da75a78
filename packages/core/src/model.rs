//! Navigable object model of a CSDL (OData EDMX) schema document.
//!
//! [`EdmModel::parse`] turns raw EDMX text into a model that exposes, for
//! every named top-level schema element, what the inspector needs: declared
//! structural and navigation properties, base type, key, and for every
//! property its target type, collection-ness and nullability.
//!
//! Elements are matched on their local name, so documents using the OData v4
//! CSDL namespace and older EDM namespaces parse the same way. Document type
//! declarations are rejected by the XML parser; no entity expansion happens.
//!
//! Schema aliases (`<Schema Namespace="Org.Example" Alias="ex">`) are
//! normalised during parsing: every type reference in the model is stored
//! with the full namespace.

use std::collections::{HashMap, HashSet};
use std::fmt;

use roxmltree::{Document, Node};
use thiserror::Error;

/// Errors returned when a schema document cannot be turned into a model.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("expected an edmx:Edmx or Schema root element, found {0:?}")]
    UnexpectedRoot(String),

    #[error("document contains no Schema element")]
    NoSchema,

    #[error("<{element}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> has invalid {attribute:?} value {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },
}

/// Prefix shared by all primitive type names.
pub const EDM_NAMESPACE: &str = "Edm";

/// Fully qualified name of the string primitive.
pub const EDM_STRING: &str = "Edm.String";

/// Check that `text` is a well-formed XML document without a document type
/// declaration. Says nothing about whether it is CSDL.
pub fn check_well_formed(text: &str) -> Result<(), ParseError> {
    Document::parse(text)?;
    Ok(())
}

/// A namespace-qualified element name, e.g. `DigitaleDelta.Observation`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: String,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// `namespace.name`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// The `Type` of a property: a qualified type name, possibly wrapped in
/// `Collection(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Qualified name of the value type, or of the element type for a
    /// collection.
    pub name: String,
    pub is_collection: bool,
}

impl TypeRef {
    /// Parse a CSDL type expression such as `Edm.String` or
    /// `Collection(DigitaleDelta.PointData)`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw
            .strip_prefix("Collection(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Some(inner) => Self {
                name: inner.trim().to_string(),
                is_collection: true,
            },
            None => Self {
                name: raw.to_string(),
                is_collection: false,
            },
        }
    }

    /// `true` for names in the `Edm` namespace.
    pub fn is_primitive(&self) -> bool {
        is_primitive_name(&self.name)
    }
}

/// Renders the type the way it appears in CSDL, e.g. `Collection(Edm.String)`.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_collection {
            write!(f, "Collection({})", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Whether a property came from `<Property>` or `<NavigationProperty>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Structural,
    Navigation,
}

/// One declared property of a structured type.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub type_ref: TypeRef,
    /// The `Nullable` attribute, when present.
    pub nullable: Option<bool>,
    pub kind: PropertyKind,
}

impl Property {
    /// Effective nullability: the `Nullable` attribute, defaulting to `true`.
    /// Collection-valued navigation properties (multiplicity `*`) are never
    /// null; an empty set is returned instead.
    pub fn is_nullable(&self) -> bool {
        if self.kind == PropertyKind::Navigation && self.type_ref.is_collection {
            return false;
        }
        self.nullable.unwrap_or(true)
    }
}

/// Entity or complex type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredKind {
    Entity,
    Complex,
}

/// An `EntityType` or `ComplexType` element.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredType {
    pub name: QualifiedName,
    pub kind: StructuredKind,
    pub base_type: Option<String>,
    pub is_abstract: bool,
    pub is_open: bool,
    /// Names of the declared key properties (entity types only).
    pub key: Vec<String>,
    /// Declared `<Property>` elements, in document order.
    pub properties: Vec<Property>,
    /// Declared `<NavigationProperty>` elements, in document order.
    pub navigation_properties: Vec<Property>,
}

impl StructuredType {
    pub fn full_name(&self) -> String {
        self.name.full_name()
    }

    /// Declared structural properties followed by declared navigation
    /// properties.
    pub fn all_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties
            .iter()
            .chain(self.navigation_properties.iter())
    }
}

/// A top-level child of a `<Schema>` element.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaElement {
    Structured(StructuredType),
    Enum(QualifiedName),
    TypeDefinition {
        name: QualifiedName,
        underlying_type: String,
    },
    /// Any other named element (`EntityContainer`, `Function`, `Term`, ...).
    Other {
        element: String,
        name: QualifiedName,
    },
}

impl SchemaElement {
    pub fn name(&self) -> &QualifiedName {
        match self {
            SchemaElement::Structured(t) => &t.name,
            SchemaElement::Enum(name) => name,
            SchemaElement::TypeDefinition { name, .. } => name,
            SchemaElement::Other { name, .. } => name,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredType> {
        match self {
            SchemaElement::Structured(t) => Some(t),
            _ => None,
        }
    }
}

/// One `<Schema>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub namespace: String,
    pub alias: Option<String>,
    pub elements: Vec<SchemaElement>,
}

/// The parsed schema document.
#[derive(Debug, Clone)]
pub struct EdmModel {
    schemas: Vec<Schema>,
    aliases: HashMap<String, String>,
    /// Full name → (schema index, element index). First declaration wins.
    index: HashMap<String, (usize, usize)>,
}

impl EdmModel {
    /// Parse an EDMX document (or a bare `<Schema>` document).
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let doc = Document::parse(text)?;
        let root = doc.root_element();

        let schema_nodes: Vec<Node> = match root.tag_name().name() {
            "Edmx" => child_elements(root, "DataServices")
                .flat_map(|ds| child_elements(ds, "Schema"))
                .collect(),
            "Schema" => vec![root],
            other => return Err(ParseError::UnexpectedRoot(other.to_string())),
        };
        if schema_nodes.is_empty() {
            return Err(ParseError::NoSchema);
        }

        let schemas = schema_nodes
            .into_iter()
            .map(parse_schema)
            .collect::<Result<Vec<_>, _>>()?;

        let aliases = schemas
            .iter()
            .filter_map(|s| s.alias.clone().map(|a| (a, s.namespace.clone())))
            .collect();

        let mut model = Self {
            schemas,
            aliases,
            index: HashMap::new(),
        };
        model.normalise_aliases();
        model.build_index();

        tracing::debug!(
            schemas = model.schemas.len(),
            elements = model.index.len(),
            "parsed CSDL model"
        );
        Ok(model)
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    /// All top-level elements in enumeration order: schemas in document
    /// order, elements in document order within each schema.
    pub fn elements(&self) -> impl Iterator<Item = &SchemaElement> {
        self.schemas.iter().flat_map(|s| s.elements.iter())
    }

    /// The first top-level element whose simple name is `name`.
    ///
    /// The namespace is not considered: when two schemas declare the same
    /// simple name, the one enumerated first wins.
    pub fn find_by_simple_name(&self, name: &str) -> Option<&SchemaElement> {
        self.elements().find(|e| e.name().name == name)
    }

    /// Look up an element by qualified name. Alias-qualified names are
    /// accepted.
    pub fn element(&self, full_name: &str) -> Option<&SchemaElement> {
        let canonical = self.canonical_name(full_name);
        self.index
            .get(canonical.as_str())
            .map(|&(s, e)| &self.schemas[s].elements[e])
    }

    pub fn structured_type(&self, full_name: &str) -> Option<&StructuredType> {
        self.element(full_name).and_then(SchemaElement::as_structured)
    }

    /// Key property names of `ty`: its declared key, or the key of the
    /// nearest base type declaring one.
    pub fn key_of<'a>(&'a self, ty: &'a StructuredType) -> &'a [String] {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = ty;
        loop {
            if !current.key.is_empty() {
                return &current.key;
            }
            let Some(base) = current.base_type.as_deref() else {
                return &[];
            };
            if !seen.insert(base) {
                return &[];
            }
            match self.structured_type(base) {
                Some(next) => current = next,
                None => return &[],
            }
        }
    }

    /// Resolve a type name to its primitive type name, following type
    /// definitions to their underlying type. Returns `None` for structured,
    /// enum and unknown types.
    pub fn resolve_primitive<'a>(&'a self, type_name: &'a str) -> Option<&'a str> {
        if is_primitive_name(type_name) {
            return Some(type_name);
        }
        match self.element(type_name)? {
            SchemaElement::TypeDefinition {
                underlying_type, ..
            } if is_primitive_name(underlying_type) => Some(underlying_type.as_str()),
            _ => None,
        }
    }

    /// Replace a leading schema alias with its namespace.
    pub fn canonical_name(&self, name: &str) -> String {
        canonicalise(&self.aliases, name)
    }

    fn normalise_aliases(&mut self) {
        if self.aliases.is_empty() {
            return;
        }
        let aliases = std::mem::take(&mut self.aliases);
        for schema in &mut self.schemas {
            for element in &mut schema.elements {
                match element {
                    SchemaElement::Structured(t) => {
                        if let Some(base) = t.base_type.as_mut() {
                            *base = canonicalise(&aliases, base);
                        }
                        for p in t
                            .properties
                            .iter_mut()
                            .chain(t.navigation_properties.iter_mut())
                        {
                            p.type_ref.name = canonicalise(&aliases, &p.type_ref.name);
                        }
                    }
                    SchemaElement::TypeDefinition {
                        underlying_type, ..
                    } => {
                        *underlying_type = canonicalise(&aliases, underlying_type);
                    }
                    _ => {}
                }
            }
        }
        self.aliases = aliases;
    }

    fn build_index(&mut self) {
        for (si, schema) in self.schemas.iter().enumerate() {
            for (ei, element) in schema.elements.iter().enumerate() {
                self.index
                    .entry(element.name().full_name())
                    .or_insert((si, ei));
            }
        }
    }
}

// --- parsing helpers ---------------------------------------------------------

fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
    local_name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == local_name)
}

fn required_attr<'a>(node: Node<'a, '_>, attribute: &'static str) -> Result<&'a str, ParseError> {
    node.attribute(attribute)
        .ok_or_else(|| ParseError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute,
        })
}

fn bool_attr(node: Node, attribute: &'static str) -> Result<Option<bool>, ParseError> {
    let Some(raw) = node.attribute(attribute) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(ParseError::InvalidAttribute {
            element: node.tag_name().name().to_string(),
            attribute,
            value: raw.to_string(),
        }),
    }
}

fn parse_schema(node: Node) -> Result<Schema, ParseError> {
    let namespace = required_attr(node, "Namespace")?.to_string();
    let alias = node.attribute("Alias").map(str::to_string);

    let mut elements = Vec::new();
    for child in node.children().filter(Node::is_element) {
        let tag = child.tag_name().name();
        let element = match tag {
            "EntityType" => SchemaElement::Structured(parse_structured(
                child,
                &namespace,
                StructuredKind::Entity,
            )?),
            "ComplexType" => SchemaElement::Structured(parse_structured(
                child,
                &namespace,
                StructuredKind::Complex,
            )?),
            "EnumType" => SchemaElement::Enum(QualifiedName::new(
                namespace.as_str(),
                required_attr(child, "Name")?,
            )),
            "TypeDefinition" => SchemaElement::TypeDefinition {
                name: QualifiedName::new(namespace.as_str(), required_attr(child, "Name")?),
                underlying_type: required_attr(child, "UnderlyingType")?.trim().to_string(),
            },
            // Unnamed children (Annotations, ...) are not schema elements.
            _ => match child.attribute("Name") {
                Some(name) => SchemaElement::Other {
                    element: tag.to_string(),
                    name: QualifiedName::new(namespace.as_str(), name),
                },
                None => continue,
            },
        };
        elements.push(element);
    }

    Ok(Schema {
        namespace,
        alias,
        elements,
    })
}

fn parse_structured(
    node: Node,
    namespace: &str,
    kind: StructuredKind,
) -> Result<StructuredType, ParseError> {
    let name = QualifiedName::new(namespace, required_attr(node, "Name")?);

    let key = child_elements(node, "Key")
        .flat_map(|k| child_elements(k, "PropertyRef"))
        .map(|r| required_attr(r, "Name").map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;

    let properties = child_elements(node, "Property")
        .map(|p| parse_property(p, PropertyKind::Structural))
        .collect::<Result<Vec<_>, _>>()?;

    let navigation_properties = child_elements(node, "NavigationProperty")
        .map(|p| parse_property(p, PropertyKind::Navigation))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StructuredType {
        name,
        kind,
        base_type: node.attribute("BaseType").map(|b| b.trim().to_string()),
        is_abstract: bool_attr(node, "Abstract")?.unwrap_or(false),
        is_open: bool_attr(node, "OpenType")?.unwrap_or(false),
        key,
        properties,
        navigation_properties,
    })
}

fn parse_property(node: Node, kind: PropertyKind) -> Result<Property, ParseError> {
    Ok(Property {
        name: required_attr(node, "Name")?.to_string(),
        type_ref: TypeRef::parse(required_attr(node, "Type")?),
        nullable: bool_attr(node, "Nullable")?,
        kind,
    })
}

fn is_primitive_name(name: &str) -> bool {
    name.strip_prefix(EDM_NAMESPACE)
        .is_some_and(|rest| rest.starts_with('.'))
}

fn canonicalise(aliases: &HashMap<String, String>, name: &str) -> String {
    if let Some((prefix, simple)) = name.rsplit_once('.') {
        if let Some(namespace) = aliases.get(prefix) {
            return format!("{namespace}.{simple}");
        }
    }
    name.to_string()
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DIGITALE_DELTA: &str = include_str!("../testdata/digitale_delta.xml");

    fn schema_doc(body: &str) -> String {
        format!(
            r#"<edmx:Edmx xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx" Version="4.0">
                 <edmx:DataServices>{body}</edmx:DataServices>
               </edmx:Edmx>"#
        )
    }

    #[test]
    fn parses_reference_document() {
        let model = EdmModel::parse(DIGITALE_DELTA).unwrap();
        assert_eq!(model.schemas().len(), 2);
        assert_eq!(model.schemas()[0].namespace, "DigitaleDelta");

        let obs = model.structured_type("DigitaleDelta.Observation").unwrap();
        assert_eq!(obs.kind, StructuredKind::Entity);
        assert_eq!(obs.key, vec!["Id".to_string()]);
        assert_eq!(obs.properties.len(), 8);
        assert_eq!(obs.navigation_properties.len(), 2);
        assert_eq!(obs.navigation_properties[1].name, "Result");
        assert_eq!(obs.navigation_properties[1].nullable, Some(false));

        let quality = &obs.properties[5];
        assert_eq!(quality.name, "ResultQuality");
        assert_eq!(quality.type_ref.name, "DigitaleDelta.DqElement");
        assert!(quality.type_ref.is_collection);
    }

    #[test]
    fn container_is_an_opaque_element() {
        let model = EdmModel::parse(DIGITALE_DELTA).unwrap();
        let container = model.element("Default.Container").unwrap();
        assert!(matches!(container, SchemaElement::Other { element, .. } if element == "EntityContainer"));
        assert!(container.as_structured().is_none());
    }

    #[test]
    fn complex_type_flags() {
        let model = EdmModel::parse(DIGITALE_DELTA).unwrap();
        let meta = model
            .structured_type("DigitaleDelta.TimeseriesMetadata")
            .unwrap();
        assert_eq!(meta.kind, StructuredKind::Complex);
        assert!(meta.is_abstract);
        assert!(!meta.is_open);
        assert_eq!(meta.navigation_properties.len(), 1);
    }

    #[test]
    fn key_is_inherited_from_base_type() {
        let model = EdmModel::parse(DIGITALE_DELTA).unwrap();
        let related = model
            .structured_type("DigitaleDelta.RelatedObservation")
            .unwrap();
        assert!(related.key.is_empty());
        assert_eq!(related.base_type.as_deref(), Some("DigitaleDelta.Observation"));
        assert_eq!(model.key_of(related), ["Id".to_string()]);
    }

    #[test]
    fn cyclic_base_types_do_not_hang_key_lookup() {
        let doc = schema_doc(
            r#"<Schema Namespace="N">
                 <EntityType Name="A" BaseType="N.B"/>
                 <EntityType Name="B" BaseType="N.A"/>
               </Schema>"#,
        );
        let model = EdmModel::parse(&doc).unwrap();
        let a = model.structured_type("N.A").unwrap();
        assert!(model.key_of(a).is_empty());
    }

    #[test]
    fn type_ref_parsing() {
        assert_eq!(
            TypeRef::parse("Collection(DigitaleDelta.PointData)"),
            TypeRef {
                name: "DigitaleDelta.PointData".into(),
                is_collection: true
            }
        );
        let s = TypeRef::parse("Edm.String");
        assert!(!s.is_collection);
        assert!(s.is_primitive());
        assert_eq!(
            TypeRef::parse("Collection(Edm.Int32)").to_string(),
            "Collection(Edm.Int32)"
        );
        assert!(!TypeRef::parse("Edmonton.City").is_primitive());
    }

    #[test]
    fn aliases_are_normalised() {
        let doc = schema_doc(
            r#"<Schema Namespace="Org.Example" Alias="ex">
                 <EntityType Name="Thing">
                   <Property Name="Part" Type="ex.Part"/>
                   <Property Name="Parts" Type="Collection(ex.Part)"/>
                 </EntityType>
                 <ComplexType Name="Part"/>
               </Schema>"#,
        );
        let model = EdmModel::parse(&doc).unwrap();
        let thing = model.structured_type("ex.Thing").unwrap();
        assert_eq!(thing.properties[0].type_ref.name, "Org.Example.Part");
        assert_eq!(thing.properties[1].type_ref.name, "Org.Example.Part");
        assert_eq!(model.canonical_name("ex.Thing"), "Org.Example.Thing");
    }

    #[test]
    fn type_definitions_resolve_to_underlying_primitive() {
        let doc = schema_doc(
            r#"<Schema Namespace="N">
                 <TypeDefinition Name="Code" UnderlyingType="Edm.String"/>
                 <EnumType Name="Kind"><Member Name="A"/></EnumType>
               </Schema>"#,
        );
        let model = EdmModel::parse(&doc).unwrap();
        assert_eq!(model.resolve_primitive("N.Code"), Some(EDM_STRING));
        assert_eq!(model.resolve_primitive("Edm.Int64"), Some("Edm.Int64"));
        assert_eq!(model.resolve_primitive("N.Kind"), None);
        assert_eq!(model.resolve_primitive("N.Missing"), None);
    }

    #[test]
    fn simple_name_lookup_returns_first_in_document_order() {
        let doc = schema_doc(
            r#"<Schema Namespace="First"><ComplexType Name="Item"/></Schema>
               <Schema Namespace="Second"><EntityType Name="Item"/></Schema>"#,
        );
        let model = EdmModel::parse(&doc).unwrap();
        let found = model.find_by_simple_name("Item").unwrap();
        assert_eq!(found.name().namespace, "First");
        assert!(model.find_by_simple_name("Nothing").is_none());
    }

    #[test]
    fn navigation_nullability_follows_multiplicity() {
        let doc = schema_doc(
            r#"<Schema Namespace="N">
                 <EntityType Name="A">
                   <NavigationProperty Name="One" Type="N.A" Nullable="false"/>
                   <NavigationProperty Name="Maybe" Type="N.A"/>
                   <NavigationProperty Name="Many" Type="Collection(N.A)"/>
                 </EntityType>
               </Schema>"#,
        );
        let model = EdmModel::parse(&doc).unwrap();
        let a = model.structured_type("N.A").unwrap();
        let nullable: Vec<bool> = a.navigation_properties.iter().map(Property::is_nullable).collect();
        assert_eq!(nullable, vec![false, true, false]);
    }

    #[test]
    fn bare_schema_root_is_accepted() {
        let model = EdmModel::parse(r#"<Schema Namespace="N"><EntityType Name="A"/></Schema>"#).unwrap();
        assert!(model.structured_type("N.A").is_some());
    }

    #[test]
    fn malformed_xml_is_rejected() {
        let err = EdmModel::parse("<edmx:Edmx><unclosed>").unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn dtd_is_rejected() {
        let doc = r#"<?xml version="1.0"?>
            <!DOCTYPE Schema [<!ENTITY x "boom">]>
            <Schema Namespace="N"><EntityType Name="A"/></Schema>"#;
        assert!(matches!(EdmModel::parse(doc), Err(ParseError::Xml(_))));
        assert!(check_well_formed(doc).is_err());
    }

    #[test]
    fn well_formedness_ignores_vocabulary() {
        assert!(check_well_formed("<html><body/></html>").is_ok());
        assert!(check_well_formed("{\"not\": \"xml\"}").is_err());
        assert!(check_well_formed("<a><b></a>").is_err());
    }

    #[test]
    fn unexpected_root_is_rejected() {
        let err = EdmModel::parse("<html><body/></html>").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot(ref r) if r == "html"));
    }

    #[test]
    fn empty_data_services_is_rejected() {
        let err = EdmModel::parse(&schema_doc("")).unwrap_err();
        assert!(matches!(err, ParseError::NoSchema));
    }

    #[test]
    fn missing_property_type_is_rejected() {
        let doc = schema_doc(
            r#"<Schema Namespace="N"><EntityType Name="A"><Property Name="X"/></EntityType></Schema>"#,
        );
        let err = EdmModel::parse(&doc).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingAttribute { attribute: "Type", .. }
        ));
    }

    #[test]
    fn invalid_nullable_is_rejected() {
        let doc = schema_doc(
            r#"<Schema Namespace="N"><EntityType Name="A"><Property Name="X" Type="Edm.String" Nullable="maybe"/></EntityType></Schema>"#,
        );
        assert!(matches!(
            EdmModel::parse(&doc),
            Err(ParseError::InvalidAttribute { attribute: "Nullable", .. })
        ));
    }
}
