//! Rule set validation of a [`TypeCatalog`].
//!
//! [`validate`] runs two passes and concatenates their findings:
//!
//! 1. **Required but missing.** Every required catalog type with properties
//!    must appear in the rule set, and each of its required rules must name
//!    a property of the expected type.
//! 2. **Unknown to schema.** Every entity and property the rule set names
//!    must exist in the catalog.
//!
//! [`validate_with`] can add a third pass that reports catalog properties no
//! rule mentions. A report with no diagnostics is the only "valid" outcome.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::rules::Rule;

/// One discrepancy between a catalog and a rule set.
///
/// `Display` renders the human-readable message that front ends print and
/// write to result files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A required catalog type has no required rows in the rule set.
    EntityNotInRules { entity: String },

    /// A required rule names a property the catalog type does not have.
    MissingRequiredProperty { entity: String, property: String },

    /// A required rule names a property whose catalog type differs.
    IncorrectType {
        entity: String,
        property: String,
        expected: String,
        actual: String,
    },

    /// The rule set names an entity the schema never reaches.
    EntityNotInSchema { entity: String },

    /// A direct-property rule names a property the catalog type lacks.
    UnsupportedProperty { entity: String, property: String },

    /// A catalog property that no rule row of its entity mentions.
    /// Only reported with [`ValidationOptions::report_unlisted_properties`].
    UnlistedProperty { entity: String, property: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EntityNotInRules { entity } => {
                write!(f, "Entity {entity} not found in validation fields.")
            }
            Diagnostic::MissingRequiredProperty { entity, property } => {
                write!(f, "Required property {property} not found in entity {entity}.")
            }
            Diagnostic::IncorrectType {
                entity, property, ..
            } => write!(f, "Property {property} in entity {entity} has incorrect type."),
            Diagnostic::EntityNotInSchema { entity } => {
                write!(f, "Entity {entity} is not found in the CSDL properties.")
            }
            Diagnostic::UnsupportedProperty { entity, property } => write!(
                f,
                "Property {property} of entity {entity} is not found in the CSDL properties and therefore unsupported."
            ),
            Diagnostic::UnlistedProperty { entity, property } => write!(
                f,
                "Property {property} of entity {entity} is not listed in the validation fields."
            ),
        }
    }
}

/// Switches for checks beyond the two standard passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Also report catalog properties of rule-listed entities that no rule
    /// row names.
    pub report_unlisted_properties: bool,
}

/// Outcome of a validation run. Valid means no diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Rendered messages, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.diagnostics {
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Validate `catalog` against `rules` with default options.
pub fn validate(rules: &[Rule], catalog: &TypeCatalog) -> ValidationReport {
    validate_with(rules, catalog, ValidationOptions::default())
}

/// Validate `catalog` against `rules`.
///
/// Required-but-missing diagnostics come first (in catalog order), then
/// unknown-to-schema diagnostics (in order of each entity's first rule row),
/// then, if enabled, unlisted properties. Never fails.
pub fn validate_with(
    rules: &[Rule],
    catalog: &TypeCatalog,
    options: ValidationOptions,
) -> ValidationReport {
    let mut diagnostics = required_but_missing(rules, catalog);
    diagnostics.extend(unknown_to_schema(rules, catalog));
    if options.report_unlisted_properties {
        diagnostics.extend(unlisted_properties(rules, catalog));
    }

    debug!(
        rules = rules.len(),
        types = catalog.len(),
        diagnostics = diagnostics.len(),
        "validation complete"
    );
    ValidationReport { diagnostics }
}

// --- passes ------------------------------------------------------------------

fn required_but_missing(rules: &[Rule], catalog: &TypeCatalog) -> Vec<Diagnostic> {
    let groups = RuleGroups::new(
        rules
            .iter()
            .filter(|r| r.entity_required && r.property_required),
    );

    let mut out = Vec::new();
    for ty in catalog.iter().filter(|t| t.is_required && !t.properties.is_empty()) {
        let Some(group) = groups.get(&ty.name) else {
            out.push(Diagnostic::EntityNotInRules {
                entity: ty.name.clone(),
            });
            continue;
        };
        for rule in group {
            match ty.property(&rule.property) {
                None => out.push(Diagnostic::MissingRequiredProperty {
                    entity: ty.name.clone(),
                    property: rule.property.clone(),
                }),
                Some(p) if p.type_name != rule.expected_type => {
                    out.push(Diagnostic::IncorrectType {
                        entity: ty.name.clone(),
                        property: rule.property.clone(),
                        expected: rule.expected_type.clone(),
                        actual: p.type_name.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }
    out
}

fn unknown_to_schema(rules: &[Rule], catalog: &TypeCatalog) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (entity, group) in RuleGroups::new(rules.iter()).iter() {
        let Some(ty) = catalog.get(entity) else {
            out.push(Diagnostic::EntityNotInSchema {
                entity: entity.to_string(),
            });
            continue;
        };
        for rule in group
            .iter()
            .filter(|r| r.expected_type == ty.name && !ty.has_property(&r.property))
        {
            out.push(Diagnostic::UnsupportedProperty {
                entity: ty.name.clone(),
                property: rule.property.clone(),
            });
        }
    }
    out
}

fn unlisted_properties(rules: &[Rule], catalog: &TypeCatalog) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (entity, group) in RuleGroups::new(rules.iter()).iter() {
        let Some(ty) = catalog.get(entity) else {
            continue;
        };
        out.extend(unlisted_in(ty, group));
    }
    out
}

fn unlisted_in<'a>(
    ty: &'a TypeDescriptor,
    group: &'a [&'a Rule],
) -> impl Iterator<Item = Diagnostic> + 'a {
    ty.properties
        .iter()
        .filter(move |p| !group.iter().any(|r| r.property == p.name))
        .map(move |p| Diagnostic::UnlistedProperty {
            entity: ty.name.clone(),
            property: p.name.clone(),
        })
}

/// Rules grouped by entity, groups in order of first appearance.
struct RuleGroups<'r> {
    groups: Vec<(&'r str, Vec<&'r Rule>)>,
    index: HashMap<&'r str, usize>,
}

impl<'r> RuleGroups<'r> {
    fn new(rules: impl Iterator<Item = &'r Rule>) -> Self {
        let mut groups: Vec<(&'r str, Vec<&'r Rule>)> = Vec::new();
        let mut index = HashMap::new();
        for rule in rules {
            let slot = *index.entry(rule.entity.as_str()).or_insert_with(|| {
                groups.push((rule.entity.as_str(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(rule);
        }
        Self { groups, index }
    }

    fn get(&self, entity: &str) -> Option<&[&'r Rule]> {
        self.index
            .get(entity)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    fn iter(&self) -> impl Iterator<Item = (&'r str, &[&'r Rule])> {
        self.groups
            .iter()
            .map(|(entity, group)| (*entity, group.as_slice()))
    }
}

// --- tests -------------------------------------------------------------------
