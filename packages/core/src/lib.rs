//! Metadata validation for Digitale Delta OData services.
//!
//! This crate inspects an OData CSDL (EDMX) document, builds a flat catalog
//! of every structured type reachable from one root type, and compares that
//! catalog against a rule set of expected entities and properties. It is the
//! I/O-free foundation for the `ddv` CLI and the `ddvalidator-node` HTTP
//! service.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`model`] | CSDL parsing into an [`EdmModel`] |
//! | [`inspect`] | Cycle-safe type graph walk via [`inspect()`](inspect::inspect) |
//! | [`catalog`] | The [`TypeCatalog`] the walk produces |
//! | [`rules`] | Rule set CSV reading and writing |
//! | [`validation`] | Catalog vs. rule set comparison via [`validate`] |
//! | [`export`] | Rule set generation from a catalog |
//! | [`render`] | Human-readable text rendering |
//! | [`source`] | Local path / URL helpers for front ends |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ddvalidator::{validate_schema, ValidationOptions};
//!
//! let rules = std::fs::read_to_string("ValidationFiles/v3.csv")?;
//! let csdl = std::fs::read_to_string("metadata.xml")?;
//!
//! let report = validate_schema(&rules, &csdl, "Observation", ValidationOptions::default())?;
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//! ```

pub mod catalog;
pub mod export;
pub mod inspect;
pub mod model;
pub mod render;
pub mod rules;
pub mod source;
pub mod validation;

pub use catalog::{PropertyDescriptor, TypeCatalog, TypeDescriptor};
pub use export::compile_rules;
pub use inspect::{inspect, InspectError, DEFAULT_ROOT_TYPE, REQUIRED_TYPES};
pub use model::{EdmModel, ParseError};
pub use rules::{read_rules, write_rules, Rule, RuleError};
pub use validation::{validate, validate_with, Diagnostic, ValidationOptions, ValidationReport};

use thiserror::Error;

/// Any failure of [`validate_schema`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Rules(#[from] RuleError),

    #[error(transparent)]
    Inspect(#[from] InspectError),
}

/// Parse a rule set, inspect a schema from `root_type` and validate one
/// against the other.
///
/// Rule set problems are reported before schema problems. A schema that
/// breaks the rules is not an error: it yields a report with diagnostics.
pub fn validate_schema(
    rules_csv: &str,
    schema_text: &str,
    root_type: &str,
    options: ValidationOptions,
) -> Result<ValidationReport, Error> {
    let rules = read_rules(rules_csv)?;
    let catalog = inspect(schema_text, root_type)?;
    Ok(validate_with(&rules, &catalog, options))
}
