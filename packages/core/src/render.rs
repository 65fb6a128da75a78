//! Human-readable text rendering of [`TypeCatalog`]s and
//! [`ValidationReport`]s.
//!
//! The output is stable plain text for terminals and logs. It is not a
//! machine format; use the JSON serialisation of the catalog for that.

use crate::catalog::{PropertyDescriptor, TypeCatalog, TypeDescriptor};
use crate::validation::ValidationReport;

/// Render a whole catalog, one block per type in discovery order.
///
/// ```text
/// Type catalog  2 types
/// ─────────────────────
///
/// DigitaleDelta.Result  (required)
///   Id       Edm.String             key, string
///   Measure  DigitaleDelta.Measure  nullable
///
/// DigitaleDelta.Measure
///   Uom    Edm.String   string
///   Value  Edm.Decimal
/// ```
pub fn render_catalog(catalog: &TypeCatalog) -> String {
    let total = catalog.len();
    let header = format!(
        "Type catalog  {} type{}",
        total,
        if total == 1 { "" } else { "s" }
    );
    let rule = "─".repeat(header.chars().count());

    let mut out = format!("{}\n{}\n", header, rule);
    for ty in catalog {
        out.push('\n');
        out.push_str(&render_type(ty));
    }
    out
}

/// Render one type: a name line followed by one line per property.
pub fn render_type(ty: &TypeDescriptor) -> String {
    let mut out = ty.name.clone();
    if ty.is_required {
        out.push_str("  (required)");
    }
    out.push('\n');

    if ty.properties.is_empty() {
        out.push_str("  (no properties)\n");
        return out;
    }

    let types: Vec<String> = ty.properties.iter().map(display_type).collect();
    let name_width = ty.properties.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let type_width = types.iter().map(String::len).max().unwrap_or(0);

    for (p, type_name) in ty.properties.iter().zip(&types) {
        let flags = flags(p);
        let line = format!(
            "  {:<nw$}  {:<tw$}  {}",
            p.name,
            type_name,
            flags,
            nw = name_width,
            tw = type_width
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Render a validation report.
///
/// ```text
/// 2 diagnostics
///   • Required property Foo not found in entity DigitaleDelta.Observation.
///   • Entity DigitaleDelta.Zeta is not found in the CSDL properties.
/// ```
pub fn render_report(report: &ValidationReport) -> String {
    if report.is_valid() {
        return "Valid: no diagnostics\n".to_string();
    }
    let n = report.len();
    let mut out = format!("{} diagnostic{}\n", n, if n == 1 { "" } else { "s" });
    for d in &report.diagnostics {
        out.push_str(&format!("  • {}\n", d));
    }
    out
}

// --- helpers -----------------------------------------------------------------

fn display_type(p: &PropertyDescriptor) -> String {
    if p.is_collection {
        format!("Collection({})", p.type_name)
    } else {
        p.type_name.clone()
    }
}

fn flags(p: &PropertyDescriptor) -> String {
    let mut flags = Vec::new();
    if p.is_key {
        flags.push("key");
    }
    if p.is_navigation {
        flags.push("navigation");
    }
    if p.is_string {
        flags.push("string");
    }
    if p.is_nullable {
        flags.push("nullable");
    }
    flags.join(", ")
}

// --- tests -------------------------------------------------------------------
