//! Compile a catalog into the rule set that describes it exactly.

use crate::catalog::{TypeCatalog, TypeDescriptor};
use crate::rules::Rule;

/// One rule per catalog property, in catalog order.
///
/// A property is required when it is not nullable. A required type whose
/// properties are all nullable has every row marked required instead;
/// otherwise the required pass would find no rows for it. Validating the
/// result against the same catalog produces no diagnostics.
pub fn compile_rules(catalog: &TypeCatalog) -> Vec<Rule> {
    catalog.iter().flat_map(compile_type).collect()
}

fn compile_type(ty: &TypeDescriptor) -> impl Iterator<Item = Rule> + '_ {
    let anchor = ty.is_required && ty.properties.iter().all(|p| p.is_nullable);
    ty.properties.iter().map(move |p| Rule {
        entity: ty.name.clone(),
        entity_required: ty.is_required,
        property: p.name.clone(),
        expected_type: p.type_name.clone(),
        property_required: anchor || !p.is_nullable,
    })
}
