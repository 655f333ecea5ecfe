//! Key macros: `EVENTS`, `STATES` and `SCOPED_SLOTS`.
//!
//! They only carry types, so the whole property goes away.

use oxc_ast::ast::{ObjectExpression, ObjectProperty};
use oxc_span::GetSpan;

use crate::ast_utils::remove_property;
use crate::error::MacroUsageError;
use crate::references::UsageSite;
use crate::transform::TransformContext;

/// A key macro site resolved to its property.
pub(crate) struct KeyProperty<'a> {
    pub object: &'a ObjectExpression<'a>,
    pub index: usize,
    pub property: &'a ObjectProperty<'a>,
}

/// Resolve a site that must be the key of an object property.
pub(crate) fn key_property<'a>(site: &UsageSite<'a>) -> Result<KeyProperty<'a>, MacroUsageError> {
    let not_a_key = || MacroUsageError::not_a_key(&site.name, site.span);
    let property = site.key_property().ok_or_else(not_a_key)?;
    let object = site.owner_object(property).ok_or_else(not_a_key)?;
    let index = object
        .properties
        .iter()
        .position(|p| p.span() == property.span)
        .ok_or_else(not_a_key)?;
    Ok(KeyProperty {
        object,
        index,
        property,
    })
}

pub(crate) fn strip_key_macro<'a>(
    ctx: &mut TransformContext<'a, '_>,
    sites: Vec<UsageSite<'a>>,
) -> Result<(), MacroUsageError> {
    for site in sites {
        let KeyProperty { object, index, .. } = key_property(&site)?;
        tracing::trace!(key = site.kind.as_str(), index, "stripping key macro property");
        remove_property(&mut ctx.edits, object, index);
    }
    Ok(())
}
