//! `props` rewriting for component definitions.
//!
//! Development builds turn `type<T>()` prop annotations into runtime types.
//! Production builds collapse the props object to a list of prop names.

use oxc_ast::ast::{Expression, ObjectExpression, ObjectPropertyKind, PropertyKey};
use oxc_span::GetSpan;

use super::definition::Definition;
use super::ts_type::runtime_prop_type;
use crate::ast_utils::{find_property, strip_parens, ERASED};
use crate::macros::MacroKind;
use crate::options::BuildMode;
use crate::transform::TransformContext;

pub(crate) fn rewrite_props<'a>(ctx: &mut TransformContext<'a, '_>, definition: &Definition<'a>) {
    let Some(object) = definition.object else {
        return;
    };
    let Some((_, property)) = find_property(object, "props") else {
        return;
    };
    let Expression::ObjectExpression(props) = strip_parens(&property.value) else {
        return;
    };

    match ctx.options.mode {
        BuildMode::Development => annotate_props(ctx, props),
        BuildMode::Production => collapse_props(ctx, props),
    }
}

/// Replace each `type<T>()` call inside `props` with its runtime type.
fn annotate_props<'a>(ctx: &mut TransformContext<'a, '_>, props: &ObjectExpression<'a>) {
    let Some(alias) = ctx.references.type_alias().map(str::to_owned) else {
        return;
    };

    let sites = ctx.references.take_matching(MacroKind::Type, |site| {
        site.name.as_str() == alias && site.is_within(props.span) && site.call().is_some()
    });
    for site in sites {
        let Some(call) = site.call() else {
            continue;
        };
        let replacement = site
            .type_arguments
            .and_then(|arguments| arguments.params.first())
            .map_or_else(|| ERASED.to_string(), runtime_prop_type);
        tracing::trace!(start = call.span.start, %replacement, "annotating prop type");
        ctx.edits.overwrite(call.span.start, call.span.end, replacement);
    }
}

/// Replace `props` with the array of its keys.
fn collapse_props<'a>(ctx: &mut TransformContext<'a, '_>, props: &ObjectExpression<'a>) {
    // Annotations inside the collapsed object vanish with it.
    let consumed = ctx
        .references
        .take_matching(MacroKind::Type, |site| site.is_within(props.span));
    if !consumed.is_empty() {
        tracing::trace!(count = consumed.len(), "dropping prop annotations");
    }

    let names: Vec<String> = props
        .properties
        .iter()
        .map(|kind| match kind {
            ObjectPropertyKind::ObjectProperty(property) => {
                let key = property.key.span();
                let raw = ctx.edits.slice(key.start, key.end);
                if property.computed {
                    return raw.to_string();
                }
                match &property.key {
                    PropertyKey::StaticIdentifier(id) => ctx.quote(id.name.as_str()),
                    PropertyKey::StringLiteral(lit) => ctx.quote(lit.value.as_str()),
                    _ => ctx.quote(raw),
                }
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
                let argument = spread.argument.span();
                format!(
                    "...Object.keys({})",
                    ctx.edits.slice(argument.start, argument.end)
                )
            }
        })
        .collect();

    ctx.edits
        .overwrite(props.span.start, props.span.end, format!("[{}]", names.join(", ")));
}
