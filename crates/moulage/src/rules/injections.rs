//! `[INJECTIONS]: {...}` becomes Vue's `inject` option.
//!
//! When the definition already declares `inject`, the injections are routed
//! through a mixin instead so neither declaration overwrites the other.

use moulage_carton::Fragment;
use oxc_ast::ast::{Expression, ObjectPropertyKind};
use oxc_span::GetSpan;

use super::key_strip::{key_property, KeyProperty};
use crate::ast_utils::{find_property, remove_property, strip_parens};
use crate::error::MacroUsageError;
use crate::references::UsageSite;
use crate::transform::TransformContext;

pub(crate) fn normalize_injections<'a>(
    ctx: &mut TransformContext<'a, '_>,
    sites: Vec<UsageSite<'a>>,
) -> Result<(), MacroUsageError> {
    for site in sites {
        let KeyProperty {
            object,
            index,
            property,
        } = key_property(&site)?;
        let value = &property.value;
        // Only a literal injection map can be renamed or moved.
        if property.shorthand || !matches!(strip_parens(value), Expression::ObjectExpression(_)) {
            return Err(MacroUsageError::not_an_injection_map(&site.name, property.span));
        }

        strip_spec_types(ctx, value);

        if find_property(object, "inject").is_none() {
            ctx.edits
                .overwrite(property.span.start, value.span().start, "inject: ");
            continue;
        }

        tracing::debug!(start = site.span.start, "routing injections through a mixin");
        let value_span = value.span();
        let mixin = |prefix: &str, suffix: &str| {
            Fragment::new()
                .text(format!("{prefix}{{ inject: "))
                .source(value_span.start, value_span.end)
                .text(format!(" }}{suffix}"))
        };

        let Some((_, mixins)) = find_property(object, "mixins") else {
            ctx.edits
                .overwrite(property.span.start, property.span.end, mixin("mixins: [", "]"));
            continue;
        };

        remove_property(&mut ctx.edits, object, index);
        match strip_parens(&mixins.value) {
            Expression::ArrayExpression(array) => match array.elements.last() {
                Some(last) => ctx.edits.append(last.span().end, mixin(", ", "")),
                None => ctx.edits.append(array.span.start + 1, mixin("", "")),
            },
            other => {
                let span = other.span();
                ctx.edits.prepend(span.start, "[...");
                ctx.edits.append(span.end, mixin(", ", "]"));
            }
        }
    }
    Ok(())
}

/// Drop the `type` field of every object-literal injection spec.
fn strip_spec_types(ctx: &mut TransformContext<'_, '_>, value: &Expression<'_>) {
    let Expression::ObjectExpression(injections) = strip_parens(value) else {
        return;
    };
    for kind in &injections.properties {
        let ObjectPropertyKind::ObjectProperty(injection) = kind else {
            continue;
        };
        if let Expression::ObjectExpression(spec) = strip_parens(&injection.value) {
            if let Some((index, _)) = find_property(spec, "type") {
                remove_property(&mut ctx.edits, spec, index);
            }
        }
    }
}
