//! `functional(...)`: functional component definitions.
//!
//! Both `functional(render)` and `functional({ render, ... })` end up as an
//! object literal tagged `functional: true` whose render function takes the
//! JSX element factory `h` as its first parameter.

use oxc_ast::ast::{Expression, FormalParameters};
use oxc_span::{GetSpan, Span};

use super::definition::{macro_call, unwrap_object, Definition};
use super::name::inject_component_name;
use super::props::rewrite_props;
use crate::ast_utils::{find_property, strip_parens};
use crate::error::MacroUsageError;
use crate::references::UsageSite;
use crate::transform::TransformContext;

/// Name of the element factory Vue's JSX transform calls.
const ELEMENT_FACTORY: &str = "h";

pub(crate) fn transform_functionals<'a>(
    ctx: &mut TransformContext<'a, '_>,
    sites: Vec<UsageSite<'a>>,
) -> Result<(), MacroUsageError> {
    for site in sites {
        transform_functional(ctx, &site)?;
    }
    Ok(())
}

fn transform_functional<'a>(
    ctx: &mut TransformContext<'a, '_>,
    site: &UsageSite<'a>,
) -> Result<(), MacroUsageError> {
    let (call, argument) = macro_call(site)?;
    let argument = strip_parens(argument);

    let mut definition = match argument {
        Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_) => {
            inject_element_factory(ctx, site, argument)?;
            let render = argument.span();
            ctx.edits.overwrite(call.span.start, render.start, "{ ");
            ctx.edits.prepend(render.start, "render: ");
            ctx.edits.overwrite(render.end, call.span.end, " }");
            Definition::synthesized(call, render.start)
        }
        Expression::ObjectExpression(object) => {
            let (_, render) = find_property(object, "render")
                .ok_or_else(|| MacroUsageError::missing_render(&site.name, object.span))?;
            inject_element_factory(ctx, site, &render.value)?;
            unwrap_object(&mut ctx.edits, call, object)
        }
        other => return Err(MacroUsageError::not_a_definition(&site.name, other.span())),
    };

    inject_component_name(ctx, site, &mut definition);
    definition.unshift_property(&mut ctx.edits, "functional", "true");
    rewrite_props(ctx, &definition);
    Ok(())
}

/// Make `h` the first parameter of a render function.
fn inject_element_factory<'a>(
    ctx: &mut TransformContext<'a, '_>,
    site: &UsageSite<'a>,
    render: &'a Expression<'a>,
) -> Result<(), MacroUsageError> {
    let (span, params, this_param) = match strip_parens(render) {
        Expression::FunctionExpression(function) => (
            function.span,
            &*function.params,
            function.this_param.as_ref().map(|param| param.span),
        ),
        Expression::ArrowFunctionExpression(arrow) => (arrow.span, &*arrow.params, None),
        _ => return Ok(()),
    };

    let first_is_factory = params
        .items
        .first()
        .and_then(|param| param.pattern.get_binding_identifier())
        .is_some_and(|id| id.name.as_str() == ELEMENT_FACTORY);
    if first_is_factory {
        return Ok(());
    }

    let shadowed = ctx
        .function_scope(span)
        .is_some_and(|scope| ctx.scopes.has_binding(scope, ELEMENT_FACTORY));
    if shadowed {
        return Err(MacroUsageError::local_h(&site.name, span));
    }

    prepend_parameter(ctx, params, this_param);
    Ok(())
}

fn prepend_parameter(
    ctx: &mut TransformContext<'_, '_>,
    params: &FormalParameters<'_>,
    this_param: Option<Span>,
) {
    if let Some(this_span) = this_param {
        ctx.edits.append(this_span.end, ", h");
    } else if let Some(first) = params.items.first() {
        // A bare arrow parameter is the whole parameter list.
        if params.span == first.span {
            ctx.edits.prepend(first.span.start, "(h, ");
            ctx.edits.append(first.span.end, ")");
        } else {
            ctx.edits.prepend(first.span.start, "h, ");
        }
    } else if let Some(rest) = &params.rest {
        ctx.edits.prepend(rest.span.start, "h, ");
    } else {
        // Parameter lists span their parentheses.
        ctx.edits.prepend(params.span.end - 1, ELEMENT_FACTORY);
    }
}
