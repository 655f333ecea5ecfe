//! Component name inference for development builds.

use oxc_ast::ast::AssignmentTarget;
use oxc_ast::AstKind;
use oxc_span::GetSpan;

use super::definition::Definition;
use crate::ast_utils::strip_parens;
use crate::references::UsageSite;
use crate::transform::TransformContext;

/// Insert `name` as the first property unless the definition already has one.
///
/// The name comes from the nearest variable declarator or assignment holding the
/// definition, or else from the file name when the definition is default-exported.
pub(crate) fn inject_component_name<'a>(
    ctx: &mut TransformContext<'a, '_>,
    site: &UsageSite<'a>,
    definition: &mut Definition<'a>,
) {
    if ctx.options.mode.is_production() || definition.has_property("name") {
        return;
    }

    let name = binding_name(site, definition)
        .or_else(|| default_export_name(ctx, site).map(str::to_string));
    let Some(name) = name else {
        tracing::trace!(start = site.span.start, "definition left unnamed");
        return;
    };

    let value = ctx.quote(&name);
    definition.unshift_property(&mut ctx.edits, "name", &value);
}

fn binding_name(site: &UsageSite<'_>, definition: &Definition<'_>) -> Option<String> {
    let call = definition.call.span;
    site.ancestors()
        .find_map(|kind| match kind {
            AstKind::VariableDeclarator(declarator) => Some(
                declarator
                    .init
                    .as_ref()
                    .filter(|init| strip_parens(init).span() == call)
                    .and_then(|_| declarator.id.get_binding_identifier())
                    .map(|id| id.name.to_string()),
            ),
            AstKind::AssignmentExpression(assignment) => Some(
                match &assignment.left {
                    AssignmentTarget::AssignmentTargetIdentifier(id)
                        if strip_parens(&assignment.right).span() == call =>
                    {
                        Some(id.name.to_string())
                    }
                    _ => None,
                },
            ),
            _ => None,
        })
        .flatten()
}

fn default_export_name<'o>(ctx: &TransformContext<'_, 'o>, site: &UsageSite<'_>) -> Option<&'o str> {
    if !site.in_default_export() {
        return None;
    }
    ctx.options.file_stem()
}
