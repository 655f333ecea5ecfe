//! `component({...})`: stateful component definitions.

use super::definition::unwrap_definition;
use super::name::inject_component_name;
use super::props::rewrite_props;
use crate::error::MacroUsageError;
use crate::references::UsageSite;
use crate::transform::TransformContext;

pub(crate) fn transform_components<'a>(
    ctx: &mut TransformContext<'a, '_>,
    sites: Vec<UsageSite<'a>>,
) -> Result<(), MacroUsageError> {
    for site in sites {
        let mut definition = unwrap_definition(&mut ctx.edits, &site)?;
        inject_component_name(ctx, &site, &mut definition);
        rewrite_props(ctx, &definition);
    }
    Ok(())
}
