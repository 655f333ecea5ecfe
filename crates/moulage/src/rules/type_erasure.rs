//! Erasure of `type<T>()` calls outside of `props`.

use crate::ast_utils::ERASED;
use crate::error::MacroUsageError;
use crate::references::UsageSite;
use crate::transform::TransformContext;

pub(crate) fn erase_type_annotations<'a>(
    ctx: &mut TransformContext<'a, '_>,
    sites: Vec<UsageSite<'a>>,
) -> Result<(), MacroUsageError> {
    for site in sites {
        let call = site
            .call()
            .ok_or_else(|| MacroUsageError::not_called(&site.name, site.span))?;
        ctx.edits.overwrite(call.span.start, call.span.end, ERASED);
    }
    Ok(())
}
