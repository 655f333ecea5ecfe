//! Definition unwrapping: `component({...})` becomes `{...}`.

use moulage_carton::SourceEdits;
use oxc_ast::ast::{CallExpression, Expression, ObjectExpression};
use oxc_span::GetSpan;

use crate::ast_utils::{find_property, strip_parens};
use crate::error::MacroUsageError;
use crate::references::UsageSite;

/// The object literal a component-shaped rule works on.
#[derive(Debug)]
pub(crate) struct Definition<'a> {
    pub call: &'a CallExpression<'a>,
    /// `None` when the literal is synthesized around a bare render function.
    pub object: Option<&'a ObjectExpression<'a>>,
    /// Where synthesized properties go.
    insert_at: u32,
    has_properties: bool,
}

impl<'a> Definition<'a> {
    fn from_object(call: &'a CallExpression<'a>, object: &'a ObjectExpression<'a>) -> Self {
        let (insert_at, has_properties) = match object.properties.first() {
            Some(first) => (first.span().start, true),
            None => (object.span.start + 1, false),
        };
        Self {
            call,
            object: Some(object),
            insert_at,
            has_properties,
        }
    }

    /// A literal whose first property starts at `insert_at` in the output.
    pub fn synthesized(call: &'a CallExpression<'a>, insert_at: u32) -> Self {
        Self {
            call,
            object: None,
            insert_at,
            has_properties: true,
        }
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.object
            .is_some_and(|object| find_property(object, name).is_some())
    }

    /// Insert `key: value` as the first property.
    pub fn unshift_property(&mut self, edits: &mut SourceEdits<'_>, key: &str, value: &str) {
        let text = if self.has_properties {
            format!("{key}: {value}, ")
        } else {
            format!("{key}: {value}")
        };
        tracing::trace!(key, at = self.insert_at, "inserting definition property");
        edits.prepend(self.insert_at, text);
        self.has_properties = true;
    }
}

/// The call a definition macro heads, and its single argument.
pub(crate) fn macro_call<'a>(
    site: &UsageSite<'a>,
) -> Result<(&'a CallExpression<'a>, &'a Expression<'a>), MacroUsageError> {
    let call = site
        .call()
        .ok_or_else(|| MacroUsageError::not_called(&site.name, site.span))?;
    if call.arguments.len() != 1 {
        return Err(MacroUsageError::wrong_arity(&site.name, call.span));
    }
    let argument = call.arguments[0]
        .as_expression()
        .ok_or_else(|| MacroUsageError::not_an_object(&site.name, call.span))?;
    Ok((call, argument))
}

/// Replace the macro call with its object literal argument.
pub(crate) fn unwrap_definition<'a>(
    edits: &mut SourceEdits<'_>,
    site: &UsageSite<'a>,
) -> Result<Definition<'a>, MacroUsageError> {
    let (call, argument) = macro_call(site)?;
    match strip_parens(argument) {
        Expression::ObjectExpression(object) => Ok(unwrap_object(edits, call, object)),
        other => Err(MacroUsageError::not_an_object(&site.name, other.span())),
    }
}

pub(crate) fn unwrap_object<'a>(
    edits: &mut SourceEdits<'_>,
    call: &'a CallExpression<'a>,
    object: &'a ObjectExpression<'a>,
) -> Definition<'a> {
    edits.remove(call.span.start, object.span.start);
    edits.remove(object.span.end, call.span.end);
    Definition::from_object(call, object)
}
