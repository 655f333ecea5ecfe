//! Small AST and text helpers shared by the rules.

use moulage_carton::SourceEdits;
use oxc_ast::ast::{Expression, ObjectExpression, ObjectProperty, ObjectPropertyKind, PropertyKey};
use oxc_span::GetSpan;

/// Expression every erased type annotation becomes.
pub const ERASED: &str = "void 0";

/// Skip any number of wrapping parentheses.
pub fn strip_parens<'b, 'a>(mut expr: &'b Expression<'a>) -> &'b Expression<'a> {
    while let Expression::ParenthesizedExpression(paren) = expr {
        expr = &paren.expression;
    }
    expr
}

/// Name of a non-computed identifier or string-literal key.
pub fn static_key_name<'b>(property: &'b ObjectProperty<'_>) -> Option<&'b str> {
    if property.computed {
        return None;
    }
    match &property.key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.as_str()),
        _ => None,
    }
}

/// First plain property named `name`, with its index in the object.
pub fn find_property<'b, 'a>(
    object: &'b ObjectExpression<'a>,
    name: &str,
) -> Option<(usize, &'b ObjectProperty<'a>)> {
    object
        .properties
        .iter()
        .enumerate()
        .find_map(|(index, kind)| match kind {
            ObjectPropertyKind::ObjectProperty(property)
                if static_key_name(property) == Some(name) =>
            {
                Some((index, &**property))
            }
            _ => None,
        })
}

/// Remove the property at `index`, together with its separating comma.
pub fn remove_property(edits: &mut SourceEdits<'_>, object: &ObjectExpression<'_>, index: usize) {
    let Some(property) = object.properties.get(index) else {
        return;
    };
    let span = property.span();
    let end = match object.properties.get(index + 1) {
        Some(next) => next.span().start,
        None => trailing_comma_end(edits.source(), span.end),
    };
    edits.remove(span.start, end);
}

/// Position after a comma following `pos`, or `pos` when there is none.
fn trailing_comma_end(source: &str, pos: u32) -> u32 {
    let rest = &source.as_bytes()[pos as usize..];
    let skipped = rest.iter().take_while(|b| b.is_ascii_whitespace()).count();
    match rest.get(skipped) {
        Some(b',') => pos + skipped as u32 + 1,
        _ => pos,
    }
}

/// Quote `value` as a JavaScript string literal.
pub fn quote_string(value: &str, single_quote: bool) -> String {
    let quote = if single_quote { '\'' } else { '"' };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
