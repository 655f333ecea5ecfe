//! Error types for the macro transform.

use moulage_carton::{CompactString, LineColumn, LineIndex};
use oxc_span::Span;
use serde::Serialize;
use thiserror::Error;

/// 1-based position of a usage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl From<LineColumn> for SourceLocation {
    fn from(value: LineColumn) -> Self {
        Self {
            line: value.line,
            column: value.column,
        }
    }
}

/// Misuse of a macro at a specific site.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct MacroUsageError {
    /// Local name of the offending macro.
    pub macro_name: CompactString,
    pub message: String,
    pub start: u32,
    pub end: u32,
    pub loc: Option<SourceLocation>,
}

impl MacroUsageError {
    pub fn at(macro_name: &str, span: Span, message: impl Into<String>) -> Self {
        Self {
            macro_name: CompactString::new(macro_name),
            message: message.into(),
            start: span.start,
            end: span.end,
            loc: None,
        }
    }

    pub(crate) fn not_an_object(macro_name: &str, span: Span) -> Self {
        Self::at(
            macro_name,
            span,
            format!("{macro_name} can only accept object expression to define vue component"),
        )
    }

    pub(crate) fn not_a_definition(macro_name: &str, span: Span) -> Self {
        Self::at(
            macro_name,
            span,
            format!(
                "{macro_name} can only accept object expression or render function to define vue component"
            ),
        )
    }

    pub(crate) fn not_an_injection_map(macro_name: &str, span: Span) -> Self {
        Self::at(
            macro_name,
            span,
            format!("[{macro_name}] must be given an object expression of injections."),
        )
    }

    pub(crate) fn wrong_arity(macro_name: &str, span: Span) -> Self {
        Self::at(
            macro_name,
            span,
            format!("{macro_name} must be called with exactly one argument"),
        )
    }

    pub(crate) fn not_called(macro_name: &str, span: Span) -> Self {
        Self::at(
            macro_name,
            span,
            format!("{macro_name} can only be used as a call expression"),
        )
    }

    pub(crate) fn missing_render(macro_name: &str, span: Span) -> Self {
        Self::at(
            macro_name,
            span,
            "render(context) function must be defined for functional component.",
        )
    }

    pub(crate) fn local_h(macro_name: &str, span: Span) -> Self {
        Self::at(
            macro_name,
            span,
            "Vue will inject 'h' identifier when parsing JSX, don't define local var 'h'.",
        )
    }

    pub(crate) fn not_a_key(macro_name: &str, span: Span) -> Self {
        Self::at(
            macro_name,
            span,
            format!("[{macro_name}] can be only used as object property key."),
        )
    }

    /// Fill in the line and column of `start`.
    pub fn with_location(mut self, source: &str) -> Self {
        let index = LineIndex::new(source);
        self.loc = Some(index.line_column(source, self.start).into());
        self
    }

    /// Human-readable diagnostic, `file:line:column: message`.
    pub fn diagnostic(&self, filename: Option<&str>) -> String {
        let file = filename.unwrap_or("<anonymous>");
        match self.loc {
            Some(loc) => format!("{file}:{}:{}: {}", loc.line, loc.column, self.message),
            None => format!("{file}: {}", self.message),
        }
    }
}

/// Errors returned by [`crate::transform_macros`].
#[derive(Debug, Error)]
pub enum MacroError {
    #[error("Failed to parse script: {0}")]
    Parse(String),

    #[error(transparent)]
    Usage(#[from] MacroUsageError),
}

impl MacroError {
    /// The usage error, if this is one.
    pub fn as_usage(&self) -> Option<&MacroUsageError> {
        match self {
            Self::Usage(err) => Some(err),
            Self::Parse(_) => None,
        }
    }
}
