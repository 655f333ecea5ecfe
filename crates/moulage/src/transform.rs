//! Transform entry point and rule dispatch.

use moulage_carton::{FxHashMap, SourceEdits};
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::Span;
use serde::Serialize;

use crate::ast_utils::quote_string;
use crate::error::{MacroError, MacroUsageError};
use crate::macros::MacroKind;
use crate::options::MacroOptions;
use crate::references::{collect_references, CollectedReferences, MacroImport, ReferenceMap};
use crate::rules;
use crate::scope::{ScopeId, ScopeTree};

/// Result of [`transform_macros`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTransformResult {
    /// Rewritten source.
    pub code: String,
    /// Whether anything was rewritten.
    pub changed: bool,
    /// Number of macro usage sites dispatched.
    pub usages: usize,
}

impl MacroTransformResult {
    fn unchanged(source: &str) -> Self {
        Self {
            code: source.to_string(),
            changed: false,
            usages: 0,
        }
    }
}

/// Shared state of one transform pass.
pub(crate) struct TransformContext<'a, 'o> {
    pub options: &'o MacroOptions,
    pub edits: SourceEdits<'a>,
    pub references: ReferenceMap<'a>,
    pub scopes: ScopeTree,
    function_scopes: FxHashMap<Span, ScopeId>,
}

impl<'a, 'o> TransformContext<'a, 'o> {
    fn new(
        source: &'a str,
        options: &'o MacroOptions,
        references: ReferenceMap<'a>,
        scopes: ScopeTree,
        function_scopes: FxHashMap<Span, ScopeId>,
    ) -> Self {
        Self {
            options,
            edits: SourceEdits::new(source),
            references,
            scopes,
            function_scopes,
        }
    }

    /// Scope of the function spanning `span`.
    #[inline]
    pub fn function_scope(&self, span: Span) -> Option<ScopeId> {
        self.function_scopes.get(&span).copied()
    }

    /// Quote a synthesized string literal in the configured style.
    #[inline]
    pub fn quote(&self, value: &str) -> String {
        quote_string(value, self.options.single_quote)
    }
}

/// Expand every macro usage in `source` into plain Vue component options.
///
/// Sources without an import of the macro module come back unchanged.
pub fn transform_macros(
    source: &str,
    options: &MacroOptions,
) -> Result<MacroTransformResult, MacroError> {
    if !options.may_import_macros(source) {
        tracing::debug!(filename = ?options.filename, "no macro import, skipping");
        return Ok(MacroTransformResult::unchanged(source));
    }

    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, options.source_type()).parse();
    if !ret.errors.is_empty() {
        let messages: Vec<String> = ret.errors.iter().map(|err| err.to_string()).collect();
        return Err(MacroError::Parse(messages.join("\n")));
    }
    let program = allocator.alloc(ret.program);

    let Some(CollectedReferences {
        imports,
        references,
        scopes,
        function_scopes,
    }) = collect_references(program, options)
    else {
        tracing::debug!(filename = ?options.filename, "no macro import, skipping");
        return Ok(MacroTransformResult::unchanged(source));
    };

    let mut ctx = TransformContext::new(source, options, references, scopes, function_scopes);
    let usages = ctx.references.len();
    tracing::debug!(
        filename = ?options.filename,
        mode = ?options.mode,
        usages,
        "transforming macros"
    );

    dispatch(&mut ctx).map_err(|err| err.with_location(source))?;
    remove_imports(&mut ctx.edits, &imports);

    Ok(MacroTransformResult {
        changed: !ctx.edits.is_empty(),
        code: ctx.edits.render(),
        usages,
    })
}

/// Run every rule over its usage sites, in [`MacroKind::DISPATCH_ORDER`].
fn dispatch(ctx: &mut TransformContext<'_, '_>) -> Result<(), MacroUsageError> {
    for kind in MacroKind::DISPATCH_ORDER {
        let sites = ctx.references.take(kind);
        if sites.is_empty() {
            continue;
        }
        tracing::debug!(key = kind.as_str(), sites = sites.len(), "dispatching macro rule");

        match kind {
            MacroKind::Component => rules::transform_components(ctx, sites)?,
            MacroKind::Functional => rules::transform_functionals(ctx, sites)?,
            MacroKind::Events | MacroKind::States | MacroKind::ScopedSlots => {
                rules::strip_key_macro(ctx, sites)?
            }
            MacroKind::Injections => rules::normalize_injections(ctx, sites)?,
            MacroKind::Type => rules::erase_type_annotations(ctx, sites)?,
        }
    }
    Ok(())
}

/// Remove macro import declarations with their line break.
fn remove_imports(edits: &mut SourceEdits<'_>, imports: &[MacroImport]) {
    let bytes = edits.source().as_bytes();
    for import in imports {
        let mut end = import.span.end as usize;
        if bytes.get(end) == Some(&b'\r') {
            end += 1;
        }
        if bytes.get(end) == Some(&b'\n') {
            end += 1;
        }
        edits.remove(import.span.start, end as u32);
    }
}
