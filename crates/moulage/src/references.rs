//! Macro import discovery and usage-site collection.
//!
//! A single traversal records every reference to an imported macro together
//! with its ancestor chain, so rules can inspect the surrounding syntax without
//! a parent-pointer AST. References whose name resolves to a nearer binding
//! than the import are shadowed and dropped.

use std::cell::Cell;

use moulage_carton::{CompactString, FxHashMap, SmallVec};
use oxc_ast::ast::*;
use oxc_ast::AstKind;
use oxc_ast_visit::{walk, Visit};
use oxc_span::{GetSpan, Span};
use oxc_syntax::scope::{ScopeFlags, ScopeId as SemanticScopeId};

use crate::ast_utils::strip_parens;
use crate::macros::MacroKind;
use crate::options::MacroOptions;
use crate::scope::{ScopeId, ScopeTree};

/// One binding introduced by a macro import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroBinding {
    pub imported: CompactString,
    pub local: CompactString,
    /// `None` for names the macro module does not define.
    pub kind: Option<MacroKind>,
}

/// An import declaration of the macro module.
#[derive(Debug, Clone)]
pub struct MacroImport {
    /// Span of the whole declaration.
    pub span: Span,
    pub source: CompactString,
    pub bindings: SmallVec<[MacroBinding; 4]>,
}

/// Syntactic position of a usage site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitePosition {
    /// An identifier reference bound to the import.
    Reference,
    /// A non-computed property key spelled like an imported key macro.
    StaticKey,
}

/// A place in the program where a macro is used.
#[derive(Debug, Clone)]
pub struct UsageSite<'a> {
    pub kind: MacroKind,
    /// Local name of the macro at this site.
    pub name: CompactString,
    pub span: Span,
    pub position: SitePosition,
    /// Scope the site appears in.
    pub scope: ScopeId,
    /// Type arguments when the site is called as `name<T>()`.
    pub type_arguments: Option<&'a TSTypeParameterInstantiation<'a>>,
    ancestors: Vec<AstKind<'a>>,
}

impl<'a> UsageSite<'a> {
    /// Enclosing nodes, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = AstKind<'a>> + '_ {
        self.ancestors.iter().rev().copied()
    }

    /// Nearest enclosing node, skipping wrappers that share the site's span.
    /// A shorthand property shares the span of its value and still counts.
    pub fn parent(&self) -> Option<AstKind<'a>> {
        self.ancestors().find(|kind| {
            kind.span() != self.span || matches!(kind, AstKind::ObjectProperty(_))
        })
    }

    /// The call expression this site is the callee of.
    pub fn call(&self) -> Option<&'a CallExpression<'a>> {
        match self.parent()? {
            AstKind::CallExpression(call) if strip_parens(&call.callee).span() == self.span => {
                Some(call)
            }
            _ => None,
        }
    }

    /// The property this site is the key of.
    pub fn key_property(&self) -> Option<&'a ObjectProperty<'a>> {
        match self.parent()? {
            AstKind::ObjectProperty(property) if property.key.span() == self.span => {
                Some(property)
            }
            _ => None,
        }
    }

    /// Object literal owning `property`.
    pub fn owner_object(&self, property: &ObjectProperty<'_>) -> Option<&'a ObjectExpression<'a>> {
        self.ancestors().find_map(|kind| match kind {
            AstKind::ObjectExpression(object)
                if object.properties.iter().any(|p| p.span() == property.span) =>
            {
                Some(object)
            }
            _ => None,
        })
    }

    /// Whether the site sits inside an `export default` declaration.
    pub fn in_default_export(&self) -> bool {
        self.ancestors()
            .any(|kind| matches!(kind, AstKind::ExportDefaultDeclaration(_)))
    }

    #[inline]
    pub fn is_within(&self, span: Span) -> bool {
        span.start <= self.span.start && self.span.end <= span.end
    }
}

/// Usage sites grouped by macro kind, in source order.
#[derive(Debug, Default)]
pub struct ReferenceMap<'a> {
    sites: [Vec<UsageSite<'a>>; MacroKind::COUNT],
    type_alias: Option<CompactString>,
}

impl<'a> ReferenceMap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, site: UsageSite<'a>) {
        if site.kind == MacroKind::Type && self.type_alias.is_none() {
            self.type_alias = Some(site.name.clone());
        }
        self.sites[site.kind.index()].push(site);
    }

    #[inline]
    pub fn get(&self, kind: MacroKind) -> &[UsageSite<'a>] {
        &self.sites[kind.index()]
    }

    /// Take every remaining site of `kind`.
    pub fn take(&mut self, kind: MacroKind) -> Vec<UsageSite<'a>> {
        std::mem::take(&mut self.sites[kind.index()])
    }

    /// Take the sites of `kind` matching `predicate`, leaving the rest queued.
    pub fn take_matching(
        &mut self,
        kind: MacroKind,
        mut predicate: impl FnMut(&UsageSite<'a>) -> bool,
    ) -> Vec<UsageSite<'a>> {
        let sites = std::mem::take(&mut self.sites[kind.index()]);
        let (taken, kept): (Vec<_>, Vec<_>) = sites.into_iter().partition(|site| predicate(site));
        self.sites[kind.index()] = kept;
        taken
    }

    /// Local name of the first `type` usage in the program.
    #[inline]
    pub fn type_alias(&self) -> Option<&str> {
        self.type_alias.as_deref()
    }

    /// Number of queued sites.
    pub(crate) fn len(&self) -> usize {
        self.sites.iter().map(Vec::len).sum()
    }
}

/// Everything the rules need to know about the macro usages of a program.
#[derive(Debug)]
pub struct CollectedReferences<'a> {
    pub imports: Vec<MacroImport>,
    pub references: ReferenceMap<'a>,
    pub scopes: ScopeTree,
    /// Scope of each function, keyed by the function's span.
    pub function_scopes: FxHashMap<Span, ScopeId>,
}

/// Collect macro imports and usages. Returns `None` when the program does not
/// import the macro module.
pub fn collect_references<'a>(
    program: &'a Program<'a>,
    options: &MacroOptions,
) -> Option<CollectedReferences<'a>> {
    let imports = find_macro_imports(program, options);
    if imports.is_empty() {
        return None;
    }

    let mut locals = FxHashMap::default();
    for binding in imports.iter().flat_map(|import| &import.bindings) {
        match binding.kind {
            Some(kind) => {
                locals.insert(binding.local.clone(), kind);
            }
            None => tracing::warn!(
                imported = binding.imported.as_str(),
                "ignoring unknown macro import"
            ),
        }
    }

    let mut collector = ReferenceCollector::new(&locals);
    collector.visit_program(program);
    let ReferenceCollector {
        scopes,
        function_scopes,
        call_type_arguments,
        candidates,
        ..
    } = collector;

    let mut references = ReferenceMap::new();
    for mut site in candidates {
        if site.position == SitePosition::Reference
            && scopes.resolve(site.scope, &site.name) != Some(ScopeId::ROOT)
        {
            tracing::trace!(
                local = site.name.as_str(),
                start = site.span.start,
                "skipping shadowed reference"
            );
            continue;
        }
        if let Some(call) = site.call() {
            site.type_arguments = call_type_arguments.get(&call.span).copied();
        }
        references.push(site);
    }

    tracing::debug!(
        imports = imports.len(),
        usages = references.len(),
        scopes = scopes.len(),
        "collected macro references"
    );

    Some(CollectedReferences {
        imports,
        references,
        scopes,
        function_scopes,
    })
}

fn find_macro_imports(program: &Program<'_>, options: &MacroOptions) -> Vec<MacroImport> {
    let mut imports = Vec::new();
    for stmt in &program.body {
        let Statement::ImportDeclaration(decl) = stmt else {
            continue;
        };
        if decl.import_kind.is_type() || !options.is_macro_source(decl.source.value.as_str()) {
            continue;
        }

        let mut bindings = SmallVec::new();
        if let Some(specifiers) = &decl.specifiers {
            for specifier in specifiers {
                let (imported, local) = match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(s) => {
                        if s.import_kind.is_type() {
                            continue;
                        }
                        (module_export_name(&s.imported), s.local.name.as_str())
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        ("default", s.local.name.as_str())
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        ("*", s.local.name.as_str())
                    }
                };
                bindings.push(MacroBinding {
                    imported: CompactString::new(imported),
                    local: CompactString::new(local),
                    kind: MacroKind::from_name(imported),
                });
            }
        }

        imports.push(MacroImport {
            span: decl.span,
            source: CompactString::new(decl.source.value.as_str()),
            bindings,
        });
    }
    imports
}

fn module_export_name<'b>(name: &'b ModuleExportName<'_>) -> &'b str {
    match name {
        ModuleExportName::IdentifierName(id) => id.name.as_str(),
        ModuleExportName::IdentifierReference(id) => id.name.as_str(),
        ModuleExportName::StringLiteral(lit) => lit.value.as_str(),
    }
}

/// Nodes whose subtree is type-level syntax.
fn is_type_context(kind: &AstKind<'_>) -> bool {
    matches!(
        kind,
        AstKind::TSTypeAnnotation(_)
            | AstKind::TSTypeQuery(_)
            | AstKind::TSTypeReference(_)
            | AstKind::TSTypeAliasDeclaration(_)
            | AstKind::TSInterfaceDeclaration(_)
            | AstKind::TSTypeParameterInstantiation(_)
    )
}

struct ReferenceCollector<'a, 'm> {
    locals: &'m FxHashMap<CompactString, MacroKind>,
    ancestors: Vec<AstKind<'a>>,
    scopes: ScopeTree,
    scope_stack: Vec<ScopeId>,
    function_scopes: FxHashMap<Span, ScopeId>,
    /// Function whose scope is entered next.
    pending_function: Option<Span>,
    /// Scope receiving `var` bindings of the current declarator.
    hoist_into: Option<ScopeId>,
    type_depth: u32,
    call_type_arguments: FxHashMap<Span, &'a TSTypeParameterInstantiation<'a>>,
    candidates: Vec<UsageSite<'a>>,
}

impl<'a, 'm> ReferenceCollector<'a, 'm> {
    fn new(locals: &'m FxHashMap<CompactString, MacroKind>) -> Self {
        Self {
            locals,
            ancestors: Vec::with_capacity(32),
            scopes: ScopeTree::new(),
            scope_stack: Vec::with_capacity(8),
            function_scopes: FxHashMap::default(),
            pending_function: None,
            hoist_into: None,
            type_depth: 0,
            call_type_arguments: FxHashMap::default(),
            candidates: Vec::new(),
        }
    }

    #[inline]
    fn current_scope(&self) -> ScopeId {
        self.scope_stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    fn declare(&mut self, name: &str) {
        let scope = self.current_scope();
        self.scopes.add_binding(scope, name);
    }

    fn record(&mut self, kind: MacroKind, name: &str, span: Span, position: SitePosition) {
        self.candidates.push(UsageSite {
            kind,
            name: CompactString::new(name),
            span,
            position,
            scope: self.current_scope(),
            type_arguments: None,
            ancestors: self.ancestors.clone(),
        });
    }
}

impl<'a> Visit<'a> for ReferenceCollector<'a, '_> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        let locals = self.locals;
        match kind {
            AstKind::IdentifierReference(ident) if self.type_depth == 0 => {
                if let Some(&macro_kind) = locals.get(ident.name.as_str()) {
                    self.record(
                        macro_kind,
                        ident.name.as_str(),
                        ident.span,
                        SitePosition::Reference,
                    );
                }
            }
            AstKind::TSTypeParameterInstantiation(instantiation) => {
                if let Some(AstKind::CallExpression(call)) = self.ancestors.last() {
                    self.call_type_arguments.insert(call.span, instantiation);
                }
            }
            _ => {}
        }

        if is_type_context(&kind) {
            self.type_depth += 1;
        }
        self.ancestors.push(kind);

        if let AstKind::ObjectProperty(property) = kind {
            if property.computed || property.shorthand {
                return;
            }
            if let PropertyKey::StaticIdentifier(key) = &property.key {
                let name = key.name.as_str();
                if let Some(&macro_kind) = locals.get(name) {
                    if macro_kind.is_key_macro() {
                        self.record(macro_kind, name, key.span, SitePosition::StaticKey);
                    }
                }
            }
        }
    }

    fn leave_node(&mut self, kind: AstKind<'a>) {
        self.ancestors.pop();
        if is_type_context(&kind) {
            self.type_depth -= 1;
        }
    }

    fn enter_scope(&mut self, flags: ScopeFlags, _scope_id: &Cell<Option<SemanticScopeId>>) {
        let parent = self.scope_stack.last().copied();
        let scope = self
            .scopes
            .add_scope(parent, flags.is_top() || flags.is_function());
        if flags.is_function() {
            if let Some(span) = self.pending_function.take() {
                self.function_scopes.insert(span, scope);
            }
        }
        self.scope_stack.push(scope);
    }

    fn leave_scope(&mut self) {
        self.scope_stack.pop();
    }

    fn visit_function(&mut self, it: &Function<'a>, flags: ScopeFlags) {
        if matches!(it.r#type, FunctionType::FunctionDeclaration) {
            if let Some(id) = &it.id {
                self.declare(id.name.as_str());
            }
        }
        self.pending_function = Some(it.span);
        walk::walk_function(self, it, flags);
    }

    fn visit_arrow_function_expression(&mut self, it: &ArrowFunctionExpression<'a>) {
        self.pending_function = Some(it.span);
        walk::walk_arrow_function_expression(self, it);
    }

    fn visit_class(&mut self, it: &Class<'a>) {
        if matches!(it.r#type, ClassType::ClassDeclaration) {
            if let Some(id) = &it.id {
                self.declare(id.name.as_str());
            }
        }
        walk::walk_class(self, it);
    }

    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        let saved = self.hoist_into.take();
        if matches!(it.kind, VariableDeclarationKind::Var) {
            self.hoist_into = Some(self.scopes.hoisting_scope(self.current_scope()));
        }
        walk::walk_variable_declarator(self, it);
        self.hoist_into = saved;
    }

    fn visit_expression(&mut self, it: &Expression<'a>) {
        // Initializers and defaults never declare into the hoisting scope.
        let saved = self.hoist_into.take();
        walk::walk_expression(self, it);
        self.hoist_into = saved;
    }

    fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
        let name = it.name.as_str();
        self.declare(name);
        if let Some(scope) = self.hoist_into {
            self.scopes.add_binding(scope, name);
        }
        walk::walk_binding_identifier(self, it);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn collect(source: &str, f: impl for<'a> FnOnce(Option<CollectedReferences<'a>>)) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        let program = allocator.alloc(ret.program);
        f(collect_references(program, &MacroOptions::default()));
    }

    fn names(references: &ReferenceMap<'_>, kind: MacroKind) -> Vec<String> {
        references
            .get(kind)
            .iter()
            .map(|site| site.name.to_string())
            .collect()
    }

    #[test]
    fn test_no_macro_import() {
        collect("import { component } from 'vue'; component({})", |collected| {
            assert!(collected.is_none());
        });
    }

    #[test]
    fn test_type_only_import_is_ignored() {
        collect("import type { component } from 'vue-jsx.macro';", |collected| {
            assert!(collected.is_none());
        });
    }

    #[test]
    fn test_collects_aliased_imports() {
        collect(
            "import { component as c, EVENTS, unknown } from 'vue-jsx.macro';\n\
             c({ [EVENTS]: {} });\n\
             c({});",
            |collected| {
                let collected = collected.unwrap();
                assert_eq!(collected.imports.len(), 1);
                assert_eq!(collected.imports[0].bindings.len(), 3);
                assert_eq!(collected.imports[0].bindings[2].kind, None);

                let references = &collected.references;
                assert_eq!(names(references, MacroKind::Component), vec!["c", "c"]);
                assert_eq!(names(references, MacroKind::Events), vec!["EVENTS"]);
                assert_eq!(references.len(), 3);
            },
        );
    }

    #[test]
    fn test_shadowed_references_are_skipped() {
        collect(
            "import { type } from 'vue-jsx.macro';\n\
             type<string>();\n\
             function f(type) { return type(); }\n\
             { let type = 1; type; }\n\
             const g = () => { var type; if (x) { type(); } };",
            |collected| {
                let collected = collected.unwrap();
                let sites = collected.references.get(MacroKind::Type);
                assert_eq!(sites.len(), 1);
                assert!(sites[0].type_arguments.is_some());
                assert!(sites[0].call().is_some());
                assert_eq!(collected.references.type_alias(), Some("type"));
            },
        );
    }

    #[test]
    fn test_type_positions_are_not_usages() {
        collect(
            "import { EVENTS } from 'vue-jsx.macro';\n\
             let a: typeof EVENTS;\n\
             type B = { [k in typeof EVENTS]: 1 };",
            |collected| {
                assert_eq!(collected.unwrap().references.len(), 0);
            },
        );
    }

    #[test]
    fn test_static_and_shorthand_keys() {
        collect(
            "import { STATES, SCOPED_SLOTS } from 'vue-jsx.macro';\n\
             const o = { STATES: {}, SCOPED_SLOTS };",
            |collected| {
                let collected = collected.unwrap();
                let references = &collected.references;
                let states = references.get(MacroKind::States);
                assert_eq!(states.len(), 1);
                assert_eq!(states[0].position, SitePosition::StaticKey);
                assert!(states[0].key_property().is_some());

                let slots = references.get(MacroKind::ScopedSlots);
                assert_eq!(slots.len(), 1);
                assert_eq!(slots[0].position, SitePosition::Reference);
                assert!(slots[0].key_property().is_some());
            },
        );
    }

    #[test]
    fn test_function_scopes_see_parameters() {
        collect(
            "import { functional } from 'vue-jsx.macro';\n\
             functional({ render(h, ctx) { return 1; } });",
            |collected| {
                let collected = collected.unwrap();
                assert_eq!(collected.function_scopes.len(), 1);
                let scope = *collected.function_scopes.values().next().unwrap();
                assert!(collected.scopes.has_binding(scope, "h"));
                assert!(collected.scopes.has_binding(scope, "functional"));
                assert!(!collected.scopes.has_binding(ScopeId::ROOT, "h"));
            },
        );
    }

    #[test]
    fn test_take_matching_leaves_the_rest() {
        collect(
            "import { type } from 'vue-jsx.macro';\n\
             type(); type(); type();",
            |collected| {
                let mut references = collected.unwrap().references;
                let mut seen = 0;
                let taken = references.take_matching(MacroKind::Type, |_| {
                    seen += 1;
                    seen == 2
                });
                assert_eq!(taken.len(), 1);
                assert_eq!(references.get(MacroKind::Type).len(), 2);
                assert_eq!(references.take(MacroKind::Type).len(), 2);
                assert_eq!(references.len(), 0);
                assert_eq!(references.type_alias(), Some("type"));
            },
        );
    }
}
