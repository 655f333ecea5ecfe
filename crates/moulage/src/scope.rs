//! Lexical scope tree built while collecting macro references.

use moulage_carton::{CompactString, FxHashSet};

/// Index of a scope in a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The program scope.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    /// Function or program scope, the target of `var` hoisting.
    hoisting: bool,
    bindings: FxHashSet<CompactString>,
}

/// Flat scope tree. The first scope added is [`ScopeId::ROOT`].
#[derive(Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scope(&mut self, parent: Option<ScopeId>, hoisting: bool) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            hoisting,
            bindings: FxHashSet::default(),
        });
        id
    }

    pub fn add_binding(&mut self, scope: ScopeId, name: &str) {
        if let Some(scope) = self.scopes.get_mut(scope.index()) {
            scope.bindings.insert(CompactString::new(name));
        }
    }

    #[inline]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.index()).and_then(|s| s.parent)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Nearest function or program scope enclosing `scope`.
    pub fn hoisting_scope(&self, scope: ScopeId) -> ScopeId {
        let mut current = scope;
        loop {
            match self.scopes.get(current.index()) {
                Some(s) if s.hoisting => return current,
                Some(Scope {
                    parent: Some(parent),
                    ..
                }) => current = *parent,
                _ => return current,
            }
        }
    }

    pub fn has_own_binding(&self, scope: ScopeId, name: &str) -> bool {
        self.scopes
            .get(scope.index())
            .is_some_and(|s| s.bindings.contains(name))
    }

    /// Scope that declares `name` as seen from `scope`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if self.has_own_binding(id, name) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Whether `name` is bound in `scope` or any enclosing scope.
    #[inline]
    pub fn has_binding(&self, scope: ScopeId, name: &str) -> bool {
        self.resolve(scope, name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (ScopeTree, ScopeId, ScopeId, ScopeId) {
        let mut scopes = ScopeTree::new();
        let root = scopes.add_scope(None, true);
        let function = scopes.add_scope(Some(root), true);
        let block = scopes.add_scope(Some(function), false);
        (scopes, root, function, block)
    }

    #[test]
    fn test_first_scope_is_root() {
        let (scopes, root, _, _) = tree();
        assert_eq!(root, ScopeId::ROOT);
        assert_eq!(scopes.len(), 3);
    }

    #[test]
    fn test_resolve_walks_parents() {
        let (mut scopes, root, function, block) = tree();
        scopes.add_binding(root, "component");
        scopes.add_binding(function, "h");

        assert_eq!(scopes.resolve(block, "component"), Some(root));
        assert_eq!(scopes.resolve(block, "h"), Some(function));
        assert!(scopes.has_binding(function, "h"));
        assert!(!scopes.has_binding(root, "h"));
        assert_eq!(scopes.resolve(block, "missing"), None);
    }

    #[test]
    fn test_shadowing_resolves_to_inner_scope() {
        let (mut scopes, root, _, block) = tree();
        scopes.add_binding(root, "type");
        scopes.add_binding(block, "type");
        assert_eq!(scopes.resolve(block, "type"), Some(block));
    }

    #[test]
    fn test_hoisting_scope() {
        let (scopes, root, function, block) = tree();
        assert_eq!(scopes.hoisting_scope(block), function);
        assert_eq!(scopes.hoisting_scope(function), function);
        assert_eq!(scopes.hoisting_scope(root), root);
    }
}
