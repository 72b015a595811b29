//! The Scope Manager half of §4.B.
//!
//! A translation-scoped service (not a process-wide singleton, per the
//! "global singletons" design note): one instance lives for the duration of
//! a single translation, shared by every frontend and pass via
//! `TranslationContext`.
//!
//! Scope nesting is tracked per calling thread (each frontend thread walks
//! its own file's scope tree independently); the scope -> parent map and
//! each scope's symbol table are shared and internally synchronized so
//! concurrent frontends never need external locking (§5, "Parallel
//! frontends").

use crate::errors::{ResolutionError, TranslationError};
use crate::graph::NodeId;
use dashmap::DashMap;
use std::cell::RefCell;

thread_local! {
    static OPEN_SCOPES: RefCell<Vec<NodeId>> = RefCell::new(Vec::new());
}

#[derive(Default)]
pub struct ScopeManager {
    parents: DashMap<NodeId, Option<NodeId>>,
    symbols: DashMap<NodeId, DashMap<String, NodeId>>,
}

impl ScopeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `scope` onto the calling thread's open-scope stack, recording
    /// its parent as whatever scope was previously on top (or none, for a
    /// root scope).
    pub fn enter_scope(&self, scope: NodeId) {
        let parent = OPEN_SCOPES.with(|stack| stack.borrow().last().copied());
        self.parents.entry(scope).or_insert(parent);
        self.symbols.entry(scope).or_insert_with(DashMap::new);
        OPEN_SCOPES.with(|stack| stack.borrow_mut().push(scope));
    }

    /// Pop `scope` off the calling thread's open-scope stack. Fails if
    /// `scope` is not the innermost open scope (stack discipline, §4.B).
    pub fn leave_scope(&self, scope: NodeId) -> Result<(), TranslationError> {
        OPEN_SCOPES.with(|stack| {
            let mut stack = stack.borrow_mut();
            match stack.last() {
                Some(top) if *top == scope => {
                    stack.pop();
                    Ok(())
                }
                Some(_) => Err(TranslationError::internal(
                    "scope_manager",
                    format!("attempted to leave non-top scope {scope}"),
                )),
                None => Err(TranslationError::internal(
                    "scope_manager",
                    "attempted to leave a scope with none open",
                )),
            }
        })
    }

    /// Declare `name` as resolving to `declaration` within `scope`. A
    /// redeclaration of the same name in the same scope is a non-fatal
    /// clash: the newer declaration wins and the caller is told to record a
    /// diagnostic.
    pub fn declare(
        &self,
        scope: NodeId,
        name: impl Into<String>,
        declaration: NodeId,
    ) -> Result<(), ResolutionError> {
        let table = self.symbols.entry(scope).or_insert_with(DashMap::new);
        let name = name.into();
        let previous = table.insert(name.clone(), declaration);
        match previous {
            Some(_) => Err(ResolutionError::new(
                "scope_manager",
                format!("'{name}' redeclared in scope {scope}"),
            )),
            None => Ok(()),
        }
    }

    /// The innermost declaration of `name` visible from `scope`, walking the
    /// ancestor chain, or `None`.
    pub fn resolve(&self, name: &str, scope: NodeId) -> Option<NodeId> {
        let mut current = Some(scope);
        while let Some(scope_id) = current {
            if let Some(table) = self.symbols.get(&scope_id) {
                if let Some(declaration) = table.get(name) {
                    return Some(*declaration);
                }
            }
            current = self.parents.get(&scope_id).and_then(|p| *p);
        }
        None
    }

    pub fn parent_of(&self, scope: NodeId) -> Option<NodeId> {
        self.parents.get(&scope).and_then(|p| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_finds_declaration_in_an_ancestor_scope() {
        let manager = ScopeManager::new();
        let global = NodeId(0);
        let function = NodeId(1);
        manager.enter_scope(global);
        manager.declare(global, "x", NodeId(2)).unwrap();
        manager.enter_scope(function);

        assert_eq!(manager.resolve("x", function), Some(NodeId(2)));
        assert_eq!(manager.resolve("missing", function), None);

        manager.leave_scope(function).unwrap();
        manager.leave_scope(global).unwrap();
    }

    #[test]
    fn inner_declaration_shadows_outer() {
        let manager = ScopeManager::new();
        let global = NodeId(0);
        let function = NodeId(1);
        manager.enter_scope(global);
        manager.declare(global, "x", NodeId(10)).unwrap();
        manager.enter_scope(function);
        manager.declare(function, "x", NodeId(20)).unwrap();

        assert_eq!(manager.resolve("x", function), Some(NodeId(20)));
        assert_eq!(manager.resolve("x", global), Some(NodeId(10)));
    }

    #[test]
    fn leaving_a_non_top_scope_fails() {
        let manager = ScopeManager::new();
        let global = NodeId(0);
        let function = NodeId(1);
        manager.enter_scope(global);
        manager.enter_scope(function);

        let err = manager.leave_scope(global).unwrap_err();
        assert!(matches!(err, TranslationError::Internal { .. }));
    }

    #[test]
    fn redeclaration_in_the_same_scope_is_a_non_fatal_clash() {
        let manager = ScopeManager::new();
        let global = NodeId(0);
        manager.enter_scope(global);
        manager.declare(global, "x", NodeId(1)).unwrap();
        let err = manager.declare(global, "x", NodeId(2)).unwrap_err();
        assert_eq!(err.component, "scope_manager");
        // the newer declaration still wins
        assert_eq!(manager.resolve("x", global), Some(NodeId(2)));
    }
}
