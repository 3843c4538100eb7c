//! A stack of scopes, innermost last. A vector of maps suffices — there is
//! no cyclic structure and no need to resolve across function boundaries,
//! since MusicScript has no functions.

use crate::types::Type;
use indexmap::IndexMap;
use mscc_util::Symbol;

pub struct ScopeStack {
    scopes: Vec<IndexMap<Symbol, Type>>,
}

impl ScopeStack {
    /// A fresh stack with only the outermost scope, which is never popped.
    pub fn new() -> Self {
        Self {
            scopes: vec![IndexMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    pub fn pop(&mut self) {
        debug_assert!(self.scopes.len() > 1, "outermost scope must never be popped");
        self.scopes.pop();
    }

    /// Declare `name` in the innermost scope. Returns `false` if already
    /// declared there (the caller reports `Redeclaration`).
    pub fn declare(&mut self, name: Symbol, ty: Type) -> bool {
        let scope = self.scopes.last_mut().expect("scope stack is never empty");
        if scope.contains_key(&name) {
            return false;
        }
        scope.insert(name, ty);
        true
    }

    /// Walk scopes inside-out looking for `name`.
    pub fn lookup(&self, name: Symbol) -> Option<Type> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name).copied())
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
