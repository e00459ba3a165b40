//! Lexical scope stack
//!
//! Tracks name → binding maps while walking a tree; inner scopes shadow outer
//! ones and are discarded when the walk leaves them.

use rustc_hash::FxHashMap;

/// Stack of name → binding scopes
#[derive(Debug, Clone)]
pub struct ScopeStack<T> {
    scopes: Vec<FxHashMap<String, T>>,
}

impl<T> Default for ScopeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScopeStack<T> {
    /// Create a stack holding one (outermost) scope
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Push a new scope
    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the current scope; the outermost scope is never popped
    pub fn pop(&mut self) -> Option<FxHashMap<String, T>> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Bind `name` in the current scope
    pub fn declare(&mut self, name: impl Into<String>, binding: T) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), binding);
        }
    }

    /// Innermost binding for `name`
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Current depth
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Execute a closure within a new scope
    pub fn with_scope<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.push();
        let result = f(self);
        self.pop();
        result
    }
}
