//! Sizing options for a [`ScopeTree`](super::ScopeTree).

/// Configuration for a scope tree.
///
/// Both arenas grow on demand; the capacities only control the initial
/// reservation, which matters for large compilation units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Symbols reserved up front in the shared symbol arena.
    pub symbol_capacity: usize,
    /// Scopes reserved up front in the scope arena.
    pub scope_capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            symbol_capacity: 1024,
            scope_capacity: 64,
        }
    }
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol_capacity(mut self, capacity: usize) -> Self {
        self.symbol_capacity = capacity;
        self
    }

    pub fn with_scope_capacity(mut self, capacity: usize) -> Self {
        self.scope_capacity = capacity;
        self
    }
}
