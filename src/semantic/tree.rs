use std::collections::BTreeSet;

use super::config::TreeConfig;
use super::scope::{Scope, ScopeId, ScopeKind};
use super::symbol::{Attrs, Details, Symbol, SymbolArena, SymbolFlags, SymbolId};
use crate::base::{Name, TextSize};

/// The scope tree of one compilation.
///
/// Owns every scope and every symbol; everything else refers to them through
/// [`ScopeId`] and [`SymbolId`]. Scope 0 is the global scope, whose type pool
/// is the shared pool for lengthless types.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    pub(super) scopes: Vec<Scope>,
    pub(super) symbols: SymbolArena,
    /// Scopes keyed by the start of their attributed source range.
    pub(super) scope_index: BTreeSet<(TextSize, ScopeId)>,
    config: TreeConfig,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        let mut scopes = Vec::with_capacity(config.scope_capacity.max(1));
        scopes.push(Scope::new(ScopeKind::Global, None, None));
        Self {
            scopes,
            symbols: SymbolArena::with_capacity(config.symbol_capacity),
            scope_index: BTreeSet::new(),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn global(&self) -> ScopeId {
        ScopeId::GLOBAL
    }

    // ============================================================
    // Data Access
    // ============================================================

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id]
    }

    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scope(id).parent
    }

    // ============================================================
    // Tree Construction
    // ============================================================

    /// Create a child scope of `parent`.
    pub fn make_scope(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        symbol: Option<SymbolId>,
    ) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope::new(kind, Some(parent), symbol));
        self.scopes[parent.index()].children.push(id);
        tracing::trace!(?id, ?parent, %kind, "made scope");
        id
    }

    /// True if `other` is `scope` or nested anywhere inside it.
    pub fn contains(&self, scope: ScopeId, other: ScopeId) -> bool {
        let mut current = other;
        loop {
            if current == scope {
                return true;
            }
            match self.scope(current).parent {
                Some(parent) if !self.scope(current).is_global() => current = parent,
                _ => return false,
            }
        }
    }

    // ============================================================
    // Scope Predicates
    // ============================================================

    /// The symbol naming this scope; for a derived-type instantiation, the
    /// symbol of the instantiated type.
    pub fn get_symbol(&self, scope: ScopeId) -> Option<SymbolId> {
        let scope = self.scope(scope);
        scope.symbol.or_else(|| {
            scope
                .derived_type_spec
                .as_ref()
                .map(|spec| spec.type_symbol())
        })
    }

    pub fn is_submodule(&self, scope: ScopeId) -> bool {
        self.module_flavor(scope) == Some(true)
    }

    pub fn is_module(&self, scope: ScopeId) -> bool {
        self.module_flavor(scope) == Some(false)
    }

    fn module_flavor(&self, scope: ScopeId) -> Option<bool> {
        let scope = self.scope(scope);
        if scope.kind != ScopeKind::Module {
            return None;
        }
        let details = self.symbols[scope.symbol?].module_details()?;
        Some(details.is_submodule)
    }

    pub fn is_derived_type(&self, scope: ScopeId) -> bool {
        self.scope(scope).is_derived_type()
    }

    pub fn is_stmt_function(&self, scope: ScopeId) -> bool {
        self.scope(scope)
            .symbol
            .is_some_and(|s| self.symbols[s].test(SymbolFlags::STMT_FUNCTION))
    }

    // ============================================================
    // Symbol Table
    // ============================================================

    /// Allocate a symbol owned by `scope` without entering it in the scope's
    /// name table.
    pub fn make_symbol(
        &mut self,
        scope: ScopeId,
        name: impl Into<Name>,
        attrs: Attrs,
        details: Details,
    ) -> SymbolId {
        self.symbols.alloc(Symbol::new(scope, name, attrs, details))
    }

    /// Declare `name` in `scope` unless it is already there.
    ///
    /// Returns the symbol now bound to the name and whether it was created.
    pub fn try_emplace(
        &mut self,
        scope: ScopeId,
        name: impl Into<Name>,
        attrs: Attrs,
        details: Details,
    ) -> (SymbolId, bool) {
        let name = name.into();
        if let Some(existing) = self.find(scope, &name) {
            return (existing, false);
        }
        let id = self.make_symbol(scope, name.clone(), attrs, details);
        tracing::trace!(?scope, %name, ?id, "declared symbol");
        self.scopes[scope.index()].symbols.insert(name, id);
        (id, true)
    }

    /// Bind an existing symbol under `name` (e.g. for USE association).
    /// Fails if the name is taken.
    pub fn insert(&mut self, scope: ScopeId, name: impl Into<Name>, symbol: SymbolId) -> bool {
        let table = &mut self.scopes[scope.index()].symbols;
        let name = name.into();
        if table.contains_key(&name) {
            return false;
        }
        table.insert(name, symbol);
        true
    }

    /// Look `name` up in this scope's own table only.
    pub fn find(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scope(scope).symbols.get(name).copied()
    }

    /// Remove `name` from the table. The symbol itself stays in the arena.
    pub fn erase(&mut self, scope: ScopeId, name: &str) -> bool {
        self.scopes[scope.index()]
            .symbols
            .shift_remove(name)
            .is_some()
    }

    /// Copy `symbol` into `scope` with the same attributes, flags and a deep
    /// copy of its details. `None` if the name already exists there.
    pub fn copy_symbol(&mut self, scope: ScopeId, symbol: SymbolId) -> Option<SymbolId> {
        let original = &self.symbols[symbol];
        let name = original.name().clone();
        let attrs = original.attrs();
        let flags = original.flags();
        let source = original.source();
        let details = original.details().clone();

        let (copy, created) = self.try_emplace(scope, name, attrs, details);
        if !created {
            return None;
        }
        let copied = &mut self.symbols[copy];
        *copied.flags_mut() = flags;
        if let Some(source) = source {
            copied.set_source(source);
        }
        Some(copy)
    }

    /// Symbols of `scope` ordered by where their names appear in the source,
    /// then by declaration order.
    pub fn get_symbols(&self, scope: ScopeId) -> Vec<SymbolId> {
        let mut result: Vec<SymbolId> = self.scope(scope).symbols.values().copied().collect();
        result.sort_by_key(|&id| (self.symbols[id].source().map(|r| r.start()), id));
        result
    }
}
