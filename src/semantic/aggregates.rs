//! Per-scope registries: COMMON blocks, submodules, EQUIVALENCE sets and
//! Cray pointers.

use std::cmp::Ordering;

use super::scope::ScopeId;
use super::symbol::{Attrs, CommonBlockDetails, Details, SymbolArena, SymbolFlags, SymbolId};
use super::tree::ScopeTree;
use crate::base::{Name, TextRange};

/// One object of an EQUIVALENCE set: `name(subscripts)(start:)`.
///
/// Equality and ordering ignore `source`. Ordering is by the symbol's
/// sequence number, then subscripts, then substring start; it is only meant
/// for sorted containers.
#[derive(Debug, Clone)]
pub struct EquivalenceObject {
    pub symbol: SymbolId,
    pub subscripts: Vec<i64>,
    pub substring_start: Option<i64>,
    pub source: Option<TextRange>,
}

impl EquivalenceObject {
    pub fn new(symbol: SymbolId) -> Self {
        Self {
            symbol,
            subscripts: Vec::new(),
            substring_start: None,
            source: None,
        }
    }

    pub fn with_subscripts(mut self, subscripts: Vec<i64>) -> Self {
        self.subscripts = subscripts;
        self
    }

    pub fn with_substring_start(mut self, start: i64) -> Self {
        self.substring_start = Some(start);
        self
    }

    pub fn with_source(mut self, source: TextRange) -> Self {
        self.source = Some(source);
        self
    }

    /// The object as it would be written in an EQUIVALENCE statement.
    pub fn as_fortran(&self, symbols: &SymbolArena) -> String {
        let mut text = symbols[self.symbol].name().to_string();
        if !self.subscripts.is_empty() {
            let subscripts: Vec<String> = self.subscripts.iter().map(|s| s.to_string()).collect();
            text.push('(');
            text.push_str(&subscripts.join(","));
            text.push(')');
        }
        if let Some(start) = self.substring_start {
            text.push_str(&format!("({start}:)"));
        }
        text
    }
}

impl PartialEq for EquivalenceObject {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.subscripts == other.subscripts
            && self.substring_start == other.substring_start
    }
}

impl Eq for EquivalenceObject {}

impl PartialOrd for EquivalenceObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EquivalenceObject {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symbol
            .cmp(&other.symbol)
            .then_with(|| self.subscripts.cmp(&other.subscripts))
            .then_with(|| self.substring_start.cmp(&other.substring_start))
    }
}

/// Objects sharing storage, in statement order.
pub type EquivalenceSet = Vec<EquivalenceObject>;

impl ScopeTree {
    // ============================================================
    // COMMON Blocks
    // ============================================================

    /// The COMMON block `name` of `scope`, created on first use.
    pub fn make_common_block(&mut self, scope: ScopeId, name: impl Into<Name>) -> SymbolId {
        let name = name.into();
        if let Some(&existing) = self.scope(scope).common_blocks.get(&name) {
            return existing;
        }
        let symbol = self.make_symbol(
            scope,
            name.clone(),
            Attrs::empty(),
            Details::CommonBlock(CommonBlockDetails::default()),
        );
        tracing::trace!(?scope, %name, "new COMMON block");
        self.scopes[scope.index()].common_blocks.insert(name, symbol);
        symbol
    }

    pub fn find_common_block(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scope(scope).common_blocks.get(name).copied()
    }

    // ============================================================
    // Submodules
    // ============================================================

    pub fn find_submodule(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        self.scope(scope).submodules.get(name).copied()
    }

    /// Register `submodule` under `name`. Returns false, leaving the existing
    /// entry in place, if the name is taken.
    pub fn add_submodule(
        &mut self,
        scope: ScopeId,
        name: impl Into<Name>,
        submodule: ScopeId,
    ) -> bool {
        let submodules = &mut self.scopes[scope.index()].submodules;
        let name = name.into();
        if submodules.contains_key(&name) {
            return false;
        }
        submodules.insert(name, submodule);
        true
    }

    // ============================================================
    // EQUIVALENCE and Cray Pointers
    // ============================================================

    pub fn add_equivalence_set(&mut self, scope: ScopeId, set: EquivalenceSet) {
        self.scopes[scope.index()].equivalence_sets.push(set);
    }

    /// Record a Cray pointer. An existing entry for `name` is kept.
    ///
    /// # Panics
    ///
    /// If `pointer` does not carry [`SymbolFlags::CRAY_POINTER`].
    pub fn add_cray_pointer(&mut self, scope: ScopeId, name: impl Into<Name>, pointer: SymbolId) {
        assert!(
            self.symbol(pointer).test(SymbolFlags::CRAY_POINTER),
            "'{}' is not flagged as a Cray pointer",
            self.symbol(pointer).name()
        );
        self.scopes[scope.index()]
            .cray_pointers
            .entry(name.into())
            .or_insert(pointer);
    }
}
