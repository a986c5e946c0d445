//! Human-readable dump of a scope, for debugging and test expectations.

use std::fmt;

use super::scope::ScopeId;
use super::symbol::Symbol;
use super::tree::ScopeTree;

/// Display adapter returned by [`ScopeTree::dump`].
pub struct ScopeDump<'a> {
    tree: &'a ScopeTree,
    scope: ScopeId,
}

impl ScopeTree {
    pub fn dump(&self, scope: ScopeId) -> ScopeDump<'_> {
        ScopeDump { tree: self, scope }
    }
}

struct SymbolLine<'a>(&'a Symbol);

impl fmt::Display for SymbolLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.0;
        write!(f, "{}", symbol.name())?;
        if !symbol.attrs().is_empty() {
            write!(f, ", {:?}", symbol.attrs())?;
        }
        write!(f, ": {}", symbol.details().kind_name())
    }
}

impl fmt::Display for ScopeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree;
        let scope = tree.scope(self.scope);

        write!(f, "{} scope: ", scope.kind())?;
        if let Some(symbol) = scope.symbol() {
            write!(f, "{} ", SymbolLine(tree.symbol(symbol)))?;
        }
        if let Some(spec) = scope.derived_type_spec() {
            write!(f, "instantiation of {spec} ")?;
        }
        writeln!(f, "{} children", scope.children().len())?;

        for (_, symbol) in scope.iter() {
            writeln!(f, "  {}", SymbolLine(tree.symbol(symbol)))?;
        }
        if !scope.equivalence_sets().is_empty() {
            writeln!(f, "  Equivalence Sets:")?;
            for set in scope.equivalence_sets() {
                write!(f, "   ")?;
                for object in set {
                    write!(f, " {}", object.as_fortran(tree.symbols()))?;
                }
                writeln!(f)?;
            }
        }
        for &symbol in scope.common_blocks().values() {
            writeln!(f, "  {}", SymbolLine(tree.symbol(symbol)))?;
        }
        Ok(())
    }
}
