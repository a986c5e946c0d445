//! Name resolution: host association, IMPORT control and component lookup.
//!
//! A name not declared in a scope is looked for in:
//! - the ancestor module or submodule, for a submodule scope;
//! - the lexical parent, when the scope's IMPORT state allows the name;
//!
//! and the same rule is applied again at each step of the walk.

use super::error::ImportConflict;
use super::scope::{ImportKind, ScopeId};
use super::symbol::{Attrs, SymbolId};
use super::tree::ScopeTree;
use crate::base::Name;

impl ScopeTree {
    /// Find `name` as seen from `scope`.
    pub fn find_symbol(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = scope;
        loop {
            if let Some(found) = self.find(current, name) {
                return Some(found);
            }
            current = if self.is_submodule(current) {
                self.submodule_ancestor(current)?
            } else if self.can_import(current, name) {
                self.scope(current).parent?
            } else {
                tracing::trace!(?scope, name, stopped_at = ?current, "name not visible");
                return None;
            };
        }
    }

    /// The module or submodule a submodule continues.
    fn submodule_ancestor(&self, scope: ScopeId) -> Option<ScopeId> {
        let symbol = self.scope(scope).symbol?;
        self.symbol(symbol).module_details()?.parent
    }

    /// True if `name` may be host associated into `scope` from its parent.
    pub fn can_import(&self, scope: ScopeId, name: &str) -> bool {
        let this = self.scope(scope);
        let Some(parent) = this.parent else {
            return false;
        };
        if this.is_top_level() || self.scope(parent).is_top_level() {
            return false;
        }
        match self.import_kind(scope) {
            ImportKind::None => false,
            ImportKind::All | ImportKind::Default => true,
            ImportKind::Only => this.import_names.contains(name),
        }
    }

    /// The effective import kind of `scope`.
    ///
    /// Without an IMPORT statement, an interface body for a procedure that is
    /// not a separate module procedure gets `None`; everything else gets
    /// `Default`.
    pub fn import_kind(&self, scope: ScopeId) -> ImportKind {
        let this = self.scope(scope);
        if let Some(kind) = this.import_kind {
            return kind;
        }
        if let Some(symbol) = this.symbol.map(|s| self.symbol(s)) {
            let is_interface_body = symbol
                .subprogram_details()
                .is_some_and(|details| details.is_interface);
            if is_interface_body && !symbol.attrs().contains(Attrs::MODULE) {
                return ImportKind::None;
            }
        }
        ImportKind::Default
    }

    /// Record an IMPORT statement of `kind` in `scope`.
    ///
    /// The first statement always succeeds. Later ones are checked against the
    /// kind already recorded; `ONLY` statements accumulate their names.
    pub fn set_import_kind(
        &mut self,
        scope: ScopeId,
        kind: ImportKind,
    ) -> Result<(), ImportConflict> {
        let this = &mut self.scopes[scope.index()];
        let Some(existing) = this.import_kind else {
            this.import_kind = Some(kind);
            return Ok(());
        };

        let has_none = kind == ImportKind::None || existing == ImportKind::None;
        let has_all = kind == ImportKind::All || existing == ImportKind::All;
        let result = if has_none {
            Err(ImportConflict::NoneNotSole)
        } else if has_all {
            Err(ImportConflict::AllNotSole)
        } else if kind != existing && kind != ImportKind::Only && existing != ImportKind::Only {
            Err(ImportConflict::OnlyRequired)
        } else {
            Ok(())
        };
        if let Err(conflict) = &result {
            tracing::debug!(?scope, ?existing, ?kind, code = conflict.code(), "conflicting IMPORT");
        }
        result
    }

    /// Add a name listed in `IMPORT, ONLY:`.
    pub fn add_import_name(&mut self, scope: ScopeId, name: impl Into<Name>) {
        self.scopes[scope.index()].import_names.insert(name.into());
    }

    /// Find a component of a derived type, including inherited ones.
    ///
    /// # Panics
    ///
    /// If `scope` is not a derived-type scope.
    pub fn find_component(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        assert!(
            self.is_derived_type(scope),
            "find_component called on a {} scope",
            self.scope(scope).kind()
        );
        let mut current = scope;
        loop {
            if let Some(found) = self.find(current, name) {
                return Some(found);
            }
            current = self.get_derived_type_parent(current)?;
        }
    }
}
