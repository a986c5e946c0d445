//! Derived types: extension chains, type parameters and instantiation.

use super::scope::{ScopeId, ScopeKind};
use super::symbol::{Details, SymbolId, TypeParamAttr};
use super::tree::ScopeTree;
use super::types::{
    DeclTypeSpec, DerivedCategory, DerivedTypeSpec, FxIndexMap, ParamValue, TypeId,
};
use crate::base::Name;

impl ScopeTree {
    // ============================================================
    // Extension Chain
    // ============================================================

    /// Scope of the parent type named in `EXTENDS(...)`, if any.
    pub fn get_derived_type_parent(&self, scope: ScopeId) -> Option<ScopeId> {
        let symbol = self.get_symbol(scope)?;
        let parent_type = self.symbol(symbol).derived_type_details()?.extends?;
        self.derived_type_scope(parent_type)
    }

    /// Root of the extension chain of `scope` (itself if it extends nothing).
    pub fn get_derived_type_base(&self, scope: ScopeId) -> ScopeId {
        let mut child = scope;
        while let Some(parent) = self.get_derived_type_parent(child) {
            child = parent;
        }
        child
    }

    /// `scope` followed by its ancestors in the extension chain.
    pub fn extension_chain(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut chain = vec![scope];
        let mut current = scope;
        while let Some(parent) = self.get_derived_type_parent(current) {
            debug_assert!(
                chain.len() <= self.scopes.len(),
                "cyclic extension chain at {current:?}"
            );
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// The scope holding a derived type's components.
    pub fn derived_type_scope(&self, type_symbol: SymbolId) -> Option<ScopeId> {
        self.symbol(type_symbol).derived_type_details()?.scope
    }

    // ============================================================
    // Type Parameters
    // ============================================================

    pub fn is_parameterized_derived_type(&self, scope: ScopeId) -> bool {
        self.has_type_param(scope, None)
    }

    pub fn is_derived_type_with_length_parameter(&self, scope: ScopeId) -> bool {
        self.has_type_param(scope, Some(TypeParamAttr::Len))
    }

    pub fn is_derived_type_with_kind_parameter(&self, scope: ScopeId) -> bool {
        self.has_type_param(scope, Some(TypeParamAttr::Kind))
    }

    fn has_type_param(&self, scope: ScopeId, attr: Option<TypeParamAttr>) -> bool {
        if !self.is_derived_type(scope) {
            return false;
        }
        self.extension_chain(scope).into_iter().any(|s| {
            self.scope(s).symbols.values().any(|&id| {
                self.symbol(id)
                    .type_param_details()
                    .is_some_and(|param| attr.is_none_or(|attr| param.attr == attr))
            })
        })
    }

    /// Type parameters of a derived type including inherited ones, base type
    /// first, each in declaration order.
    pub fn type_param_symbols(&self, scope: ScopeId) -> Vec<SymbolId> {
        self.extension_chain(scope)
            .into_iter()
            .rev()
            .flat_map(|s| self.get_symbols(s))
            .filter(|&id| self.symbol(id).type_param_details().is_some())
            .collect()
    }

    // ============================================================
    // Instantiation
    // ============================================================

    /// Instantiate every derived type in the pool of `scope`.
    pub fn instantiate_derived_types(&mut self, scope: ScopeId) {
        let derived: Vec<TypeId> = self
            .type_ids(scope)
            .filter(|&id| self.decl_type(id).derived_category().is_some())
            .collect();
        for id in derived {
            self.instantiate(id, scope);
        }
    }

    /// Bind the type parameters of the derived type at `ty` and attach the
    /// scope holding its components. No-op once instantiated.
    ///
    /// New instantiation scopes are children of `containing`.
    pub fn instantiate(&mut self, ty: TypeId, containing: ScopeId) {
        let Some(spec) = self.decl_type(ty).derived_type_spec() else {
            return;
        };
        if spec.is_instantiated() {
            return;
        }
        let spec = spec.clone();
        let Some(type_scope) = self.derived_type_scope(spec.type_symbol()) else {
            tracing::debug!(
                type_name = %spec.name(),
                "derived type not yet defined; instantiation deferred"
            );
            return;
        };

        if !self.is_parameterized_derived_type(type_scope) {
            if let Some(target) = self.decl_type_mut(ty).derived_type_spec_mut() {
                target.mark_instantiated(type_scope);
            }
            return;
        }

        let bound = self.bind_type_parameters(type_scope, &spec);
        let mut wanted = spec.clone();
        wanted.set_parameters(bound.clone());

        let instance = match self.find_instantiation_scope(containing, &wanted) {
            Some(existing) => {
                tracing::trace!(type_name = %spec.name(), ?existing, "reusing instantiation");
                existing
            }
            None => self.make_instantiation(containing, type_scope, wanted),
        };
        if let Some(target) = self.decl_type_mut(ty).derived_type_spec_mut() {
            target.set_parameters(bound);
            target.mark_instantiated(instance);
        }
    }

    /// Values for every type parameter of the type: the value given in `spec`,
    /// else the parameter's default.
    fn bind_type_parameters(
        &self,
        type_scope: ScopeId,
        spec: &DerivedTypeSpec,
    ) -> FxIndexMap<Name, ParamValue> {
        let mut bound = FxIndexMap::default();
        for id in self.type_param_symbols(type_scope) {
            let symbol = self.symbol(id);
            let value = spec.find_parameter(symbol.name()).cloned().or_else(|| {
                symbol
                    .type_param_details()
                    .and_then(|param| param.init.clone())
                    .map(ParamValue::Explicit)
            });
            if let Some(value) = value {
                bound.insert(symbol.name().clone(), value);
            }
        }
        for name in spec.parameters().keys() {
            if !bound.contains_key(name) {
                tracing::warn!(
                    type_name = %spec.name(),
                    parameter = %name,
                    "not a type parameter; ignored"
                );
            }
        }
        bound
    }

    /// An instantiated spec equal to `wanted` in `scope` or an enclosing scope.
    fn find_instantiation_scope(
        &self,
        scope: ScopeId,
        wanted: &DerivedTypeSpec,
    ) -> Option<ScopeId> {
        let mut current = scope;
        loop {
            let found = self.scope(current).types.iter().find_map(|t| {
                t.derived_type_spec()
                    .filter(|s| s.is_instantiated() && *s == wanted)
                    .and_then(|s| s.scope())
            });
            if found.is_some() {
                return found;
            }
            current = self.scope(current).parent?;
        }
    }

    /// Create the scope for a new instantiation and copy the generic type's
    /// components into it.
    fn make_instantiation(
        &mut self,
        containing: ScopeId,
        type_scope: ScopeId,
        mut spec: DerivedTypeSpec,
    ) -> ScopeId {
        let instance = self.make_scope(containing, ScopeKind::DerivedType, None);
        spec.mark_instantiated(instance);
        tracing::debug!(type_name = %spec.name(), %spec, ?instance, "new instantiation");

        for component in self.get_symbols(type_scope) {
            let Some(copy) = self.copy_symbol(instance, component) else {
                continue;
            };
            let value = spec.find_parameter(self.symbol(copy).name()).cloned();
            if let Details::TypeParam(param) = self.symbol_mut(copy).details_mut() {
                param.value = value;
            }
        }
        self.scopes[instance.index()].derived_type_spec = Some(spec);
        instance
    }

    /// The pool entry for `spec` in `scope` or, failing that, in an enclosing
    /// scope.
    pub fn find_instantiated_derived_type(
        &self,
        scope: ScopeId,
        spec: &DerivedTypeSpec,
        category: DerivedCategory,
    ) -> Option<TypeId> {
        let target = DeclTypeSpec::derived(category, spec.clone());
        let mut current = scope;
        loop {
            if let Some(found) = self.find_type(current, &target) {
                return Some(found);
            }
            if self.scope(current).is_global() {
                return None;
            }
            current = self.scope(current).parent?;
        }
    }

    /// Declared type for `category(spec)` in `scope`: an existing entry when
    /// one is visible, else a new, instantiated one. Parameters missing from
    /// `spec` take their defaults before the search.
    pub fn declare_derived_type(
        &mut self,
        scope: ScopeId,
        category: DerivedCategory,
        mut spec: DerivedTypeSpec,
    ) -> TypeId {
        // Pool entries carry defaulted parameters once instantiated.
        let generic = self
            .derived_type_scope(spec.type_symbol())
            .filter(|&type_scope| self.is_parameterized_derived_type(type_scope));
        if let Some(type_scope) = generic {
            let bound = self.bind_type_parameters(type_scope, &spec);
            spec.set_parameters(bound);
        }
        if let Some(existing) = self.find_instantiated_derived_type(scope, &spec, category) {
            return existing;
        }
        let ty = self.make_derived_type(scope, category, spec);
        self.instantiate(ty, scope);
        ty
    }
}
