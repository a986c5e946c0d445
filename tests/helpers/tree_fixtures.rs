//! Builders for small scope trees.

use fortsema::semantic::{
    Attrs, DerivedTypeDetails, Details, IntExpr, ModuleDetails, ObjectDetails, TypeParamAttr,
    TypeParamDetails,
};
use fortsema::{ScopeId, ScopeKind, ScopeTree, SymbolId};

/// `module name` directly under the global scope.
pub fn module(tree: &mut ScopeTree, name: &str) -> ScopeId {
    let global = tree.global();
    let (symbol, _) = tree.try_emplace(
        global,
        name,
        Attrs::empty(),
        Details::Module(ModuleDetails::default()),
    );
    let scope = tree.make_scope(global, ScopeKind::Module, Some(symbol));
    if let Details::Module(details) = tree.symbol_mut(symbol).details_mut() {
        details.scope = Some(scope);
    }
    scope
}

/// `submodule (ancestor) name`, lexically a child of the global scope.
pub fn submodule(tree: &mut ScopeTree, name: &str, ancestor: ScopeId) -> ScopeId {
    let global = tree.global();
    let symbol = tree.make_symbol(
        global,
        name,
        Attrs::empty(),
        Details::Module(ModuleDetails {
            is_submodule: true,
            parent: Some(ancestor),
            scope: None,
        }),
    );
    let scope = tree.make_scope(global, ScopeKind::Module, Some(symbol));
    tree.add_submodule(ancestor, name, scope);
    scope
}

/// `type, extends(parent) :: name` declared in `owner`.
pub fn derived_type(
    tree: &mut ScopeTree,
    owner: ScopeId,
    name: &str,
    extends: Option<SymbolId>,
) -> (SymbolId, ScopeId) {
    let (symbol, _) = tree.try_emplace(
        owner,
        name,
        Attrs::empty(),
        Details::DerivedType(DerivedTypeDetails {
            scope: None,
            extends,
        }),
    );
    let scope = tree.make_scope(owner, ScopeKind::DerivedType, Some(symbol));
    if let Details::DerivedType(details) = tree.symbol_mut(symbol).details_mut() {
        details.scope = Some(scope);
    }
    (symbol, scope)
}

pub fn object(tree: &mut ScopeTree, scope: ScopeId, name: &str) -> SymbolId {
    let (symbol, _) = tree.try_emplace(
        scope,
        name,
        Attrs::empty(),
        Details::Object(ObjectDetails::default()),
    );
    symbol
}

pub fn kind_param(tree: &mut ScopeTree, scope: ScopeId, name: &str, default: i64) -> SymbolId {
    let details = TypeParamDetails::new(TypeParamAttr::Kind).with_init(IntExpr::Constant(default));
    let (symbol, _) = tree.try_emplace(scope, name, Attrs::empty(), Details::TypeParam(details));
    symbol
}

pub fn len_param(tree: &mut ScopeTree, scope: ScopeId, name: &str) -> SymbolId {
    let details = TypeParamDetails::new(TypeParamAttr::Len);
    let (symbol, _) = tree.try_emplace(scope, name, Attrs::empty(), Details::TypeParam(details));
    symbol
}
