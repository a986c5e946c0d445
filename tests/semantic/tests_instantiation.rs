#![allow(clippy::unwrap_used)]

use fortsema::semantic::{DerivedCategory, DerivedTypeSpec, IntExpr, ParamValue};
use fortsema::{ScopeId, ScopeKind, ScopeTree, SymbolId};
use rstest::rstest;

use crate::helpers::tree_fixtures::{derived_type, kind_param, len_param, module, object};

/// `type :: vec(k, n)` with kind `k` defaulting to 4 and length `n`.
fn vec_type(tree: &mut ScopeTree) -> (SymbolId, ScopeId) {
    let m = module(tree, "linalg");
    let (t, scope) = derived_type(tree, m, "vec", None);
    kind_param(tree, scope, "k", 4);
    len_param(tree, scope, "n");
    object(tree, scope, "data");
    (t, m)
}

fn explicit(value: i64) -> ParamValue {
    ParamValue::Explicit(IntExpr::Constant(value))
}

#[rstest]
#[case(vec![("n", ParamValue::Deferred)], "vec(k=4,n=:)")]
#[case(vec![("k", explicit(8)), ("n", ParamValue::Assumed)], "vec(k=8,n=*)")]
#[case(vec![("n", explicit(3)), ("k", explicit(2))], "vec(k=2,n=3)")]
fn test_instantiated_spec_binds_every_parameter(
    #[case] given: Vec<(&str, ParamValue)>,
    #[case] rendered: &str,
) {
    let mut tree = ScopeTree::new();
    let (t, m) = vec_type(&mut tree);
    let mut spec = DerivedTypeSpec::new(t, "vec");
    for (name, value) in given {
        spec.add_parameter(name, value);
    }

    let ty = tree.declare_derived_type(m, DerivedCategory::Type, spec);
    let spec = tree.decl_type(ty).derived_type_spec().unwrap();
    assert!(spec.is_instantiated());
    assert_eq!(spec.to_string(), rendered);

    let instance = spec.scope().unwrap();
    assert_eq!(tree.scope(instance).kind(), ScopeKind::DerivedType);
    assert_eq!(tree.scope(instance).derived_type_spec(), Some(spec));
    assert!(tree.dump(instance).to_string().starts_with(&format!(
        "DerivedType scope: instantiation of {rendered} "
    )));
}

#[test]
fn test_instantiations_are_cached_by_binding() {
    let mut tree = ScopeTree::new();
    let (t, m) = vec_type(&mut tree);
    let proc = tree.make_scope(m, ScopeKind::Subprogram, None);
    let inner = tree.make_scope(proc, ScopeKind::BlockConstruct, None);

    let with = |k| {
        DerivedTypeSpec::new(t, "vec")
            .with_parameter("k", explicit(k))
            .with_parameter("n", ParamValue::Deferred)
    };
    let in_proc = tree.declare_derived_type(proc, DerivedCategory::Type, with(8));
    let in_block = tree.declare_derived_type(inner, DerivedCategory::Type, with(8));
    let other_kind = tree.declare_derived_type(inner, DerivedCategory::Type, with(2));

    assert_eq!(in_proc, in_block);
    assert_ne!(in_proc, other_kind);
    assert_eq!(tree.scope(inner).types().len(), 1);
}

#[test]
fn test_batch_instantiation_shares_scopes() {
    let mut tree = ScopeTree::new();
    let (t, m) = vec_type(&mut tree);
    let proc = tree.make_scope(m, ScopeKind::Subprogram, None);
    let spec = || DerivedTypeSpec::new(t, "vec").with_parameter("n", explicit(10));
    let a = tree.make_derived_type(proc, DerivedCategory::Type, spec());
    let b = tree.make_derived_type(proc, DerivedCategory::Class, spec());
    let children_before = tree.scope(proc).children().len();

    tree.instantiate_derived_types(proc);
    tree.instantiate_derived_types(proc);

    let scope_of = |tree: &ScopeTree, ty| tree.decl_type(ty).derived_type_spec().unwrap().scope();
    assert_eq!(scope_of(&tree, a), scope_of(&tree, b));
    assert_eq!(tree.scope(proc).children().len(), children_before + 1);
}

#[test]
fn test_instance_components_are_copies() {
    let mut tree = ScopeTree::new();
    let (t, m) = vec_type(&mut tree);
    let generic = tree.derived_type_scope(t).unwrap();
    let ty = tree.declare_derived_type(
        m,
        DerivedCategory::Type,
        DerivedTypeSpec::new(t, "vec").with_parameter("n", explicit(5)),
    );
    let instance = tree.decl_type(ty).derived_type_spec().unwrap().scope().unwrap();

    let generic_data = tree.find(generic, "data").unwrap();
    let instance_data = tree.find(instance, "data").unwrap();
    assert_ne!(generic_data, instance_data);
    assert_eq!(tree.symbol(instance_data).owner(), instance);

    let n = tree.find_component(instance, "n").unwrap();
    assert_eq!(tree.symbol(n).type_param_details().unwrap().value, Some(explicit(5)));
    assert_eq!(tree.type_param_symbols(instance).len(), 2);
}

#[test]
fn test_defaulted_kind_matches_explicit_redeclaration() {
    let mut tree = ScopeTree::new();
    let (t, m) = vec_type(&mut tree);
    let implicit = DerivedTypeSpec::new(t, "vec").with_parameter("n", explicit(3));
    let spelled = DerivedTypeSpec::new(t, "vec")
        .with_parameter("k", explicit(4))
        .with_parameter("n", explicit(3));

    let first = tree.declare_derived_type(m, DerivedCategory::Type, implicit.clone());
    assert_eq!(tree.declare_derived_type(m, DerivedCategory::Type, implicit), first);
    assert_eq!(tree.declare_derived_type(m, DerivedCategory::Type, spelled), first);
    assert_eq!(tree.scope(m).types().len(), 1);
}
