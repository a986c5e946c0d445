#![allow(clippy::unwrap_used)]

use fortsema::semantic::{ImportConflict, ImportKind};
use fortsema::{ScopeKind, ScopeTree};
use rstest::rstest;

use crate::helpers::scope_assertions::{assert_not_resolves, assert_resolves};
use crate::helpers::tree_fixtures::{derived_type, module, object, submodule};

#[rstest]
#[case(ImportKind::Default, true, true)]
#[case(ImportKind::All, true, true)]
#[case(ImportKind::None, false, false)]
#[case(ImportKind::Only, true, false)]
fn test_host_visibility_by_import_kind(
    #[case] kind: ImportKind,
    #[case] sees_listed: bool,
    #[case] sees_unlisted: bool,
) {
    let mut tree = ScopeTree::new();
    let host = module(&mut tree, "host");
    let listed = object(&mut tree, host, "listed");
    let unlisted = object(&mut tree, host, "unlisted");
    let proc = tree.make_scope(host, ScopeKind::Subprogram, None);
    let block = tree.make_scope(proc, ScopeKind::BlockConstruct, None);

    tree.set_import_kind(proc, kind).unwrap();
    if kind == ImportKind::Only {
        tree.add_import_name(proc, "listed");
    }

    assert_eq!(tree.find_symbol(block, "listed"), sees_listed.then_some(listed));
    assert_eq!(tree.find_symbol(block, "unlisted"), sees_unlisted.then_some(unlisted));
}

#[rstest]
#[case(ImportKind::None, ImportKind::None, Some(ImportConflict::NoneNotSole))]
#[case(ImportKind::None, ImportKind::Only, Some(ImportConflict::NoneNotSole))]
#[case(ImportKind::Default, ImportKind::None, Some(ImportConflict::NoneNotSole))]
#[case(ImportKind::All, ImportKind::All, Some(ImportConflict::AllNotSole))]
#[case(ImportKind::Only, ImportKind::All, Some(ImportConflict::AllNotSole))]
#[case(ImportKind::Only, ImportKind::Only, None)]
#[case(ImportKind::Default, ImportKind::Default, None)]
#[case(ImportKind::Default, ImportKind::Only, None)]
fn test_second_import_statement(
    #[case] first: ImportKind,
    #[case] second: ImportKind,
    #[case] expected: Option<ImportConflict>,
) {
    let mut tree = ScopeTree::new();
    let host = module(&mut tree, "host");
    let proc = tree.make_scope(host, ScopeKind::Subprogram, None);

    tree.set_import_kind(proc, first).unwrap();
    let result = tree.set_import_kind(proc, second);
    assert_eq!(result.err(), expected);
    assert_eq!(tree.scope(proc).explicit_import_kind(), Some(first));
}

#[test]
fn test_import_conflict_codes() {
    assert_eq!(ImportConflict::NoneNotSole.code(), "C8100");
    assert_eq!(ImportConflict::AllNotSole.code(), "C8100");
    assert_eq!(ImportConflict::OnlyRequired.code(), "C898");
    assert_eq!(
        ImportConflict::AllNotSole.to_string(),
        "IMPORT,ALL must be the only IMPORT statement in a scope"
    );
}

#[test]
fn test_lookup_through_submodule_chain() {
    let mut tree = ScopeTree::new();
    let parent = module(&mut tree, "parent");
    let x = object(&mut tree, parent, "x");
    let child = submodule(&mut tree, "child", parent);
    let y = object(&mut tree, child, "y");
    let grandchild = submodule(&mut tree, "grandchild", child);
    let proc = tree.make_scope(grandchild, ScopeKind::Subprogram, None);

    assert_eq!(assert_resolves(&tree, proc, "x"), x);
    assert_eq!(assert_resolves(&tree, proc, "y"), y);
    assert_eq!(tree.find_submodule(parent, "child"), Some(child));
    assert!(tree.is_submodule(grandchild));
    assert!(tree.is_module(parent));
}

#[test]
fn test_global_names_are_not_host_associated() {
    let mut tree = ScopeTree::new();
    let global = tree.global();
    object(&mut tree, global, "external_thing");
    let host = module(&mut tree, "host");
    let proc = tree.make_scope(host, ScopeKind::Subprogram, None);

    assert_not_resolves(&tree, host, "external_thing");
    assert_not_resolves(&tree, proc, "external_thing");
    assert_resolves(&tree, global, "external_thing");
}

#[test]
fn test_components_resolve_through_extension() {
    let mut tree = ScopeTree::new();
    let host = module(&mut tree, "shapes");
    let (shape, shape_scope) = derived_type(&mut tree, host, "shape", None);
    let origin = object(&mut tree, shape_scope, "origin");
    let (circle, circle_scope) = derived_type(&mut tree, host, "circle", Some(shape));
    let radius = object(&mut tree, circle_scope, "radius");
    let (_, ring_scope) = derived_type(&mut tree, host, "ring", Some(circle));

    assert_eq!(tree.find_component(ring_scope, "origin"), Some(origin));
    assert_eq!(tree.find_component(ring_scope, "radius"), Some(radius));
    assert_eq!(tree.find_component(ring_scope, "circle"), None);
    assert_eq!(tree.get_derived_type_base(ring_scope), shape_scope);
    assert_eq!(tree.extension_chain(ring_scope).len(), 3);
}
