#![allow(clippy::unwrap_used)]

use fortsema::{ScopeId, ScopeKind, ScopeTree, SourceMap, TextRange, TextSize};
use rstest::rstest;

use crate::helpers::scope_assertions::assert_ranges_nested;
use crate::helpers::tree_fixtures::{module, submodule};

fn span(file: TextRange, start: u32, end: u32) -> TextRange {
    TextRange::new(
        file.start() + TextSize::from(start),
        file.start() + TextSize::from(end),
    )
}

/// module m
///   subroutine s1      [10, 40)
///     block            [20, 30)
///   subroutine s2      [50, 90)
struct Layout {
    tree: ScopeTree,
    file: TextRange,
    m: ScopeId,
    s1: ScopeId,
    block: ScopeId,
    s2: ScopeId,
}

fn layout() -> Layout {
    let mut sources = SourceMap::new();
    let (_, file) = sources.add_buffer("prog.f90", 120);
    let mut tree = ScopeTree::new();
    let m = module(&mut tree, "m");
    let s1 = tree.make_scope(m, ScopeKind::Subprogram, None);
    let block = tree.make_scope(s1, ScopeKind::BlockConstruct, None);
    let s2 = tree.make_scope(m, ScopeKind::Subprogram, None);

    tree.add_source_range(m, span(file, 0, 6), &sources);
    tree.add_source_range(s1, span(file, 10, 40), &sources);
    tree.add_source_range(block, span(file, 20, 30), &sources);
    tree.add_source_range(s2, span(file, 50, 90), &sources);
    tree.add_source_range(m, span(file, 95, 100), &sources);

    Layout {
        tree,
        file,
        m,
        s1,
        block,
        s2,
    }
}

#[rstest]
#[case(2, 4, "m")]
#[case(12, 14, "s1")]
#[case(22, 25, "block")]
#[case(30, 35, "s1")]
#[case(45, 46, "m")]
#[case(60, 70, "s2")]
#[case(85, 96, "m")]
fn test_find_scope_by_position(#[case] start: u32, #[case] end: u32, #[case] expected: &str) {
    let l = layout();
    let found = l.tree.find_scope(span(l.file, start, end));
    let expected = match expected {
        "m" => l.m,
        "s1" => l.s1,
        "block" => l.block,
        "s2" => l.s2,
        other => panic!("unknown scope {other}"),
    };
    assert_eq!(found, expected);
}

#[test]
fn test_module_range_covers_everything_nested() {
    let l = layout();
    assert_eq!(l.tree.scope(l.m).source_range(), Some(span(l.file, 0, 100)));
    assert_eq!(l.tree.scope(l.tree.global()).source_range(), None);
    assert_ranges_nested(&l.tree);
}

#[test]
fn test_position_outside_every_scope_is_global() {
    let l = layout();
    let past_end = TextRange::empty(l.file.end() + TextSize::from(10));
    assert_eq!(l.tree.find_scope(past_end), l.tree.global());
}

#[test]
fn test_submodule_text_is_not_in_parent_module() {
    let mut sources = SourceMap::new();
    let (_, parent_file) = sources.add_buffer("parent.f90", 50);
    let (_, child_file) = sources.add_buffer("child.f90", 50);
    let mut tree = ScopeTree::new();
    let parent = module(&mut tree, "parent");
    let child = submodule(&mut tree, "child", parent);
    let proc = tree.make_scope(child, ScopeKind::Subprogram, None);

    tree.add_source_range(parent, span(parent_file, 0, 50), &sources);
    tree.add_source_range(proc, span(child_file, 5, 45), &sources);

    assert_eq!(tree.scope(child).source_range(), Some(span(child_file, 5, 45)));
    assert_eq!(tree.scope(parent).source_range(), Some(span(parent_file, 0, 50)));
    assert_eq!(tree.find_scope(span(child_file, 10, 11)), proc);
    assert_eq!(tree.find_scope(span(parent_file, 10, 11)), parent);
    assert_ranges_nested(&tree);
}

#[test]
fn test_generated_names_do_not_move_ranges() {
    let mut sources = SourceMap::new();
    let (_, file) = sources.add_buffer("prog.f90", 40);
    let generated = sources.add_placeholder(8);
    let mut tree = ScopeTree::new();
    let m = module(&mut tree, "m");

    tree.add_source_range(m, span(file, 0, 10), &sources);
    tree.add_source_range(m, generated, &sources);
    assert_eq!(tree.scope(m).source_range(), Some(span(file, 0, 10)));
}

#[test]
#[should_panic(expected = "AddSourceRange would have combined ranges from distinct source files")]
fn test_ranges_from_two_files_in_one_scope() {
    let mut sources = SourceMap::new();
    let (_, first) = sources.add_buffer("one.f90", 40);
    let (_, second) = sources.add_buffer("two.f90", 40);
    let mut tree = ScopeTree::new();
    let m = module(&mut tree, "m");
    let proc = tree.make_scope(m, ScopeKind::Subprogram, None);

    tree.add_source_range(m, span(first, 0, 10), &sources);
    tree.add_source_range(proc, span(second, 0, 10), &sources);
}
