use std::fmt;

use rustc_hash::FxHashSet;

use super::aggregates::EquivalenceSet;
use super::symbol::SymbolId;
use super::types::{DeclTypeSpec, DerivedTypeSpec, FxIndexMap};
use crate::base::{BufferId, Name, TextRange};

/// Unique identifier for a scope in the tree. The global scope is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);

    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    IntrinsicModules,
    Module,
    MainProgram,
    Subprogram,
    BlockData,
    DerivedType,
    BlockConstruct,
    Forall,
    OtherConstruct,
    OpenAccConstruct,
    OpenMpConstruct,
    ImpliedDos,
    OtherClause,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ScopeKind::Global => "Global",
            ScopeKind::IntrinsicModules => "IntrinsicModules",
            ScopeKind::Module => "Module",
            ScopeKind::MainProgram => "MainProgram",
            ScopeKind::Subprogram => "Subprogram",
            ScopeKind::BlockData => "BlockData",
            ScopeKind::DerivedType => "DerivedType",
            ScopeKind::BlockConstruct => "BlockConstruct",
            ScopeKind::Forall => "Forall",
            ScopeKind::OtherConstruct => "OtherConstruct",
            ScopeKind::OpenAccConstruct => "OpenACCConstruct",
            ScopeKind::OpenMpConstruct => "OpenMPConstruct",
            ScopeKind::ImpliedDos => "ImpliedDos",
            ScopeKind::OtherClause => "OtherClause",
        };
        f.write_str(text)
    }
}

/// The form of an IMPORT statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// No IMPORT statement: ordinary host association.
    Default,
    /// `IMPORT, NONE`
    None,
    /// `IMPORT, ALL`
    All,
    /// `IMPORT, ONLY: names`
    Only,
}

/// Source text attributed to a scope, and the buffer it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributedRange {
    pub buffer: BufferId,
    pub range: TextRange,
}

/// A node of the scope tree.
///
/// Scopes are created through [`ScopeTree::make_scope`](super::ScopeTree::make_scope)
/// and never removed. Relations to other scopes and to symbols are handles
/// into the tree's arenas.
#[derive(Debug, Clone)]
pub struct Scope {
    pub(super) kind: ScopeKind,
    pub(super) parent: Option<ScopeId>,
    pub(super) symbol: Option<SymbolId>,
    pub(super) children: Vec<ScopeId>,
    /// Maps symbol name to SymbolId (symbols are stored in arena)
    pub(super) symbols: FxIndexMap<Name, SymbolId>,
    pub(super) import_kind: Option<ImportKind>,
    pub(super) import_names: FxHashSet<Name>,
    pub(super) types: Vec<DeclTypeSpec>,
    pub(super) common_blocks: FxIndexMap<Name, SymbolId>,
    pub(super) submodules: FxIndexMap<Name, ScopeId>,
    pub(super) equivalence_sets: Vec<EquivalenceSet>,
    pub(super) cray_pointers: FxIndexMap<Name, SymbolId>,
    pub(super) source: Option<AttributedRange>,
    /// Set on derived-type instantiations: the spec this scope instantiates.
    pub(super) derived_type_spec: Option<DerivedTypeSpec>,
}

impl Scope {
    pub(super) fn new(kind: ScopeKind, parent: Option<ScopeId>, symbol: Option<SymbolId>) -> Self {
        Self {
            kind,
            parent,
            symbol,
            children: Vec::new(),
            symbols: FxIndexMap::default(),
            import_kind: None,
            import_names: FxHashSet::default(),
            types: Vec::new(),
            common_blocks: FxIndexMap::default(),
            submodules: FxIndexMap::default(),
            equivalence_sets: Vec::new(),
            cray_pointers: FxIndexMap::default(),
            source: None,
            derived_type_spec: None,
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// The lexical parent; `None` only for the global scope.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// The symbol that introduced this scope, if any.
    pub fn symbol(&self) -> Option<SymbolId> {
        self.symbol
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    pub fn is_global(&self) -> bool {
        self.kind == ScopeKind::Global
    }

    /// Global scope or the intrinsic-modules scope: nothing above these is
    /// host associated.
    pub fn is_top_level(&self) -> bool {
        matches!(self.kind, ScopeKind::Global | ScopeKind::IntrinsicModules)
    }

    pub fn is_derived_type(&self) -> bool {
        self.kind == ScopeKind::DerivedType
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Name/symbol pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, SymbolId)> {
        self.symbols.iter().map(|(name, id)| (name, *id))
    }

    /// The explicitly set import kind, if any.
    pub fn explicit_import_kind(&self) -> Option<ImportKind> {
        self.import_kind
    }

    pub fn import_names(&self) -> &FxHashSet<Name> {
        &self.import_names
    }

    /// This scope's type pool, in creation order.
    pub fn types(&self) -> &[DeclTypeSpec] {
        &self.types
    }

    pub fn common_blocks(&self) -> &FxIndexMap<Name, SymbolId> {
        &self.common_blocks
    }

    pub fn submodules(&self) -> &FxIndexMap<Name, ScopeId> {
        &self.submodules
    }

    pub fn equivalence_sets(&self) -> &[EquivalenceSet] {
        &self.equivalence_sets
    }

    pub fn cray_pointers(&self) -> &FxIndexMap<Name, SymbolId> {
        &self.cray_pointers
    }

    pub fn source_range(&self) -> Option<TextRange> {
        self.source.map(|s| s.range)
    }

    pub fn source_buffer(&self) -> Option<BufferId> {
        self.source.map(|s| s.buffer)
    }

    /// For an instantiation scope, the derived-type spec it instantiates.
    pub fn derived_type_spec(&self) -> Option<&DerivedTypeSpec> {
        self.derived_type_spec.as_ref()
    }
}
