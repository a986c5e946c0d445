//! Symbols and the arena that owns them.
//!
//! Symbols live outside of any one scope so a [`SymbolId`] held by a later
//! pass stays valid however the scope tables change.

use std::ops::{Index, IndexMut};

use bitflags::bitflags;

use super::scope::ScopeId;
use super::types::{IntExpr, ParamValue, TypeId};
use crate::base::{Name, TextRange};

/// Unique identifier for a symbol in the arena.
///
/// Ids are handed out in allocation order, which makes them a deterministic
/// sequence number as well as a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Create a new SymbolId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Declared attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attrs: u32 {
        const ABSTRACT = 1 << 0;
        const ALLOCATABLE = 1 << 1;
        const BIND_C = 1 << 2;
        const CONTIGUOUS = 1 << 3;
        const DEFERRED = 1 << 4;
        const ELEMENTAL = 1 << 5;
        const EXTERNAL = 1 << 6;
        const INTENT_IN = 1 << 7;
        const INTENT_OUT = 1 << 8;
        const INTRINSIC = 1 << 9;
        const MODULE = 1 << 10;
        const OPTIONAL = 1 << 11;
        const PARAMETER = 1 << 12;
        const POINTER = 1 << 13;
        const PRIVATE = 1 << 14;
        const PROTECTED = 1 << 15;
        const PUBLIC = 1 << 16;
        const PURE = 1 << 17;
        const RECURSIVE = 1 << 18;
        const SAVE = 1 << 19;
        const TARGET = 1 << 20;
        const VALUE = 1 << 21;
        const VOLATILE = 1 << 22;
    }
}

bitflags! {
    /// Capability flags set by the analysis passes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        const FUNCTION = 1 << 0;
        const SUBROUTINE = 1 << 1;
        const IMPLICIT = 1 << 2;
        const CRAY_POINTER = 1 << 3;
        const CRAY_POINTEE = 1 << 4;
        const STMT_FUNCTION = 1 << 5;
        const PARENT_COMP = 1 << 6;
        const IN_DATA_STMT = 1 << 7;
        const IMPLICIT_OR_ERROR = 1 << 8;
    }
}

/// Flavor of a derived-type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeParamAttr {
    Kind,
    Len,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleDetails {
    pub is_submodule: bool,
    /// For a submodule: the module or submodule it continues.
    pub parent: Option<ScopeId>,
    pub scope: Option<ScopeId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubprogramDetails {
    /// Declared in an interface block rather than defined.
    pub is_interface: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedTypeDetails {
    pub scope: Option<ScopeId>,
    /// Symbol of the parent type named in `EXTENDS(...)`.
    pub extends: Option<SymbolId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamDetails {
    pub attr: TypeParamAttr,
    /// Default value from the type-parameter declaration.
    pub init: Option<IntExpr>,
    /// Value bound by an instantiation; `None` on the generic type.
    pub value: Option<ParamValue>,
}

impl TypeParamDetails {
    pub fn new(attr: TypeParamAttr) -> Self {
        Self {
            attr,
            init: None,
            value: None,
        }
    }

    pub fn with_init(mut self, init: IntExpr) -> Self {
        self.init = Some(init);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDetails {
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonBlockDetails {
    pub objects: Vec<SymbolId>,
}

/// What a symbol denotes. Replaceable as analysis learns more about a name.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Details {
    #[default]
    Unknown,
    Module(ModuleDetails),
    Subprogram(SubprogramDetails),
    DerivedType(DerivedTypeDetails),
    TypeParam(TypeParamDetails),
    Object(ObjectDetails),
    CommonBlock(CommonBlockDetails),
}

impl Details {
    /// Short name of the variant, used in dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Details::Unknown => "Unknown",
            Details::Module(_) => "Module",
            Details::Subprogram(_) => "Subprogram",
            Details::DerivedType(_) => "DerivedType",
            Details::TypeParam(_) => "TypeParam",
            Details::Object(_) => "ObjectEntity",
            Details::CommonBlock(_) => "CommonBlock",
        }
    }
}

/// A declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    name: Name,
    owner: ScopeId,
    /// Location of the declaring occurrence of the name.
    source: Option<TextRange>,
    attrs: Attrs,
    flags: SymbolFlags,
    details: Details,
}

impl Symbol {
    pub fn new(owner: ScopeId, name: impl Into<Name>, attrs: Attrs, details: Details) -> Self {
        Self {
            name: name.into(),
            owner,
            source: None,
            attrs,
            flags: SymbolFlags::empty(),
            details,
        }
    }

    pub fn with_source(mut self, source: TextRange) -> Self {
        self.source = Some(source);
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The scope that created this symbol.
    pub fn owner(&self) -> ScopeId {
        self.owner
    }

    pub fn source(&self) -> Option<TextRange> {
        self.source
    }

    pub fn set_source(&mut self, source: TextRange) {
        self.source = Some(source);
    }

    pub fn attrs(&self) -> Attrs {
        self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    pub fn flags(&self) -> SymbolFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut SymbolFlags {
        &mut self.flags
    }

    pub fn test(&self, flag: SymbolFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set(&mut self, flag: SymbolFlags) {
        self.flags.insert(flag);
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut Details {
        &mut self.details
    }

    /// Replace the details, returning the previous ones.
    pub fn set_details(&mut self, details: Details) -> Details {
        std::mem::replace(&mut self.details, details)
    }

    pub fn module_details(&self) -> Option<&ModuleDetails> {
        match &self.details {
            Details::Module(details) => Some(details),
            _ => None,
        }
    }

    pub fn subprogram_details(&self) -> Option<&SubprogramDetails> {
        match &self.details {
            Details::Subprogram(details) => Some(details),
            _ => None,
        }
    }

    pub fn derived_type_details(&self) -> Option<&DerivedTypeDetails> {
        match &self.details {
            Details::DerivedType(details) => Some(details),
            _ => None,
        }
    }

    pub fn type_param_details(&self) -> Option<&TypeParamDetails> {
        match &self.details {
            Details::TypeParam(details) => Some(details),
            _ => None,
        }
    }
}

/// Arena storage for all symbols of a compilation - single source of truth.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
        }
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId::new(self.symbols.len());
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId::new(i), symbol))
    }
}

impl Index<SymbolId> for SymbolArena {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }
}

impl IndexMut<SymbolId> for SymbolArena {
    fn index_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }
}
