//! # Semantic Analysis
//!
//! The scope tree of a Fortran compilation and everything hung off it: symbol
//! tables, name visibility, declared-type pools, derived-type instantiation,
//! storage-grouping registries and per-scope source ranges.
//!
//! All state lives in one [`ScopeTree`]; scopes and symbols are addressed by
//! [`ScopeId`] and [`SymbolId`].

mod aggregates;
mod config;
mod derived;
mod dump;
mod error;
mod intern;
mod resolve;
mod scope;
mod source_range;
mod symbol;
mod tree;
mod types;

pub use aggregates::{EquivalenceObject, EquivalenceSet};
pub use config::TreeConfig;
pub use dump::ScopeDump;
pub use error::{ImportConflict, SourceRangeConflict};
pub use scope::{AttributedRange, ImportKind, Scope, ScopeId, ScopeKind};
pub use symbol::{
    Attrs, CommonBlockDetails, DerivedTypeDetails, Details, ModuleDetails, ObjectDetails,
    SubprogramDetails, Symbol, SymbolArena, SymbolFlags, SymbolId, TypeParamAttr,
    TypeParamDetails,
};
pub use tree::ScopeTree;
pub use types::{
    CharacterTypeSpec, DeclTypeSpec, DerivedCategory, DerivedTypeSpec, DynamicType, FxIndexMap,
    IntExpr, KindExpr, NumericTypeSpec, ParamValue, TypeCategory, TypeId, TypedExpr,
};
