//! # fortsema
//!
//! Scope and symbol-table core of a Fortran semantic analyzer.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! semantic  → Scope tree, name resolution, type pools, derived types,
//!   ↓         COMMON/EQUIVALENCE registries, scope source ranges
//! base      → Primitives (Name, BufferId, TextRange, SourceMap)
//! ```

// ============================================================================
// MODULES (dependency order: base → semantic)
// ============================================================================

/// Foundation types: Name, source buffers, TextRange
pub mod base;

/// Scope tree and symbol tables
pub mod semantic;

// Re-export foundation types
pub use base::{BufferId, Name, SourceLocation, SourceMap, SourceProvider, TextRange, TextSize};

// Re-export the entry point
pub use semantic::{ScopeId, ScopeKind, ScopeTree, SymbolId};
