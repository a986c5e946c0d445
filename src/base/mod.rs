//! Foundation types for the fortsema toolchain.
//!
//! This module provides fundamental types used throughout the analyzer:
//! - [`Name`] - Cheap-to-clone identifier text
//! - [`BufferId`] - Identity of a cooked source buffer
//! - [`TextRange`], [`TextSize`] - Source ranges (byte offsets)
//! - [`SourceProvider`], [`SourceMap`] - Buffer resolution for ranges
//!
//! This module has NO dependencies on other fortsema modules.

mod source;

pub use source::{BufferId, SourceLocation, SourceMap, SourceProvider};
pub use text_size::{TextRange, TextSize};

/// An identifier as written in the source (already case-folded by the parser).
pub type Name = smol_str::SmolStr;

// Re-export text-size types for convenience
pub use text_size;
