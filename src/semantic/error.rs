//! Error types for scope-tree operations.
//!
//! Only user-facing semantic errors are values here. Lookup misses are plain
//! `Option`/`bool`, and internal invariant violations panic.

use thiserror::Error;

use crate::base::SourceLocation;

/// Conflicting IMPORT statements within one scope.
///
/// The variant is the message key; the `Display` text is the default English
/// rendering for callers that do not localize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ImportConflict {
    /// `IMPORT, NONE` combined with another IMPORT statement.
    #[error("IMPORT,NONE must be the only IMPORT statement in a scope")]
    NoneNotSole,

    /// `IMPORT, ALL` combined with another IMPORT statement.
    #[error("IMPORT,ALL must be the only IMPORT statement in a scope")]
    AllNotSole,

    /// Plain `IMPORT` mixed with `IMPORT, ONLY:`.
    #[error("Every IMPORT must have ONLY specifier if one of them does")]
    OnlyRequired,
}

impl ImportConflict {
    /// The standard constraint this violates.
    pub fn code(&self) -> &'static str {
        match self {
            ImportConflict::NoneNotSole | ImportConflict::AllNotSole => "C8100",
            ImportConflict::OnlyRequired => "C898",
        }
    }
}

/// Two source buffers were about to be mixed inside one scope's range.
///
/// Never returned; it only formats the panic message.
#[derive(Debug, Clone, Error)]
#[error(
    "AddSourceRange would have combined ranges from distinct source files \"{}\" and \"{}\"",
    describe(.existing),
    describe(.added)
)]
pub struct SourceRangeConflict {
    pub existing: Option<SourceLocation>,
    pub added: Option<SourceLocation>,
}

fn describe(location: &Option<SourceLocation>) -> String {
    match location {
        Some(location) => location.to_string(),
        None => "(unknown source location)".to_string(),
    }
}
