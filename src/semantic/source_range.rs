//! Source ranges of scopes.
//!
//! Each scope's range grows to cover all text attributed to it or to any
//! scope nested in it, except that a submodule's text is not part of its
//! ancestors' ranges. Top-level scopes have no range.

use super::error::SourceRangeConflict;
use super::scope::{AttributedRange, ScopeId};
use super::tree::ScopeTree;
use crate::base::{SourceProvider, TextRange, TextSize};

impl ScopeTree {
    /// Attribute `range` to `scope` and to its enclosing scopes.
    ///
    /// # Panics
    ///
    /// If a scope on the way already covers text from a different buffer.
    pub fn add_source_range(
        &mut self,
        scope: ScopeId,
        range: TextRange,
        sources: &impl SourceProvider,
    ) {
        if range.is_empty() {
            return;
        }
        let Some(buffer) = sources.find_buffer(range) else {
            if sources.is_placeholder(range) {
                tracing::trace!(?range, "ignoring placeholder range");
            } else {
                tracing::warn!(?range, "range belongs to no source buffer; ignored");
            }
            return;
        };

        let mut current = scope;
        while !self.scope(current).is_top_level() {
            let combined = match self.scope(current).source {
                None => range,
                Some(existing) if existing.buffer == buffer => sources.cover(existing.range, range),
                Some(existing) => {
                    let conflict = SourceRangeConflict {
                        existing: sources.locate(existing.range),
                        added: sources.locate(range),
                    };
                    panic!("{conflict}");
                }
            };
            self.update_scope_index(current, combined);
            self.scopes[current.index()].source = Some(AttributedRange {
                buffer,
                range: combined,
            });
            tracing::trace!(scope = ?current, ?combined, "attributed source range");

            if self.is_submodule(current) {
                break;
            }
            let Some(parent) = self.scope(current).parent else {
                break;
            };
            current = parent;
        }
    }

    fn update_scope_index(&mut self, scope: ScopeId, new_range: TextRange) {
        match self.scope(scope).source_range() {
            None => {
                self.scope_index.insert((new_range.start(), scope));
            }
            Some(old) if !old.contains_range(new_range) => {
                self.scope_index.remove(&(old.start(), scope));
                self.scope_index.insert((new_range.start(), scope));
            }
            Some(_) => {}
        }
    }

    /// The innermost scope whose source range contains `range`; the global
    /// scope if there is none.
    pub fn find_scope(&self, range: TextRange) -> ScopeId {
        let upper = (range.start(), ScopeId::new(u32::MAX as usize));
        let lower = (TextSize::from(0), ScopeId::GLOBAL);
        self.scope_index
            .range(lower..=upper)
            .rev()
            .map(|&(_, scope)| scope)
            .filter(|&scope| {
                self.scope(scope)
                    .source_range()
                    .is_some_and(|r| r.contains_range(range))
            })
            .min_by_key(|&scope| self.scope(scope).source_range().map(|r| r.len()))
            .unwrap_or(ScopeId::GLOBAL)
    }
}
