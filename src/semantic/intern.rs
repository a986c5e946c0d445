//! Type pools: canonical declared-type descriptors per scope.
//!
//! Lengthless types (numeric, logical, `TYPE(*)`, `CLASS(*)`) carry nothing
//! that depends on where they are declared, so each pool holds at most one
//! copy of each. Character and derived types may embed expressions tied to
//! one declaration and always get a fresh entry.

use super::scope::ScopeId;
use super::tree::ScopeTree;
use super::types::{
    CharacterTypeSpec, DeclTypeSpec, DerivedCategory, DerivedTypeSpec, IntExpr, KindExpr,
    NumericTypeSpec, ParamValue, TypeCategory, TypeId, TypedExpr,
};

impl ScopeTree {
    pub fn decl_type(&self, id: TypeId) -> &DeclTypeSpec {
        &self.scope(id.scope).types[id.index as usize]
    }

    pub(super) fn decl_type_mut(&mut self, id: TypeId) -> &mut DeclTypeSpec {
        &mut self.scopes[id.scope.index()].types[id.index as usize]
    }

    /// Handles of every entry in the pool of `scope`.
    pub fn type_ids(&self, scope: ScopeId) -> impl Iterator<Item = TypeId> + use<> {
        (0..self.scope(scope).types.len() as u32).map(move |index| TypeId { scope, index })
    }

    /// A pool entry of `scope` equal to `target`.
    pub fn find_type(&self, scope: ScopeId, target: &DeclTypeSpec) -> Option<TypeId> {
        self.scope(scope)
            .types
            .iter()
            .position(|t| t == target)
            .map(|index| TypeId {
                scope,
                index: index as u32,
            })
    }

    pub fn make_numeric_type(
        &mut self,
        scope: ScopeId,
        category: TypeCategory,
        kind: KindExpr,
    ) -> TypeId {
        debug_assert!(category.is_numeric(), "{category:?} is not a numeric category");
        self.make_lengthless_type(
            scope,
            DeclTypeSpec::Numeric(NumericTypeSpec { category, kind }),
        )
    }

    pub fn make_logical_type(&mut self, scope: ScopeId, kind: KindExpr) -> TypeId {
        self.make_lengthless_type(scope, DeclTypeSpec::Logical(kind))
    }

    pub fn make_type_star_type(&mut self, scope: ScopeId) -> TypeId {
        self.make_lengthless_type(scope, DeclTypeSpec::TypeStar)
    }

    pub fn make_class_star_type(&mut self, scope: ScopeId) -> TypeId {
        self.make_lengthless_type(scope, DeclTypeSpec::ClassStar)
    }

    fn make_lengthless_type(&mut self, scope: ScopeId, ty: DeclTypeSpec) -> TypeId {
        match self.find_type(scope, &ty) {
            Some(found) => found,
            None => self.push_type(scope, ty),
        }
    }

    /// Always a new entry: `length` may be an expression that only means
    /// something at this declaration.
    pub fn make_character_type(
        &mut self,
        scope: ScopeId,
        length: ParamValue,
        kind: KindExpr,
    ) -> TypeId {
        self.push_type(
            scope,
            DeclTypeSpec::Character(CharacterTypeSpec { length, kind }),
        )
    }

    /// Always a new entry wrapping `spec`.
    pub fn make_derived_type(
        &mut self,
        scope: ScopeId,
        category: DerivedCategory,
        spec: DerivedTypeSpec,
    ) -> TypeId {
        self.push_type(scope, DeclTypeSpec::derived(category, spec))
    }

    fn push_type(&mut self, scope: ScopeId, ty: DeclTypeSpec) -> TypeId {
        let pool = &mut self.scopes[scope.index()].types;
        let id = TypeId {
            scope,
            index: pool.len() as u32,
        };
        tracing::trace!(?scope, ty = %ty, index = id.index, "new pool entry");
        pool.push(ty);
        id
    }

    /// The declared type matching the type of `expr`, formed in `scope`.
    pub fn get_type(&mut self, scope: ScopeId, expr: &dyn TypedExpr) -> Option<TypeId> {
        let dy_type = expr.dynamic_type()?;
        if dy_type.assumed_type {
            return Some(self.make_type_star_type(scope));
        }
        if dy_type.unlimited_polymorphic {
            return Some(self.make_class_star_type(scope));
        }
        let kind = IntExpr::Constant(dy_type.kind);
        match dy_type.category {
            TypeCategory::Integer
            | TypeCategory::Unsigned
            | TypeCategory::Real
            | TypeCategory::Complex => {
                Some(self.make_numeric_type(scope, dy_type.category, kind))
            }
            TypeCategory::Character => {
                if let Some(length) = dy_type.char_len_param {
                    return Some(self.make_character_type(scope, length, kind));
                }
                let length = dy_type.char_len.or_else(|| expr.char_len())?;
                Some(self.make_character_type(scope, ParamValue::Explicit(length), kind))
            }
            TypeCategory::Logical => Some(self.make_logical_type(scope, kind)),
            TypeCategory::Derived => {
                let spec = dy_type.derived?;
                let category = if dy_type.polymorphic {
                    DerivedCategory::Class
                } else {
                    DerivedCategory::Type
                };
                Some(self.make_derived_type(scope, category, spec))
            }
        }
    }
}
