//! Declared-type descriptors and the dynamic types they are derived from.

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::scope::ScopeId;
use super::symbol::SymbolId;
use crate::base::Name;

/// Insertion-ordered map with the fast hasher used throughout the crate.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Intrinsic type categories plus `Derived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Integer,
    Unsigned,
    Real,
    Complex,
    Character,
    Logical,
    Derived,
}

impl TypeCategory {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeCategory::Integer
                | TypeCategory::Unsigned
                | TypeCategory::Real
                | TypeCategory::Complex
        )
    }

    pub fn as_fortran(self) -> &'static str {
        match self {
            TypeCategory::Integer => "INTEGER",
            TypeCategory::Unsigned => "UNSIGNED",
            TypeCategory::Real => "REAL",
            TypeCategory::Complex => "COMPLEX",
            TypeCategory::Character => "CHARACTER",
            TypeCategory::Logical => "LOGICAL",
            TypeCategory::Derived => "TYPE",
        }
    }
}

/// Integer-valued specification expression, as far as this crate needs to see
/// it. Folding and checking belong to the expression subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntExpr {
    Constant(i64),
    /// Reference to a named constant, dummy argument or type parameter.
    Named(Name),
    /// `LEN(name)` of a character entity.
    Len(Name),
}

impl IntExpr {
    pub fn constant(&self) -> Option<i64> {
        match self {
            IntExpr::Constant(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for IntExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntExpr::Constant(value) => write!(f, "{value}"),
            IntExpr::Named(name) => write!(f, "{name}"),
            IntExpr::Len(name) => write!(f, "len({name})"),
        }
    }
}

/// Kind type parameter value of an intrinsic type.
pub type KindExpr = IntExpr;

/// Value of a type parameter: an expression, `*` or `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Explicit(IntExpr),
    Assumed,
    Deferred,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Explicit(expr) => write!(f, "{expr}"),
            ParamValue::Assumed => f.write_str("*"),
            ParamValue::Deferred => f.write_str(":"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericTypeSpec {
    pub category: TypeCategory,
    pub kind: KindExpr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterTypeSpec {
    pub length: ParamValue,
    pub kind: KindExpr,
}

/// A reference to a derived type together with its type-parameter values.
///
/// Equality looks at the type and the parameter values only; whether and
/// where the spec has been instantiated does not matter.
#[derive(Debug, Clone)]
pub struct DerivedTypeSpec {
    type_symbol: SymbolId,
    name: Name,
    parameters: FxIndexMap<Name, ParamValue>,
    scope: Option<ScopeId>,
    instantiated: bool,
}

impl DerivedTypeSpec {
    pub fn new(type_symbol: SymbolId, name: impl Into<Name>) -> Self {
        Self {
            type_symbol,
            name: name.into(),
            parameters: FxIndexMap::default(),
            scope: None,
            instantiated: false,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<Name>, value: ParamValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn type_symbol(&self) -> SymbolId {
        self.type_symbol
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn parameters(&self) -> &FxIndexMap<Name, ParamValue> {
        &self.parameters
    }

    pub fn find_parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name)
    }

    pub fn add_parameter(&mut self, name: impl Into<Name>, value: ParamValue) {
        self.parameters.insert(name.into(), value);
    }

    /// Scope holding the components: the type's own scope, or an
    /// instantiation scope for a parameterized type.
    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    pub fn is_instantiated(&self) -> bool {
        self.instantiated
    }

    pub(crate) fn set_parameters(&mut self, parameters: FxIndexMap<Name, ParamValue>) {
        self.parameters = parameters;
    }

    pub(crate) fn mark_instantiated(&mut self, scope: ScopeId) {
        self.scope = Some(scope);
        self.instantiated = true;
    }
}

impl PartialEq for DerivedTypeSpec {
    fn eq(&self, other: &Self) -> bool {
        self.type_symbol == other.type_symbol && self.parameters == other.parameters
    }
}

impl Eq for DerivedTypeSpec {}

impl fmt::Display for DerivedTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.parameters.is_empty() {
            let mut sep = '(';
            for (name, value) in &self.parameters {
                write!(f, "{sep}{name}={value}")?;
                sep = ',';
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// `TYPE(...)` versus polymorphic `CLASS(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedCategory {
    Type,
    Class,
}

/// A declared type as it appears in a type-declaration statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclTypeSpec {
    Numeric(NumericTypeSpec),
    Logical(KindExpr),
    Character(CharacterTypeSpec),
    /// `TYPE(*)`
    TypeStar,
    /// `CLASS(*)`
    ClassStar,
    TypeDerived(DerivedTypeSpec),
    ClassDerived(DerivedTypeSpec),
}

impl DeclTypeSpec {
    pub fn derived(category: DerivedCategory, spec: DerivedTypeSpec) -> Self {
        match category {
            DerivedCategory::Type => DeclTypeSpec::TypeDerived(spec),
            DerivedCategory::Class => DeclTypeSpec::ClassDerived(spec),
        }
    }

    /// Types with no length parameter can be shared between scopes.
    pub fn is_lengthless(&self) -> bool {
        matches!(
            self,
            DeclTypeSpec::Numeric(_)
                | DeclTypeSpec::Logical(_)
                | DeclTypeSpec::TypeStar
                | DeclTypeSpec::ClassStar
        )
    }

    pub fn derived_category(&self) -> Option<DerivedCategory> {
        match self {
            DeclTypeSpec::TypeDerived(_) => Some(DerivedCategory::Type),
            DeclTypeSpec::ClassDerived(_) => Some(DerivedCategory::Class),
            _ => None,
        }
    }

    pub fn derived_type_spec(&self) -> Option<&DerivedTypeSpec> {
        match self {
            DeclTypeSpec::TypeDerived(spec) | DeclTypeSpec::ClassDerived(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn derived_type_spec_mut(&mut self) -> Option<&mut DerivedTypeSpec> {
        match self {
            DeclTypeSpec::TypeDerived(spec) | DeclTypeSpec::ClassDerived(spec) => Some(spec),
            _ => None,
        }
    }
}

impl fmt::Display for DeclTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclTypeSpec::Numeric(spec) => {
                write!(f, "{}(kind={})", spec.category.as_fortran(), spec.kind)
            }
            DeclTypeSpec::Logical(kind) => write!(f, "LOGICAL(kind={kind})"),
            DeclTypeSpec::Character(spec) => {
                write!(f, "CHARACTER(len={},kind={})", spec.length, spec.kind)
            }
            DeclTypeSpec::TypeStar => f.write_str("TYPE(*)"),
            DeclTypeSpec::ClassStar => f.write_str("CLASS(*)"),
            DeclTypeSpec::TypeDerived(spec) => write!(f, "TYPE({spec})"),
            DeclTypeSpec::ClassDerived(spec) => write!(f, "CLASS({spec})"),
        }
    }
}

/// Handle to an entry of some scope's type pool. Pools only grow, so a
/// handle never dangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId {
    pub scope: ScopeId,
    pub index: u32,
}

/// Type of an analyzed expression, as reported by the expression subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicType {
    pub category: TypeCategory,
    pub kind: i64,
    /// Explicit length-parameter value of a character type.
    pub char_len_param: Option<ParamValue>,
    /// Known length of a character type.
    pub char_len: Option<IntExpr>,
    pub derived: Option<DerivedTypeSpec>,
    pub polymorphic: bool,
    /// `TYPE(*)`
    pub assumed_type: bool,
    /// `CLASS(*)`
    pub unlimited_polymorphic: bool,
}

impl DynamicType {
    pub fn intrinsic(category: TypeCategory, kind: i64) -> Self {
        Self {
            category,
            kind,
            char_len_param: None,
            char_len: None,
            derived: None,
            polymorphic: false,
            assumed_type: false,
            unlimited_polymorphic: false,
        }
    }

    pub fn character(kind: i64) -> Self {
        Self::intrinsic(TypeCategory::Character, kind)
    }

    pub fn derived(spec: DerivedTypeSpec) -> Self {
        Self {
            derived: Some(spec),
            ..Self::intrinsic(TypeCategory::Derived, 0)
        }
    }

    pub fn assumed_type() -> Self {
        Self {
            assumed_type: true,
            ..Self::intrinsic(TypeCategory::Derived, 0)
        }
    }

    pub fn unlimited_polymorphic() -> Self {
        Self {
            polymorphic: true,
            unlimited_polymorphic: true,
            ..Self::intrinsic(TypeCategory::Derived, 0)
        }
    }

    pub fn with_len_param(mut self, value: ParamValue) -> Self {
        self.char_len_param = Some(value);
        self
    }

    pub fn with_len(mut self, len: IntExpr) -> Self {
        self.char_len = Some(len);
        self
    }

    pub fn polymorphic(mut self) -> Self {
        self.polymorphic = true;
        self
    }
}

/// An analyzed expression whose type can be asked for.
pub trait TypedExpr {
    fn dynamic_type(&self) -> Option<DynamicType>;

    /// `LEN()` of a character-valued expression, when it can be formed.
    fn char_len(&self) -> Option<IntExpr> {
        None
    }
}
