//! Structural type trees and declaration signatures.
//!
//! Both sides of every check are expressed with the same tree:
//!
//! - the **auto** signature, reconstructed by the loader from raw bytecode,
//!   where every position is `NotNull` unless the platform annotated it;
//! - the **alternative** signature, hand-authored and already parsed by an
//!   external collaborator into a [`TypeNode`] tree.
//!
//! The solver never sees annotation text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Nullability
// =============================================================================

/// Nullability of a single type position.
///
/// Ordered by guarantee strength: `NotNull ⊑ Nullable`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nullability {
    #[default]
    NotNull,
    Nullable,
}

impl Nullability {
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Nullable)
    }

    /// `self ⊑ other` in the nullability ordering.
    pub const fn refines(self, other: Self) -> bool {
        matches!((self, other), (Self::NotNull, _) | (Self::Nullable, Self::Nullable))
    }

    /// Qualifier used in diagnostics.
    pub const fn qualifier(self) -> &'static str {
        match self {
            Self::NotNull => "not-null",
            Self::Nullable => "nullable",
        }
    }
}

// =============================================================================
// Type trees
// =============================================================================

/// Use-site projection of a type argument (`out T`, `in T`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    #[default]
    None,
    Out,
    In,
}

/// A generic argument slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeArgument {
    /// `*`: carries no nullability information.
    Star,
    Type {
        #[serde(default)]
        projection: Projection,
        ty: TypeNode,
    },
}

impl TypeArgument {
    pub fn invariant(ty: TypeNode) -> Self {
        Self::Type {
            projection: Projection::None,
            ty,
        }
    }

    pub fn out(ty: TypeNode) -> Self {
        Self::Type {
            projection: Projection::Out,
            ty,
        }
    }

    pub fn contra(ty: TypeNode) -> Self {
        Self::Type {
            projection: Projection::In,
            ty,
        }
    }

    pub fn as_type(&self) -> Option<(Projection, &TypeNode)> {
        match self {
            Self::Star => None,
            Self::Type { projection, ty } => Some((*projection, ty)),
        }
    }
}

/// A node of a structural type tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeNode {
    /// Fully-qualified name of the base type.
    pub base: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeArgument>,
    #[serde(default)]
    pub nullability: Nullability,
}

impl TypeNode {
    pub fn not_null(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            arguments: Vec::new(),
            nullability: Nullability::NotNull,
        }
    }

    pub fn nullable(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            arguments: Vec::new(),
            nullability: Nullability::Nullable,
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<TypeArgument>) -> Self {
        self.arguments = arguments;
        self
    }

    #[must_use]
    pub fn with_nullability(mut self, nullability: Nullability) -> Self {
        self.nullability = nullability;
        self
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match arg {
                    TypeArgument::Star => f.write_str("*")?,
                    TypeArgument::Type { projection, ty } => {
                        match projection {
                            Projection::None => {}
                            Projection::Out => f.write_str("out ")?,
                            Projection::In => f.write_str("in ")?,
                        }
                        write!(f, "{ty}")?;
                    }
                }
            }
            f.write_str(">")?;
        }
        if self.nullability.is_nullable() {
            f.write_str("?")?;
        }
        Ok(())
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// Kind of a loaded member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationKind {
    Method,
    Property {
        #[serde(default)]
        mutable: bool,
    },
}

impl DeclarationKind {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Property { mutable: false } => "read-only property",
            Self::Property { mutable: true } => "mutable property",
        }
    }
}

/// Identity of a declaration: owning class, member name and a descriptor
/// that tells overloads apart.
///
/// Ordering is lexicographic over (class, name, descriptor) and is the
/// primary key diagnostics are sorted by.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclarationId {
    pub class: Arc<str>,
    pub name: Arc<str>,
    #[serde(default = "empty_descriptor")]
    pub descriptor: Arc<str>,
}

fn empty_descriptor() -> Arc<str> {
    Arc::from("")
}

impl DeclarationId {
    pub fn new(
        class: impl Into<Arc<str>>,
        name: impl Into<Arc<str>>,
        descriptor: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Identity used for diagnostics that concern a whole class.
    pub fn class_level(class: impl Into<Arc<str>>) -> Self {
        Self::new(class, "", "")
    }

    pub fn is_class_level(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_class_level() {
            return f.write_str(&self.class);
        }
        write!(f, "{}.{}{}", self.class, self.name, self.descriptor)
    }
}

/// Signature reconstructed from raw bytecode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(flatten)]
    pub kind: DeclarationKind,
    pub return_type: TypeNode,
    #[serde(default)]
    pub parameters: Vec<TypeNode>,
}

impl Signature {
    pub fn method(return_type: TypeNode, parameters: Vec<TypeNode>) -> Self {
        Self {
            kind: DeclarationKind::Method,
            return_type,
            parameters,
        }
    }

    pub fn property(ty: TypeNode, mutable: bool) -> Self {
        Self {
            kind: DeclarationKind::Property { mutable },
            return_type: ty,
            parameters: Vec::new(),
        }
    }
}

/// A method or property of a loaded class together with its auto signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: DeclarationId,
    pub signature: Signature,
}

/// Hand-authored signature attached to a declaration.
///
/// An omitted return type is inherited from the auto signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeSignature {
    #[serde(flatten)]
    pub kind: DeclarationKind,
    #[serde(default)]
    pub return_type: Option<TypeNode>,
    #[serde(default)]
    pub parameters: Vec<TypeNode>,
}

impl AlternativeSignature {
    pub fn method(return_type: Option<TypeNode>, parameters: Vec<TypeNode>) -> Self {
        Self {
            kind: DeclarationKind::Method,
            return_type,
            parameters,
        }
    }

    pub fn property(ty: TypeNode, mutable: bool) -> Self {
        Self {
            kind: DeclarationKind::Property { mutable },
            return_type: Some(ty),
            parameters: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
