//! Variance of type positions and the catalog of generic definitions.
//!
//! Variance determines which nullability changes are sound across an
//! override at a given position:
//!
//! - **Covariant** (return types, `out` slots): the overrider may only
//!   strengthen, `overrider ⊑ overridden`.
//! - **Contravariant** (parameters, `in` slots): the overrider may only
//!   weaken, `overrider ⊒ overridden`.
//! - **Invariant** (slots of mutable containers): nullability must match.
//!
//! Roots take their variance from [`Variance::of_root`]. A generic argument
//! takes the variance of the slot it occupies, either declared by the
//! generic definition or forced by a use-site projection, whatever root it
//! sits under.

use crate::position::PathSegment;
use crate::types::{DeclarationKind, Projection};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Variance of a type position or a declared type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variance {
    #[serde(rename = "out")]
    Covariant,
    #[serde(rename = "in")]
    Contravariant,
    #[serde(rename = "invariant")]
    Invariant,
}

impl Variance {
    /// Variance of a signature root.
    ///
    /// Mutable properties are read and written through the same type, so
    /// their root is invariant.
    pub const fn of_root(segment: PathSegment, kind: DeclarationKind) -> Self {
        match segment {
            PathSegment::Parameter(_) => Self::Contravariant,
            PathSegment::Type => match kind {
                DeclarationKind::Property { mutable: true } => Self::Invariant,
                _ => Self::Covariant,
            },
            PathSegment::Return | PathSegment::TypeArgument(_) => Self::Covariant,
        }
    }
}

/// Declared shape of a generic type: its platform erasure and the
/// variance of each type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericDefinition {
    pub erasure: String,
    #[serde(default)]
    pub parameters: Vec<Variance>,
}

impl GenericDefinition {
    pub fn new(erasure: impl Into<String>, parameters: Vec<Variance>) -> Self {
        Self {
            erasure: erasure.into(),
            parameters,
        }
    }
}

/// Registry of generic definitions consulted for erasure comparison and
/// declared slot variance.
///
/// Names not registered erase to themselves; their slots are invariant,
/// which matches how the platform treats its own generics.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    definitions: FxHashMap<String, GenericDefinition>,
}

impl TypeCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog preloaded with the standard collection hierarchy and the
    /// common platform-mapped types.
    pub fn with_builtins() -> Self {
        use Variance::{Contravariant as In, Covariant as Out, Invariant as Inv};

        let mut catalog = Self::new();
        let builtins: &[(&str, &str, &[Variance])] = &[
            ("kotlin.Any", "java.lang.Object", &[]),
            ("kotlin.String", "java.lang.String", &[]),
            ("kotlin.CharSequence", "java.lang.CharSequence", &[]),
            ("kotlin.Number", "java.lang.Number", &[]),
            ("kotlin.Throwable", "java.lang.Throwable", &[]),
            ("kotlin.Comparable", "java.lang.Comparable", &[In]),
            ("kotlin.collections.Iterator", "java.util.Iterator", &[Out]),
            ("kotlin.collections.MutableIterator", "java.util.Iterator", &[Inv]),
            ("kotlin.collections.Iterable", "java.lang.Iterable", &[Out]),
            ("kotlin.collections.MutableIterable", "java.lang.Iterable", &[Inv]),
            ("kotlin.collections.Collection", "java.util.Collection", &[Out]),
            ("kotlin.collections.MutableCollection", "java.util.Collection", &[Inv]),
            ("kotlin.collections.List", "java.util.List", &[Out]),
            ("kotlin.collections.MutableList", "java.util.List", &[Inv]),
            ("kotlin.collections.Set", "java.util.Set", &[Out]),
            ("kotlin.collections.MutableSet", "java.util.Set", &[Inv]),
            ("kotlin.collections.Map", "java.util.Map", &[Inv, Out]),
            ("kotlin.collections.MutableMap", "java.util.Map", &[Inv, Inv]),
        ];
        for (name, erasure, parameters) in builtins {
            catalog.register(*name, GenericDefinition::new(*erasure, parameters.to_vec()));
        }
        catalog
    }

    /// Register (or replace) the definition of `name`.
    pub fn register(&mut self, name: impl Into<String>, definition: GenericDefinition) {
        self.definitions.insert(name.into(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&GenericDefinition> {
        self.definitions.get(name)
    }

    /// Platform erasure of `name`.
    pub fn erasure<'a>(&'a self, name: &'a str) -> &'a str {
        self.definitions
            .get(name)
            .map_or(name, |definition| definition.erasure.as_str())
    }

    /// Declared variance of the `index`-th type parameter of `name`.
    pub fn declared_variance(&self, name: &str, index: usize) -> Variance {
        self.definitions
            .get(name)
            .and_then(|definition| definition.parameters.get(index).copied())
            .unwrap_or(Variance::Invariant)
    }

    /// Effective variance of a generic slot: a use-site projection wins
    /// over the declaration-site variance.
    pub fn slot_variance(&self, name: &str, index: usize, projection: Projection) -> Variance {
        match projection {
            Projection::Out => Variance::Covariant,
            Projection::In => Variance::Contravariant,
            Projection::None => self.declared_variance(name, index),
        }
    }
}

#[cfg(test)]
#[path = "tests/variance_tests.rs"]
mod tests;
