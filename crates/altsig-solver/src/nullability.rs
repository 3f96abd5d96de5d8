//! Variance-aware nullability checking across overrides.
//!
//! Both effective signatures of an override pair are walked in lockstep.
//! At each aligned position the nullability of the overrider is compared
//! with the overridden declaration under the position's variance:
//!
//! | Variance      | Sound when                 | Violation                              |
//! |---------------|----------------------------|----------------------------------------|
//! | Covariant     | `overrider ⊑ overridden`   | overrider nullable, overridden not-null |
//! | Contravariant | `overrider ⊒ overridden`   | overrider not-null, overridden nullable |
//! | Invariant     | `overrider == overridden`  | any difference                          |
//!
//! Checking never stops at the first violation; every position of every
//! pair is visited.

use crate::hierarchy::OverridePair;
use crate::position::{PathSegment, TypePosition};
use crate::types::{DeclarationId, DeclarationKind, Nullability, TypeNode};
use crate::variance::{TypeCatalog, Variance};
use altsig_common::limits::MAX_TYPE_DEPTH;
use tracing::{debug, trace};

/// One unsound nullability change at one position of one override pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullabilityViolation {
    pub overrider: DeclarationId,
    pub overridden: DeclarationId,
    pub position: TypePosition,
    pub variance: Variance,
    /// Nullability and rendering of the overridden side.
    pub expected: Nullability,
    pub expected_text: String,
    /// Nullability and rendering of the overrider side.
    pub actual: Nullability,
    pub actual_text: String,
}

/// `overrider` may replace `overridden` at a position with `variance`.
pub const fn is_sound(variance: Variance, overrider: Nullability, overridden: Nullability) -> bool {
    match variance {
        Variance::Covariant => overrider.refines(overridden),
        Variance::Contravariant => overridden.refines(overrider),
        Variance::Invariant => overrider.refines(overridden) && overridden.refines(overrider),
    }
}

pub struct NullabilityChecker<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> NullabilityChecker<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Check one override pair, returning every violation found.
    pub fn check_pair(&self, pair: &OverridePair<'_>) -> Vec<NullabilityViolation> {
        let mut walk = Walk {
            catalog: self.catalog,
            pair,
            violations: Vec::new(),
        };

        let overrider = pair.overrider_type;
        let overridden = pair.overridden_type;
        let (root, kind) = match (overrider.kind, overridden.kind) {
            (DeclarationKind::Method, DeclarationKind::Method) => {
                (PathSegment::Return, DeclarationKind::Method)
            }
            // A mutable overridden property keeps the overrider's type invariant.
            (_, kind @ DeclarationKind::Property { .. }) => (PathSegment::Type, kind),
            (kind, _) => (PathSegment::Type, kind),
        };
        walk.visit(
            TypePosition::root(root),
            Variance::of_root(root, kind),
            &overrider.return_type,
            &overridden.return_type,
        );

        for (index, (overrider_param, overridden_param)) in overrider
            .parameters
            .iter()
            .zip(&overridden.parameters)
            .enumerate()
        {
            let segment = PathSegment::Parameter(index as u32);
            walk.visit(
                TypePosition::root(segment),
                Variance::of_root(segment, kind),
                overrider_param,
                overridden_param,
            );
        }

        if !walk.violations.is_empty() {
            debug!(
                overrider = %pair.overrider,
                overridden = %pair.overridden,
                count = walk.violations.len(),
                "nullability violations"
            );
        }
        walk.violations
    }

    /// Check many pairs; results keep pair order.
    pub fn check_pairs(&self, pairs: &[OverridePair<'_>]) -> Vec<NullabilityViolation> {
        pairs.iter().flat_map(|pair| self.check_pair(pair)).collect()
    }
}

struct Walk<'c, 'p> {
    catalog: &'c TypeCatalog,
    pair: &'p OverridePair<'p>,
    violations: Vec<NullabilityViolation>,
}

impl Walk<'_, '_> {
    fn visit(
        &mut self,
        position: TypePosition,
        variance: Variance,
        overrider: &TypeNode,
        overridden: &TypeNode,
    ) {
        if !is_sound(variance, overrider.nullability, overridden.nullability) {
            trace!(%position, ?variance, "unsound nullability");
            self.violations.push(NullabilityViolation {
                overrider: self.pair.overrider.clone(),
                overridden: self.pair.overridden.clone(),
                position: position.clone(),
                variance,
                expected: overridden.nullability,
                expected_text: overridden.to_string(),
                actual: overrider.nullability,
                actual_text: overrider.to_string(),
            });
        }

        // Positions below differently shaped types do not line up.
        if position.depth() >= MAX_TYPE_DEPTH
            || overrider.arguments.len() != overridden.arguments.len()
            || self.catalog.erasure(&overrider.base) != self.catalog.erasure(&overridden.base)
        {
            return;
        }

        for (index, (overrider_arg, overridden_arg)) in overrider
            .arguments
            .iter()
            .zip(&overridden.arguments)
            .enumerate()
        {
            let (Some((_, overrider_ty)), Some((projection, overridden_ty))) =
                (overrider_arg.as_type(), overridden_arg.as_type())
            else {
                continue;
            };
            let slot = self
                .catalog
                .slot_variance(&overridden.base, index, projection);
            self.visit(position.type_argument(index), slot, overrider_ty, overridden_ty);
        }
    }
}

#[cfg(test)]
#[path = "tests/nullability_tests.rs"]
mod tests;
