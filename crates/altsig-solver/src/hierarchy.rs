//! Override hierarchy walking.
//!
//! Override relations are supplied by the host as a plain edge list; the
//! walker never resolves override eligibility itself. Edges are grouped by
//! overrider so a declaration with several supertypes (a diamond) yields
//! one pair per overridden declaration, each checked independently.

use crate::structural::{EffectiveSignature, SignatureOrigin};
use crate::types::DeclarationId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

/// `overrider → overridden`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverrideEdge {
    pub overrider: DeclarationId,
    pub overridden: DeclarationId,
}

impl OverrideEdge {
    pub fn new(overrider: DeclarationId, overridden: DeclarationId) -> Self {
        Self {
            overrider,
            overridden,
        }
    }
}

/// Resolves a declaration to its effective signature.
pub trait EffectiveTypeLookup {
    fn effective(&self, id: &DeclarationId) -> Option<&EffectiveSignature>;
}

/// One override relation ready for nullability checking.
#[derive(Copy, Clone, Debug)]
pub struct OverridePair<'a> {
    pub overrider: &'a DeclarationId,
    pub overridden: &'a DeclarationId,
    pub overrider_type: &'a EffectiveSignature,
    pub overridden_type: &'a EffectiveSignature,
}

/// Groups override edges by overrider.
pub struct OverrideHierarchyWalker<'e> {
    groups: IndexMap<&'e DeclarationId, SmallVec<[&'e DeclarationId; 2]>>,
}

impl<'e> OverrideHierarchyWalker<'e> {
    pub fn new(edges: impl IntoIterator<Item = &'e OverrideEdge>) -> Self {
        let mut groups: IndexMap<&'e DeclarationId, SmallVec<[&'e DeclarationId; 2]>> =
            IndexMap::new();
        for edge in edges {
            let overridden = groups.entry(&edge.overrider).or_default();
            if !overridden.contains(&&edge.overridden) {
                overridden.push(&edge.overridden);
            }
        }
        Self { groups }
    }

    /// Declarations that override at least one other declaration.
    pub fn overriders(&self) -> impl Iterator<Item = &'e DeclarationId> + '_ {
        self.groups.keys().copied()
    }

    /// Everything `overrider` overrides, in edge order.
    pub fn overridden_by(&self, overrider: &DeclarationId) -> &[&'e DeclarationId] {
        self.groups
            .get(overrider)
            .map(|overridden| overridden.as_slice())
            .unwrap_or(&[])
    }

    /// Collect every pair that carries alternative information on at least
    /// one side.
    ///
    /// Skipped:
    /// - pairs where either declaration cannot be resolved;
    /// - pairs with auto signatures on both sides, which the host's own
    ///   override check already covers;
    /// - pairs whose overrider had its alternative rejected, since that
    ///   declaration degrades to auto-only checking.
    pub fn collect_pairs<'a, L>(&'a self, lookup: &'a L) -> Vec<OverridePair<'a>>
    where
        L: EffectiveTypeLookup + ?Sized,
    {
        let mut pairs = Vec::new();
        for (&overrider, overridden_list) in &self.groups {
            let Some(overrider_type) = lookup.effective(overrider) else {
                trace!(%overrider, "overrider not resolved");
                continue;
            };
            if overrider_type.origin == SignatureOrigin::Fallback {
                trace!(%overrider, "alternative rejected, skipping overrides");
                continue;
            }
            for &overridden in overridden_list {
                let Some(overridden_type) = lookup.effective(overridden) else {
                    trace!(%overrider, %overridden, "overridden declaration not resolved");
                    continue;
                };
                if !overrider_type.has_alternative() && !overridden_type.has_alternative() {
                    continue;
                }
                pairs.push(OverridePair {
                    overrider,
                    overridden,
                    overrider_type,
                    overridden_type,
                });
            }
        }
        pairs
    }
}

#[cfg(test)]
#[path = "tests/hierarchy_tests.rs"]
mod tests;
