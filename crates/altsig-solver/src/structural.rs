//! Structural validation of alternative signatures.
//!
//! Before an alternative signature is trusted for nullability checking it
//! must describe the same shape as the auto signature: the same kind of
//! member, the same number of value parameters, and at every aligned type
//! position the same erased base type with the same generic arity.
//!
//! A rejected alternative still produces a diagnostic, but the declaration
//! falls back to its auto signature.

use crate::position::TypePosition;
use crate::types::{AlternativeSignature, DeclarationKind, Signature, TypeArgument, TypeNode};
use crate::variance::TypeCatalog;
use altsig_common::limits::MAX_TYPE_DEPTH;
use tracing::trace;

/// Where an [`EffectiveSignature`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignatureOrigin {
    /// No alternative signature was attached.
    Auto,
    /// The alternative signature passed structural validation.
    Alternative,
    /// An alternative was attached but rejected; this is the auto signature.
    Fallback,
}

/// The signature actually used for override checks.
///
/// Computed once per declaration and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveSignature {
    pub kind: DeclarationKind,
    pub return_type: TypeNode,
    pub parameters: Vec<TypeNode>,
    pub origin: SignatureOrigin,
}

impl EffectiveSignature {
    pub fn from_auto(auto: &Signature) -> Self {
        Self::auto_with_origin(auto, SignatureOrigin::Auto)
    }

    /// The auto signature standing in for a rejected alternative.
    pub fn fallback(auto: &Signature) -> Self {
        Self::auto_with_origin(auto, SignatureOrigin::Fallback)
    }

    fn auto_with_origin(auto: &Signature, origin: SignatureOrigin) -> Self {
        Self {
            kind: auto.kind,
            return_type: auto.return_type.clone(),
            parameters: auto.parameters.clone(),
            origin,
        }
    }

    pub fn has_alternative(&self) -> bool {
        self.origin == SignatureOrigin::Alternative
    }
}

/// Why an alternative signature does not fit the auto signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructuralMismatch {
    KindMismatch {
        auto: DeclarationKind,
        alternative: DeclarationKind,
    },
    ParameterCount {
        auto: usize,
        alternative: usize,
    },
    Erasure {
        position: TypePosition,
        auto: String,
        alternative: String,
    },
    TypeArgumentCount {
        position: TypePosition,
        base: String,
        auto: usize,
        alternative: usize,
    },
    StarProjection {
        position: TypePosition,
        auto: String,
    },
}

impl StructuralMismatch {
    /// Position the mismatch was found at, if it concerns a single node.
    pub fn position(&self) -> Option<&TypePosition> {
        match self {
            Self::KindMismatch { .. } | Self::ParameterCount { .. } => None,
            Self::Erasure { position, .. }
            | Self::TypeArgumentCount { position, .. }
            | Self::StarProjection { position, .. } => Some(position),
        }
    }
}

/// Validate `alternative` against `auto`.
///
/// On success the alternative becomes the effective signature; a missing
/// alternative return type is inherited from `auto`.
pub fn validate(
    catalog: &TypeCatalog,
    auto: &Signature,
    alternative: &AlternativeSignature,
) -> Result<EffectiveSignature, StructuralMismatch> {
    if auto.kind != alternative.kind {
        return Err(StructuralMismatch::KindMismatch {
            auto: auto.kind,
            alternative: alternative.kind,
        });
    }
    if auto.parameters.len() != alternative.parameters.len() {
        return Err(StructuralMismatch::ParameterCount {
            auto: auto.parameters.len(),
            alternative: alternative.parameters.len(),
        });
    }

    let return_root = match auto.kind {
        DeclarationKind::Method => TypePosition::return_type(),
        DeclarationKind::Property { .. } => TypePosition::property_type(),
    };
    if let Some(alt_return) = &alternative.return_type {
        match_node(catalog, &return_root, &auto.return_type, alt_return)?;
    }
    for (index, (auto_param, alt_param)) in auto
        .parameters
        .iter()
        .zip(&alternative.parameters)
        .enumerate()
    {
        match_node(catalog, &TypePosition::parameter(index), auto_param, alt_param)?;
    }

    Ok(EffectiveSignature {
        kind: alternative.kind,
        return_type: alternative
            .return_type
            .clone()
            .unwrap_or_else(|| auto.return_type.clone()),
        parameters: alternative.parameters.clone(),
        origin: SignatureOrigin::Alternative,
    })
}

fn match_node(
    catalog: &TypeCatalog,
    position: &TypePosition,
    auto: &TypeNode,
    alternative: &TypeNode,
) -> Result<(), StructuralMismatch> {
    let auto_erasure = catalog.erasure(&auto.base);
    let alt_erasure = catalog.erasure(&alternative.base);
    if auto_erasure != alt_erasure {
        trace!(%position, auto_erasure, alt_erasure, "erasure mismatch");
        return Err(StructuralMismatch::Erasure {
            position: position.clone(),
            auto: auto.to_string(),
            alternative: alternative.to_string(),
        });
    }
    if auto.arguments.len() != alternative.arguments.len() {
        return Err(StructuralMismatch::TypeArgumentCount {
            position: position.clone(),
            base: auto.base.clone(),
            auto: auto.arguments.len(),
            alternative: alternative.arguments.len(),
        });
    }
    if position.depth() >= MAX_TYPE_DEPTH {
        return Ok(());
    }

    for (index, pair) in auto.arguments.iter().zip(&alternative.arguments).enumerate() {
        let child = position.type_argument(index);
        match pair {
            // A platform wildcard may be refined by any concrete argument.
            (TypeArgument::Star, _) => {}
            (TypeArgument::Type { ty, .. }, TypeArgument::Star) => {
                return Err(StructuralMismatch::StarProjection {
                    position: child,
                    auto: ty.to_string(),
                });
            }
            (TypeArgument::Type { ty: auto_ty, .. }, TypeArgument::Type { ty: alt_ty, .. }) => {
                match_node(catalog, &child, auto_ty, alt_ty)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/structural_tests.rs"]
mod tests;
