//! Signature Compatibility Solver
//!
//! The type-level core of the verifier. It consumes already-parsed type
//! trees and never performs I/O:
//!
//! - **Version gate** (`version`): decides whether a binary unit can be read
//! - **Structural validator** (`structural`): checks an alternative signature
//!   against the auto signature's erasure and arity
//! - **Override hierarchy walker** (`hierarchy`): turns override edges into
//!   pairs of effective signatures
//! - **Nullability checker** (`nullability`): walks each pair position by
//!   position under the position's variance
//! - **Diagnostics** (`diagnostics`): structured, sortable results
//!
//! All inputs are immutable once built, so every check here can run on any
//! thread without synchronization.

pub mod diagnostics;
pub mod hierarchy;
pub mod nullability;
pub mod position;
pub mod structural;
pub mod types;
pub mod variance;
pub mod version;

pub use diagnostics::Diagnostic;
pub use hierarchy::{EffectiveTypeLookup, OverrideEdge, OverrideHierarchyWalker, OverridePair};
pub use nullability::{NullabilityChecker, NullabilityViolation, is_sound};
pub use position::{PathSegment, TypePosition};
pub use structural::{EffectiveSignature, SignatureOrigin, StructuralMismatch, validate};
pub use types::{
    AlternativeSignature, Declaration, DeclarationId, DeclarationKind, Nullability, Projection,
    Signature, TypeArgument, TypeNode,
};
pub use variance::{GenericDefinition, TypeCatalog, Variance};
pub use version::{
    BinaryUnit, BinaryVersion, HeaderError, ParseVersionError, VersionGate,
    VersionIncompatibleError, is_compatible,
};
