//! Centralized limits and thresholds.
//!
//! Type trees handed to the verifier come from external collaborators
//! (bytecode reflection and the annotation parser), so their depth is not
//! under our control. Every recursive walk is bounded by one of these.

/// Maximum nesting depth of a type tree walked by the structural validator
/// or the nullability checker.
///
/// Positions deeper than this are not compared. The structural validator
/// treats the truncated subtree as matching; the nullability checker stops
/// descending.
pub const MAX_TYPE_DEPTH: usize = 64;

/// Maximum number of components accepted in a binary version header.
///
/// A header announcing more components than this is decoded as `INVALID`.
pub const MAX_VERSION_COMPONENTS: usize = 16;
