//! Paths into a signature's type trees.

use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// One step of a [`TypePosition`].
///
/// Variant order is the sort order of positions sharing a prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Root of a property's type.
    Type,
    /// Root of a method's return type.
    Return,
    /// Root of the n-th value parameter (0-based).
    Parameter(u32),
    /// The n-th generic argument of the enclosing node (0-based).
    TypeArgument(u32),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => f.write_str("type"),
            Self::Return => f.write_str("return"),
            Self::Parameter(index) => write!(f, "parameter {index}"),
            Self::TypeArgument(index) => write!(f, "type-argument {index}"),
        }
    }
}

/// A path from a signature root down to a single type node,
/// e.g. `return → type-argument 0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePosition {
    segments: SmallVec<[PathSegment; 4]>,
}

impl TypePosition {
    pub fn root(segment: PathSegment) -> Self {
        let mut segments = SmallVec::new();
        segments.push(segment);
        Self { segments }
    }

    pub fn return_type() -> Self {
        Self::root(PathSegment::Return)
    }

    pub fn property_type() -> Self {
        Self::root(PathSegment::Type)
    }

    pub fn parameter(index: usize) -> Self {
        Self::root(PathSegment::Parameter(index as u32))
    }

    /// Position of the `index`-th type argument below this one.
    #[must_use]
    pub fn type_argument(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::TypeArgument(index as u32));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of generic levels below the root.
    pub fn depth(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

impl fmt::Display for TypePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for TypePosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
