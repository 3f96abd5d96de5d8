//! Binary format versions and the compatibility gate.
//!
//! Every binary unit starts with a version header:
//!
//! ```text
//! +----------------+------------------------------+-----------------+
//! | count: u16 BE  | count x component: i32 BE    | payload ...     |
//! +----------------+------------------------------+-----------------+
//! ```
//!
//! The gate is evaluated against the header before any payload byte is
//! interpreted. A header that cannot be decoded yields [`BinaryVersion::INVALID`],
//! which is never compatible, so a damaged unit is treated exactly like one
//! written by an incompatible compiler.

use altsig_common::limits::MAX_VERSION_COMPONENTS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

const COUNT_WIDTH: usize = 2;
const COMPONENT_WIDTH: usize = 4;

/// Ordered sequence of non-negative integers `[major, minor, ...]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinaryVersion {
    components: Vec<u32>,
}

impl BinaryVersion {
    /// The empty version. Never compatible with anything.
    pub const INVALID: Self = Self {
        components: Vec::new(),
    };

    pub fn new(components: impl Into<Vec<u32>>) -> Self {
        Self {
            components: components.into(),
        }
    }

    /// Version recorded by units that predate the component-array header
    /// and only carry a single integer ABI number.
    pub fn from_legacy_abi(abi_version: u32) -> Self {
        Self::new([0, abi_version, 0])
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }

    pub fn is_valid(&self) -> bool {
        !self.components.is_empty()
    }

    pub fn major(&self) -> Option<u32> {
        self.components.first().copied()
    }

    pub fn minor(&self) -> Option<u32> {
        self.components.get(1).copied()
    }

    pub fn patch(&self) -> Option<u32> {
        self.components.get(2).copied()
    }

    /// Decode a version header from the front of `bytes`.
    ///
    /// Returns the version and the number of bytes the header occupies.
    pub fn decode_header(bytes: &[u8]) -> Result<(Self, usize), HeaderError> {
        let count_bytes: [u8; COUNT_WIDTH] = bytes
            .get(..COUNT_WIDTH)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(HeaderError::Truncated {
                expected: COUNT_WIDTH,
                actual: bytes.len(),
            })?;
        let count = usize::from(u16::from_be_bytes(count_bytes));
        if count > MAX_VERSION_COMPONENTS {
            return Err(HeaderError::TooManyComponents(count));
        }

        let header_len = COUNT_WIDTH + count * COMPONENT_WIDTH;
        let body = bytes
            .get(COUNT_WIDTH..header_len)
            .ok_or(HeaderError::Truncated {
                expected: header_len,
                actual: bytes.len(),
            })?;

        let mut components = Vec::with_capacity(count);
        for (index, chunk) in body.chunks_exact(COMPONENT_WIDTH).enumerate() {
            let mut raw = [0u8; COMPONENT_WIDTH];
            raw.copy_from_slice(chunk);
            let value = i32::from_be_bytes(raw);
            let component =
                u32::try_from(value).map_err(|_| HeaderError::NegativeComponent { index, value })?;
            components.push(component);
        }

        Ok((Self { components }, header_len))
    }

    /// Lenient form of [`Self::decode_header`]: a malformed header reads as
    /// `INVALID` with no payload.
    pub fn read_header(bytes: &[u8]) -> (Self, usize) {
        match Self::decode_header(bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                debug!(error = %err, "malformed binary version header");
                (Self::INVALID, bytes.len())
            }
        }
    }

    /// Append this version's header encoding to `out`.
    pub fn write_header(&self, out: &mut Vec<u8>) {
        let count = u16::try_from(self.components.len()).unwrap_or(u16::MAX);
        out.extend_from_slice(&count.to_be_bytes());
        for component in self.components.iter().take(usize::from(count)) {
            let value = i32::try_from(*component).unwrap_or(i32::MAX);
            out.extend_from_slice(&value.to_be_bytes());
        }
    }

    pub fn to_header(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(COUNT_WIDTH + self.components.len() * COMPONENT_WIDTH);
        self.write_header(&mut out);
        out
    }
}

impl fmt::Display for BinaryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("<invalid>");
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for BinaryVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseVersionError::Empty);
        }
        trimmed
            .split('.')
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| ParseVersionError::InvalidComponent(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

/// `actual` is readable by a reader that understands `expected`.
///
/// Major versions must match exactly; the actual minor must be no newer
/// than the expected one. Components past the minor are ignored.
pub fn is_compatible(actual: &BinaryVersion, expected: &BinaryVersion) -> bool {
    match (
        actual.major(),
        actual.minor(),
        expected.major(),
        expected.minor(),
    ) {
        (Some(major), minor, Some(expected_major), expected_minor) => {
            major == expected_major && minor.unwrap_or(0) <= expected_minor.unwrap_or(0)
        }
        _ => false,
    }
}

/// Compatibility gate bound to the version this reader understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionGate {
    expected: BinaryVersion,
}

impl VersionGate {
    pub fn new(expected: BinaryVersion) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> &BinaryVersion {
        &self.expected
    }

    pub fn is_compatible(&self, actual: &BinaryVersion) -> bool {
        let compatible = is_compatible(actual, &self.expected);
        trace!(%actual, expected = %self.expected, compatible, "version gate");
        compatible
    }

    /// Check `actual`, producing the error a loader reports for the unit.
    pub fn check(&self, actual: &BinaryVersion) -> Result<(), VersionIncompatibleError> {
        if self.is_compatible(actual) {
            Ok(())
        } else {
            Err(VersionIncompatibleError {
                actual: actual.clone(),
                expected: self.expected.clone(),
            })
        }
    }
}

/// A binary unit whose header passed the gate.
///
/// The payload is only reachable through a successfully opened unit.
#[derive(Debug)]
pub struct BinaryUnit<'a> {
    version: BinaryVersion,
    payload: &'a [u8],
}

impl<'a> BinaryUnit<'a> {
    pub fn open(bytes: &'a [u8], gate: &VersionGate) -> Result<Self, VersionIncompatibleError> {
        let (version, header_len) = BinaryVersion::read_header(bytes);
        gate.check(&version)?;
        let payload = bytes.get(header_len..).unwrap_or_default();
        Ok(Self { version, payload })
    }

    pub fn version(&self) -> &BinaryVersion {
        &self.version
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

/// The whole unit is rejected; downstream consumers must treat it as absent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("incompatible binary version {actual}, expected {expected}")]
pub struct VersionIncompatibleError {
    pub actual: BinaryVersion,
    pub expected: BinaryVersion,
}

/// A version header that cannot be decoded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("version header truncated: need {expected} bytes, have {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("version header announces {0} components")]
    TooManyComponents(usize),

    #[error("version component {index} is negative ({value})")]
    NegativeComponent { index: usize, value: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseVersionError {
    #[error("empty version string")]
    Empty,

    #[error("invalid version component '{0}'")]
    InvalidComponent(String),
}

#[cfg(test)]
#[path = "tests/version_tests.rs"]
mod tests;
