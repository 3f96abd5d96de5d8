//! Options for a module check.

use altsig_solver::BinaryVersion;

/// Configuration passed explicitly to a [`crate::ModuleChecker`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Binary format version this reader understands.
    pub expected_version: BinaryVersion,
    /// Check classes on the rayon pool.
    pub parallel: bool,
}

impl CheckerOptions {
    pub fn new(expected_version: BinaryVersion) -> Self {
        Self {
            expected_version,
            parallel: true,
        }
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
