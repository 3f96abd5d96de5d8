//! Diagnostic message catalog.
//!
//! Codes are grouped by phase: 1xxx for binary unit gating, 2xxx for
//! structural validation of alternative signatures, 3xxx for override
//! nullability checking.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const INCOMPATIBLE_BINARY_VERSION: u32 = 1001;

    pub const ALTERNATIVE_SIGNATURE_PARSE_ERROR: u32 = 2001;
    pub const PARAMETER_COUNT_MISMATCH: u32 = 2002;
    pub const ERASURE_MISMATCH: u32 = 2003;
    pub const TYPE_ARGUMENT_COUNT_MISMATCH: u32 = 2004;
    pub const STAR_PROJECTION_MISMATCH: u32 = 2005;
    pub const DECLARATION_KIND_MISMATCH: u32 = 2006;

    pub const NULLABILITY_VIOLATION: u32 = 3001;
}

pub mod diagnostic_messages {
    pub const INCOMPATIBLE_BINARY_VERSION: &str =
        "Class '{0}' was compiled with an incompatible binary format version. The binary version of its metadata is {1}, expected version is {2}.";

    pub const ALTERNATIVE_SIGNATURE_PARSE_ERROR: &str =
        "Alternative signature could not be parsed: {0}";
    pub const PARAMETER_COUNT_MISMATCH: &str =
        "Method signature has {0} value parameters, but alternative signature has {1}";
    pub const ERASURE_MISMATCH: &str =
        "Alternative signature type mismatch at {0}, expected: {1}, actual: {2}";
    pub const TYPE_ARGUMENT_COUNT_MISMATCH: &str =
        "Type '{0}' at {1} has {2} type arguments, but alternative signature has {3}";
    pub const STAR_PROJECTION_MISMATCH: &str =
        "Alternative signature uses a star projection at {0} where auto type has '{1}'";
    pub const DECLARATION_KIND_MISMATCH: &str =
        "Alternative signature declares a {1} for a {0}";

    pub const NULLABILITY_VIOLATION: &str =
        "Auto type '{0}' is {1}, while type in alternative signature is {2}: '{3}'";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::INCOMPATIBLE_BINARY_VERSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INCOMPATIBLE_BINARY_VERSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ALTERNATIVE_SIGNATURE_PARSE_ERROR,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ALTERNATIVE_SIGNATURE_PARSE_ERROR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARAMETER_COUNT_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARAMETER_COUNT_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ERASURE_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ERASURE_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_ARGUMENT_COUNT_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_ARGUMENT_COUNT_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::STAR_PROJECTION_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::STAR_PROJECTION_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECLARATION_KIND_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DECLARATION_KIND_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NULLABILITY_VIOLATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NULLABILITY_VIOLATION,
    },
];
