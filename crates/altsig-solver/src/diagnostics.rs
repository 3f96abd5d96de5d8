//! Structured diagnostics produced by the verifier.
//!
//! Every diagnostic is keyed by the declaration it concerns and, when it is
//! about a single type node, by the position of that node. Messages are
//! rendered from the templates in `altsig_common::diagnostics` when the
//! diagnostic is built; the structured fields stay available for sorting
//! and for machine-readable output.

use crate::nullability::NullabilityViolation;
use crate::position::TypePosition;
use crate::structural::StructuralMismatch;
use crate::types::DeclarationId;
use crate::version::BinaryVersion;
use altsig_common::diagnostics::{
    DiagnosticCategory, diagnostic_codes, format_message, get_diagnostic_category,
    get_message_template,
};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message_text: String,
    pub declaration: DeclarationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<TypePosition>,
    /// The overridden declaration, for override diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<DeclarationId>,
}

impl Diagnostic {
    /// Build a diagnostic from a catalog code and its template arguments.
    pub fn new(code: u32, declaration: DeclarationId, args: &[&str]) -> Self {
        let message_text = get_message_template(code)
            .map(|template| format_message(template, args))
            .unwrap_or_else(|| args.join(" "));
        Self {
            category: get_diagnostic_category(code).unwrap_or(DiagnosticCategory::Error),
            code,
            message_text,
            declaration,
            position: None,
            related: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: TypePosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_related(mut self, related: DeclarationId) -> Self {
        self.related = Some(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Stable ordering key: declaration, then position (class-level and
    /// whole-signature diagnostics first), then code, then the related
    /// declaration.
    pub fn sort_key(
        &self,
    ) -> (
        &DeclarationId,
        Option<&TypePosition>,
        u32,
        Option<&DeclarationId>,
    ) {
        (
            &self.declaration,
            self.position.as_ref(),
            self.code,
            self.related.as_ref(),
        )
    }

    pub fn incompatible_version(
        class: &str,
        actual: &BinaryVersion,
        expected: &BinaryVersion,
    ) -> Self {
        let actual = actual.to_string();
        let expected = expected.to_string();
        Self::new(
            diagnostic_codes::INCOMPATIBLE_BINARY_VERSION,
            DeclarationId::class_level(class),
            &[class, actual.as_str(), expected.as_str()],
        )
    }

    pub fn alternative_parse_error(declaration: DeclarationId, message: &str) -> Self {
        Self::new(
            diagnostic_codes::ALTERNATIVE_SIGNATURE_PARSE_ERROR,
            declaration,
            &[message],
        )
    }

    pub fn structural_mismatch(declaration: DeclarationId, mismatch: &StructuralMismatch) -> Self {
        let diagnostic = match mismatch {
            StructuralMismatch::KindMismatch { auto, alternative } => Self::new(
                diagnostic_codes::DECLARATION_KIND_MISMATCH,
                declaration,
                &[auto.describe(), alternative.describe()],
            ),
            StructuralMismatch::ParameterCount { auto, alternative } => {
                let auto = auto.to_string();
                let alternative = alternative.to_string();
                Self::new(
                    diagnostic_codes::PARAMETER_COUNT_MISMATCH,
                    declaration,
                    &[auto.as_str(), alternative.as_str()],
                )
            }
            StructuralMismatch::Erasure {
                position,
                auto,
                alternative,
            } => {
                let position = position.to_string();
                Self::new(
                    diagnostic_codes::ERASURE_MISMATCH,
                    declaration,
                    &[position.as_str(), auto.as_str(), alternative.as_str()],
                )
            }
            StructuralMismatch::TypeArgumentCount {
                position,
                base,
                auto,
                alternative,
            } => {
                let position = position.to_string();
                let auto = auto.to_string();
                let alternative = alternative.to_string();
                Self::new(
                    diagnostic_codes::TYPE_ARGUMENT_COUNT_MISMATCH,
                    declaration,
                    &[
                        base.as_str(),
                        position.as_str(),
                        auto.as_str(),
                        alternative.as_str(),
                    ],
                )
            }
            StructuralMismatch::StarProjection { position, auto } => {
                let position = position.to_string();
                Self::new(
                    diagnostic_codes::STAR_PROJECTION_MISMATCH,
                    declaration,
                    &[position.as_str(), auto.as_str()],
                )
            }
        };
        match mismatch.position() {
            Some(position) => diagnostic.with_position(position.clone()),
            None => diagnostic,
        }
    }

    /// The overridden side is reported as the auto type, the overrider
    /// side as the alternative signature's type.
    pub fn nullability_violation(violation: &NullabilityViolation) -> Self {
        Self::new(
            diagnostic_codes::NULLABILITY_VIOLATION,
            violation.overrider.clone(),
            &[
                violation.expected_text.as_str(),
                violation.expected.qualifier(),
                violation.actual.qualifier(),
                violation.actual_text.as_str(),
            ],
        )
        .with_position(violation.position.clone())
        .with_related(violation.overridden.clone())
    }
}

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod tests;
