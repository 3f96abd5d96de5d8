use super::*;
use crate::types::{DeclarationKind, Nullability};
use crate::variance::Variance;

fn decl(class: &str) -> DeclarationId {
    DeclarationId::new(class, "foo", "()Ljava/util/List;")
}

#[test]
fn test_nullability_violation_message() {
    let violation = NullabilityViolation {
        overrider: decl("test.Sub"),
        overridden: decl("test.Super"),
        position: TypePosition::return_type().type_argument(0),
        variance: Variance::Invariant,
        expected: Nullability::NotNull,
        expected_text: "kotlin.String".to_string(),
        actual: Nullability::Nullable,
        actual_text: "kotlin.String?".to_string(),
    };

    let diagnostic = Diagnostic::nullability_violation(&violation);
    assert_eq!(diagnostic.code, diagnostic_codes::NULLABILITY_VIOLATION);
    assert_eq!(diagnostic.declaration, decl("test.Sub"));
    assert_eq!(diagnostic.related, Some(decl("test.Super")));
    assert_eq!(
        diagnostic.message_text,
        "Auto type 'kotlin.String' is not-null, while type in alternative signature is nullable: 'kotlin.String?'"
    );
    assert!(diagnostic.is_error());
}

#[test]
fn test_structural_mismatch_messages() {
    let diagnostic = Diagnostic::structural_mismatch(
        decl("test.A"),
        &StructuralMismatch::ParameterCount {
            auto: 2,
            alternative: 1,
        },
    );
    assert_eq!(diagnostic.code, diagnostic_codes::PARAMETER_COUNT_MISMATCH);
    assert_eq!(
        diagnostic.message_text,
        "Method signature has 2 value parameters, but alternative signature has 1"
    );
    assert!(diagnostic.position.is_none());

    let diagnostic = Diagnostic::structural_mismatch(
        decl("test.A"),
        &StructuralMismatch::TypeArgumentCount {
            position: TypePosition::parameter(1),
            base: "java.util.Map".to_string(),
            auto: 2,
            alternative: 1,
        },
    );
    assert_eq!(
        diagnostic.message_text,
        "Type 'java.util.Map' at parameter 1 has 2 type arguments, but alternative signature has 1"
    );
    assert_eq!(diagnostic.position, Some(TypePosition::parameter(1)));

    let diagnostic = Diagnostic::structural_mismatch(
        decl("test.A"),
        &StructuralMismatch::KindMismatch {
            auto: DeclarationKind::Method,
            alternative: DeclarationKind::Property { mutable: true },
        },
    );
    assert_eq!(
        diagnostic.message_text,
        "Alternative signature declares a mutable property for a method"
    );
}

#[test]
fn test_incompatible_version_is_class_level() {
    let diagnostic = Diagnostic::incompatible_version(
        "test.Old",
        &BinaryVersion::new([2, 0]),
        &BinaryVersion::new([1, 9]),
    );
    assert!(diagnostic.declaration.is_class_level());
    assert!(diagnostic.message_text.contains("is 2.0, expected version is 1.9"));
}

#[test]
fn test_sort_key_orders_declaration_then_position() {
    let mut diagnostics = vec![
        Diagnostic::alternative_parse_error(decl("test.B"), "bad"),
        Diagnostic::new(diagnostic_codes::NULLABILITY_VIOLATION, decl("test.A"), &[])
            .with_position(TypePosition::parameter(0)),
        Diagnostic::new(diagnostic_codes::NULLABILITY_VIOLATION, decl("test.A"), &[])
            .with_position(TypePosition::return_type().type_argument(0)),
        Diagnostic::new(diagnostic_codes::NULLABILITY_VIOLATION, decl("test.A"), &[])
            .with_position(TypePosition::return_type()),
        Diagnostic::incompatible_version(
            "test.A",
            &BinaryVersion::INVALID,
            &BinaryVersion::new([1, 0]),
        ),
    ];
    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let rendered: Vec<String> = diagnostics
        .iter()
        .map(|d| match &d.position {
            Some(position) => format!("{} @ {position}", d.declaration),
            None => d.declaration.to_string(),
        })
        .collect();
    assert_eq!(
        rendered,
        vec![
            "test.A",
            "test.A.foo()Ljava/util/List; @ return",
            "test.A.foo()Ljava/util/List; @ return → type-argument 0",
            "test.A.foo()Ljava/util/List; @ parameter 0",
            "test.B.foo()Ljava/util/List;",
        ]
    );
}
