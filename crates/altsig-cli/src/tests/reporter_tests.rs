use super::*;
use altsig_solver::{BinaryVersion, DeclarationId, TypePosition};

fn violation() -> Diagnostic {
    Diagnostic::new(
        altsig_common::diagnostic_codes::NULLABILITY_VIOLATION,
        DeclarationId::new("test.Sub", "foo", "()Ljava/util/List;"),
        &["java.lang.String", "not-null", "nullable", "kotlin.String?"],
    )
    .with_position(TypePosition::return_type().type_argument(0))
    .with_related(DeclarationId::new("test.Super", "foo", "()Ljava/util/List;"))
}

#[test]
fn test_plain_text_rendering() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_diagnostic(&violation()),
        "test.Sub.foo()Ljava/util/List; @ return → type-argument 0 - error ALT3001: \
         Auto type 'java.lang.String' is not-null, while type in alternative signature is nullable: 'kotlin.String?'\n    \
         overrides test.Super.foo()Ljava/util/List;"
    );

    let version = Diagnostic::incompatible_version(
        "test.Old",
        &BinaryVersion::new([2, 0]),
        &BinaryVersion::new([1, 0]),
    );
    assert!(
        reporter
            .format_diagnostic(&version)
            .starts_with("test.Old - error ALT1001: Class 'test.Old'")
    );
}

#[test]
fn test_render_separates_diagnostics_by_newline() {
    let reporter = Reporter::new(false);
    let rendered = reporter.render(&[violation(), violation()]);
    assert_eq!(rendered.lines().count(), 4);
    assert_eq!(reporter.render(&[]), "");
}

#[test]
fn test_summary() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.summary(&[]), "No errors found.");
    assert_eq!(reporter.summary(&[violation()]), "Found 1 error.");
    assert_eq!(
        reporter.summary(&[violation(), violation()]),
        "Found 2 errors in 1 declarations."
    );
}

#[test]
fn test_json_report() {
    let json = render_json(&[violation()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["errors"], 1);
    let diagnostic = &value["diagnostics"][0];
    assert_eq!(diagnostic["code"], 3001);
    assert_eq!(diagnostic["category"], "error");
    assert_eq!(diagnostic["position"], "return → type-argument 0");
    assert_eq!(diagnostic["declaration"]["class"], "test.Sub");
    assert_eq!(diagnostic["related"]["class"], "test.Super");
}
