use super::*;
use altsig_checker::{AlternativeSignatureSource, HostDeclarationProvider};

const MANIFEST: &str = r#"{
    "expected_version": [1, 4],
    "types": [{"name": "test.Box", "parameters": ["in"]}],
    "classes": [
        {
            "name": "test.Super",
            "abi_version": 3,
            "declarations": [{
                "name": "get",
                "descriptor": "()Ljava/lang/String;",
                "signature": {"kind": "method", "return_type": {"base": "java.lang.String"}}
            }]
        },
        {
            "name": "test.Sub",
            "version": [1, 2, 0],
            "declarations": [{
                "name": "get",
                "descriptor": "()Ljava/lang/String;",
                "signature": {"kind": "method", "return_type": {"base": "java.lang.String"}},
                "alternative": {"kind": "method", "return_type": {"base": "kotlin.String", "nullability": "nullable"}},
                "overrides": [{"class": "test.Super"}]
            }, {
                "name": "name",
                "signature": {"kind": "property", "mutable": false, "return_type": {"base": "java.lang.String"}},
                "alternative": "not json"
            }]
        }
    ]
}"#;

#[test]
fn test_manifest_loads_into_host() {
    let loaded = Manifest::from_json(MANIFEST).unwrap().load().unwrap();
    assert_eq!(loaded.classes, vec!["test.Super", "test.Sub"]);
    assert_eq!(loaded.expected_version, Some(BinaryVersion::new([1, 4])));

    let legacy = loaded.host.binary_unit("test.Super").unwrap();
    assert_eq!(legacy, BinaryVersion::new([0, 3, 0]).to_header());

    let sub = loaded.host.declarations("test.Sub").unwrap();
    assert_eq!(sub.declarations.len(), 2);
    assert_eq!(sub.edges.len(), 1);
    assert_eq!(
        sub.edges[0].overridden,
        DeclarationId::new("test.Super", "get", "()Ljava/lang/String;")
    );

    let get = &sub.declarations[0];
    let text = loaded.host.alternative_text(get).unwrap();
    assert!(text.starts_with('{'));
    assert_eq!(
        loaded.host.alternative_text(&sub.declarations[1]).as_deref(),
        Some("not json")
    );
}

#[test]
fn test_catalog_extensions() {
    let loaded = Manifest::from_json(MANIFEST).unwrap().load().unwrap();
    let definition = loaded.catalog.get("test.Box").unwrap();
    assert_eq!(definition.erasure, "test.Box");
    assert_eq!(definition.parameters, vec![Variance::Contravariant]);
    assert!(loaded.catalog.get("kotlin.collections.MutableList").is_some());
}

#[test]
fn test_class_needs_exactly_one_version() {
    let neither = r#"{"classes": [{"name": "test.A"}]}"#;
    let err = Manifest::from_json(neither).unwrap().load().unwrap_err();
    assert!(err.to_string().contains("neither"));

    let both = r#"{"classes": [{"name": "test.A", "version": [1], "abi_version": 1}]}"#;
    assert!(Manifest::from_json(both).unwrap().load().is_err());
}

#[test]
fn test_malformed_manifest() {
    assert!(Manifest::from_json(r#"{"classes": [{"version": [1]}]}"#).is_err());
}
