use super::*;

#[test]
fn test_nullability_ordering() {
    assert!(Nullability::NotNull.refines(Nullability::NotNull));
    assert!(Nullability::NotNull.refines(Nullability::Nullable));
    assert!(Nullability::Nullable.refines(Nullability::Nullable));
    assert!(!Nullability::Nullable.refines(Nullability::NotNull));
}

#[test]
fn test_type_node_display() {
    let ty = TypeNode::not_null("kotlin.collections.MutableMap").with_arguments(vec![
        TypeArgument::invariant(TypeNode::not_null("kotlin.String")),
        TypeArgument::out(
            TypeNode::nullable("kotlin.collections.List")
                .with_arguments(vec![TypeArgument::Star]),
        ),
    ]);
    assert_eq!(
        ty.to_string(),
        "kotlin.collections.MutableMap<kotlin.String, out kotlin.collections.List<*>?>"
    );
    assert_eq!(
        TypeNode::not_null("kotlin.Comparable")
            .with_arguments(vec![TypeArgument::contra(TypeNode::nullable("T"))])
            .to_string(),
        "kotlin.Comparable<in T?>"
    );
}

#[test]
fn test_declaration_id_orders_by_class_then_name_then_descriptor() {
    let mut ids = vec![
        DeclarationId::new("b.B", "foo", "()V"),
        DeclarationId::new("a.A", "foo", "(I)V"),
        DeclarationId::new("a.A", "bar", "()V"),
        DeclarationId::new("a.A", "foo", "()V"),
    ];
    ids.sort();
    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["a.A.bar()V", "a.A.foo()V", "a.A.foo(I)V", "b.B.foo()V"]
    );
}

#[test]
fn test_class_level_id_displays_class_only() {
    let id = DeclarationId::class_level("test.Sub");
    assert!(id.is_class_level());
    assert_eq!(id.to_string(), "test.Sub");
}

#[test]
fn test_alternative_signature_from_json_tree() {
    let json = r#"{
        "kind": "method",
        "return_type": {
            "base": "kotlin.collections.MutableList",
            "arguments": [
                { "kind": "type", "ty": { "base": "kotlin.String", "nullability": "nullable" } }
            ]
        },
        "parameters": [ { "base": "kotlin.Int" } ]
    }"#;
    let alternative: AlternativeSignature = serde_json::from_str(json).unwrap();
    assert_eq!(alternative.kind, DeclarationKind::Method);
    assert_eq!(
        alternative.return_type.as_ref().map(ToString::to_string).as_deref(),
        Some("kotlin.collections.MutableList<kotlin.String?>")
    );
    assert_eq!(alternative.parameters, vec![TypeNode::not_null("kotlin.Int")]);
}

#[test]
fn test_property_signature_from_json_defaults_to_read_only() {
    let json = r#"{ "kind": "property", "return_type": { "base": "kotlin.String" } }"#;
    let signature: Signature = serde_json::from_str(json).unwrap();
    assert_eq!(signature.kind, DeclarationKind::Property { mutable: false });
    assert!(signature.parameters.is_empty());
}
