use super::*;
use crate::structural::{EffectiveSignature, SignatureOrigin};
use crate::types::{Signature, TypeArgument};

fn effective(signature: Signature, origin: SignatureOrigin) -> EffectiveSignature {
    let mut effective = EffectiveSignature::from_auto(&signature);
    effective.origin = origin;
    effective
}

fn check(overrider: &EffectiveSignature, overridden: &EffectiveSignature) -> Vec<NullabilityViolation> {
    let catalog = TypeCatalog::with_builtins();
    let sub = DeclarationId::new("test.Sub", "foo", "");
    let sup = DeclarationId::new("test.Super", "foo", "");
    let pair = OverridePair {
        overrider: &sub,
        overridden: &sup,
        overrider_type: overrider,
        overridden_type: overridden,
    };
    NullabilityChecker::new(&catalog).check_pair(&pair)
}

fn list(base: &str, element: TypeNode) -> TypeNode {
    TypeNode::not_null(base).with_arguments(vec![TypeArgument::invariant(element)])
}

#[test]
fn test_soundness_table() {
    use Nullability::{NotNull, Nullable};

    assert!(is_sound(Variance::Covariant, NotNull, Nullable));
    assert!(!is_sound(Variance::Covariant, Nullable, NotNull));
    assert!(is_sound(Variance::Contravariant, Nullable, NotNull));
    assert!(!is_sound(Variance::Contravariant, NotNull, Nullable));
    assert!(is_sound(Variance::Invariant, Nullable, Nullable));
    assert!(!is_sound(Variance::Invariant, NotNull, Nullable));
    assert!(!is_sound(Variance::Invariant, Nullable, NotNull));
}

#[test]
fn test_every_violating_position_is_reported() {
    let overridden = effective(
        Signature::method(
            list("kotlin.collections.MutableList", TypeNode::not_null("kotlin.String")),
            vec![
                TypeNode::nullable("kotlin.String"),
                TypeNode::nullable("kotlin.Any"),
            ],
        ),
        SignatureOrigin::Alternative,
    );
    let overrider = effective(
        Signature::method(
            TypeNode::nullable("kotlin.collections.MutableList").with_arguments(vec![
                TypeArgument::invariant(TypeNode::nullable("kotlin.String")),
            ]),
            vec![
                TypeNode::not_null("kotlin.String"),
                TypeNode::not_null("kotlin.Any"),
            ],
        ),
        SignatureOrigin::Alternative,
    );

    let positions: Vec<String> = check(&overrider, &overridden)
        .iter()
        .map(|violation| violation.position.to_string())
        .collect();
    assert_eq!(
        positions,
        vec![
            "return",
            "return → type-argument 0",
            "parameter 0",
            "parameter 1"
        ]
    );
}

#[test]
fn test_parameter_element_takes_declared_slot_variance() {
    // fun take(items: List<String>) overridden by fun take(items: List<String?>)
    let overridden = effective(
        Signature::method(
            TypeNode::not_null("kotlin.Unit"),
            vec![list("kotlin.collections.List", TypeNode::not_null("kotlin.String"))],
        ),
        SignatureOrigin::Alternative,
    );
    let overrider = effective(
        Signature::method(
            TypeNode::not_null("kotlin.Unit"),
            vec![list("kotlin.collections.List", TypeNode::nullable("kotlin.String"))],
        ),
        SignatureOrigin::Alternative,
    );

    let violations = check(&overrider, &overridden);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].variance, Variance::Covariant);
    assert_eq!(
        violations[0].position.to_string(),
        "parameter 0 → type-argument 0"
    );

    // The List element is covariant under a parameter too, so narrowing it
    // is accepted.
    assert!(check(&overridden, &overrider).is_empty());
}

#[test]
fn test_projection_inside_parameter_sets_slot_variance() {
    // Overridden: fun take(items: MutableList<in String?>)
    let overridden = effective(
        Signature::method(
            TypeNode::not_null("kotlin.Unit"),
            vec![TypeNode::not_null("kotlin.collections.MutableList").with_arguments(vec![
                TypeArgument::contra(TypeNode::nullable("kotlin.String")),
            ])],
        ),
        SignatureOrigin::Alternative,
    );
    let narrowed = effective(
        Signature::method(
            TypeNode::not_null("kotlin.Unit"),
            vec![list("kotlin.collections.MutableList", TypeNode::not_null("kotlin.String"))],
        ),
        SignatureOrigin::Alternative,
    );

    let violations = check(&narrowed, &overridden);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].variance, Variance::Contravariant);

    // Without the projection the invariant slot rejects any change.
    let invariant = effective(
        Signature::method(
            TypeNode::not_null("kotlin.Unit"),
            vec![list("kotlin.collections.MutableList", TypeNode::nullable("kotlin.String"))],
        ),
        SignatureOrigin::Alternative,
    );
    let violations = check(&narrowed, &invariant);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].variance, Variance::Invariant);
}

#[test]
fn test_mutable_property_is_invariant() {
    let overridden = effective(
        Signature::property(TypeNode::not_null("kotlin.String"), true),
        SignatureOrigin::Auto,
    );
    let overrider = effective(
        Signature::property(TypeNode::nullable("kotlin.String"), true),
        SignatureOrigin::Alternative,
    );
    let violations = check(&overrider, &overridden);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].position, TypePosition::property_type());
    assert_eq!(violations[0].variance, Variance::Invariant);

    // Narrowing a mutable property is just as unsound.
    let violations = check(&overridden, &overrider);
    assert_eq!(violations.len(), 1);
}

#[test]
fn test_read_only_property_may_narrow() {
    let overridden = effective(
        Signature::property(TypeNode::nullable("kotlin.String"), false),
        SignatureOrigin::Auto,
    );
    let overrider = effective(
        Signature::property(TypeNode::not_null("kotlin.String"), false),
        SignatureOrigin::Alternative,
    );
    assert!(check(&overrider, &overridden).is_empty());
    assert_eq!(check(&overridden, &overrider).len(), 1);
}

#[test]
fn test_star_and_misaligned_arguments_are_not_descended() {
    let overridden = effective(
        Signature::method(
            TypeNode::not_null("kotlin.collections.MutableMap").with_arguments(vec![
                TypeArgument::Star,
                TypeArgument::invariant(TypeNode::not_null("kotlin.String")),
            ]),
            vec![list("kotlin.collections.List", TypeNode::not_null("kotlin.String"))],
        ),
        SignatureOrigin::Alternative,
    );
    let overrider = effective(
        Signature::method(
            TypeNode::not_null("kotlin.collections.MutableMap").with_arguments(vec![
                TypeArgument::invariant(TypeNode::nullable("kotlin.String")),
                TypeArgument::invariant(TypeNode::not_null("kotlin.String")),
            ]),
            vec![list("kotlin.collections.Set", TypeNode::nullable("kotlin.String"))],
        ),
        SignatureOrigin::Alternative,
    );
    assert!(check(&overrider, &overridden).is_empty());
}

#[test]
fn test_use_site_projection_of_overridden_side_decides_slot_variance() {
    let overridden = effective(
        Signature::method(
            TypeNode::not_null("kotlin.collections.MutableList").with_arguments(vec![
                TypeArgument::out(TypeNode::nullable("kotlin.String")),
            ]),
            Vec::new(),
        ),
        SignatureOrigin::Alternative,
    );
    let overrider = effective(
        Signature::method(
            list("kotlin.collections.MutableList", TypeNode::not_null("kotlin.String")),
            Vec::new(),
        ),
        SignatureOrigin::Alternative,
    );
    assert!(check(&overrider, &overridden).is_empty());
}

#[test]
fn test_violation_carries_both_sides() {
    let overridden = effective(
        Signature::method(TypeNode::not_null("kotlin.String"), Vec::new()),
        SignatureOrigin::Alternative,
    );
    let overrider = effective(
        Signature::method(TypeNode::nullable("kotlin.String"), Vec::new()),
        SignatureOrigin::Alternative,
    );
    let violations = check(&overrider, &overridden);
    assert_eq!(violations.len(), 1);
    let violation = &violations[0];
    assert_eq!(violation.expected, Nullability::NotNull);
    assert_eq!(violation.expected_text, "kotlin.String");
    assert_eq!(violation.actual, Nullability::Nullable);
    assert_eq!(violation.actual_text, "kotlin.String?");
    assert_eq!(violation.overridden.class.as_ref(), "test.Super");
}
