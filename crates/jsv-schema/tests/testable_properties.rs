//! # Behavioural Guarantees of the Validator
//!
//! End-to-end checks of the contract callers rely on: boundary reporting
//! for exclusive bounds, tuple tails, required-key reporting, `one_of`
//! exclusivity, `not` inversion, and the separation of broken schemas
//! from invalid data.
//!
//! The property tests at the bottom generate arbitrary data trees and
//! check the `Any` and `not` laws over them.

use jsv_core::{Number, Value};
use jsv_schema::{
    is_valid, validate, Failure, ListKeywords, MapKeywords, Node, NumberKeywords, Ref, Schema,
    SchemaError, SchemaGraph, StringKeywords, ValidationError,
};
use proptest::prelude::*;
use serde_json::json;

fn failure_of(node: &Node, value: &Value) -> Failure {
    match validate(node, value) {
        Err(ValidationError::Invalid(failure)) => failure,
        other => panic!("expected a data failure, got {other:?}"),
    }
}

#[test]
fn test_inclusive_minimum_accepts_the_bound() {
    for minimum in [-3_i64, 0, 7] {
        let node: Node = Schema::integer(NumberKeywords::new().minimum(minimum).exclusive_minimum(false)).into();
        assert_eq!(is_valid(&node, &Value::Integer(minimum)), Ok(true));
    }
}

#[test]
fn test_exclusive_minimum_reports_bound_and_flag() {
    for minimum in [-3_i64, 0, 7] {
        let node: Node = Schema::integer(NumberKeywords::new().minimum(minimum).exclusive_minimum(true)).into();
        assert_eq!(
            failure_of(&node, &Value::Integer(minimum)),
            Failure::TooSmall {
                value: Number::Int(minimum),
                minimum: Number::Int(minimum),
                exclusive_minimum: true,
            }
        );
        let reported = serde_json::to_value(failure_of(&node, &Value::Integer(minimum))).unwrap();
        assert_eq!(reported["minimum"], json!(minimum));
        assert_eq!(reported["exclusive_minimum"], json!(true));
    }
}

#[test]
fn test_closed_tuple_rejects_third_element() {
    let node: Node = Schema::list(
        ListKeywords::new()
            .tuple([Schema::integer(NumberKeywords::new()), Schema::string(StringKeywords::new())])
            .additional_items(false),
    )
    .into();
    assert_eq!(
        failure_of(&node, &json!([1, "two", 3]).into()),
        Failure::AdditionalItem { at: 2 }
    );
}

#[test]
fn test_required_reports_missing_and_required_sets() {
    let node: Node = Schema::map(MapKeywords::new().required(["bar"])).into();
    assert_eq!(
        serde_json::to_value(failure_of(&node, &json!({}).into())).unwrap(),
        json!({"reason": "missing_properties", "missing": ["bar"], "required": ["bar"]})
    );
    assert_eq!(is_valid(&node, &json!({"bar": 1}).into()), Ok(true));
}

#[test]
fn test_required_passes_even_when_other_keywords_fail() {
    let node: Node = Schema::map(
        MapKeywords::new()
            .required(["bar"])
            .property("bar", Schema::string(StringKeywords::new())),
    )
    .into();
    let failure = failure_of(&node, &json!({"bar": 1}).into());
    assert_eq!(failure.reason(), "invalid_property");
}

#[test]
fn test_one_of_requires_exactly_one_branch() {
    let node: Node = Schema::any()
        .one_of([
            Schema::integer(NumberKeywords::new().multiple_of(3)),
            Schema::integer(NumberKeywords::new().multiple_of(5)),
        ])
        .into();
    assert_eq!(failure_of(&node, &Value::from(15)).reason(), "one_of");
    assert_eq!(is_valid(&node, &Value::from(9)), Ok(true));
    assert_eq!(failure_of(&node, &Value::from(4)).reason(), "one_of");
}

#[test]
fn test_not_integer() {
    let node: Node = Schema::any().not(Schema::integer(NumberKeywords::new())).into();
    assert_eq!(is_valid(&node, &Value::from("foo")), Ok(true));
    assert_eq!(is_valid(&node, &Value::from(1)), Ok(false));
}

#[test]
fn test_missing_definition_is_a_schema_error_for_any_data() {
    let graph = SchemaGraph::new(Schema::any().all_of([Ref::local("#/definitions/missing")]));
    for data in [json!(null), json!(1), json!("x"), json!([1]), json!({"a": 1})] {
        match graph.validate(&data.into()) {
            Err(ValidationError::Schema(SchemaError::ReferenceNotFound { reference, .. })) => {
                assert_eq!(reference, "#/definitions/missing");
            }
            other => panic!("expected a schema error, got {other:?}"),
        }
    }
}

#[test]
fn test_is_valid_never_hides_a_broken_schema() {
    let graph = SchemaGraph::new(Schema::any().not(Ref::local("#/definitions/missing")));
    assert!(graph.is_valid(&Value::Null).is_err());
}

fn data() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6..1.0e6f64).prop_map(|f| json!(f)),
        "[a-z0-9 ]{0,12}".prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

/// A handful of sub-schemas with mixed outcomes over arbitrary data.
fn sub_schema() -> impl Strategy<Value = Schema> {
    prop_oneof![
        Just(Schema::null()),
        Just(Schema::boolean()),
        Just(Schema::number(NumberKeywords::new().minimum(0))),
        Just(Schema::integer(NumberKeywords::new().multiple_of(2))),
        Just(Schema::string(StringKeywords::new().max_length(3))),
        Just(Schema::list(ListKeywords::new().max_items(2))),
        Just(Schema::map(MapKeywords::new().required(["a"]))),
        Just(Schema::falsy()),
        Just(Schema::truthy()),
    ]
}

proptest! {
    /// `Any` without keywords accepts every value.
    #[test]
    fn any_accepts_everything(json in data()) {
        let node: Node = Schema::any().into();
        prop_assert_eq!(is_valid(&node, &json.into()), Ok(true));
    }

    /// `enum` on `Any` accepts exactly its members.
    #[test]
    fn any_with_enum_accepts_only_members(json in data(), member in data()) {
        let value = Value::from(&json);
        let allowed = Value::from(&member);
        let node: Node = Schema::any().enumeration([allowed.clone()]).into();
        prop_assert_eq!(is_valid(&node, &value), Ok(value == allowed));
    }

    /// `not` inverts the outcome of its schema.
    #[test]
    fn not_inverts_its_schema(json in data(), inner in sub_schema()) {
        let value = Value::from(&json);
        let plain: Node = inner.clone().into();
        let negated: Node = Schema::any().not(inner).into();
        let outcome = is_valid(&plain, &value).unwrap();
        prop_assert_eq!(is_valid(&negated, &value), Ok(!outcome));
    }
}
