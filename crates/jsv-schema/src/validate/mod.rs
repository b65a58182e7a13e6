//! # Validator Engine
//!
//! A recursive, keyword-driven matcher. Each schema is evaluated in a
//! fixed order:
//!
//! 1. the variant's type check;
//! 2. the variant's own keywords ([`number`], [`string`], [`list`], [`map`]);
//! 3. `enum`;
//! 4. composition: `not`, `all_of`, `any_of`, `one_of` ([`compose`]).
//!
//! The first failing check ends evaluation of that schema. References are
//! resolved on every encounter through the resolver; nothing is cached
//! between or within validations.
//!
//! ## Two Outcomes
//!
//! Internally every evaluation returns `Result<Verdict, SchemaError>`: the
//! outer error is a broken schema and aborts the whole validation, the
//! inner [`Verdict`] is the data outcome. Composition keywords inspect the
//! verdict of their branches but always propagate schema errors.
//!
//! ## Depth
//!
//! Evaluations that stay on the same value (references, `not`, the `*_of`
//! branches, schema dependencies) count against
//! [`ValidatorOptions::max_depth`]. Moving into a list element or a map
//! value restarts the count, so recursion that consumes data ends when the
//! data does; recursion that does not (a schema whose `all_of` refers back
//! to itself) ends with [`SchemaError::DepthExceeded`].

mod compose;
mod list;
mod map;
mod number;
mod string;

use jsv_core::Value;

use crate::error::{SchemaError, ValidationError};
use crate::failure::Failure;
use crate::graph::SchemaGraph;
use crate::node::{Keywords, Kind, Node, Schema};
use crate::options::ValidatorOptions;
use crate::resolver::{Resolver, Scope};

/// The data outcome of one evaluation.
pub(crate) type Verdict = Result<(), Failure>;

/// Validates values against a [`SchemaGraph`].
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    graph: &'a SchemaGraph,
    options: ValidatorOptions,
}

impl<'a> Validator<'a> {
    /// A validator over `graph` with default options.
    pub fn new(graph: &'a SchemaGraph) -> Self {
        Self {
            graph,
            options: ValidatorOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate `value` against the graph's root document.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Invalid`] carries the failure tree;
    /// [`ValidationError::Schema`] reports a broken schema.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let evaluator = Evaluator::new(Some(self.graph), self.options);
        evaluator
            .node(self.graph.root(), value, self.graph.scope(0), 0)?
            .map_err(ValidationError::Invalid)
    }

    /// Whether `value` conforms, propagating schema errors.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaError`] if the schema is broken.
    pub fn is_valid(&self, value: &Value) -> Result<bool, SchemaError> {
        match self.validate(value) {
            Ok(()) => Ok(true),
            Err(ValidationError::Invalid(_)) => Ok(false),
            Err(ValidationError::Schema(error)) => Err(error),
        }
    }
}

/// Validate `value` against a standalone node.
///
/// Fragment references resolve against `node` itself; absolute references
/// need a [`SchemaGraph`].
///
/// # Errors
///
/// See [`Validator::validate`].
pub fn validate(node: &Node, value: &Value) -> Result<(), ValidationError> {
    let evaluator = Evaluator::new(None, ValidatorOptions::default());
    evaluator
        .node(node, value, Scope::detached(node), 0)?
        .map_err(ValidationError::Invalid)
}

/// Whether `value` conforms to a standalone node.
///
/// # Errors
///
/// Returns the [`SchemaError`] if the schema is broken.
pub fn is_valid(node: &Node, value: &Value) -> Result<bool, SchemaError> {
    match validate(node, value) {
        Ok(()) => Ok(true),
        Err(ValidationError::Invalid(_)) => Ok(false),
        Err(ValidationError::Schema(error)) => Err(error),
    }
}

/// One validation call's state.
pub(crate) struct Evaluator<'a> {
    resolver: Resolver<'a>,
    max_depth: usize,
}

impl<'a> Evaluator<'a> {
    fn new(graph: Option<&'a SchemaGraph>, options: ValidatorOptions) -> Self {
        Self {
            resolver: Resolver::new(graph),
            max_depth: options.max_depth,
        }
    }

    /// Evaluate a schema or reference.
    pub(crate) fn node(
        &self,
        node: &'a Node,
        value: &Value,
        scope: Scope<'a>,
        depth: usize,
    ) -> Result<Verdict, SchemaError> {
        if depth >= self.max_depth {
            return Err(SchemaError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        let (schema, scope) = match node {
            Node::Schema(schema) => (schema, scope),
            Node::Ref(reference) => self.resolver.resolve(reference, scope)?,
        };
        self.schema(schema, value, scope, depth + 1)
    }

    /// Evaluate a schema against a list element or map value.
    pub(crate) fn element(
        &self,
        node: &'a Node,
        value: &Value,
        scope: Scope<'a>,
    ) -> Result<Verdict, SchemaError> {
        self.node(node, value, scope, 0)
    }

    fn schema(
        &self,
        schema: &'a Schema,
        value: &Value,
        scope: Scope<'a>,
        depth: usize,
    ) -> Result<Verdict, SchemaError> {
        if let Err(failure) = type_check(schema, value) {
            return Ok(Err(failure));
        }

        let typed = match (&schema.kind, value) {
            (Kind::Integer(kw) | Kind::Float(kw) | Kind::Number(kw), _) => match value.as_number() {
                Some(n) => number::check(kw, n),
                None => Ok(()),
            },
            (Kind::String(kw), Value::String(s)) => string::check(kw, s),
            (Kind::List(kw), Value::List(items)) => self.list(kw, items, scope)?,
            (Kind::Map(kw), Value::Map(entries)) => self.map(kw, entries, value, scope, depth)?,
            _ => Ok(()),
        };
        if let Err(failure) = typed {
            return Ok(Err(failure));
        }

        if let Err(failure) = enum_check(&schema.keywords, value) {
            return Ok(Err(failure));
        }

        self.compose(&schema.keywords, value, scope, depth)
    }
}

fn type_check(schema: &Schema, value: &Value) -> Verdict {
    let matches = match (&schema.kind, value) {
        (Kind::Any, _) => true,
        (Kind::Null, Value::Null) => true,
        (Kind::Boolean, Value::Bool(_)) => true,
        (Kind::Integer(_), Value::Integer(_)) => true,
        (Kind::Float(_), Value::Float(_)) => true,
        (Kind::Number(_), Value::Integer(_) | Value::Float(_)) => true,
        (Kind::String(_), Value::String(_)) => true,
        (Kind::List(_), Value::List(_)) => true,
        (Kind::Map(_), Value::Map(_)) => true,
        _ => false,
    };
    if matches {
        Ok(())
    } else {
        Err(Failure::Type {
            expected: schema.type_label().to_string(),
            actual: value.type_name().to_string(),
        })
    }
}

fn enum_check(keywords: &Keywords, value: &Value) -> Verdict {
    match &keywords.enumeration {
        Some(allowed) if !allowed.contains(value) => Err(Failure::Enum {
            value: value.clone(),
            allowed: allowed.clone(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{MapKeywords, NumberKeywords, Ref, StringKeywords};
    use serde_json::json;

    fn value(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn type_mismatch_uses_label() {
        let schema: Node = Schema::integer(NumberKeywords::new()).label("count").into();
        let err = validate(&schema, &value(json!("x"))).unwrap_err();
        assert_eq!(
            err.failure(),
            Some(&Failure::Type {
                expected: "count".into(),
                actual: "string".into()
            })
        );
    }

    #[test]
    fn number_subtypes_are_strict() {
        let integer: Node = Schema::integer(NumberKeywords::new()).into();
        let float: Node = Schema::float(NumberKeywords::new()).into();
        let number: Node = Schema::number(NumberKeywords::new()).into();
        assert_eq!(is_valid(&integer, &Value::Float(1.0)), Ok(false));
        assert_eq!(is_valid(&float, &Value::Integer(1)), Ok(false));
        assert_eq!(is_valid(&number, &Value::Integer(1)), Ok(true));
        assert_eq!(is_valid(&number, &Value::Float(1.5)), Ok(true));
    }

    #[test]
    fn enum_rejects_right_shaped_values() {
        let schema: Node = Schema::string(StringKeywords::new())
            .enumeration(["red", "green"])
            .into();
        assert_eq!(is_valid(&schema, &value(json!("red"))), Ok(true));
        let err = validate(&schema, &value(json!("blue"))).unwrap_err();
        assert_eq!(err.failure().map(Failure::reason), Some("enum"));
    }

    #[test]
    fn enum_compares_numbers_by_value() {
        let schema: Node = Schema::any().enumeration([Value::Float(1.0)]).into();
        assert_eq!(is_valid(&schema, &Value::Integer(1)), Ok(true));
    }

    #[test]
    fn type_keywords_report_before_enum() {
        let schema: Node = Schema::string(StringKeywords::new().max_length(2))
            .enumeration(["abc"])
            .into();
        let err = validate(&schema, &value(json!("abc"))).unwrap_err();
        assert_eq!(err.failure().map(Failure::reason), Some("too_long"));
    }

    #[test]
    fn broken_reference_is_a_schema_error() {
        let schema: Node = Schema::map(
            MapKeywords::new().property("a", Ref::local("#/definitions/missing")),
        )
        .into();
        // Not reached: no "a" key in the data.
        assert_eq!(is_valid(&schema, &value(json!({}))), Ok(true));
        let err = is_valid(&schema, &value(json!({"a": 1}))).unwrap_err();
        assert!(matches!(err, SchemaError::ReferenceNotFound { .. }));
    }

    #[test]
    fn self_reference_without_progress_hits_depth_limit() {
        let root = Schema::any().all_of([Ref::local("#")]);
        let graph = SchemaGraph::new(root);
        let err = Validator::new(&graph)
            .with_options(ValidatorOptions { max_depth: 16 })
            .validate(&Value::Null)
            .unwrap_err();
        assert_eq!(err, ValidationError::Schema(SchemaError::DepthExceeded { limit: 16 }));
    }

    #[test]
    fn recursive_schema_terminates_on_finite_data() {
        // A linked list: {"next": <list> | null}
        let root = Schema::map(
            MapKeywords::new().property(
                "next",
                Schema::any().any_of([Node::from(Schema::null()), Ref::local("#").into()]),
            ),
        );
        let graph = SchemaGraph::new(root);
        assert_eq!(graph.is_valid(&value(json!({"next": {"next": {"next": null}}}))), Ok(true));
        assert_eq!(graph.is_valid(&value(json!({"next": {"next": 3}}))), Ok(false));
    }

    #[test]
    fn nesting_deeper_than_the_limit_is_not_a_schema_error() {
        let root = Schema::map(
            MapKeywords::new().property(
                "next",
                Schema::any().any_of([Node::from(Schema::null()), Ref::local("#").into()]),
            ),
        );
        let graph = SchemaGraph::new(root);
        let validator = Validator::new(&graph).with_options(ValidatorOptions { max_depth: 16 });

        let mut list = json!({"next": null});
        for _ in 0..100 {
            list = json!({ "next": list });
        }
        assert_eq!(validator.is_valid(&value(list)), Ok(true));

        let mut broken = json!({"next": 1});
        for _ in 0..100 {
            broken = json!({ "next": broken });
        }
        assert_eq!(validator.is_valid(&value(broken)), Ok(false));
    }
}
