//! # Failure Tree
//!
//! Every failing keyword check produces one [`Failure`] record: a reason
//! plus the keyword-specific context fields. Failures on nested data are
//! wrapped, not flattened. A list failing on element 3 reports
//! `InvalidItem { at: 3, error }` with the element's own failure inside,
//! so the tree mirrors the path from the root schema to the failing leaf.
//!
//! ## Serialized Shape
//!
//! Failures serialize internally tagged with a snake_case `reason`:
//!
//! ```json
//! {"reason": "invalid_property", "property": "age",
//!  "error": {"reason": "too_small", "value": -1, "minimum": 0, "exclusive_minimum": false}}
//! ```

use jsv_core::{to_pointer, Number, Value};
use serde::Serialize;
use thiserror::Error;

use crate::node::KeyForm;

/// Why a value does not conform to a schema.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Failure {
    /// The value has the wrong shape for the schema variant.
    #[error("expected {expected}, got {actual}")]
    Type {
        /// The schema's `as` label, or its type name.
        expected: String,
        /// The value's type name.
        actual: String,
    },

    /// The value is not in the schema's `enum`.
    #[error("{value} is not one of the allowed values")]
    Enum {
        /// The rejected value.
        value: Value,
        /// The closed set of accepted values.
        allowed: Vec<Value>,
    },

    /// Below `minimum`, or at it when the bound is exclusive.
    #[error("{value} is below the {} minimum {minimum}", bound_kind(.exclusive_minimum))]
    TooSmall {
        /// The rejected number.
        value: Number,
        /// The bound.
        minimum: Number,
        /// Whether the bound excludes itself.
        exclusive_minimum: bool,
    },

    /// Above `maximum`, or at it when the bound is exclusive.
    #[error("{value} is above the {} maximum {maximum}", bound_kind(.exclusive_maximum))]
    TooBig {
        /// The rejected number.
        value: Number,
        /// The bound.
        maximum: Number,
        /// Whether the bound excludes itself.
        exclusive_maximum: bool,
    },

    /// Not an exact multiple of `multiple_of`.
    #[error("{value} is not a multiple of {multiple_of}")]
    NotMultipleOf {
        /// The rejected number.
        value: Number,
        /// The divisor.
        multiple_of: Number,
    },

    /// Fewer characters than `min_length`.
    #[error("length {length} is shorter than {min_length}")]
    TooShort {
        /// Length in Unicode scalar values.
        length: usize,
        /// The bound.
        min_length: usize,
    },

    /// More characters than `max_length`.
    #[error("length {length} is longer than {max_length}")]
    TooLong {
        /// Length in Unicode scalar values.
        length: usize,
        /// The bound.
        max_length: usize,
    },

    /// `pattern` matches nowhere in the string.
    #[error("'{value}' does not match /{pattern}/")]
    PatternMismatch {
        /// The rejected string.
        value: String,
        /// The pattern source.
        pattern: String,
    },

    /// Fewer elements than `min_items`.
    #[error("{count} items, expected at least {min_items}")]
    TooFewItems {
        /// Element count.
        count: usize,
        /// The bound.
        min_items: usize,
    },

    /// More elements than `max_items`.
    #[error("{count} items, expected at most {max_items}")]
    TooManyItems {
        /// Element count.
        count: usize,
        /// The bound.
        max_items: usize,
    },

    /// An element failed its item schema.
    #[error("item {at}: {error}")]
    InvalidItem {
        /// Index of the element.
        at: usize,
        /// The element's failure.
        error: Box<Failure>,
    },

    /// An element beyond the tuple when `additional_items` is false.
    #[error("unexpected item at {at}")]
    AdditionalItem {
        /// Index of the first extra element.
        at: usize,
    },

    /// Two elements are equal under `unique_items`.
    #[error("item {at} duplicates item {duplicate_of}")]
    DuplicateItem {
        /// Index of the later element.
        at: usize,
        /// Index of the earlier equal element.
        duplicate_of: usize,
    },

    /// Fewer keys than `min_properties`.
    #[error("{count} properties, expected at least {min_properties}")]
    TooFewProperties {
        /// Key count.
        count: usize,
        /// The bound.
        min_properties: usize,
    },

    /// More keys than `max_properties`.
    #[error("{count} properties, expected at most {max_properties}")]
    TooManyProperties {
        /// Key count.
        count: usize,
        /// The bound.
        max_properties: usize,
    },

    /// A key does not use the encoding required by `keys`.
    #[error("key '{key}' is not in {expected} form")]
    InvalidKeys {
        /// The required encoding.
        expected: KeyForm,
        /// The first offending key.
        key: String,
    },

    /// The same name is present as both a symbol and a string key.
    #[error("key '{key}' is present as both symbol and string")]
    AmbiguousKey {
        /// The colliding name.
        key: String,
    },

    /// Required keys are absent.
    #[error("missing required properties {missing:?}")]
    MissingProperties {
        /// Absent keys.
        missing: Vec<String>,
        /// The full `required` set.
        required: Vec<String>,
    },

    /// A key listed under `dependencies` is absent.
    #[error("'{property}' requires '{dependency}'")]
    MissingDependency {
        /// The trigger key.
        property: String,
        /// The absent key.
        dependency: String,
    },

    /// The map fails the schema attached to a present trigger key.
    #[error("dependency of '{property}': {error}")]
    InvalidDependency {
        /// The trigger key.
        property: String,
        /// The map's failure against the dependency schema.
        error: Box<Failure>,
    },

    /// A property value failed its schema.
    #[error("property '{property}': {error}")]
    InvalidProperty {
        /// The key.
        property: String,
        /// The value's failure.
        error: Box<Failure>,
    },

    /// Keys left over when `additional_properties` is false.
    #[error("unexpected properties {properties:?}")]
    AdditionalProperties {
        /// The unmatched keys.
        properties: Vec<String>,
    },

    /// The value satisfies the `not` schema.
    #[error("value matches a forbidden schema")]
    Not,

    /// An `all_of` branch failed.
    #[error("all_of branch {at}: {error}")]
    AllOf {
        /// Index of the first failing branch.
        at: usize,
        /// That branch's failure.
        error: Box<Failure>,
    },

    /// No `any_of` branch succeeded.
    #[error("value matches none of the any_of schemas")]
    AnyOf,

    /// Zero or several `one_of` branches succeeded.
    #[error("value matches {} of the one_of schemas, expected exactly one", .matched.len())]
    OneOf {
        /// Indices of the succeeding branches.
        matched: Vec<usize>,
    },
}

fn bound_kind(exclusive: &bool) -> &'static str {
    if *exclusive {
        "exclusive"
    } else {
        "inclusive"
    }
}

impl Failure {
    /// The snake_case reason tag.
    pub fn reason(&self) -> &'static str {
        match self {
            Failure::Type { .. } => "type",
            Failure::Enum { .. } => "enum",
            Failure::TooSmall { .. } => "too_small",
            Failure::TooBig { .. } => "too_big",
            Failure::NotMultipleOf { .. } => "not_multiple_of",
            Failure::TooShort { .. } => "too_short",
            Failure::TooLong { .. } => "too_long",
            Failure::PatternMismatch { .. } => "pattern_mismatch",
            Failure::TooFewItems { .. } => "too_few_items",
            Failure::TooManyItems { .. } => "too_many_items",
            Failure::InvalidItem { .. } => "invalid_item",
            Failure::AdditionalItem { .. } => "additional_item",
            Failure::DuplicateItem { .. } => "duplicate_item",
            Failure::TooFewProperties { .. } => "too_few_properties",
            Failure::TooManyProperties { .. } => "too_many_properties",
            Failure::InvalidKeys { .. } => "invalid_keys",
            Failure::AmbiguousKey { .. } => "ambiguous_key",
            Failure::MissingProperties { .. } => "missing_properties",
            Failure::MissingDependency { .. } => "missing_dependency",
            Failure::InvalidDependency { .. } => "invalid_dependency",
            Failure::InvalidProperty { .. } => "invalid_property",
            Failure::AdditionalProperties { .. } => "additional_properties",
            Failure::Not => "not",
            Failure::AllOf { .. } => "all_of",
            Failure::AnyOf => "any_of",
            Failure::OneOf { .. } => "one_of",
        }
    }

    /// The nested failure, for wrapping variants.
    pub fn inner(&self) -> Option<&Failure> {
        match self {
            Failure::InvalidItem { error, .. }
            | Failure::InvalidProperty { error, .. }
            | Failure::InvalidDependency { error, .. }
            | Failure::AllOf { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }

    /// The innermost failure of the chain.
    pub fn leaf(&self) -> &Failure {
        let mut current = self;
        while let Some(inner) = current.inner() {
            current = inner;
        }
        current
    }

    /// JSON Pointer to the data location of the innermost failure.
    ///
    /// Only `property` and `at` contexts that address data contribute;
    /// `all_of` branch indices and dependency schemas do not.
    pub fn instance_path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match current {
                Failure::InvalidItem { at, .. } => segments.push(at.to_string()),
                Failure::InvalidProperty { property, .. } => segments.push(property.clone()),
                _ => {}
            }
            match current.inner() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        to_pointer(&segments)
    }

    pub(crate) fn at_item(at: usize, error: Failure) -> Self {
        Failure::InvalidItem {
            at,
            error: Box::new(error),
        }
    }

    pub(crate) fn at_property(property: &str, error: Failure) -> Self {
        Failure::InvalidProperty {
            property: property.to_string(),
            error: Box::new(error),
        }
    }
}
