//! # Data Value Model
//!
//! The structured data that schemas validate: null, booleans, integers,
//! floats, strings, lists, and key-value maps.
//!
//! ## Dual Key Encoding
//!
//! Map keys come in two encodings, [`Key::Symbol`] and [`Key::String`].
//! Callers that build maps from identifiers (field names known at compile
//! time) use symbols; maps decoded from JSON or YAML use strings. Schemas
//! declare property names once and match either encoding; a map that holds
//! the same name in *both* encodings is ambiguous and is rejected during
//! validation, not here.
//!
//! ## Equality
//!
//! `PartialEq` is structural. Numbers compare by mathematical value, so
//! `Integer(1) == Float(1.0)`. Keys with different encodings are distinct
//! even when their text is equal.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::number::Number;

/// A map key in one of the two supported encodings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Identifier-style key.
    Symbol(String),
    /// Literal string key.
    String(String),
}

impl Key {
    /// Build a symbol key.
    pub fn symbol(name: impl Into<String>) -> Self {
        Key::Symbol(name.into())
    }

    /// Build a string key.
    pub fn string(name: impl Into<String>) -> Self {
        Key::String(name.into())
    }

    /// The textual form of the key, independent of encoding.
    pub fn as_str(&self) -> &str {
        match self {
            Key::Symbol(s) | Key::String(s) => s,
        }
    }

    /// Returns true for [`Key::Symbol`].
    pub fn is_symbol(&self) -> bool {
        matches!(self, Key::Symbol(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Symbol(s) => write!(f, ":{s}"),
            Key::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::String(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::String(value)
    }
}

/// A structured data value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// A float.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A key-value map.
    Map(BTreeMap<Key, Value>),
}

impl Value {
    /// Build a map from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short type name used in failure reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The numeric view of an integer or float value.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Integer(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// The string slice of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements of a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The entries of a map value.
    pub fn as_map(&self) -> Option<&BTreeMap<Key, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert into a `serde_json::Value`.
    ///
    /// Map keys lose their encoding. If a map holds the same text under
    /// both encodings, the string-keyed entry wins. Non-finite floats
    /// become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => {
                // Symbols sort before strings, so string entries overwrite.
                let mut out = serde_json::Map::new();
                for (k, v) in map {
                    out.insert(k.as_str().to_string(), v.to_json());
                }
                serde_json::Value::Object(out)
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k.as_str(), v)?;
                }
                out.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(i) => Value::Integer(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        crate::convert::from_json(&value)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        crate::convert::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_compare_across_subtypes() {
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Integer(1), Value::Float(1.5));
        assert_ne!(Value::Integer(1), Value::String("1".into()));
        assert_ne!(Value::Integer(9_007_199_254_740_993), Value::Float(9_007_199_254_740_992.0));
    }

    #[test]
    fn nested_equality_is_structural() {
        let a = Value::from(json!({"a": [1, {"b": null}]}));
        let b = Value::from(json!({"a": [1.0, {"b": null}]}));
        assert_eq!(a, b);
    }

    #[test]
    fn key_encodings_are_distinct() {
        let symbols = Value::map([(Key::symbol("a"), 1)]);
        let strings = Value::map([(Key::string("a"), 1)]);
        assert_ne!(symbols, strings);
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Float(0.5).type_name(), "float");
        assert_eq!(Value::from(json!([])).type_name(), "list");
        assert_eq!(Value::from(json!({})).type_name(), "map");
    }

    #[test]
    fn serializes_with_textual_keys() {
        let value = Value::map([(Key::symbol("name"), Value::from("x"))]);
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"name":"x"}"#);
    }

    #[test]
    fn to_json_prefers_string_entry_on_collision() {
        let value = Value::map([
            (Key::symbol("a"), Value::Integer(1)),
            (Key::string("a"), Value::Integer(2)),
        ]);
        assert_eq!(value.to_json(), json!({"a": 2}));
    }

    #[test]
    fn key_display_marks_encoding() {
        assert_eq!(Key::symbol("id").to_string(), ":id");
        assert_eq!(Key::string("id").to_string(), "\"id\"");
    }
}
