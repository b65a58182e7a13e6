//! # Document Conversion
//!
//! Converts parsed JSON and YAML trees into the [`Value`] model.
//!
//! JSON integers that fit in `i64` become [`Value::Integer`]; every other
//! number (fractions, exponents, integers beyond `i64`) becomes
//! [`Value::Float`]. Object keys always become [`Key::String`], since
//! neither format has a symbol encoding.

use crate::error::CoreError;
use crate::value::{Key, Value};

/// Convert a `serde_json::Value` into a [`Value`].
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(from_json).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.iter()
                .map(|(k, v)| (Key::String(k.clone()), from_json(v)))
                .collect(),
        ),
    }
}

/// Convert a `serde_yaml::Value` into a [`Value`].
///
/// YAML has a richer type system than JSON (tags, anchors, non-string
/// keys). Tags are dropped and the inner value converted; scalar keys are
/// stringified; sequence or mapping keys are rejected.
pub fn from_yaml(yaml: &serde_yaml::Value) -> Result<Value, CoreError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(CoreError::Yaml(format!("unsupported YAML number: {n:?}")))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, CoreError> = seq.iter().map(from_yaml).collect();
            Ok(Value::List(items?))
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = std::collections::BTreeMap::new();
            for (k, v) in mapping {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(CoreError::Yaml(format!(
                            "unsupported YAML map key type: {other:?}"
                        )))
                    }
                };
                map.insert(Key::String(key), from_yaml(v)?);
            }
            Ok(Value::Map(map))
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(&tagged.value),
    }
}

/// Parse YAML text into a [`Value`].
pub fn parse_yaml(text: &str) -> Result<Value, CoreError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| CoreError::Yaml(e.to_string()))?;
    from_yaml(&yaml)
}
