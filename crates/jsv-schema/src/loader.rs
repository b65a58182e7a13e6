//! # Draft Loader
//!
//! Translates JSON Schema draft-4, draft-6 and draft-7 documents into the
//! node model.
//!
//! ## Translation
//!
//! - `type` as a string selects the variant. `type` as an array, or no
//!   `type` with type-specific keywords present, becomes an `Any` node
//!   whose `any_of` holds one branch per type, so each keyword constrains
//!   only the values of its own type.
//! - camelCase keywords map to their snake_case fields. `const` becomes a
//!   one-element `enum`. `true`/`false` schemas become truthy/falsy nodes.
//! - `exclusiveMinimum`/`exclusiveMaximum` accept the boolean and the
//!   numeric form in every draft.
//! - `$ref` becomes a [`Ref`]. Fragment references inside a subtree with
//!   its own identifier point into that subtree; other relative references
//!   are joined against the current base URI. Siblings of `$ref` are
//!   dropped except `definitions` and extension data.
//! - `definitions` and unrecognized keywords land in the node's `data`
//!   bucket so JSON Pointer references into them resolve.
//! - Keywords this engine does not evaluate (`format`, `contains`, `if`,
//!   …) are logged at `warn` and kept as extension data.

use std::collections::{BTreeMap, BTreeSet};

use jsv_core::{from_json, join_uri, split_fragment, to_pointer, Number};
use serde_json::{Map, Value as Json};

use crate::error::LoadError;
use crate::node::{
    Additional, Dependency, Exclusivity, Extra, Items, KeyForm, Keywords, Kind, ListKeywords,
    MapKeywords, Node, NumberKeywords, Pattern, Ref, Schema, StringKeywords,
};
use crate::options::{Draft, LoaderOptions};

const NUMBER_KEYWORDS: &[&str] = &[
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "multipleOf",
];
const STRING_KEYWORDS: &[&str] = &["minLength", "maxLength", "pattern"];
const LIST_KEYWORDS: &[&str] = &["items", "additionalItems", "minItems", "maxItems", "uniqueItems"];
const MAP_KEYWORDS: &[&str] = &[
    "properties",
    "patternProperties",
    "additionalProperties",
    "required",
    "dependencies",
    "minProperties",
    "maxProperties",
    "keys",
];
const UNIVERSAL_KEYWORDS: &[&str] = &["enum", "const", "not", "allOf", "anyOf", "oneOf", "as", "type", "definitions"];

/// Annotations carried as raw values, never translated as schemas.
const ANNOTATIONS: &[&str] = &[
    "$schema",
    "$comment",
    "title",
    "description",
    "default",
    "examples",
    "readOnly",
    "writeOnly",
];

/// Keywords of the supported drafts that validation does not evaluate.
const UNSUPPORTED: &[&str] = &[
    "format",
    "contains",
    "propertyNames",
    "if",
    "then",
    "else",
    "contentMediaType",
    "contentEncoding",
];

/// Translates draft documents into [`Node`] trees.
#[derive(Debug, Clone)]
pub struct Loader {
    options: LoaderOptions,
    base: Option<String>,
}

/// Per-document translation state.
struct Context {
    draft: Draft,
    /// Base URI of the document root; fragment references under it stay local.
    root_base: Option<String>,
}

impl Loader {
    /// A loader with no base URI.
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            base: None,
        }
    }

    /// Resolve relative identifiers and references against `base`.
    pub fn with_base(mut self, base: Option<&str>) -> Self {
        self.base = base.map(str::to_string);
        self
    }

    /// Translate one document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] for malformed keywords, invalid patterns, or an
    /// unsupported `$schema`.
    pub fn load(&self, json: &Json) -> Result<Node, LoadError> {
        let draft = match json.get("$schema").and_then(Json::as_str) {
            Some(uri) => Draft::from_meta_schema(uri)
                .ok_or_else(|| LoadError::UnsupportedDraft(uri.to_string()))?,
            None => self.options.default_draft,
        };
        let root_base = scoped_base(self.base.as_deref(), identifier(json, draft));
        let ctx = Context {
            draft,
            root_base: root_base.clone(),
        };
        tracing::debug!(?draft, base = root_base.as_deref().unwrap_or("<none>"), "loading schema document");
        ctx.node(json, self.base.as_deref(), &mut Vec::new())
    }
}

/// The subtree identifier, if the draft's id keyword holds a string.
fn identifier(json: &Json, draft: Draft) -> Option<&str> {
    json.get(draft.id_keyword()).and_then(Json::as_str)
}

/// The base URI in effect inside a subtree with identifier `id`.
///
/// Plain-name fragments (`#foo`) name an anchor and leave the base alone.
fn scoped_base(base: Option<&str>, id: Option<&str>) -> Option<String> {
    let Some(id) = id else {
        return base.map(str::to_string);
    };
    let resolved = join_uri(base, id);
    match split_fragment(&resolved) {
        (_, Some(fragment)) if !fragment.is_empty() => base.map(str::to_string),
        (resource, _) if resource.is_empty() => base.map(str::to_string),
        (resource, _) => Some(resource.to_string()),
    }
}

fn invalid(keyword: &str, path: &[String], reason: impl Into<String>) -> LoadError {
    LoadError::InvalidKeyword {
        keyword: keyword.to_string(),
        pointer: to_pointer(path),
        reason: reason.into(),
    }
}

impl Context {
    fn node(&self, json: &Json, base: Option<&str>, path: &mut Vec<String>) -> Result<Node, LoadError> {
        match json {
            Json::Bool(true) => Ok(Schema::truthy().into()),
            Json::Bool(false) => Ok(Schema::falsy().into()),
            Json::Object(object) => self.object(object, base, path),
            other => Err(LoadError::InvalidKeyword {
                keyword: path.last().cloned().unwrap_or_default(),
                pointer: to_pointer(path),
                reason: format!("expected a schema object or boolean, found {other}"),
            }),
        }
    }

    /// Translate a child schema found under `segments`.
    fn child(
        &self,
        json: &Json,
        base: Option<&str>,
        path: &mut Vec<String>,
        segments: &[&str],
    ) -> Result<Node, LoadError> {
        let depth = path.len();
        path.extend(segments.iter().map(|s| s.to_string()));
        let node = self.node(json, base, path);
        path.truncate(depth);
        node
    }

    fn object(&self, object: &Map<String, Json>, base: Option<&str>, path: &mut Vec<String>) -> Result<Node, LoadError> {
        let id_keyword = self.draft.id_keyword();
        let id = object.get(id_keyword).and_then(Json::as_str);
        let base = scoped_base(base, id);
        let base = base.as_deref();

        if let Some(reference) = object.get("$ref") {
            let reference = reference
                .as_str()
                .ok_or_else(|| invalid("$ref", path, "expected a string"))?;
            let target = self.reference(reference, base);
            let mut data = BTreeMap::new();
            for (key, value) in object {
                if key == "$ref" || key == id_keyword || ANNOTATIONS.contains(&key.as_str()) {
                    continue;
                }
                let extra = if key == "definitions" {
                    self.definitions(value, base, path)?
                } else {
                    self.extra(key, value, base, path)
                };
                data.insert(key.clone(), extra);
            }
            if data.is_empty() {
                return Ok(Node::Ref(target));
            }
            let mut schema = Schema::any().all_of([target]);
            schema.keywords.data = data;
            return Ok(schema.into());
        }

        let mut consumed: BTreeSet<&str> = UNIVERSAL_KEYWORDS.iter().copied().collect();
        consumed.insert(id_keyword);
        let present = |group: &[&str]| group.iter().any(|k| object.contains_key(*k));

        let types: Vec<&str> = match object.get("type") {
            None => {
                let typed = [NUMBER_KEYWORDS, STRING_KEYWORDS, LIST_KEYWORDS, MAP_KEYWORDS]
                    .iter()
                    .any(|group| present(group));
                if typed {
                    vec!["null", "boolean", "number", "string", "array", "object"]
                } else {
                    Vec::new()
                }
            }
            Some(Json::String(t)) => vec![t.as_str()],
            Some(Json::Array(ts)) => ts
                .iter()
                .map(|t| t.as_str().ok_or_else(|| invalid("type", path, "expected type names")))
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(invalid("type", path, "expected a string or an array")),
        };

        let mut kinds = Vec::with_capacity(types.len());
        for t in &types {
            let kind = match *t {
                "null" => Kind::Null,
                "boolean" => Kind::Boolean,
                "integer" | "number" => {
                    consumed.extend(NUMBER_KEYWORDS.iter().copied());
                    let kw = self.number_keywords(object, path)?;
                    if *t == "integer" {
                        Kind::Integer(kw)
                    } else {
                        Kind::Number(kw)
                    }
                }
                "string" => {
                    consumed.extend(STRING_KEYWORDS.iter().copied());
                    Kind::String(self.string_keywords(object, path)?)
                }
                "array" => {
                    consumed.extend(LIST_KEYWORDS.iter().copied());
                    Kind::List(self.list_keywords(object, base, path)?)
                }
                "object" => {
                    consumed.extend(MAP_KEYWORDS.iter().copied());
                    Kind::Map(self.map_keywords(object, base, path)?)
                }
                other => return Err(invalid("type", path, format!("unknown type '{other}'"))),
            };
            kinds.push(kind);
        }

        let mut keywords = self.universal(object, base, path)?;
        keywords.id = id.map(str::to_string);

        let kind = if kinds.len() == 1 {
            kinds.pop().unwrap_or(Kind::Any)
        } else {
            if !kinds.is_empty() {
                let branches: Vec<Node> = kinds.into_iter().map(|k| Schema::new(k).into()).collect();
                if keywords.any_of.is_empty() {
                    keywords.any_of = branches;
                } else {
                    keywords.all_of.insert(0, Schema::any().any_of(branches).into());
                }
            }
            Kind::Any
        };

        for (key, value) in object {
            if consumed.contains(key.as_str()) {
                continue;
            }
            if UNSUPPORTED.contains(&key.as_str()) {
                tracing::warn!(
                    keyword = %key,
                    pointer = %to_pointer(path),
                    "keyword is not evaluated; kept as extension data"
                );
            }
            keywords.data.insert(key.clone(), self.extra(key, value, base, path));
        }

        Ok(Schema { kind, keywords }.into())
    }

    fn reference(&self, reference: &str, base: Option<&str>) -> Ref {
        if let Some(fragment) = reference.strip_prefix('#') {
            let pointer = fragment.is_empty() || fragment.starts_with('/');
            return match base {
                Some(base) if !pointer || Some(base) != self.root_base.as_deref() => {
                    Ref::remote(base, fragment)
                }
                _ => Ref::local(reference),
            };
        }
        Ref::parse(&join_uri(base, reference))
    }

    fn universal(&self, object: &Map<String, Json>, base: Option<&str>, path: &mut Vec<String>) -> Result<Keywords, LoadError> {
        let mut keywords = Keywords::default();

        if let Some(values) = object.get("enum") {
            let values = values
                .as_array()
                .ok_or_else(|| invalid("enum", path, "expected an array"))?;
            keywords.enumeration = Some(values.iter().map(from_json).collect());
        }
        if let Some(constant) = object.get("const") {
            let single = vec![from_json(constant)];
            if keywords.enumeration.is_none() {
                keywords.enumeration = Some(single);
            } else {
                keywords
                    .all_of
                    .push(Schema::any().enumeration(single).into());
            }
        }
        if let Some(not) = object.get("not") {
            keywords.not = Some(Box::new(self.child(not, base, path, &["not"])?));
        }
        for (keyword, slot) in [
            ("allOf", &mut keywords.all_of),
            ("anyOf", &mut keywords.any_of),
            ("oneOf", &mut keywords.one_of),
        ] {
            let Some(branches) = object.get(keyword) else {
                continue;
            };
            let branches = branches
                .as_array()
                .ok_or_else(|| invalid(keyword, path, "expected an array of schemas"))?;
            for (i, branch) in branches.iter().enumerate() {
                let index = i.to_string();
                slot.push(self.child(branch, base, path, &[keyword, index.as_str()])?);
            }
        }
        if let Some(label) = object.get("as") {
            let label = label
                .as_str()
                .ok_or_else(|| invalid("as", path, "expected a string"))?;
            keywords.label = Some(label.to_string());
        }
        if let Some(definitions) = object.get("definitions") {
            let definitions = self.definitions(definitions, base, path)?;
            keywords.data.insert("definitions".to_string(), definitions);
        }
        Ok(keywords)
    }

    /// `definitions`: every object or boolean entry is a schema.
    fn definitions(&self, value: &Json, base: Option<&str>, path: &mut Vec<String>) -> Result<Extra, LoadError> {
        let definitions = value
            .as_object()
            .ok_or_else(|| invalid("definitions", path, "expected an object"))?;
        let mut entries = BTreeMap::new();
        for (name, definition) in definitions {
            let extra = match definition {
                Json::Object(_) | Json::Bool(_) => {
                    Extra::Node(self.child(definition, base, path, &["definitions", name.as_str()])?)
                }
                other => Extra::Value(from_json(other)),
            };
            entries.insert(name.clone(), extra);
        }
        Ok(Extra::Map(entries))
    }

    /// Extension data: objects that translate become schemas, the rest
    /// stays raw.
    fn extra(&self, key: &str, value: &Json, base: Option<&str>, path: &mut Vec<String>) -> Extra {
        if ANNOTATIONS.contains(&key) {
            return Extra::Value(from_json(value));
        }
        match value {
            Json::Object(_) => match self.child(value, base, path, &[key]) {
                Ok(node) => Extra::Node(node),
                Err(_) => Extra::Value(from_json(value)),
            },
            Json::Array(items) => {
                let depth = path.len();
                path.push(key.to_string());
                let list = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.extra(&i.to_string(), item, base, path))
                    .collect();
                path.truncate(depth);
                Extra::List(list)
            }
            other => Extra::Value(from_json(other)),
        }
    }

    fn number_keywords(&self, object: &Map<String, Json>, path: &[String]) -> Result<NumberKeywords, LoadError> {
        let mut kw = NumberKeywords::new();
        kw.minimum = optional(object, "minimum", path, number)?;
        kw.maximum = optional(object, "maximum", path, number)?;
        kw.exclusive_minimum = optional(object, "exclusiveMinimum", path, exclusivity)?;
        kw.exclusive_maximum = optional(object, "exclusiveMaximum", path, exclusivity)?;
        kw.multiple_of = optional(object, "multipleOf", path, number)?;
        if let Some(divisor) = kw.multiple_of {
            if divisor.as_f64() <= 0.0 {
                return Err(invalid("multipleOf", path, "must be greater than zero"));
            }
        }
        Ok(kw)
    }

    fn string_keywords(&self, object: &Map<String, Json>, path: &[String]) -> Result<StringKeywords, LoadError> {
        let mut kw = StringKeywords::new();
        kw.min_length = optional(object, "minLength", path, count)?;
        kw.max_length = optional(object, "maxLength", path, count)?;
        if let Some(pattern) = object.get("pattern") {
            let source = pattern
                .as_str()
                .ok_or_else(|| invalid("pattern", path, "expected a string"))?;
            kw.pattern = Some(compile(source, path)?);
        }
        Ok(kw)
    }

    fn list_keywords(&self, object: &Map<String, Json>, base: Option<&str>, path: &mut Vec<String>) -> Result<ListKeywords, LoadError> {
        let mut kw = ListKeywords::new();
        kw.min_items = optional(object, "minItems", path, count)?;
        kw.max_items = optional(object, "maxItems", path, count)?;
        kw.unique_items = optional(object, "uniqueItems", path, boolean)?.unwrap_or(false);
        kw.items = match object.get("items") {
            None => None,
            Some(Json::Array(nodes)) => {
                let mut tuple = Vec::with_capacity(nodes.len());
                for (i, node) in nodes.iter().enumerate() {
                    tuple.push(self.child(node, base, path, &["items", i.to_string().as_str()])?);
                }
                Some(Items::Tuple(tuple))
            }
            Some(node) => Some(Items::Each(Box::new(self.child(node, base, path, &["items"])?))),
        };
        kw.additional_items = self.additional(object, "additionalItems", base, path)?;
        Ok(kw)
    }

    fn map_keywords(&self, object: &Map<String, Json>, base: Option<&str>, path: &mut Vec<String>) -> Result<MapKeywords, LoadError> {
        let mut kw = MapKeywords::new();
        kw.min_properties = optional(object, "minProperties", path, count)?;
        kw.max_properties = optional(object, "maxProperties", path, count)?;

        if let Some(properties) = object.get("properties") {
            let properties = properties
                .as_object()
                .ok_or_else(|| invalid("properties", path, "expected an object"))?;
            for (name, node) in properties {
                let node = self.child(node, base, path, &["properties", name.as_str()])?;
                kw.properties.insert(name.clone(), node);
            }
        }

        if let Some(patterns) = object.get("patternProperties") {
            let patterns = patterns
                .as_object()
                .ok_or_else(|| invalid("patternProperties", path, "expected an object"))?;
            for (source, node) in patterns {
                let pattern = compile(source, path)?;
                let node = self.child(node, base, path, &["patternProperties", source.as_str()])?;
                kw.pattern_properties.push((pattern, node));
            }
        }

        kw.additional_properties = self.additional(object, "additionalProperties", base, path)?;

        if let Some(required) = object.get("required") {
            let names = required
                .as_array()
                .ok_or_else(|| invalid("required", path, "expected an array of strings"))?;
            for name in names {
                let name = name
                    .as_str()
                    .ok_or_else(|| invalid("required", path, "expected an array of strings"))?;
                kw.required.insert(name.to_string());
            }
        }

        if let Some(dependencies) = object.get("dependencies") {
            let dependencies = dependencies
                .as_object()
                .ok_or_else(|| invalid("dependencies", path, "expected an object"))?;
            for (trigger, dependency) in dependencies {
                let dependency = match dependency {
                    Json::Array(keys) => Dependency::Keys(
                        keys.iter()
                            .map(|k| {
                                k.as_str().map(str::to_string).ok_or_else(|| {
                                    invalid("dependencies", path, "expected property names")
                                })
                            })
                            .collect::<Result<_, _>>()?,
                    ),
                    node => Dependency::Schema(Box::new(self.child(node, base, path, &["dependencies", trigger.as_str()])?)),
                };
                kw.dependencies.insert(trigger.clone(), dependency);
            }
        }

        if let Some(keys) = object.get("keys") {
            kw.keys = Some(match keys.as_str() {
                Some("strings") => KeyForm::Strings,
                Some("symbols") => KeyForm::Symbols,
                _ => return Err(invalid("keys", path, "expected \"strings\" or \"symbols\"")),
            });
        }
        Ok(kw)
    }

    fn additional(
        &self,
        object: &Map<String, Json>,
        keyword: &str,
        base: Option<&str>,
        path: &mut Vec<String>,
    ) -> Result<Option<Additional>, LoadError> {
        Ok(match object.get(keyword) {
            None => None,
            Some(Json::Bool(allowed)) => Some(Additional::Allowed(*allowed)),
            Some(node) => Some(Additional::Schema(Box::new(self.child(node, base, path, &[keyword])?))),
        })
    }
}

fn optional<T>(
    object: &Map<String, Json>,
    keyword: &str,
    path: &[String],
    parse: fn(&Json) -> Option<T>,
) -> Result<Option<T>, LoadError> {
    match object.get(keyword) {
        None => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| invalid(keyword, path, format!("unexpected value {value}"))),
    }
}

fn number(json: &Json) -> Option<Number> {
    let n = json.as_number()?;
    n.as_i64().map(Number::Int).or_else(|| n.as_f64().map(Number::Float))
}

fn exclusivity(json: &Json) -> Option<Exclusivity> {
    match json {
        Json::Bool(flag) => Some(Exclusivity::Flag(*flag)),
        other => number(other).map(Exclusivity::Bound),
    }
}

/// A non-negative integer; `2.0` counts.
fn count(json: &Json) -> Option<usize> {
    if let Some(n) = json.as_u64() {
        return usize::try_from(n).ok();
    }
    let f = json.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64).then_some(f as usize)
}

fn boolean(json: &Json) -> Option<bool> {
    json.as_bool()
}

fn compile(source: &str, path: &[String]) -> Result<Pattern, LoadError> {
    Pattern::new(source).map_err(|source_error| LoadError::InvalidPattern {
        pattern: source.to_string(),
        pointer: to_pointer(path),
        source: source_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(json: Json) -> Node {
        Loader::new(LoaderOptions::default()).load(&json).unwrap()
    }

    fn schema(json: Json) -> Schema {
        match load(json) {
            Node::Schema(schema) => schema,
            Node::Ref(r) => panic!("expected a schema, got reference {r}"),
        }
    }

    #[test]
    fn single_type_selects_variant() {
        let s = schema(json!({"type": "integer", "minimum": 1, "exclusiveMaximum": 10}));
        assert_eq!(
            s.kind,
            Kind::Integer(NumberKeywords::new().minimum(1).exclusive_maximum(10))
        );
    }

    #[test]
    fn legacy_exclusivity_is_a_flag() {
        let s = schema(json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "type": "number", "minimum": 0, "exclusiveMinimum": true
        }));
        assert_eq!(
            s.kind,
            Kind::Number(NumberKeywords::new().minimum(0).exclusive_minimum(true))
        );
        assert!(s.keywords.data.contains_key("$schema"));
    }

    #[test]
    fn type_arrays_become_any_of() {
        let s = schema(json!({"type": ["string", "null"], "maxLength": 2}));
        assert_eq!(s.kind, Kind::Any);
        assert_eq!(
            s.keywords.any_of,
            vec![
                Node::from(Schema::string(StringKeywords::new().max_length(2))),
                Node::from(Schema::null()),
            ]
        );
    }

    #[test]
    fn typeless_keywords_only_constrain_their_type() {
        let s = schema(json!({"minimum": 3}));
        assert_eq!(s.kind, Kind::Any);
        assert_eq!(s.keywords.any_of.len(), 6);
        let node = Node::from(s);
        assert_eq!(crate::is_valid(&node, &"short".into()), Ok(true));
        assert_eq!(crate::is_valid(&node, &2.into()), Ok(false));
    }

    #[test]
    fn no_keywords_is_any() {
        assert_eq!(schema(json!({})), Schema::any());
        assert_eq!(schema(json!(true)), Schema::truthy());
        assert_eq!(schema(json!(false)), Schema::falsy());
    }

    #[test]
    fn const_is_single_enum() {
        let s = schema(json!({"const": "x"}));
        assert_eq!(s.keywords.enumeration, Some(vec!["x".into()]));
    }

    #[test]
    fn list_keywords() {
        let s = schema(json!({
            "type": "array",
            "items": [{"type": "integer"}, true],
            "additionalItems": false,
            "uniqueItems": true,
            "minItems": 1
        }));
        let Kind::List(kw) = s.kind else {
            panic!("expected a list")
        };
        assert!(matches!(kw.items, Some(Items::Tuple(ref t)) if t.len() == 2));
        assert_eq!(kw.additional_items, Some(Additional::Allowed(false)));
        assert!(kw.unique_items);
        assert_eq!(kw.min_items, Some(1));
    }

    #[test]
    fn map_keywords() {
        let s = schema(json!({
            "type": "object",
            "properties": {"a": {"type": "string"}},
            "patternProperties": {"^x-": {}},
            "additionalProperties": {"type": "integer"},
            "required": ["a"],
            "dependencies": {"a": ["b"], "c": {"required": ["d"]}},
            "keys": "strings"
        }));
        let Kind::Map(kw) = s.kind else {
            panic!("expected a map")
        };
        assert!(kw.properties.contains_key("a"));
        assert_eq!(kw.pattern_properties[0].0.as_str(), "^x-");
        assert!(matches!(kw.additional_properties, Some(Additional::Schema(_))));
        assert!(kw.required.contains("a"));
        assert_eq!(kw.dependencies["a"], Dependency::Keys(vec!["b".into()]));
        assert!(matches!(kw.dependencies["c"], Dependency::Schema(_)));
        assert_eq!(kw.keys, Some(KeyForm::Strings));
    }

    #[test]
    fn refs_and_definitions() {
        let s = schema(json!({
            "definitions": {"pos": {"type": "integer", "minimum": 1}},
            "properties": {"n": {"$ref": "#/definitions/pos"}}
        }));
        assert!(matches!(s.keywords.data.get("definitions"), Some(Extra::Map(_))));
        let node = Node::from(s);
        assert_eq!(crate::is_valid(&node, &serde_json::json!({"n": 2}).into()), Ok(true));
        assert_eq!(crate::is_valid(&node, &serde_json::json!({"n": 0}).into()), Ok(false));
    }

    #[test]
    fn ref_siblings_are_dropped_but_data_kept() {
        let node = load(json!({"$ref": "#/definitions/a", "type": "string", "definitions": {"a": {"type": "null"}}}));
        let Node::Schema(s) = node else {
            panic!("expected wrapper schema")
        };
        assert_eq!(s.kind, Kind::Any);
        assert_eq!(s.keywords.all_of, vec![Node::Ref(Ref::local("#/definitions/a"))]);
        assert!(s.keywords.data.contains_key("definitions"));

        assert_eq!(load(json!({"$ref": "#"})), Node::Ref(Ref::local("#")));
    }

    #[test]
    fn fragment_refs_inside_identified_subtrees_are_absolute() {
        let s = schema(json!({
            "$id": "http://example.com/root.json",
            "definitions": {
                "item": {
                    "$id": "item.json",
                    "definitions": {"id": {"type": "integer"}},
                    "properties": {"id": {"$ref": "#/definitions/id"}}
                }
            },
            "properties": {"x": {"$ref": "#/definitions/item"}}
        }));
        let Some(Extra::Map(definitions)) = s.keywords.data.get("definitions") else {
            panic!("definitions missing")
        };
        let Some(Extra::Node(Node::Schema(item))) = definitions.get("item") else {
            panic!("item missing")
        };
        let Kind::Any = item.kind else {
            panic!("typeless object keywords become any_of")
        };
        let map = item.keywords.any_of.iter().find_map(|b| match b {
            Node::Schema(Schema { kind: Kind::Map(kw), .. }) => Some(kw),
            _ => None,
        });
        assert_eq!(
            map.map(|kw| kw.properties["id"].clone()),
            Some(Node::Ref(Ref::remote("http://example.com/item.json", "/definitions/id")))
        );
    }

    #[test]
    fn relative_refs_join_the_base() {
        let node = Loader::new(LoaderOptions::default())
            .with_base(Some("http://example.com/schemas/root.json"))
            .load(&json!({"$ref": "other.json#/definitions/a"}))
            .unwrap();
        assert_eq!(
            node,
            Node::Ref(Ref::remote("http://example.com/schemas/other.json", "/definitions/a"))
        );
    }

    #[test]
    fn unsupported_keywords_are_kept() {
        let s = schema(json!({"type": "string", "format": "email", "title": "Email"}));
        assert!(matches!(s.keywords.data.get("format"), Some(Extra::Value(_))));
        assert!(matches!(s.keywords.data.get("title"), Some(Extra::Value(_))));
    }

    #[test]
    fn malformed_keywords_name_their_location() {
        let err = Loader::new(LoaderOptions::default())
            .load(&json!({"properties": {"a": {"type": "string", "minLength": -1}}}))
            .unwrap_err();
        match err {
            LoadError::InvalidKeyword { keyword, pointer, .. } => {
                assert_eq!(keyword, "minLength");
                assert_eq!(pointer, "/properties/a");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn bad_patterns_are_reported() {
        let err = Loader::new(LoaderOptions::default())
            .load(&json!({"type": "string", "pattern": "("}))
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidPattern { .. }));
    }

    #[test]
    fn unknown_meta_schema_is_rejected() {
        let err = Loader::new(LoaderOptions::default())
            .load(&json!({"$schema": "https://json-schema.org/draft/2020-12/schema"}))
            .unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedDraft(_)));
    }

    #[test]
    fn draft4_uses_plain_id() {
        let s = schema(json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "id": "http://example.com/a.json"
        }));
        assert_eq!(s.keywords.id.as_deref(), Some("http://example.com/a.json"));

        let s = schema(json!({"id": "http://example.com/a.json"}));
        assert_eq!(s.keywords.id, None);
        assert!(s.keywords.data.contains_key("id"));
    }
}
