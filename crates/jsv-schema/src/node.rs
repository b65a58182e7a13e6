//! # Schema Node Model
//!
//! The canonical in-memory representation of a schema: a closed set of
//! typed variants ([`Kind`]), each carrying only the keywords meaningful
//! for that type, plus the universal keywords in [`Keywords`] (`enum`,
//! `not`, `all_of`, `any_of`, `one_of`, the `as` label, an optional
//! identifier, and an extension `data` bucket).
//!
//! A child position may hold either a concrete [`Schema`] or a [`Ref`]
//! standing in for a schema elsewhere in the graph, which is why children
//! are typed as [`Node`].
//!
//! ## Immutability
//!
//! Nodes are built once (through the constructors and chainable setters
//! below, or by the draft loader) and never mutated by validation. A tree
//! can be shared across threads and validated concurrently.
//!
//! ## Absent Keywords
//!
//! `None` and empty collections mean "no constraint". In particular an
//! empty `all_of`/`any_of`/`one_of` is ignored rather than treated as
//! always-true or always-false.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use jsv_core::{normalize_uri, split_fragment, Number, Value};
use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Node / Ref
// ---------------------------------------------------------------------------

/// A schema position: a concrete schema or a reference to one.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A concrete schema.
    Schema(Schema),
    /// A reference, resolved on demand.
    Ref(Ref),
}

impl Node {
    /// The concrete schema, if this node is not a reference.
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            Node::Schema(schema) => Some(schema),
            Node::Ref(_) => None,
        }
    }

    /// The reference, if this node is one.
    pub fn as_reference(&self) -> Option<&Ref> {
        match self {
            Node::Ref(r) => Some(r),
            Node::Schema(_) => None,
        }
    }
}

impl From<Schema> for Node {
    fn from(schema: Schema) -> Self {
        Node::Schema(schema)
    }
}

impl From<Ref> for Node {
    fn from(r: Ref) -> Self {
        Node::Ref(r)
    }
}

/// A reference to a schema node.
///
/// Two shapes exist:
///
/// - **Local**: `pointer` starts with `#` and `uri` is `None`. The pointer
///   is resolved against the root of whatever document is current when the
///   reference is reached.
/// - **Remote**: `uri` names a document or identified subtree and `pointer`
///   holds the fragment without its `#` (empty, a JSON pointer such as
///   `/definitions/a`, or a plain-name anchor).
///
/// The constructors enforce that a `#`-prefixed pointer never carries a URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ref {
    pointer: String,
    uri: Option<String>,
}

impl Ref {
    /// A reference relative to the current root document.
    pub fn local(pointer: &str) -> Self {
        let pointer = if pointer.starts_with('#') {
            pointer.to_string()
        } else {
            format!("#{pointer}")
        };
        Self { pointer, uri: None }
    }

    /// A reference into the resource identified by `uri`.
    pub fn remote(uri: &str, fragment: &str) -> Self {
        Self {
            pointer: fragment.trim_start_matches('#').to_string(),
            uri: Some(normalize_uri(uri)),
        }
    }

    /// Parse a reference string such as `#/definitions/a` or
    /// `http://example.com/item.json#/properties/id`.
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with('#') {
            return Self::local(reference);
        }
        let (uri, fragment) = split_fragment(reference);
        Self::remote(uri, fragment.unwrap_or(""))
    }

    /// The pointer or fragment text.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    /// The target resource, for remote references.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Returns true for references relative to the current root.
    pub fn is_local(&self) -> bool {
        self.uri.is_none()
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uri {
            None => write!(f, "{}", self.pointer),
            Some(uri) if self.pointer.is_empty() => write!(f, "{uri}"),
            Some(uri) => write!(f, "{uri}#{}", self.pointer),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// One typed node of the validation tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// The variant and its type-specific keywords.
    pub kind: Kind,
    /// Keywords available on every variant.
    pub keywords: Keywords,
}

/// The closed set of schema variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Accepts any shape; only universal keywords apply.
    Any,
    /// Accepts `null`.
    Null,
    /// Accepts `true` and `false`.
    Boolean,
    /// Accepts integers only.
    Integer(NumberKeywords),
    /// Accepts floats only.
    Float(NumberKeywords),
    /// Accepts integers and floats.
    Number(NumberKeywords),
    /// Accepts strings.
    String(StringKeywords),
    /// Accepts lists.
    List(ListKeywords),
    /// Accepts maps.
    Map(MapKeywords),
}

impl Kind {
    /// The variant's type name, used as the default error label.
    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer(_) => "integer",
            Kind::Float(_) => "float",
            Kind::Number(_) => "number",
            Kind::String(_) => "string",
            Kind::List(_) => "list",
            Kind::Map(_) => "map",
        }
    }
}

/// Keywords available on every variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keywords {
    /// Closed set of accepted literals (`enum`).
    pub enumeration: Option<Vec<Value>>,
    /// Schema the value must *not* satisfy.
    pub not: Option<Box<Node>>,
    /// Schemas that must all be satisfied.
    pub all_of: Vec<Node>,
    /// Schemas of which at least one must be satisfied.
    pub any_of: Vec<Node>,
    /// Schemas of which exactly one must be satisfied.
    pub one_of: Vec<Node>,
    /// Label used in type-mismatch reports (`as`).
    pub label: Option<String>,
    /// Identifier of this subtree, absolute or relative to the enclosing one.
    pub id: Option<String>,
    /// Extension data (`definitions` and unrecognized keywords).
    pub data: BTreeMap<String, Extra>,
}

/// Extension data stored under a schema's `data` bucket.
///
/// References may point through this data with JSON Pointer segments,
/// so nested schemas stay addressable.
#[derive(Debug, Clone, PartialEq)]
pub enum Extra {
    /// A schema or reference.
    Node(Node),
    /// A keyed container.
    Map(BTreeMap<String, Extra>),
    /// A positional container.
    List(Vec<Extra>),
    /// A literal that is not a schema.
    Value(Value),
}

impl From<Node> for Extra {
    fn from(node: Node) -> Self {
        Extra::Node(node)
    }
}

impl From<Schema> for Extra {
    fn from(schema: Schema) -> Self {
        Extra::Node(Node::Schema(schema))
    }
}

impl Schema {
    /// A schema of the given variant with no universal keywords.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            keywords: Keywords::default(),
        }
    }

    /// The `Any` variant with no keywords: accepts everything.
    pub fn any() -> Self {
        Self::new(Kind::Any)
    }

    /// The boolean schema `true`.
    pub fn truthy() -> Self {
        Self::any()
    }

    /// The boolean schema `false`: an `Any` node whose `not` accepts everything.
    pub fn falsy() -> Self {
        Self::any().not(Self::any())
    }

    /// The `Null` variant.
    pub fn null() -> Self {
        Self::new(Kind::Null)
    }

    /// The `Boolean` variant.
    pub fn boolean() -> Self {
        Self::new(Kind::Boolean)
    }

    /// The `Integer` variant.
    pub fn integer(keywords: NumberKeywords) -> Self {
        Self::new(Kind::Integer(keywords))
    }

    /// The `Float` variant.
    pub fn float(keywords: NumberKeywords) -> Self {
        Self::new(Kind::Float(keywords))
    }

    /// The `Number` variant.
    pub fn number(keywords: NumberKeywords) -> Self {
        Self::new(Kind::Number(keywords))
    }

    /// The `String` variant.
    pub fn string(keywords: StringKeywords) -> Self {
        Self::new(Kind::String(keywords))
    }

    /// The `List` variant.
    pub fn list(keywords: ListKeywords) -> Self {
        Self::new(Kind::List(keywords))
    }

    /// The `Map` variant.
    pub fn map(keywords: MapKeywords) -> Self {
        Self::new(Kind::Map(keywords))
    }

    /// Set the `enum` keyword.
    pub fn enumeration<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.keywords.enumeration = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the `not` keyword.
    pub fn not(mut self, node: impl Into<Node>) -> Self {
        self.keywords.not = Some(Box::new(node.into()));
        self
    }

    /// Set the `all_of` keyword.
    pub fn all_of<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.keywords.all_of = nodes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `any_of` keyword.
    pub fn any_of<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.keywords.any_of = nodes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `one_of` keyword.
    pub fn one_of<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.keywords.one_of = nodes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `as` label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.keywords.label = Some(label.into());
        self
    }

    /// Set the subtree identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.keywords.id = Some(id.into());
        self
    }

    /// Store extension data under `key`.
    pub fn data(mut self, key: impl Into<String>, extra: impl Into<Extra>) -> Self {
        self.keywords.data.insert(key.into(), extra.into());
        self
    }

    /// Store a named schema under the `definitions` extension map.
    pub fn definition(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        let entry = self
            .keywords
            .data
            .entry("definitions".to_string())
            .or_insert_with(|| Extra::Map(BTreeMap::new()));
        if let Extra::Map(map) = entry {
            map.insert(name.into(), Extra::Node(node.into()));
        }
        self
    }

    /// The label reported on type mismatch: `as` if set, else the type name.
    pub fn type_label(&self) -> &str {
        self.keywords
            .label
            .as_deref()
            .unwrap_or_else(|| self.kind.type_name())
    }
}

// ---------------------------------------------------------------------------
// Type-specific keywords
// ---------------------------------------------------------------------------

/// Exclusivity of a numeric bound.
///
/// The legacy form is a flag modifying `minimum`/`maximum`; the strict form
/// is a bound of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Exclusivity {
    /// Legacy boolean form.
    Flag(bool),
    /// Strict numeric bound.
    Bound(Number),
}

impl From<bool> for Exclusivity {
    fn from(flag: bool) -> Self {
        Exclusivity::Flag(flag)
    }
}

impl From<Number> for Exclusivity {
    fn from(bound: Number) -> Self {
        Exclusivity::Bound(bound)
    }
}

impl From<i64> for Exclusivity {
    fn from(bound: i64) -> Self {
        Exclusivity::Bound(Number::Int(bound))
    }
}

impl From<i32> for Exclusivity {
    fn from(bound: i32) -> Self {
        Exclusivity::Bound(Number::Int(i64::from(bound)))
    }
}

impl From<f64> for Exclusivity {
    fn from(bound: f64) -> Self {
        Exclusivity::Bound(Number::Float(bound))
    }
}

/// Keywords for `Integer`, `Float` and `Number`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberKeywords {
    /// Lower bound.
    pub minimum: Option<Number>,
    /// Upper bound.
    pub maximum: Option<Number>,
    /// Exclusivity of the lower bound.
    pub exclusive_minimum: Option<Exclusivity>,
    /// Exclusivity of the upper bound.
    pub exclusive_maximum: Option<Exclusivity>,
    /// Required divisor.
    pub multiple_of: Option<Number>,
}

impl NumberKeywords {
    /// No numeric constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `minimum`.
    pub fn minimum(mut self, value: impl Into<Number>) -> Self {
        self.minimum = Some(value.into());
        self
    }

    /// Set `maximum`.
    pub fn maximum(mut self, value: impl Into<Number>) -> Self {
        self.maximum = Some(value.into());
        self
    }

    /// Set `exclusive_minimum` (flag or bound).
    pub fn exclusive_minimum(mut self, value: impl Into<Exclusivity>) -> Self {
        self.exclusive_minimum = Some(value.into());
        self
    }

    /// Set `exclusive_maximum` (flag or bound).
    pub fn exclusive_maximum(mut self, value: impl Into<Exclusivity>) -> Self {
        self.exclusive_maximum = Some(value.into());
        self
    }

    /// Set `multiple_of`.
    pub fn multiple_of(mut self, value: impl Into<Number>) -> Self {
        self.multiple_of = Some(value.into());
        self
    }
}

/// A compiled regular expression with source-text equality.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile `source`.
    ///
    /// # Errors
    ///
    /// Returns the `regex` error if `source` does not compile.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Search semantics: a match anywhere in `text` satisfies the pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords for `String`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringKeywords {
    /// Minimum length in Unicode scalar values.
    pub min_length: Option<usize>,
    /// Maximum length in Unicode scalar values.
    pub max_length: Option<usize>,
    /// Pattern that must match somewhere in the string.
    pub pattern: Option<Pattern>,
}

impl StringKeywords {
    /// No string constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `min_length`.
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Set `max_length`.
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Set `pattern`.
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

/// The `items` keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    /// One schema applied to every element.
    Each(Box<Node>),
    /// Per-position schemas (tuple validation).
    Tuple(Vec<Node>),
}

/// `additional_items` / `additional_properties`.
#[derive(Debug, Clone, PartialEq)]
pub enum Additional {
    /// `true` accepts the remainder unchecked, `false` rejects any.
    Allowed(bool),
    /// Every remaining element must satisfy this schema.
    Schema(Box<Node>),
}

impl From<bool> for Additional {
    fn from(allowed: bool) -> Self {
        Additional::Allowed(allowed)
    }
}

impl From<Node> for Additional {
    fn from(node: Node) -> Self {
        Additional::Schema(Box::new(node))
    }
}

impl From<Schema> for Additional {
    fn from(schema: Schema) -> Self {
        Additional::Schema(Box::new(Node::Schema(schema)))
    }
}

impl From<Ref> for Additional {
    fn from(r: Ref) -> Self {
        Additional::Schema(Box::new(Node::Ref(r)))
    }
}

/// Keywords for `List`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListKeywords {
    /// Minimum element count.
    pub min_items: Option<usize>,
    /// Maximum element count.
    pub max_items: Option<usize>,
    /// Reject structurally equal elements.
    pub unique_items: bool,
    /// Element schemas.
    pub items: Option<Items>,
    /// Policy for elements beyond a tuple.
    pub additional_items: Option<Additional>,
}

impl ListKeywords {
    /// No list constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `min_items`.
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    /// Set `max_items`.
    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Set `unique_items`.
    pub fn unique_items(mut self, unique: bool) -> Self {
        self.unique_items = unique;
        self
    }

    /// Apply `node` to every element.
    pub fn items(mut self, node: impl Into<Node>) -> Self {
        self.items = Some(Items::Each(Box::new(node.into())));
        self
    }

    /// Apply per-position schemas.
    pub fn tuple<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.items = Some(Items::Tuple(nodes.into_iter().map(Into::into).collect()));
        self
    }

    /// Set `additional_items`.
    pub fn additional_items(mut self, additional: impl Into<Additional>) -> Self {
        self.additional_items = Some(additional.into());
        self
    }
}

/// A `dependencies` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Dependency {
    /// Keys that must be present alongside the trigger key.
    Keys(Vec<String>),
    /// Schema the whole map must satisfy when the trigger key is present.
    Schema(Box<Node>),
}

/// The `keys` constraint: every key of a map must use this encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyForm {
    /// Only [`jsv_core::Key::String`] keys.
    Strings,
    /// Only [`jsv_core::Key::Symbol`] keys.
    Symbols,
}

impl fmt::Display for KeyForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyForm::Strings => f.write_str("strings"),
            KeyForm::Symbols => f.write_str("symbols"),
        }
    }
}

/// Keywords for `Map`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapKeywords {
    /// Minimum key count.
    pub min_properties: Option<usize>,
    /// Maximum key count.
    pub max_properties: Option<usize>,
    /// Declared properties, by canonical (textual) name.
    pub properties: BTreeMap<String, Node>,
    /// Schemas for keys matching a pattern, in declaration order.
    pub pattern_properties: Vec<(Pattern, Node)>,
    /// Policy for keys matched by neither `properties` nor `pattern_properties`.
    pub additional_properties: Option<Additional>,
    /// Keys that must be present.
    pub required: BTreeSet<String>,
    /// Conditional requirements keyed by trigger key.
    pub dependencies: BTreeMap<String, Dependency>,
    /// Required key encoding.
    pub keys: Option<KeyForm>,
}

impl MapKeywords {
    /// No map constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `min_properties`.
    pub fn min_properties(mut self, n: usize) -> Self {
        self.min_properties = Some(n);
        self
    }

    /// Set `max_properties`.
    pub fn max_properties(mut self, n: usize) -> Self {
        self.max_properties = Some(n);
        self
    }

    /// Declare a property.
    pub fn property(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.properties.insert(name.into(), node.into());
        self
    }

    /// Declare a pattern property.
    pub fn pattern_property(mut self, pattern: Pattern, node: impl Into<Node>) -> Self {
        self.pattern_properties.push((pattern, node.into()));
        self
    }

    /// Set `additional_properties`.
    pub fn additional_properties(mut self, additional: impl Into<Additional>) -> Self {
        self.additional_properties = Some(additional.into());
        self
    }

    /// Add required keys.
    pub fn required<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Require `keys` whenever `trigger` is present.
    pub fn dependent_keys<I, S>(mut self, trigger: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.insert(
            trigger.into(),
            Dependency::Keys(keys.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Require the whole map to satisfy `node` whenever `trigger` is present.
    pub fn dependent_schema(mut self, trigger: impl Into<String>, node: impl Into<Node>) -> Self {
        self.dependencies
            .insert(trigger.into(), Dependency::Schema(Box::new(node.into())));
        self
    }

    /// Set the `keys` constraint.
    pub fn keys(mut self, form: KeyForm) -> Self {
        self.keys = Some(form);
        self
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

impl Schema {
    /// Visit every direct child node with its path segments relative to
    /// this schema, including nodes stored in extension data.
    ///
    /// Segments use the canonical keyword names (`all_of`, `items`,
    /// `pattern_properties`, …).
    pub fn for_each_child<'a>(&'a self, visit: &mut dyn FnMut(Vec<String>, &'a Node)) {
        let kw = &self.keywords;
        if let Some(not) = &kw.not {
            visit(vec!["not".into()], not);
        }
        for (name, branches) in [("all_of", &kw.all_of), ("any_of", &kw.any_of), ("one_of", &kw.one_of)] {
            for (i, node) in branches.iter().enumerate() {
                visit(vec![name.into(), i.to_string()], node);
            }
        }

        match &self.kind {
            Kind::List(list) => {
                match &list.items {
                    Some(Items::Each(node)) => visit(vec!["items".into()], node),
                    Some(Items::Tuple(nodes)) => {
                        for (i, node) in nodes.iter().enumerate() {
                            visit(vec!["items".into(), i.to_string()], node);
                        }
                    }
                    None => {}
                }
                if let Some(Additional::Schema(node)) = &list.additional_items {
                    visit(vec!["additional_items".into()], node);
                }
            }
            Kind::Map(map) => {
                for (name, node) in &map.properties {
                    visit(vec!["properties".into(), name.clone()], node);
                }
                for (pattern, node) in &map.pattern_properties {
                    visit(
                        vec!["pattern_properties".into(), pattern.as_str().to_string()],
                        node,
                    );
                }
                if let Some(Additional::Schema(node)) = &map.additional_properties {
                    visit(vec!["additional_properties".into()], node);
                }
                for (name, dependency) in &map.dependencies {
                    if let Dependency::Schema(node) = dependency {
                        visit(vec!["dependencies".into(), name.clone()], node);
                    }
                }
            }
            _ => {}
        }

        for (key, extra) in &kw.data {
            visit_extra(vec![key.clone()], extra, visit);
        }
    }
}

fn visit_extra<'a>(path: Vec<String>, extra: &'a Extra, visit: &mut dyn FnMut(Vec<String>, &'a Node)) {
    match extra {
        Extra::Node(node) => visit(path, node),
        Extra::Map(map) => {
            for (key, child) in map {
                let mut child_path = path.clone();
                child_path.push(key.clone());
                visit_extra(child_path, child, visit);
            }
        }
        Extra::List(items) => {
            for (i, child) in items.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(i.to_string());
                visit_extra(child_path, child, visit);
            }
        }
        Extra::Value(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_ref_keeps_hash_and_drops_uri() {
        let r = Ref::local("/definitions/a");
        assert_eq!(r.pointer(), "#/definitions/a");
        assert!(r.is_local());
        assert_eq!(r.to_string(), "#/definitions/a");
    }

    #[test]
    fn parse_remote_ref_splits_fragment() {
        let r = Ref::parse("http://example.com/item.json#/properties/id");
        assert_eq!(r.uri(), Some("http://example.com/item.json"));
        assert_eq!(r.pointer(), "/properties/id");
        assert_eq!(r.to_string(), "http://example.com/item.json#/properties/id");

        let whole = Ref::parse("http://example.com/item.json");
        assert_eq!(whole.pointer(), "");
        assert_eq!(whole.to_string(), "http://example.com/item.json");
    }

    #[test]
    fn parse_fragment_ref_is_local() {
        let r = Ref::parse("#/definitions/a");
        assert!(r.is_local());
        assert_eq!(r.uri(), None);
    }

    #[test]
    fn label_defaults_to_type_name() {
        assert_eq!(Schema::integer(NumberKeywords::new()).type_label(), "integer");
        assert_eq!(Schema::string(StringKeywords::new()).label("name").type_label(), "name");
    }

    #[test]
    fn falsy_is_any_with_not() {
        let falsy = Schema::falsy();
        assert_eq!(falsy.kind, Kind::Any);
        assert_eq!(falsy.keywords.not.as_deref(), Some(&Node::Schema(Schema::any())));
    }

    #[test]
    fn definitions_accumulate() {
        let schema = Schema::any()
            .definition("a", Schema::null())
            .definition("b", Schema::boolean());
        match schema.keywords.data.get("definitions") {
            Some(Extra::Map(map)) => assert_eq!(map.len(), 2),
            other => panic!("expected definitions map, got {other:?}"),
        }
    }

    #[test]
    fn children_carry_canonical_paths() {
        let schema = Schema::map(
            MapKeywords::new()
                .property("a", Schema::null())
                .pattern_property(Pattern::new("^x").unwrap(), Schema::boolean())
                .dependent_schema("a", Schema::any()),
        )
        .all_of([Schema::any()])
        .definition("d", Ref::local("#"));

        let mut paths = Vec::new();
        schema.for_each_child(&mut |path, _| paths.push(path.join("/")));
        paths.sort();
        assert_eq!(
            paths,
            vec![
                "all_of/0",
                "definitions/d",
                "dependencies/a",
                "pattern_properties/^x",
                "properties/a",
            ]
        );
    }

    #[test]
    fn pattern_equality_uses_source() {
        assert_eq!(Pattern::new("^a+$").unwrap(), Pattern::new("^a+$").unwrap());
        assert!(Pattern::new("(").is_err());
        assert!(Pattern::new("b").unwrap().is_match("abc"));
    }
}
