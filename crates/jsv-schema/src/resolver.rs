//! # Reference Resolver
//!
//! Turns a [`Ref`] into the concrete [`Schema`] it names, together with
//! the [`Scope`] that later references inside that schema resolve in.
//!
//! ## Resolution Rules
//!
//! - **Local** (`#/a/b`, `#`): the pointer is walked from the root of the
//!   current scope's document.
//! - **Local anchor** (`#name`): looked up in the graph index as
//!   `<scope uri>#name`.
//! - **Remote** (`uri#fragment`): `uri` is looked up in the index; a
//!   pointer fragment is then walked from the node found there, and a
//!   plain-name fragment is looked up as an anchor. When the target lives
//!   in another document, the returned scope switches to that document.
//!
//! A target that is itself a reference is resolved again until a concrete
//! schema is reached. A chain that revisits a reference in the same scope
//! is a [`SchemaError::CircularReference`]. Nothing is memoized.
//!
//! ## Walking
//!
//! Pointer segments first match the schema's declared fields (`not`,
//! `all_of`, `items`, `properties`, …, in canonical or draft camelCase
//! spelling), then the extension `data` bucket. An `Any` node that
//! distributes type-specific keywords over `any_of` branches (or over an
//! `all_of[0]` holding only such branches) also exposes those branches'
//! fields. Integer segments index positional children.

use std::collections::BTreeMap;

use jsv_core::{parse_index, parse_pointer, to_pointer};

use crate::error::SchemaError;
use crate::graph::SchemaGraph;
use crate::node::{Additional, Dependency, Extra, Items, Kind, Node, Pattern, Ref, Schema};

/// The document that local references currently resolve against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'a> {
    /// Index of the document in the graph; `None` outside a graph.
    pub(crate) doc: Option<usize>,
    /// Root node local pointers are walked from.
    pub(crate) root: &'a Node,
    /// Base URI for local anchors.
    pub(crate) uri: Option<&'a str>,
}

impl<'a> Scope<'a> {
    /// A scope rooted at a single node with no graph behind it.
    pub(crate) fn detached(root: &'a Node) -> Self {
        Self {
            doc: None,
            root,
            uri: None,
        }
    }
}

/// Resolves references against an optional [`SchemaGraph`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolver<'a> {
    graph: Option<&'a SchemaGraph>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(graph: Option<&'a SchemaGraph>) -> Self {
        Self { graph }
    }

    /// Follow `reference` (and any chained references) to a concrete schema.
    pub(crate) fn resolve(
        &self,
        reference: &'a Ref,
        scope: Scope<'a>,
    ) -> Result<(&'a Schema, Scope<'a>), SchemaError> {
        let mut visited: Vec<(Option<usize>, &Ref)> = Vec::new();
        let mut current = reference;
        let mut scope = scope;
        loop {
            if visited.iter().any(|(doc, seen)| *doc == scope.doc && *seen == current) {
                return Err(SchemaError::CircularReference {
                    reference: current.to_string(),
                });
            }
            visited.push((scope.doc, current));

            let (node, next) = self.resolve_once(current, scope)?;
            scope = next;
            match node {
                Node::Schema(schema) => return Ok((schema, scope)),
                Node::Ref(chained) => current = chained,
            }
        }
    }

    fn resolve_once(
        &self,
        reference: &'a Ref,
        scope: Scope<'a>,
    ) -> Result<(&'a Node, Scope<'a>), SchemaError> {
        tracing::trace!(reference = %reference, document = scope.uri.unwrap_or("<root>"), "resolving reference");
        match reference.uri() {
            None => self.resolve_local(reference, scope),
            Some(uri) => self.resolve_remote(reference, uri, scope),
        }
    }

    fn resolve_local(
        &self,
        reference: &'a Ref,
        scope: Scope<'a>,
    ) -> Result<(&'a Node, Scope<'a>), SchemaError> {
        let pointer = reference.pointer();
        let fragment = pointer.strip_prefix('#').unwrap_or(pointer);
        if !is_pointer(fragment) {
            let key = format!("{}#{fragment}", scope.uri.unwrap_or(""));
            return self.indexed(reference, &key, scope);
        }

        let segments =
            parse_pointer(pointer).map_err(|e| SchemaError::not_found(reference, e.to_string()))?;
        let node = walk(scope.root, &segments).map_err(|reason| SchemaError::not_found(reference, reason))?;
        Ok((node, scope))
    }

    fn resolve_remote(
        &self,
        reference: &'a Ref,
        uri: &str,
        scope: Scope<'a>,
    ) -> Result<(&'a Node, Scope<'a>), SchemaError> {
        let fragment = reference.pointer();
        if !is_pointer(fragment) {
            return self.indexed(reference, &format!("{uri}#{fragment}"), scope);
        }

        let (base, scope) = self.indexed(reference, uri, scope)?;
        let segments = parse_pointer(&format!("#{fragment}"))
            .map_err(|e| SchemaError::not_found(reference, e.to_string()))?;
        let node = walk(base, &segments).map_err(|reason| SchemaError::not_found(reference, reason))?;
        Ok((node, scope))
    }

    /// Look `key` up in the graph index, switching scope to the target document.
    fn indexed(
        &self,
        reference: &'a Ref,
        key: &str,
        scope: Scope<'a>,
    ) -> Result<(&'a Node, Scope<'a>), SchemaError> {
        let Some(graph) = self.graph else {
            return Err(SchemaError::not_found(
                reference,
                format!("'{key}' needs a schema graph to resolve"),
            ));
        };
        let location = graph
            .lookup(key)
            .ok_or_else(|| SchemaError::not_found(reference, format!("'{key}' is not a known schema")))?;
        let root = graph
            .document_root(location.doc)
            .ok_or_else(|| SchemaError::not_found(reference, "indexed document is missing"))?;
        let node = walk(root, &location.path).map_err(|reason| SchemaError::not_found(reference, reason))?;

        let target = graph.scope(location.doc);
        if scope.doc != target.doc {
            tracing::debug!(
                reference = %reference,
                from = scope.uri.unwrap_or("<root>"),
                to = target.uri.unwrap_or("<root>"),
                "switching resolution scope to another document"
            );
        }
        Ok((node, target))
    }
}

fn is_pointer(fragment: &str) -> bool {
    fragment.is_empty() || fragment.starts_with('/')
}

/// A position reached while walking a pointer.
#[derive(Clone, Copy)]
enum Cursor<'a> {
    Node(&'a Node),
    Nodes(&'a [Node]),
    Properties(&'a BTreeMap<String, Node>),
    Patterns(&'a [(Pattern, Node)]),
    Dependencies(&'a BTreeMap<String, Dependency>),
    Extra(&'a Extra),
}

impl<'a> Cursor<'a> {
    fn from_extra(extra: &'a Extra) -> Self {
        match extra {
            Extra::Node(node) => Cursor::Node(node),
            other => Cursor::Extra(other),
        }
    }

    fn step(self, segment: &str) -> Option<Cursor<'a>> {
        match self {
            Cursor::Node(Node::Ref(_)) => None,
            Cursor::Node(Node::Schema(schema)) => schema_field(schema, segment)
                .or_else(|| schema.keywords.data.get(segment).map(Cursor::from_extra))
                .or_else(|| branch_field(schema, segment)),
            Cursor::Nodes(nodes) => parse_index(segment)
                .and_then(|i| nodes.get(i))
                .map(Cursor::Node),
            Cursor::Properties(properties) => properties.get(segment).map(Cursor::Node),
            Cursor::Patterns(patterns) => patterns
                .iter()
                .find(|(pattern, _)| pattern.as_str() == segment)
                .map(|(_, node)| Cursor::Node(node)),
            Cursor::Dependencies(dependencies) => match dependencies.get(segment)? {
                Dependency::Schema(node) => Some(Cursor::Node(node.as_ref())),
                Dependency::Keys(_) => None,
            },
            Cursor::Extra(Extra::Map(map)) => map.get(segment).map(Cursor::from_extra),
            Cursor::Extra(Extra::List(items)) => parse_index(segment)
                .and_then(|i| items.get(i))
                .map(Cursor::from_extra),
            Cursor::Extra(_) => None,
        }
    }
}

fn schema_field<'a>(schema: &'a Schema, segment: &str) -> Option<Cursor<'a>> {
    let kw = &schema.keywords;
    let branches = |nodes: &'a Vec<Node>| (!nodes.is_empty()).then_some(Cursor::Nodes(nodes));
    match (segment, &schema.kind) {
        ("not", _) => kw.not.as_deref().map(Cursor::Node),
        ("all_of" | "allOf", _) => branches(&kw.all_of),
        ("any_of" | "anyOf", _) => branches(&kw.any_of),
        ("one_of" | "oneOf", _) => branches(&kw.one_of),
        ("items", Kind::List(list)) => match &list.items {
            Some(Items::Each(node)) => Some(Cursor::Node(node.as_ref())),
            Some(Items::Tuple(nodes)) => Some(Cursor::Nodes(nodes)),
            None => None,
        },
        ("additional_items" | "additionalItems", Kind::List(list)) => {
            additional(list.additional_items.as_ref())
        }
        ("properties", Kind::Map(map)) => Some(Cursor::Properties(&map.properties)),
        ("pattern_properties" | "patternProperties", Kind::Map(map)) => {
            Some(Cursor::Patterns(&map.pattern_properties))
        }
        ("additional_properties" | "additionalProperties", Kind::Map(map)) => {
            additional(map.additional_properties.as_ref())
        }
        ("dependencies", Kind::Map(map)) => Some(Cursor::Dependencies(&map.dependencies)),
        _ => None,
    }
}

fn branch_field<'a>(schema: &'a Schema, segment: &str) -> Option<Cursor<'a>> {
    if !matches!(schema.kind, Kind::Any) {
        return None;
    }
    let typed = type_branches(schema).unwrap_or_default();
    typed
        .iter()
        .chain(&schema.keywords.any_of)
        .filter_map(Node::as_schema)
        .find_map(|branch| schema_field(branch, segment))
}

/// Per-type branches parked in `all_of[0]` when a schema carries both its
/// own `any_of` and type-specific keywords.
fn type_branches(schema: &Schema) -> Option<&[Node]> {
    let first = schema.keywords.all_of.first()?.as_schema()?;
    let kw = &first.keywords;
    let bare = matches!(first.kind, Kind::Any)
        && kw.enumeration.is_none()
        && kw.not.is_none()
        && kw.all_of.is_empty()
        && kw.one_of.is_empty()
        && kw.label.is_none()
        && kw.id.is_none()
        && kw.data.is_empty()
        && !kw.any_of.is_empty();
    let typed = kw.any_of.iter().all(|branch| {
        branch
            .as_schema()
            .is_some_and(|b| !matches!(b.kind, Kind::Any))
    });
    (bare && typed).then_some(kw.any_of.as_slice())
}

fn additional(additional: Option<&Additional>) -> Option<Cursor<'_>> {
    match additional? {
        Additional::Schema(node) => Some(Cursor::Node(node.as_ref())),
        Additional::Allowed(_) => None,
    }
}

/// Walk `segments` from `start`, returning a description of the first miss.
pub(crate) fn walk<'a>(start: &'a Node, segments: &[String]) -> Result<&'a Node, String> {
    let mut cursor = Cursor::Node(start);
    for (i, segment) in segments.iter().enumerate() {
        cursor = cursor
            .step(segment)
            .ok_or_else(|| format!("nothing at '{}'", to_pointer(&segments[..=i])))?;
    }
    match cursor {
        Cursor::Node(node) => Ok(node),
        _ => Err(format!("'{}' does not address a schema", to_pointer(segments))),
    }
}
