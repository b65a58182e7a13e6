//! # Root Schema Graph
//!
//! The container a validation runs against: one or more documents (the
//! root document first, then any pre-loaded remote documents) plus an
//! index from absolute reference strings to the nodes they name.
//!
//! ## Index
//!
//! Built once at construction and never mutated during validation. It maps:
//!
//! - each document URI to that document's root;
//! - each identifier of an identified subtree, resolved against the
//!   enclosing base URI, to that subtree;
//! - each plain-name anchor (`base#name`) to its node.
//!
//! Locations are stored as canonical path segments from a document root,
//! never as raw references into the tree, so the graph owns its nodes
//! outright and can be shared across threads.
//!
//! ## Network
//!
//! The graph never fetches anything. Remote documents must be added with
//! [`SchemaGraph::with_document`] before validation.

use std::collections::HashMap;
use std::fmt;

use jsv_core::{join_uri, normalize_uri, split_fragment, to_pointer, Value};

use crate::error::{LoadError, SchemaError, ValidationError};
use crate::loader::Loader;
use crate::node::{Node, Ref};
use crate::options::LoaderOptions;
use crate::resolver::{Resolver, Scope};
use crate::validate::Validator;

/// One schema document held by a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    uri: Option<String>,
    root: Node,
}

impl Document {
    /// The document's base URI, if it has one.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// The document's root node.
    pub fn root(&self) -> &Node {
        &self.root
    }
}

/// Where an indexed node lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Location {
    pub(crate) doc: usize,
    pub(crate) path: Vec<String>,
}

/// A reference that failed to resolve, as reported by
/// [`SchemaGraph::verify_references`].
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenReference {
    /// `document#pointer` of the node holding the reference.
    pub location: String,
    /// The reference as written.
    pub reference: String,
    /// Why it failed.
    pub error: SchemaError,
}

impl fmt::Display for BrokenReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.error)
    }
}

/// Root schema graph: documents plus the absolute-reference index.
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    documents: Vec<Document>,
    index: HashMap<String, Location>,
}

impl SchemaGraph {
    /// A graph whose root document has no base URI.
    ///
    /// If the root schema carries an absolute identifier, that becomes the
    /// document's base.
    pub fn new(root: impl Into<Node>) -> Self {
        Self::empty().push_document(None, root.into())
    }

    /// A graph whose root document lives at `uri`.
    pub fn with_uri(uri: &str, root: impl Into<Node>) -> Self {
        Self::empty().push_document(Some(uri), root.into())
    }

    /// Add a pre-loaded document reachable at `uri`.
    pub fn with_document(self, uri: &str, root: impl Into<Node>) -> Self {
        self.push_document(Some(uri), root.into())
    }

    /// Translate a draft document and use it as the root.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the document cannot be translated.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, LoadError> {
        Self::from_json_with(json, None, LoaderOptions::default())
    }

    /// Translate a draft document with an explicit base URI and options.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the document cannot be translated.
    pub fn from_json_with(
        json: &serde_json::Value,
        uri: Option<&str>,
        options: LoaderOptions,
    ) -> Result<Self, LoadError> {
        let root = Loader::new(options).with_base(uri).load(json)?;
        Ok(Self::empty().push_document(uri, root))
    }

    /// Translate a draft document and add it at `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the document cannot be translated.
    pub fn with_json_document(
        self,
        uri: &str,
        json: &serde_json::Value,
        options: LoaderOptions,
    ) -> Result<Self, LoadError> {
        let root = Loader::new(options).with_base(Some(uri)).load(json)?;
        Ok(self.push_document(Some(uri), root))
    }

    /// The root document's root node.
    pub fn root(&self) -> &Node {
        // Every constructor pushes the root document first.
        &self.documents[0].root
    }

    /// All documents, root first.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The root node of the document at `uri`.
    pub fn document(&self, uri: &str) -> Option<&Node> {
        let key = normalize_uri(uri);
        self.documents
            .iter()
            .find(|doc| doc.uri.as_deref() == Some(key.as_str()))
            .map(|doc| &doc.root)
    }

    /// Validate `value` against the root document.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Invalid`] when the value does not conform,
    /// [`ValidationError::Schema`] when the schema is broken.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        Validator::new(self).validate(value)
    }

    /// Whether `value` conforms to the root document.
    ///
    /// # Errors
    ///
    /// Schema integrity errors are propagated, never reported as `false`.
    pub fn is_valid(&self, value: &Value) -> Result<bool, SchemaError> {
        Validator::new(self).is_valid(value)
    }

    /// Resolve every reference in every document and report those that fail.
    pub fn verify_references(&self) -> Vec<BrokenReference> {
        let resolver = Resolver::new(Some(self));
        let mut broken = Vec::new();
        for doc in 0..self.documents.len() {
            let scope = self.scope(doc);
            let document = &self.documents[doc];
            collect_references(&document.root, &mut Vec::new(), &mut |path, reference| {
                if let Err(error) = resolver.resolve(reference, scope) {
                    broken.push(BrokenReference {
                        location: format!(
                            "{}#{}",
                            document.uri.as_deref().unwrap_or(""),
                            to_pointer(path)
                        ),
                        reference: reference.to_string(),
                        error,
                    });
                }
            });
        }
        broken
    }

    fn empty() -> Self {
        Self {
            documents: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn scope(&self, doc: usize) -> Scope<'_> {
        match self.documents.get(doc) {
            Some(document) => Scope {
                doc: Some(doc),
                root: &document.root,
                uri: document.uri.as_deref(),
            },
            None => Scope::detached(self.root()),
        }
    }

    pub(crate) fn lookup(&self, key: &str) -> Option<&Location> {
        self.index.get(&normalize_uri(key))
    }

    pub(crate) fn document_root(&self, doc: usize) -> Option<&Node> {
        self.documents.get(doc).map(|d| &d.root)
    }

    fn push_document(mut self, uri: Option<&str>, root: Node) -> Self {
        let doc = self.documents.len();
        let uri = uri.map(normalize_uri).or_else(|| {
            root.as_schema()
                .and_then(|s| s.keywords.id.as_deref())
                .map(|id| normalize_uri(split_fragment(id).0))
                .filter(|id| !id.is_empty())
        });

        if let Some(uri) = &uri {
            self.insert(uri.clone(), Location { doc, path: Vec::new() });
        }
        let mut entries = Vec::new();
        index_node(&root, uri.as_deref(), &mut Vec::new(), &mut entries);
        for (key, path) in entries {
            self.insert(key, Location { doc, path });
        }

        tracing::debug!(
            document = uri.as_deref().unwrap_or("<root>"),
            indexed = self.index.len(),
            "indexed schema document"
        );
        self.documents.push(Document { uri, root });
        self
    }

    fn insert(&mut self, key: String, location: Location) {
        if let Some(existing) = self.index.get(&key) {
            if *existing != location {
                tracing::warn!(identifier = %key, "duplicate schema identifier, keeping the first");
            }
            return;
        }
        self.index.insert(key, location);
    }
}

/// Collect `(key, path)` index entries for identified subtrees below `node`.
fn index_node(node: &Node, base: Option<&str>, path: &mut Vec<String>, out: &mut Vec<(String, Vec<String>)>) {
    let Node::Schema(schema) = node else {
        return;
    };

    let mut base = base.map(str::to_string);
    if let Some(id) = schema.keywords.id.as_deref() {
        let resolved = join_uri(base.as_deref(), id);
        match split_fragment(&resolved) {
            (_, Some(fragment)) if !fragment.is_empty() => {
                out.push((normalize_uri(&resolved), path.clone()));
            }
            (resource, _) if !resource.is_empty() => {
                let resource = normalize_uri(resource);
                out.push((resource.clone(), path.clone()));
                base = Some(resource);
            }
            _ => {}
        }
    }

    schema.for_each_child(&mut |segments, child| {
        let depth = path.len();
        path.extend(segments);
        index_node(child, base.as_deref(), path, out);
        path.truncate(depth);
    });
}

fn collect_references<'a>(
    node: &'a Node,
    path: &mut Vec<String>,
    visit: &mut dyn FnMut(&[String], &'a Ref),
) {
    match node {
        Node::Ref(reference) => visit(path, reference),
        Node::Schema(schema) => schema.for_each_child(&mut |segments, child| {
            let depth = path.len();
            path.extend(segments);
            collect_references(child, path, visit);
            path.truncate(depth);
        }),
    }
}
