//! # jsv-schema: Schema Model, Reference Resolution & Validation
//!
//! Validates [`jsv_core::Value`] data against schemas following the JSON
//! Schema validation model, producing a structured failure tree rather
//! than a boolean.
//!
//! ## Components
//!
//! - [`node`]: the canonical schema tree: a closed set of typed variants
//!   plus [`Ref`] nodes standing in for schemas elsewhere.
//! - [`graph`]: [`SchemaGraph`], the root documents and the index of
//!   absolute identifiers built once at construction.
//! - `resolver`: dereferences pointer, anchor and cross-document
//!   references, switching document scope as it goes.
//! - [`validate`]: the recursive, keyword-driven engine.
//! - [`failure`]: the path-annotated [`Failure`] tree.
//! - [`loader`]: translation of draft-4/6/7 documents.
//!
//! ## Usage
//!
//! ```
//! use jsv_schema::{SchemaGraph, Failure};
//! use serde_json::json;
//!
//! let graph = SchemaGraph::from_json(&json!({
//!     "type": "object",
//!     "required": ["bar"]
//! })).unwrap();
//!
//! assert_eq!(graph.is_valid(&json!({"bar": 1}).into()), Ok(true));
//! let err = graph.validate(&json!({}).into()).unwrap_err();
//! assert_eq!(err.failure().map(Failure::reason), Some("missing_properties"));
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `jsv-core` internally.
//! - A broken schema is a [`SchemaError`], never an invalid-data result.
//! - Schema trees are immutable once built; validation takes `&self`
//!   everywhere and needs no synchronization.
//! - No network access. Remote documents are supplied by the caller.

pub mod error;
pub mod failure;
pub mod graph;
pub mod loader;
pub mod node;
pub mod options;
mod resolver;
pub mod validate;

pub use error::{LoadError, SchemaError, ValidationError};
pub use failure::Failure;
pub use graph::{BrokenReference, Document, SchemaGraph};
pub use loader::Loader;
pub use node::{
    Additional, Dependency, Exclusivity, Extra, Items, KeyForm, Keywords, Kind, ListKeywords,
    MapKeywords, Node, NumberKeywords, Pattern, Ref, Schema, StringKeywords,
};
pub use options::{Draft, LoaderOptions, ValidatorOptions, DEFAULT_MAX_DEPTH};
pub use validate::{is_valid, validate, Validator};
