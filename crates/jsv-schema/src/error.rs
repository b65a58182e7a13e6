//! # Error Types: Schema Integrity and Loading
//!
//! Two disjoint error classes leave the validator:
//!
//! - [`Failure`]: the *data* does not conform. A structured tree,
//!   defined in [`crate::failure`].
//! - [`SchemaError`]: the *schema* is broken: a reference cannot be
//!   resolved, a reference chain loops, or evaluation recursed past the
//!   configured depth without consuming data.
//!
//! [`ValidationError`] is the union returned by validation. A schema error
//! is never downgraded to "invalid": [`crate::is_valid`] propagates it.
//!
//! [`LoadError`] covers translation of draft documents into the node model.

use jsv_core::CoreError;
use thiserror::Error;

use crate::failure::Failure;

/// The schema itself is broken.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A reference does not lead to a schema node.
    #[error("reference '{reference}' not found: {reason}")]
    ReferenceNotFound {
        /// The reference as written.
        reference: String,
        /// Which step of the resolution failed.
        reason: String,
    },

    /// A chain of references leads back to itself without reaching a schema.
    #[error("circular reference chain through '{reference}'")]
    CircularReference {
        /// The first reference seen twice.
        reference: String,
    },

    /// Evaluation nested deeper than the configured limit.
    #[error("schema evaluation exceeded depth limit of {limit}")]
    DepthExceeded {
        /// The configured `max_depth`.
        limit: usize,
    },
}

impl SchemaError {
    pub(crate) fn not_found(reference: impl ToString, reason: impl Into<String>) -> Self {
        SchemaError::ReferenceNotFound {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result of validating one value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The value does not conform to the schema.
    #[error("{0}")]
    Invalid(Failure),

    /// The schema is broken.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl ValidationError {
    /// The failure tree, if this is a data failure.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ValidationError::Invalid(failure) => Some(failure),
            ValidationError::Schema(_) => None,
        }
    }

    /// Returns true for schema integrity errors.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ValidationError::Schema(_))
    }
}

impl From<Failure> for ValidationError {
    fn from(failure: Failure) -> Self {
        ValidationError::Invalid(failure)
    }
}

/// Errors raised while translating a draft document into schema nodes.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A keyword holds a value of the wrong shape.
    #[error("invalid '{keyword}' at '{pointer}': {reason}")]
    InvalidKeyword {
        /// The draft keyword as written.
        keyword: String,
        /// JSON Pointer to the enclosing schema in the document.
        pointer: String,
        /// What was expected.
        reason: String,
    },

    /// A `pattern` or `patternProperties` key is not a valid regex.
    #[error("invalid pattern '{pattern}' at '{pointer}'")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// JSON Pointer to the enclosing schema in the document.
        pointer: String,
        /// Compiler diagnostic.
        #[source]
        source: regex::Error,
    },

    /// `$schema` names a draft this loader does not translate.
    #[error("unsupported draft '{0}'")]
    UnsupportedDraft(String),

    /// A document could not be parsed.
    #[error("document parse error: {0}")]
    Parse(String),

    /// A URI or pointer helper failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
