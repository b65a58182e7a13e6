//! # Error Types: Core Error Hierarchy
//!
//! Errors raised by the foundational helpers: pointer parsing, URI
//! resolution, and conversion of foreign document formats into [`Value`].
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! Validation failures are *not* represented here. A value that does not
//! conform to a schema is described by the failure tree in `jsv-schema`;
//! this module only covers inputs that could not be interpreted at all.
//!
//! [`Value`]: crate::Value

use thiserror::Error;

/// Top-level error type for `jsv-core`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A JSON Pointer string is malformed.
    #[error("invalid JSON pointer '{pointer}': {reason}")]
    InvalidPointer {
        /// The offending pointer text.
        pointer: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A URI could not be parsed or joined.
    #[error("invalid URI '{uri}': {reason}")]
    InvalidUri {
        /// The offending URI text.
        uri: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A YAML document uses constructs that have no value-model equivalent.
    #[error("YAML conversion failed: {0}")]
    Yaml(String),
}
