//! # Options
//!
//! Tunables for the validator and the draft loader. Both deserialize from
//! configuration files with every field optional.

use serde::{Deserialize, Serialize};

/// Default bound on nested schema evaluations per validation call.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Validator tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorOptions {
    /// Maximum nesting of schema evaluations before
    /// [`SchemaError::DepthExceeded`](crate::SchemaError::DepthExceeded).
    pub max_depth: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// JSON Schema drafts understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Draft {
    /// Draft 4 (`id`, boolean exclusivity).
    #[serde(rename = "draft4", alias = "draft-04")]
    Draft4,
    /// Draft 6 (`$id`, numeric exclusivity, boolean schemas).
    #[serde(rename = "draft6", alias = "draft-06")]
    Draft6,
    /// Draft 7.
    #[serde(rename = "draft7", alias = "draft-07")]
    Draft7,
}

impl Draft {
    /// Identify a draft from a `$schema` URI.
    pub fn from_meta_schema(uri: &str) -> Option<Self> {
        if uri.contains("draft-04") {
            Some(Draft::Draft4)
        } else if uri.contains("draft-06") {
            Some(Draft::Draft6)
        } else if uri.contains("draft-07") {
            Some(Draft::Draft7)
        } else {
            None
        }
    }

    /// The keyword carrying a subtree identifier.
    pub fn id_keyword(self) -> &'static str {
        match self {
            Draft::Draft4 => "id",
            Draft::Draft6 | Draft::Draft7 => "$id",
        }
    }
}

/// Loader tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderOptions {
    /// Draft assumed when a document has no `$schema`.
    pub default_draft: Draft,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            default_draft: Draft::Draft7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let options: ValidatorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        let loader: LoaderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(loader.default_draft, Draft::Draft7);
    }

    #[test]
    fn draft_names_accept_both_spellings() {
        let loader: LoaderOptions =
            serde_json::from_str(r#"{"default_draft": "draft-04"}"#).unwrap();
        assert_eq!(loader.default_draft, Draft::Draft4);
        let loader: LoaderOptions = serde_json::from_str(r#"{"default_draft": "draft6"}"#).unwrap();
        assert_eq!(loader.default_draft, Draft::Draft6);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<ValidatorOptions>(r#"{"depth": 3}"#).is_err());
    }

    #[test]
    fn meta_schema_detection() {
        assert_eq!(
            Draft::from_meta_schema("http://json-schema.org/draft-04/schema#"),
            Some(Draft::Draft4)
        );
        assert_eq!(
            Draft::from_meta_schema("http://json-schema.org/draft-07/schema#"),
            Some(Draft::Draft7)
        );
        assert_eq!(Draft::from_meta_schema("https://example.com/meta"), None);
    }
}
