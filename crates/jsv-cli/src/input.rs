//! # Input Files
//!
//! Reads schemas and data documents from disk. The format follows the
//! file extension: `.yaml`/`.yml` parse as YAML, everything else as JSON.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use jsv_core::Value;
use jsv_schema::{LoaderOptions, SchemaGraph};

/// Serialization format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Choose the format from the file extension.
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

/// A pre-loaded remote schema given as `--document <uri>=<file>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArg {
    /// URI references use to reach the document.
    pub uri: String,
    /// File holding it.
    pub path: PathBuf,
}

impl FromStr for DocumentArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split on the last '=' so query strings in the URI survive.
        match s.rsplit_once('=') {
            Some((uri, path)) if !uri.is_empty() && !path.is_empty() => Ok(Self {
                uri: uri.to_string(),
                path: PathBuf::from(path),
            }),
            _ => Err(format!("expected <uri>=<file>, got '{s}'")),
        }
    }
}

impl fmt::Display for DocumentArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.uri, self.path.display())
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Read a schema document as JSON text, whatever its on-disk format.
pub fn read_schema(path: &Path) -> Result<serde_json::Value> {
    let text = read(path)?;
    match Format::of(path) {
        Format::Json => serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON schema: {}", path.display())),
        Format::Yaml => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML schema: {}", path.display())),
    }
}

/// Read a data document into the value model.
pub fn read_data(path: &Path) -> Result<Value> {
    let text = read(path)?;
    match Format::of(path) {
        Format::Json => {
            let json: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON document: {}", path.display()))?;
            Ok(jsv_core::from_json(&json))
        }
        Format::Yaml => jsv_core::parse_yaml(&text)
            .with_context(|| format!("invalid YAML document: {}", path.display())),
    }
}

/// Load the root schema and every pre-loaded document into one graph.
pub fn load_graph(
    schema: &Path,
    base_uri: Option<&str>,
    documents: &[DocumentArg],
    options: LoaderOptions,
) -> Result<SchemaGraph> {
    if let Some(base) = base_uri {
        jsv_core::parse_absolute(base).context("--base-uri must be an absolute URI")?;
    }
    let root = read_schema(schema)?;
    let mut graph = SchemaGraph::from_json_with(&root, base_uri, options)
        .with_context(|| format!("failed to load schema {}", schema.display()))?;
    for document in documents {
        let json = read_schema(&document.path)?;
        graph = graph
            .with_json_document(&document.uri, &json, options)
            .with_context(|| format!("failed to load schema document {document}"))?;
    }
    tracing::info!(
        schema = %schema.display(),
        documents = graph.documents().len(),
        "schema graph ready"
    );
    Ok(graph)
}
