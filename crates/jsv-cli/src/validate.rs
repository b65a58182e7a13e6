//! # `jsv validate`
//!
//! Validates one or more data documents against a schema.
//!
//! ```bash
//! jsv validate --schema person.json alice.json bob.yaml
//! jsv validate --schema order.json --document http://example.com/item.json=item.json order.json
//! jsv validate --schema person.json --format json alice.json
//! ```
//!
//! Every document is checked and reported; the exit code is 0 when all of
//! them conform and 1 when any does not. A broken schema stops the run
//! with exit code 2.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use jsv_schema::{Draft, Failure, ValidationError, Validator};

use crate::config::{parse_draft, CliConfig};
use crate::input::{load_graph, read_data, DocumentArg};
use crate::OutputFormat;

/// Arguments of `jsv validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (JSON, or YAML by extension).
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Additional schema document reachable at a URI. Repeatable.
    #[arg(long = "document", value_name = "URI=FILE")]
    pub documents: Vec<DocumentArg>,

    /// Base URI of the root schema, for resolving its relative references.
    #[arg(long)]
    pub base_uri: Option<String>,

    /// Draft assumed for documents without `$schema`.
    #[arg(long, value_parser = parse_draft)]
    pub draft: Option<Draft>,

    /// Maximum nesting of schema evaluations.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Data documents to validate.
    #[arg(required = true, value_name = "DOC")]
    pub data: Vec<PathBuf>,
}

/// Execute `jsv validate`.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let config = config.clone().with_overrides(args.max_depth, args.draft);
    let graph = load_graph(
        &args.schema,
        args.base_uri.as_deref(),
        &args.documents,
        config.loader,
    )?;
    let validator = Validator::new(&graph).with_options(config.validator);

    let mut invalid = 0usize;
    for path in &args.data {
        let value = read_data(path)?;
        let failure = match validator.validate(&value) {
            Ok(()) => None,
            Err(ValidationError::Invalid(failure)) => Some(failure),
            Err(ValidationError::Schema(error)) => {
                return Err(error).with_context(|| {
                    format!("schema error while validating {}", path.display())
                });
            }
        };
        if failure.is_some() {
            invalid += 1;
        }
        println!("{}", render(path, failure.as_ref(), args.format)?);
    }

    tracing::info!(documents = args.data.len(), invalid, "validation finished");
    Ok(u8::from(invalid > 0))
}

/// One report line for one document.
fn render(path: &Path, failure: Option<&Failure>, format: OutputFormat) -> Result<String> {
    let line = match (format, failure) {
        (OutputFormat::Text, None) => format!("{}: valid", path.display()),
        (OutputFormat::Text, Some(failure)) => format!(
            "{}: invalid at '{}': {}",
            path.display(),
            failure.instance_path(),
            failure.leaf()
        ),
        (OutputFormat::Json, None) => serde_json::to_string(&serde_json::json!({
            "document": path.display().to_string(),
            "valid": true,
        }))?,
        (OutputFormat::Json, Some(failure)) => serde_json::to_string(&serde_json::json!({
            "document": path.display().to_string(),
            "valid": false,
            "instance_path": failure.instance_path(),
            "failure": failure,
        }))?,
    };
    Ok(line)
}
