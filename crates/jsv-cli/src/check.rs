//! # `jsv check`
//!
//! Loads a schema (plus any pre-loaded documents) and resolves every
//! reference in it without validating data. Exit code 0 when every
//! reference resolves, 1 when any is broken.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use jsv_schema::{BrokenReference, Draft};

use crate::config::{parse_draft, CliConfig};
use crate::input::{load_graph, DocumentArg};
use crate::OutputFormat;

/// Arguments of `jsv check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (JSON, or YAML by extension).
    pub schema: PathBuf,

    /// Additional schema document reachable at a URI. Repeatable.
    #[arg(long = "document", value_name = "URI=FILE")]
    pub documents: Vec<DocumentArg>,

    /// Base URI of the root schema.
    #[arg(long)]
    pub base_uri: Option<String>,

    /// Draft assumed for documents without `$schema`.
    #[arg(long, value_parser = parse_draft)]
    pub draft: Option<Draft>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute `jsv check`.
pub fn run_check(args: &CheckArgs, config: &CliConfig) -> Result<u8> {
    let config = config.clone().with_overrides(None, args.draft);
    let graph = load_graph(
        &args.schema,
        args.base_uri.as_deref(),
        &args.documents,
        config.loader,
    )?;
    let broken = graph.verify_references();
    print!("{}", render(&broken, graph.documents().len(), args.format)?);
    Ok(u8::from(!broken.is_empty()))
}

fn render(broken: &[BrokenReference], documents: usize, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for reference in broken {
                out.push_str(&format!("broken reference at {reference}\n"));
            }
            out.push_str(&format!(
                "{documents} document(s), {} broken reference(s)\n",
                broken.len()
            ));
            Ok(out)
        }
        OutputFormat::Json => {
            let broken: Vec<_> = broken
                .iter()
                .map(|b| {
                    serde_json::json!({
                        "location": b.location,
                        "reference": b.reference,
                        "error": b.error.to_string(),
                    })
                })
                .collect();
            let report = serde_json::json!({"documents": documents, "broken": broken});
            Ok(format!("{}\n", serde_json::to_string(&report)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn args(schema: PathBuf) -> CheckArgs {
        CheckArgs {
            schema,
            documents: Vec::new(),
            base_uri: None,
            draft: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn clean_schema_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(
            dir.path(),
            "s.yaml",
            "definitions:\n  n:\n    type: integer\nproperties:\n  a:\n    $ref: '#/definitions/n'\n",
        );
        assert_eq!(run_check(&args(schema), &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn broken_reference_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(
            dir.path(),
            "s.json",
            r#"{"$id": "http://example.com/s.json", "properties": {"a": {"$ref": "other.json"}}}"#,
        );
        assert_eq!(run_check(&args(schema.clone()), &CliConfig::default()).unwrap(), 1);

        let other = write(dir.path(), "other.json", "{}");
        let mut with_other = args(schema);
        with_other.documents.push(DocumentArg {
            uri: "http://example.com/other.json".into(),
            path: other,
        });
        assert_eq!(run_check(&with_other, &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn unloadable_schema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(dir.path(), "s.json", r#"{"type": "string", "pattern": "("}"#);
        let err = run_check(&args(schema), &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid pattern"));
    }

    #[test]
    fn json_report_lists_broken_references() {
        let broken = vec![BrokenReference {
            location: "#/properties/a".into(),
            reference: "#/definitions/x".into(),
            error: jsv_schema::SchemaError::CircularReference {
                reference: "#/definitions/x".into(),
            },
        }];
        let out = render(&broken, 1, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(parsed["documents"], 1);
        assert_eq!(parsed["broken"][0]["reference"], "#/definitions/x");
        assert_eq!(
            parsed["broken"][0]["error"],
            "circular reference chain through '#/definitions/x'"
        );
    }

    #[test]
    fn text_report_ends_with_summary() {
        let out = render(&[], 2, OutputFormat::Text).unwrap();
        assert_eq!(out, "2 document(s), 0 broken reference(s)\n");
    }
}
