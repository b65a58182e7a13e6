//! # jsv CLI entry point
//!
//! Parses command-line arguments, installs logging, loads the optional
//! configuration file and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jsv_cli::check::{run_check, CheckArgs};
use jsv_cli::config::CliConfig;
use jsv_cli::validate::{run_validate, ValidateArgs};
use jsv_cli::EXIT_ERROR;

/// Validate JSON and YAML documents against JSON Schema draft-4/6/7.
#[derive(Parser, Debug)]
#[command(name = "jsv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate data documents against a schema.
    Validate(ValidateArgs),

    /// Verify that every reference in a schema resolves.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Check(args) => run_check(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsv_cli::OutputFormat;
    use jsv_schema::Draft;

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from(["jsv", "validate", "--schema", "s.json", "a.json", "b.yaml"]).unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.schema, PathBuf::from("s.json"));
        assert_eq!(args.data, vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.documents.is_empty());
    }

    #[test]
    fn cli_parse_validate_with_all_options() {
        let cli = Cli::try_parse_from([
            "jsv",
            "validate",
            "-s",
            "s.json",
            "--document",
            "http://example.com/a.json=a.json",
            "--document",
            "http://example.com/b.json=b.json",
            "--base-uri",
            "http://example.com/s.json",
            "--draft",
            "draft-04",
            "--max-depth",
            "64",
            "--format",
            "json",
            "d.json",
        ])
        .unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.documents.len(), 2);
        assert_eq!(args.documents[1].uri, "http://example.com/b.json");
        assert_eq!(args.base_uri.as_deref(), Some("http://example.com/s.json"));
        assert_eq!(args.draft, Some(Draft::Draft4));
        assert_eq!(args.max_depth, Some(64));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn cli_parse_validate_requires_data() {
        assert!(Cli::try_parse_from(["jsv", "validate", "--schema", "s.json"]).is_err());
        assert!(Cli::try_parse_from(["jsv", "validate", "d.json"]).is_err());
    }

    #[test]
    fn cli_parse_bad_document_arg() {
        let result = Cli::try_parse_from(["jsv", "validate", "-s", "s.json", "--document", "nope", "d.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_check() {
        let cli = Cli::try_parse_from(["jsv", "check", "s.json", "--format", "json"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.schema, PathBuf::from("s.json"));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["jsv", "check", "s.json"]).unwrap();
        assert_eq!(cli0.verbose, 0);
        let cli2 = Cli::try_parse_from(["jsv", "-vv", "check", "s.json"]).unwrap();
        assert_eq!(cli2.verbose, 2);
        let cli3 = Cli::try_parse_from(["jsv", "check", "s.json", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_config_option() {
        let cli = Cli::try_parse_from(["jsv", "--config", "jsv.yaml", "check", "s.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("jsv.yaml")));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["jsv"]).is_err());
        assert!(Cli::try_parse_from(["jsv", "nonexistent"]).is_err());
    }
}
