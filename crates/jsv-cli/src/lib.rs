//! # jsv-cli: Command-Line Validator
//!
//! Provides the `jsv` binary over `jsv-schema`.
//!
//! ## Subcommands
//!
//! - `jsv validate`: validate JSON/YAML documents against a schema.
//! - `jsv check`: load a schema and verify that every reference resolves.
//!
//! ```bash
//! jsv validate --schema schemas/person.json people/*.yaml
//! jsv check schemas/order.json --document http://example.com/item.json=schemas/item.json
//! jsv -vv --config jsv.yaml validate --schema s.json d.json
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | every document conforms / every reference resolves |
//! | 1 | some document does not conform / some reference is broken |
//! | 2 | operational failure: unreadable input, unloadable or broken schema |
//!
//! ## Crate Policy
//!
//! - Argument parsing and reporting only; validation lives in `jsv-schema`.
//! - Reports go to stdout, logs to stderr.

pub mod check;
pub mod config;
pub mod input;
pub mod validate;

/// Report format shared by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per result.
    Text,
    /// One JSON object per result.
    Json,
}

/// Exit code for operational failures.
pub const EXIT_ERROR: u8 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_modules_are_accessible() {
        let _ = std::any::type_name::<check::CheckArgs>();
        let _ = std::any::type_name::<config::CliConfig>();
        let _ = std::any::type_name::<input::DocumentArg>();
        let _ = std::any::type_name::<validate::ValidateArgs>();
    }

    #[test]
    fn output_format_names() {
        use clap::ValueEnum;
        assert_eq!(OutputFormat::from_str("json", false), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("text", false), Ok(OutputFormat::Text));
        assert!(OutputFormat::from_str("xml", false).is_err());
    }
}
