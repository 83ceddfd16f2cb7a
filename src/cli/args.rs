//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::lint::OutputFormat;

/// jedcheck - Static checks for Joomla extension packages.
#[derive(Debug, Parser)]
#[command(name = "jedcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides <PATH>/.jedcheck.yml)
    #[arg(short, long, global = true, env = "JEDCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check an extension source tree
    Check(CheckArgs),

    /// List available rules
    Rules(RulesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Extension directory to check
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format: human, json, sarif
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Run only these rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<String>,

    /// Skip these rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub disable: Vec<String>,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            format: OutputFormat::Human,
            strict: false,
            rules: Vec::new(),
            disable: Vec::new(),
        }
    }
}

/// Arguments for the `rules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RulesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_defaults() {
        let cli = Cli::parse_from(["jedcheck", "check"]);
        let Commands::Check(args) = cli.command else {
            panic!("Expected check command");
        };
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.format, OutputFormat::Human);
        assert!(!args.strict);
        assert!(args.rules.is_empty());
    }

    #[test]
    fn check_parses_lists_and_format() {
        let cli = Cli::parse_from([
            "jedcheck",
            "--quiet",
            "check",
            "ext",
            "--format",
            "sarif",
            "--rules",
            "LANG,ENCODING",
            "--disable",
            "INFO_XML",
            "--strict",
        ]);
        assert!(cli.quiet);
        let Commands::Check(args) = cli.command else {
            panic!("Expected check command");
        };
        assert_eq!(args.path, PathBuf::from("ext"));
        assert_eq!(args.format, OutputFormat::Sarif);
        assert_eq!(args.rules, vec!["LANG", "ENCODING"]);
        assert_eq!(args.disable, vec!["INFO_XML"]);
        assert!(args.strict);
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Cli::try_parse_from(["jedcheck", "check", "--format", "xml"]);
        assert!(result.is_err());
    }
}
