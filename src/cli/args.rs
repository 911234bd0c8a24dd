//! CLI argument parsing using clap

use crate::config::CONFIG_FILE_NAME;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for brules commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// brules CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "brules")]
#[command(about = "Validate and render templated business rules")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (optional; defaults apply when it does not exist)
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Output coloring (overrides the configuration file)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,
}

/// Available brules subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate template group documents
    Validate {
        /// Template group documents to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (overrides the configuration file)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Load and validate the template group catalog directory
    Catalog {
        /// Catalog directory (defaults to the configured one)
        dir: Option<PathBuf>,
    },

    /// Render the templates of a rule template
    Render {
        /// Template group document
        group: PathBuf,

        /// UUID of the rule template to render
        #[arg(long, required_unless_present = "business_rule")]
        rule_template: Option<String>,

        /// Value for a placeholder, as name=value (repeatable)
        #[arg(long = "set", value_parser = parse_key_value, conflicts_with = "business_rule")]
        values: Vec<(String, String)>,

        /// Business rule document to render instead of --rule-template/--set
        #[arg(long, conflicts_with = "rule_template")]
        business_rule: Option<PathBuf>,

        /// Output format (overrides the configuration file)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Turn a human-readable name into an identifier
    Slug {
        /// Name to convert; several words are joined with spaces
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Identifier of a business rule from its entered values
    Fingerprint {
        /// Entered values as name=value
        #[arg(value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },

    /// Identifiers of every template in a template group document
    ArtifactId {
        /// Template group document
        group: PathBuf,
    },
}

/// Parse a `name=value` pair; the value may itself contain `=`
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    if name.is_empty() {
        return Err(format!("empty name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}
