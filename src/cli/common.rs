//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration,
//! choosing output settings, and building the script evaluator.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::config::{ColorOption, Config, OutputFormat as ConfigOutputFormat};
use crate::error::ConfigError;
use crate::script::RhaiEvaluator;
use std::io::IsTerminal;
use std::path::Path;
use termcolor::StandardStream;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INVALID: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Load the configuration file, or defaults when it does not exist
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or is invalid.
pub(crate) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    Config::load_or_default(path)
}

/// Script evaluator bounded by the configured limits
pub(crate) fn evaluator(config: &Config) -> RhaiEvaluator {
    RhaiEvaluator::new(config.script.limits())
}

/// Output format from the command line, falling back to the configuration
pub(crate) fn output_format(requested: Option<OutputFormat>, config: &Config) -> OutputFormat {
    requested.unwrap_or(match config.output.format {
        ConfigOutputFormat::Human => OutputFormat::Human,
        ConfigOutputFormat::Jsonl => OutputFormat::Jsonl,
    })
}

/// Standard output stream honoring the color choice
pub(crate) fn stdout(color: Option<ColorChoice>, config: &Config) -> StandardStream {
    let choice = match color {
        Some(ColorChoice::Always) => termcolor::ColorChoice::Always,
        Some(ColorChoice::Never) => termcolor::ColorChoice::Never,
        Some(ColorChoice::Auto) => auto_color(),
        None => match config.output.color {
            ColorOption::Always => termcolor::ColorChoice::Always,
            ColorOption::Never => termcolor::ColorChoice::Never,
            ColorOption::Auto => auto_color(),
        },
    };
    StandardStream::stdout(choice)
}

fn auto_color() -> termcolor::ColorChoice {
    if std::io::stdout().is_terminal() {
        termcolor::ColorChoice::Auto
    } else {
        termcolor::ColorChoice::Never
    }
}
