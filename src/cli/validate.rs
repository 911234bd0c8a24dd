//! Validate command implementation
//!
//! This module implements the `brules validate` command, which:
//! - Loads configuration from business-rules.toml (if present)
//! - Reads each template group document
//! - Validates each template group in parallel
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_INVALID, EXIT_SUCCESS, evaluator, load_config, output_format, stdout,
};
use crate::document;
use crate::error::ConfigError;
use crate::output::{CheckStatus, HumanFormatter, JsonlFormatter, ValidationOutcome};
use crate::script::ScriptEvaluator;
use crate::validation::validate_template_group;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Error type specific to validate command
#[derive(Debug, thiserror::Error)]
enum ValidateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the validate command
///
/// # Returns
///
/// Exit code:
/// - 0: every template group is valid
/// - 1: at least one template group is invalid
/// - 2: a document or the configuration could not be read
pub fn run_validate(
    config_path: &Path,
    files: &[PathBuf],
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> i32 {
    match run_validate_inner(config_path, files, format, color) {
        Ok(outcomes) => exit_code(&outcomes),
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_validate_inner(
    config_path: &Path,
    files: &[PathBuf],
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> Result<Vec<ValidationOutcome>, ValidateError> {
    let config = load_config(config_path)?;
    let evaluator = evaluator(&config);

    let outcomes: Vec<ValidationOutcome> = files
        .par_iter()
        .map(|path| check_file(path, &evaluator))
        .collect();

    match output_format(format, &config) {
        OutputFormat::Human => {
            let mut out = stdout(color, &config);
            HumanFormatter::new().write_validation(&mut out, &outcomes)?;
        }
        OutputFormat::Jsonl => {
            print!("{}", JsonlFormatter::new().format_validation(&outcomes));
        }
    }

    Ok(outcomes)
}

/// Read and validate one template group document
pub fn check_file(path: &Path, evaluator: &dyn ScriptEvaluator) -> ValidationOutcome {
    let group = match document::load_template_group(path) {
        Ok(group) => group,
        Err(e) => return ValidationOutcome::error(path.to_path_buf(), &e),
    };

    match validate_template_group(&group, evaluator) {
        Ok(()) => ValidationOutcome::valid(path.to_path_buf(), group.uuid.clone()),
        Err(e) => ValidationOutcome::invalid(path.to_path_buf(), group.uuid.clone(), &e),
    }
}

fn exit_code(outcomes: &[ValidationOutcome]) -> i32 {
    if outcomes.iter().any(|o| o.status == CheckStatus::Error) {
        EXIT_ERROR
    } else if outcomes.iter().any(|o| o.status == CheckStatus::Invalid) {
        EXIT_INVALID
    } else {
        EXIT_SUCCESS
    }
}
