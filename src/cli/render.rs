//! Render command implementation
//!
//! This module implements the `brules render` command, which:
//! - Reads and validates a template group document
//! - Takes entered values from `--set` or from a business rule document
//! - Renders the rule template's artifacts
//! - Prints them (human or JSONL)

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_INVALID, EXIT_SUCCESS, evaluator, load_config, output_format, stdout,
};
use crate::document;
use crate::error::{BusinessRulesError, CatalogError, ConfigError};
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::render::{render_business_rule, render_rule_template};
use crate::types::Bindings;
use crate::validation::validate_template_group;
use std::path::Path;

/// Error type specific to render command
#[derive(Debug, thiserror::Error)]
enum RenderCommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rules(#[from] BusinessRulesError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to render: a rule template with entered values, or a business rule document
#[derive(Debug, Clone, Copy)]
pub enum RenderSource<'a> {
    RuleTemplate {
        uuid: &'a str,
        values: &'a [(String, String)],
    },
    BusinessRule(&'a Path),
}

/// Run the render command
///
/// # Returns
///
/// Exit code:
/// - 0: artifacts rendered
/// - 1: the template group is invalid
/// - 2: any other error
pub fn run_render(
    config_path: &Path,
    group_path: &Path,
    source: RenderSource<'_>,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> i32 {
    match run_render_inner(config_path, group_path, source, format, color) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", crate::output::error_chain(&e));
            match e {
                RenderCommandError::Rules(BusinessRulesError::Validation(_)) => EXIT_INVALID,
                _ => EXIT_ERROR,
            }
        }
    }
}

fn run_render_inner(
    config_path: &Path,
    group_path: &Path,
    source: RenderSource<'_>,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> Result<(), RenderCommandError> {
    let config = load_config(config_path)?;
    let evaluator = evaluator(&config);

    let group = document::load_template_group(group_path).map_err(BusinessRulesError::from)?;
    validate_template_group(&group, &evaluator).map_err(BusinessRulesError::from)?;

    let artifacts = match source {
        RenderSource::RuleTemplate { uuid, values } => {
            let rule_template = group.rule_template(uuid).ok_or_else(|| {
                BusinessRulesError::from(CatalogError::RuleTemplateNotFound {
                    group: group.uuid.clone().unwrap_or_default(),
                    rule_template: uuid.to_string(),
                })
            })?;
            let entered: Bindings = values.iter().cloned().collect();
            render_rule_template(rule_template, &entered, &evaluator)?
        }
        RenderSource::BusinessRule(path) => {
            let rule = document::load_business_rule(path).map_err(BusinessRulesError::from)?;
            render_business_rule(&group, &rule, &evaluator)?
        }
    };

    match output_format(format, &config) {
        OutputFormat::Human => {
            let mut out = stdout(color, &config);
            HumanFormatter::new().write_artifacts(&mut out, &artifacts)?;
        }
        OutputFormat::Jsonl => {
            print!("{}", JsonlFormatter::new().format_artifacts(&artifacts));
        }
    }

    Ok(())
}
