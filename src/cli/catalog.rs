//! Catalog command implementation
//!
//! Loads every template group document from the catalog directory, validates
//! them, and lists the rule templates they provide.

use crate::catalog::TemplateCatalog;
use crate::cli::common::{EXIT_ERROR, EXIT_INVALID, EXIT_SUCCESS, evaluator, load_config};
use crate::error::CatalogError;
use crate::output::error_chain;
use std::path::Path;

/// Run the catalog command
///
/// # Returns
///
/// Exit code:
/// - 0: catalog loaded
/// - 1: a template group is invalid
/// - 2: any other error
pub fn run_catalog(config_path: &Path, dir: Option<&Path>) -> i32 {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_ERROR;
        }
    };
    let dir = dir.unwrap_or(config.catalog.directory.as_path());

    let catalog = TemplateCatalog::default();
    if let Err(e) = catalog.reload(dir, &config.catalog.extension, &evaluator(&config)) {
        eprintln!("Error: {}", error_chain(&e));
        return match e {
            CatalogError::Validation { .. } => EXIT_INVALID,
            _ => EXIT_ERROR,
        };
    }

    let snapshot = catalog.snapshot();
    for group in snapshot.template_groups() {
        println!(
            "{} ({})",
            group.uuid.as_deref().unwrap_or_default(),
            group.name.as_deref().unwrap_or_default()
        );
        for rule_template in &group.rule_templates {
            println!(
                "  {} [{}, {}] {} template(s)",
                rule_template.label(),
                rule_template.rule_template_type.as_deref().unwrap_or_default(),
                rule_template.instance_count.as_deref().unwrap_or_default(),
                rule_template.templates.len()
            );
        }
    }
    println!("{} template group(s) loaded", snapshot.len());

    EXIT_SUCCESS
}
