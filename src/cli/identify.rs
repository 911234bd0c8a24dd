//! Identifier commands: `slug`, `fingerprint` and `artifact-id`

use crate::cli::common::{EXIT_ERROR, EXIT_INVALID, EXIT_SUCCESS};
use crate::document;
use crate::identifier::{identifier_from_artifact, identifier_from_entered_values, slugify};
use crate::types::Bindings;
use std::path::Path;

/// Print the slug of a name given as one or more words
pub fn run_slug(words: &[String]) -> i32 {
    println!("{}", slugify(&words.join(" ")));
    EXIT_SUCCESS
}

/// Print the business rule identifier for a set of entered values
pub fn run_fingerprint(values: &[(String, String)]) -> i32 {
    let values: Bindings = values.iter().cloned().collect();
    println!("{}", identifier_from_entered_values(&values));
    EXIT_SUCCESS
}

/// Print `<rule template>\t<identifier>` for every template of a group
///
/// # Returns
///
/// Exit code:
/// - 0: every template has an identifier
/// - 1: at least one template has none
/// - 2: the document could not be read
pub fn run_artifact_id(group_path: &Path) -> i32 {
    let group = match document::load_template_group(group_path) {
        Ok(group) => group,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_ERROR;
        }
    };

    let mut exit_code = EXIT_SUCCESS;
    for rule_template in &group.rule_templates {
        for template in &rule_template.templates {
            match identifier_from_artifact(template) {
                Ok(id) => println!("{}\t{}", rule_template.label(), id),
                Err(e) => {
                    eprintln!("Error: {}: {}", rule_template.label(), e);
                    exit_code = EXIT_INVALID;
                }
            }
        }
    }
    exit_code
}
