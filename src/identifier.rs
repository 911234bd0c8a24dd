#![forbid(unsafe_code)]

//! Identifier derivation for templates and business rules

use crate::error::IdentifierError;
use crate::model::Template;
use crate::types::{Bindings, TemplateType};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

/// `@App:name('Name')` or `@App:name("Name")` inside a Siddhi app
pub static APP_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@App:name\(\s*['"]([^'"]*)['"]\s*\)"#).expect("app name pattern is valid")
});

/// Identifier of a template, taken from the name its artifact declares
///
/// # Errors
///
/// Returns `IdentifierError::UnsupportedTemplateType` for anything but Siddhi
/// apps, and `IdentifierError::MissingAppName` when the content has no name
/// declaration.
pub fn identifier_from_artifact(template: &Template) -> Result<String, IdentifierError> {
    match template.kind() {
        Some(TemplateType::SiddhiApp) => {
            let content = template.content.as_deref().unwrap_or_default();
            app_name(content).map(str::to_string)
        }
        _ => Err(IdentifierError::UnsupportedTemplateType(
            template
                .template_type
                .clone()
                .unwrap_or_else(|| "<none>".to_string()),
        )),
    }
}

/// Name declared by a Siddhi app's `@App:name` annotation
pub fn app_name(content: &str) -> Result<&str, IdentifierError> {
    APP_NAME_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(IdentifierError::MissingAppName)
}

/// Deterministic identifier for a business rule from the values entered for it
///
/// The values are rendered as `{name1=value1, name2=value2}` in name order and
/// hashed into a name-based UUID. Equal mappings always give the same
/// identifier.
pub fn identifier_from_entered_values(values: &Bindings) -> String {
    let joined = values
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ");
    let representation = format!("{{{}}}", joined);

    Uuid::new_v5(&Uuid::NAMESPACE_OID, representation.as_bytes()).to_string()
}

/// Lowercase a human-readable name and replace spaces with hyphens
///
/// No other characters are changed.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
