//! Error types for the business rules engine
//!
//! Each concern gets its own error type. Higher-level errors keep the
//! lower-level failure as their `source`, so a validation failure deep inside
//! a template group can be traced down to the offending placeholder.

use std::path::PathBuf;

/// A placeholder in a piece of text has no replacement value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No matching replacement found for the placeholder '{name}'")]
pub struct UnresolvedPlaceholderError {
    /// Name captured from the placeholder token
    pub name: String,
}

/// An embedded script could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error running the script: {message}\n{script}\n")]
pub struct ScriptEvaluationError {
    /// The snippet that was evaluated, after placeholder substitution
    pub script: String,
    /// Message reported by the script engine
    pub message: String,
}

/// Identifier derivation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Identifiers can only be taken from supported artifact types
    #[error("Invalid template type '{0}'. Unable to generate an identifier")]
    UnsupportedTemplateType(String),

    /// The artifact content does not declare its own name
    #[error("Invalid app name: no '@App:name' declaration found in the template content")]
    MissingAppName,
}

/// Structural or cross-entity validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A value the definition must carry is absent
    #[error("A required value can not be found in the definition: '{field}' of {entity}")]
    MissingValue { entity: String, field: &'static str },

    /// Template group level violation
    #[error("Invalid template group '{group}': {message}")]
    InvalidTemplateGroup { group: String, message: String },

    /// Rule template level violation
    #[error("Invalid rule template '{rule_template}': {message}")]
    InvalidRuleTemplate {
        rule_template: String,
        message: String,
    },

    /// Template level violation
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// The rule template script references a placeholder without a default
    #[error("Invalid script in rule template '{rule_template}'")]
    UnresolvedScriptPlaceholder {
        rule_template: String,
        #[source]
        source: UnresolvedPlaceholderError,
    },

    /// The rule template script failed to run
    #[error("Script of rule template '{rule_template}' could not be evaluated")]
    Script {
        rule_template: String,
        #[source]
        source: ScriptEvaluationError,
    },

    /// A template references a placeholder that neither properties nor the script provide
    #[error(
        "Invalid template in rule template '{rule_template}'. All the templated elements are not having replacements"
    )]
    UnresolvedTemplatedElement {
        rule_template: String,
        #[source]
        source: UnresolvedPlaceholderError,
    },

    /// A template failed validation inside a rule template
    #[error("Invalid template within rule template '{rule_template}'")]
    InRuleTemplate {
        rule_template: String,
        #[source]
        source: Box<ValidationError>,
    },

    /// A rule template failed validation inside a template group
    #[error("Invalid rule template '{rule_template}' in template group '{group}'")]
    InTemplateGroup {
        group: String,
        rule_template: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Walks the source chain and returns the unresolved placeholder, if one caused this error
    pub fn unresolved_placeholder(&self) -> Option<&UnresolvedPlaceholderError> {
        match self {
            ValidationError::UnresolvedScriptPlaceholder { source, .. }
            | ValidationError::UnresolvedTemplatedElement { source, .. } => Some(source),
            ValidationError::InRuleTemplate { source, .. }
            | ValidationError::InTemplateGroup { source, .. } => source.unresolved_placeholder(),
            _ => None,
        }
    }
}

/// Reading or decoding a structured document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document file does not exist
    #[error("File - {} not found", path.display())]
    FileNotFound { path: PathBuf },

    /// The document is absent, malformed, or has an incompatible shape
    #[error("Invalid document format: {0}")]
    Format(String),

    /// I/O error other than a missing file
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Format(err.to_string())
    }
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration syntax
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but holds invalid values
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Catalog loading and lookup errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog directory is missing or not a directory
    #[error("Catalog directory is not usable: {}", path.display())]
    InvalidDirectory { path: PathBuf },

    /// A document in the catalog directory could not be read
    #[error("Failed to load {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// A template group in the catalog directory is invalid
    #[error("Invalid template group in {}: {source}", path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    /// Two documents declare the same template group UUID
    #[error("Duplicate template group UUID '{0}'")]
    DuplicateTemplateGroup(String),

    /// Lookup of an unknown template group
    #[error("Template group not found: {0}")]
    TemplateGroupNotFound(String),

    /// Lookup of an unknown rule template
    #[error("Rule template '{rule_template}' not found in template group '{group}'")]
    RuleTemplateNotFound {
        group: String,
        rule_template: String,
    },
}

/// Top-level error type for the business rules engine
#[derive(Debug, thiserror::Error)]
pub enum BusinessRulesError {
    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Placeholder resolution error
    #[error(transparent)]
    UnresolvedPlaceholder(#[from] UnresolvedPlaceholderError),

    /// Script evaluation error
    #[error(transparent)]
    ScriptEvaluation(#[from] ScriptEvaluationError),

    /// Identifier error
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_cause_chain_is_preserved() {
        let err = ValidationError::InTemplateGroup {
            group: "Alerting".to_string(),
            rule_template: "stock-alert".to_string(),
            source: Box::new(ValidationError::UnresolvedTemplatedElement {
                rule_template: "stock-alert".to_string(),
                source: UnresolvedPlaceholderError {
                    name: "threshold".to_string(),
                },
            }),
        };

        let inner = err.source().unwrap();
        let innermost = inner.source().unwrap();
        assert!(innermost.to_string().contains("'threshold'"));
        assert_eq!(
            err.unresolved_placeholder().map(|e| e.name.as_str()),
            Some("threshold")
        );
    }

    #[test]
    fn test_missing_value_message() {
        let err = ValidationError::MissingValue {
            entity: "template group".to_string(),
            field: "uuid",
        };
        assert_eq!(
            err.to_string(),
            "A required value can not be found in the definition: 'uuid' of template group"
        );
    }

    #[test]
    fn test_top_level_conversion() {
        let err: BusinessRulesError = IdentifierError::MissingAppName.into();
        assert!(matches!(err, BusinessRulesError::Identifier(_)));
        assert!(err.to_string().starts_with("Identifier error:"));
    }
}
