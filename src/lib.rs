#![forbid(unsafe_code)]

//! Business rules: validation and rendering of templated business rules
//!
//! A template group bundles rule templates. Each rule template carries one or
//! more templates (Siddhi apps, gadgets, dashboards) whose content contains
//! `${name}` placeholders, property defaults for those placeholders, and an
//! optional script deriving further values. This crate checks such documents
//! for structural soundness and renders business rules into deployable
//! artifacts.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod identifier;
pub mod model;
pub mod output;
pub mod placeholder;
pub mod render;
pub mod script;
pub mod types;
pub mod validation;

// Re-export error types for convenient access
pub use error::{
    BusinessRulesError, CatalogError, ConfigError, DocumentError, IdentifierError,
    ScriptEvaluationError, UnresolvedPlaceholderError, ValidationError,
};

// Re-export core domain types for convenient access
pub use model::{BusinessRule, RuleTemplate, RuleTemplateProperty, Template, TemplateGroup};
pub use script::{RhaiEvaluator, ScriptEvaluator};
pub use types::{Bindings, InstanceCount, RuleTemplateType, TemplateType};
pub use validation::{validate_rule_template, validate_template, validate_template_group};
