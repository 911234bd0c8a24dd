#![forbid(unsafe_code)]

//! Structural and cross-entity validation of template definitions
//!
//! Validation is composed top-down: a template group validates its rule
//! templates, which validate their templates. Every validator stops at the
//! first violation.

mod rule_template;
mod template;
mod template_group;

pub use rule_template::{validate_property_templated_elements, validate_rule_template};
pub use template::validate_template;
pub use template_group::validate_template_group;

use crate::error::ValidationError;

/// Borrow a field the definition must carry, or report it as missing
fn required<'a>(
    value: &'a Option<String>,
    entity: impl Into<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    value.as_deref().ok_or_else(|| ValidationError::MissingValue {
        entity: entity.into(),
        field,
    })
}
