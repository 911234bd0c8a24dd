use super::required;
use crate::error::ValidationError;
use crate::model::Template;
use crate::types::{RuleTemplateType, TemplateType};
use tracing::debug;

/// Template types accepted inside `template` rule templates
const ACCEPTED_TEMPLATE_TYPES: [TemplateType; 3] = [
    TemplateType::SiddhiApp,
    TemplateType::Gadget,
    TemplateType::Dashboard,
];

/// Validate a template against the type of the rule template that owns it
///
/// - type and content are present, and content is not empty
/// - input and output rule templates: an exposed stream definition is present
///   and the template is a Siddhi app
/// - template rule templates: no exposed stream definition, and the type is
///   one of the accepted tags
pub fn validate_template(
    template: &Template,
    owning_type: RuleTemplateType,
) -> Result<(), ValidationError> {
    let template_type = required(&template.template_type, "template", "type")?;
    let content = required(&template.content, "template", "content")?;
    if content.is_empty() {
        return Err(ValidationError::InvalidTemplate(
            "Content can not be empty".to_string(),
        ));
    }

    let kind = template_type.parse::<TemplateType>().ok();

    if owning_type.exposes_stream() {
        if template.exposed_stream_definition.is_none() {
            return Err(ValidationError::InvalidTemplate(format!(
                "Exposed stream definition not found for template within a rule template of type {}",
                owning_type
            )));
        }
        if kind != Some(TemplateType::SiddhiApp) {
            return Err(ValidationError::InvalidTemplate(format!(
                "{} is not a valid template type for a template within a rule template of type {}. \
                 Template type must be '{}'",
                template_type,
                owning_type,
                TemplateType::SiddhiApp
            )));
        }
    } else {
        if template.exposed_stream_definition.is_some() {
            return Err(ValidationError::InvalidTemplate(format!(
                "Exposed stream definition should not exist for template within a rule template of type {}",
                owning_type
            )));
        }
        if !kind.is_some_and(|k| ACCEPTED_TEMPLATE_TYPES.contains(&k)) {
            return Err(ValidationError::InvalidTemplate(format!(
                "{} is not a valid template type for a template within a rule template of type {}. \
                 Template type must be '{}'",
                template_type,
                owning_type,
                TemplateType::SiddhiApp
            )));
        }
    }

    debug!(template_type, "template is valid");
    Ok(())
}
