use super::{required, validate_rule_template};
use crate::error::ValidationError;
use crate::model::TemplateGroup;
use crate::script::ScriptEvaluator;
use tracing::debug;

/// Validate a template group and every rule template it contains
///
/// - name and UUID are present
/// - at least one rule template is present
/// - each rule template is valid
pub fn validate_template_group(
    group: &TemplateGroup,
    evaluator: &dyn ScriptEvaluator,
) -> Result<(), ValidationError> {
    let name = required(&group.name, "template group", "name")?;
    let uuid = required(&group.uuid, format!("template group '{}'", name), "uuid")?;

    if group.rule_templates.is_empty() {
        return Err(ValidationError::InvalidTemplateGroup {
            group: uuid.to_string(),
            message: "no rule template configurations found".to_string(),
        });
    }

    for rule_template in &group.rule_templates {
        validate_rule_template(rule_template, evaluator).map_err(|e| {
            ValidationError::InTemplateGroup {
                group: uuid.to_string(),
                rule_template: rule_template.label().to_string(),
                source: Box::new(e),
            }
        })?;
    }

    debug!(
        template_group = uuid,
        rule_templates = group.rule_templates.len(),
        "template group is valid"
    );
    Ok(())
}
