use super::{required, validate_template};
use crate::error::ValidationError;
use crate::model::RuleTemplate;
use crate::placeholder;
use crate::script::ScriptEvaluator;
use crate::types::{Bindings, InstanceCount, RuleTemplateType};
use tracing::{debug, warn};

/// Validate a rule template and every template it contains
///
/// Structural checks run first:
/// - name, UUID and instance count are present
/// - a recognized instance count requires a type
/// - the type is `template`, `input` or `output`
/// - input and output rule templates hold exactly one template, others at least one
/// - each template is valid for this rule template's type
///
/// Then [`validate_property_templated_elements`] proves every placeholder in
/// the templates has a replacement.
pub fn validate_rule_template(
    rule_template: &RuleTemplate,
    evaluator: &dyn ScriptEvaluator,
) -> Result<(), ValidationError> {
    let name = required(&rule_template.name, "rule template", "name")?;
    let uuid = required(
        &rule_template.uuid,
        format!("rule template '{}'", name),
        "uuid",
    )?;
    let entity = || format!("rule template '{}'", uuid);

    let instance_count = required(&rule_template.instance_count, entity(), "instanceCount")?;
    match instance_count.parse::<InstanceCount>() {
        Ok(_) if rule_template.rule_template_type.is_none() => {
            return Err(ValidationError::InvalidRuleTemplate {
                rule_template: uuid.to_string(),
                message: "rule template type is not specified".to_string(),
            });
        }
        Ok(_) => {}
        Err(_) => warn!(
            rule_template = uuid,
            instance_count, "unrecognized instance count"
        ),
    }

    let type_tag = required(&rule_template.rule_template_type, entity(), "type")?;
    let kind = type_tag.parse::<RuleTemplateType>().map_err(|_| {
        ValidationError::InvalidRuleTemplate {
            rule_template: uuid.to_string(),
            message: format!("invalid rule template type '{}'", type_tag),
        }
    })?;

    let template_count = rule_template.templates.len();
    if kind.exposes_stream() {
        if template_count != 1 {
            return Err(ValidationError::InvalidRuleTemplate {
                rule_template: uuid.to_string(),
                message: format!(
                    "there should be exactly one template for {} type rule template, found {}",
                    kind, template_count
                ),
            });
        }
    } else if template_count == 0 {
        return Err(ValidationError::InvalidRuleTemplate {
            rule_template: uuid.to_string(),
            message: format!("no templates found in {} type rule template", kind),
        });
    }

    for template in &rule_template.templates {
        validate_template(template, kind).map_err(|e| ValidationError::InRuleTemplate {
            rule_template: uuid.to_string(),
            source: Box::new(e),
        })?;
    }

    validate_property_templated_elements(rule_template, evaluator)?;

    debug!(rule_template = uuid, templates = template_count, "rule template is valid");
    Ok(())
}

/// Check that every placeholder of every template has a replacement
///
/// Replacements are the property defaults plus the variables the rule
/// template's script binds once its own placeholders are replaced by those
/// defaults. Script variables override defaults of the same name.
///
/// Returns the merged replacements.
pub fn validate_property_templated_elements(
    rule_template: &RuleTemplate,
    evaluator: &dyn ScriptEvaluator,
) -> Result<Bindings, ValidationError> {
    let label = rule_template.label().to_string();

    let mut replacements = Bindings::new();
    for (property_name, property) in &rule_template.properties {
        let default_value = required(
            &property.default_value,
            format!("property '{}' of rule template '{}'", property_name, label),
            "defaultValue",
        )?;
        replacements.insert(property_name.clone(), default_value.to_string());
    }

    let script = rule_template.script.as_deref().unwrap_or_default();
    let runnable_script = placeholder::resolve(script, &replacements).map_err(|e| {
        ValidationError::UnresolvedScriptPlaceholder {
            rule_template: label.clone(),
            source: e,
        }
    })?;

    if !runnable_script.trim().is_empty() {
        let derived = evaluator
            .evaluate(&runnable_script, &Bindings::new())
            .map_err(|e| ValidationError::Script {
                rule_template: label.clone(),
                source: e,
            })?;
        debug!(rule_template = %label, derived = derived.len(), "script variables derived");
        replacements.extend(derived);
    }

    for template in &rule_template.templates {
        let content = required(
            &template.content,
            format!("template of rule template '{}'", label),
            "content",
        )?;
        placeholder::ensure_resolvable(content, &replacements).map_err(|e| {
            ValidationError::UnresolvedTemplatedElement {
                rule_template: label.clone(),
                source: e,
            }
        })?;
    }

    Ok(replacements)
}
