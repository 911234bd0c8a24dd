#![forbid(unsafe_code)]

//! Rendering rule templates into deployable artifacts
//!
//! Rendering mirrors validation, with the user's entered values layered over
//! the property defaults:
//! 1. defaults, overridden by entered values
//! 2. the script, with its placeholders replaced, is evaluated
//! 3. script variables override both
//! 4. every template's content is resolved against the result

use crate::error::{BusinessRulesError, CatalogError, IdentifierError, ValidationError};
use crate::identifier;
use crate::model::{
    BusinessRule, DeployedArtifact, ResourceNode, RuleTemplate, Template, TemplateGroup,
};
use crate::placeholder;
use crate::script::ScriptEvaluator;
use crate::types::{Bindings, TemplateType};
use serde::Serialize;
use tracing::debug;

/// Artifact text produced from one template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedArtifact {
    /// Name declared by the rendered artifact; only Siddhi apps declare one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub template_type: String,
    pub content: String,
}

impl RenderedArtifact {
    /// Record this artifact as deployed on `node`
    ///
    /// # Errors
    ///
    /// Deployed artifacts are known by their name, so an artifact that does
    /// not declare one fails with the `IdentifierError` explaining why.
    pub fn into_deployed(
        self,
        parent_app_name: impl Into<String>,
        group_name: impl Into<String>,
        node: ResourceNode,
    ) -> Result<DeployedArtifact, IdentifierError> {
        let app_name = match self.name {
            Some(name) => name,
            None if self.template_type == TemplateType::SiddhiApp.as_str() => {
                return Err(IdentifierError::MissingAppName);
            }
            None => return Err(IdentifierError::UnsupportedTemplateType(self.template_type)),
        };
        Ok(DeployedArtifact::new(
            parent_app_name,
            group_name,
            app_name,
            self.content,
            node,
        ))
    }
}

/// Values used to fill a rule template's placeholders
///
/// Returns defaults overridden by `entered`, then by the script's variables.
pub fn replacement_values(
    rule_template: &RuleTemplate,
    entered: &Bindings,
    evaluator: &dyn ScriptEvaluator,
) -> Result<Bindings, BusinessRulesError> {
    let mut values: Bindings = rule_template
        .properties
        .iter()
        .filter_map(|(name, property)| {
            property
                .default_value
                .as_ref()
                .map(|default| (name.clone(), default.clone()))
        })
        .collect();
    values.extend(entered.iter().map(|(k, v)| (k.clone(), v.clone())));

    let script = rule_template.script.as_deref().unwrap_or_default();
    let runnable_script = placeholder::resolve(script, &values)?;
    if !runnable_script.trim().is_empty() {
        let derived = evaluator.evaluate(&runnable_script, &Bindings::new())?;
        values.extend(derived);
    }

    Ok(values)
}

/// Render every template of a rule template with the entered values
///
/// # Errors
///
/// Fails on the first placeholder without a value or on a failing script.
pub fn render_rule_template(
    rule_template: &RuleTemplate,
    entered: &Bindings,
    evaluator: &dyn ScriptEvaluator,
) -> Result<Vec<RenderedArtifact>, BusinessRulesError> {
    let values = replacement_values(rule_template, entered, evaluator)?;

    let artifacts = rule_template
        .templates
        .iter()
        .map(|template| render_template(template, &values, rule_template.label()))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        rule_template = rule_template.label(),
        artifacts = artifacts.len(),
        "rule template rendered"
    );
    Ok(artifacts)
}

fn render_template(
    template: &Template,
    values: &Bindings,
    rule_template: &str,
) -> Result<RenderedArtifact, BusinessRulesError> {
    let content = template
        .content
        .as_deref()
        .ok_or_else(|| ValidationError::MissingValue {
            entity: format!("template of rule template '{}'", rule_template),
            field: "content",
        })?;

    let rendered = Template {
        template_type: template.template_type.clone(),
        content: Some(placeholder::resolve(content, values)?),
        exposed_stream_definition: template.exposed_stream_definition.clone(),
    };
    let name = identifier::identifier_from_artifact(&rendered).ok();

    Ok(RenderedArtifact {
        name,
        template_type: rendered.template_type.unwrap_or_default(),
        content: rendered.content.unwrap_or_default(),
    })
}

/// Render a business rule against the template group it was authored for
///
/// Rules from a template render that rule template with their properties.
/// Rules from scratch render the input rule template with the input data and
/// the output rule template with the output data, in that order.
pub fn render_business_rule(
    group: &TemplateGroup,
    rule: &BusinessRule,
    evaluator: &dyn ScriptEvaluator,
) -> Result<Vec<RenderedArtifact>, BusinessRulesError> {
    let group_uuid = group.uuid.as_deref().unwrap_or_default();
    if rule.template_group_uuid() != group_uuid {
        return Err(CatalogError::TemplateGroupNotFound(rule.template_group_uuid().to_string()).into());
    }

    let lookup = |uuid: &str| {
        group
            .rule_template(uuid)
            .ok_or_else(|| CatalogError::RuleTemplateNotFound {
                group: group_uuid.to_string(),
                rule_template: uuid.to_string(),
            })
    };

    match rule {
        BusinessRule::FromTemplate(rule) => {
            let rule_template = lookup(&rule.rule_template_uuid)?;
            render_rule_template(rule_template, &rule.properties, evaluator)
        }
        BusinessRule::FromScratch(rule) => {
            let input = lookup(&rule.input_rule_template_uuid)?;
            let output = lookup(&rule.output_rule_template_uuid)?;
            let mut artifacts =
                render_rule_template(input, &rule.properties.input_data, evaluator)?;
            artifacts.extend(render_rule_template(
                output,
                &rule.properties.output_data,
                evaluator,
            )?);
            Ok(artifacts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusinessRuleFromTemplate, RuleTemplateProperty};
    use crate::script::RhaiEvaluator;
    use crate::types::{InstanceCount, RuleTemplateType};

    fn stock_alert() -> RuleTemplate {
        RuleTemplate::new(
            "Stock Alert",
            "stock-alert",
            InstanceCount::Many,
            RuleTemplateType::Template,
            vec![Template::new(
                TemplateType::SiddhiApp,
                "@App:name('${appName}')\nfrom StockStream[price > ${limit}] select *;",
            )],
        )
        .with_property("appName", RuleTemplateProperty::new("defaultApp"))
        .with_property("threshold", RuleTemplateProperty::new("10"))
        .with_script("var limit = ${threshold} * 2;")
    }

    fn entered(pairs: &[(&str, &str)]) -> Bindings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_with_defaults() {
        let artifacts =
            render_rule_template(&stock_alert(), &Bindings::new(), &RhaiEvaluator::default())
                .unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name.as_deref(), Some("defaultApp"));
        assert!(artifacts[0].content.contains("price > 20"));
    }

    #[test]
    fn test_entered_values_override_defaults() {
        let artifacts = render_rule_template(
            &stock_alert(),
            &entered(&[("appName", "prod1"), ("threshold", "50")]),
            &RhaiEvaluator::default(),
        )
        .unwrap();
        assert_eq!(artifacts[0].name.as_deref(), Some("prod1"));
        assert!(artifacts[0].content.contains("price > 100"));
    }

    #[test]
    fn test_render_simple_content() {
        let rule_template = RuleTemplate::new(
            "App Rule",
            "app-rule",
            InstanceCount::One,
            RuleTemplateType::Template,
            vec![Template::new(TemplateType::SiddhiApp, "app = ${appName}")],
        )
        .with_property("appName", RuleTemplateProperty::new("defaultApp"));

        let values = replacement_values(
            &rule_template,
            &entered(&[("appName", "prod1")]),
            &RhaiEvaluator::default(),
        )
        .unwrap();
        assert_eq!(
            placeholder::resolve("app = ${appName}", &values).unwrap(),
            "app = prod1"
        );

        let artifacts = render_rule_template(
            &rule_template,
            &entered(&[("appName", "prod1")]),
            &RhaiEvaluator::default(),
        )
        .unwrap();
        assert_eq!(artifacts[0].content, "app = prod1");
        assert_eq!(artifacts[0].name, None);

        let err = artifacts[0]
            .clone()
            .into_deployed("br-1", "alerting", ResourceNode::new("w", "localhost", 9090))
            .unwrap_err();
        assert_eq!(err, IdentifierError::MissingAppName);
    }

    #[test]
    fn test_render_gadget_template() {
        let rule_template = RuleTemplate::new(
            "Price Gadget",
            "price-gadget",
            InstanceCount::One,
            RuleTemplateType::Template,
            vec![Template::new(
                TemplateType::Gadget,
                "{\"title\": \"${title}\"}",
            )],
        )
        .with_property("title", RuleTemplateProperty::new("Prices"));

        let artifacts =
            render_rule_template(&rule_template, &Bindings::new(), &RhaiEvaluator::default())
                .unwrap();
        assert_eq!(artifacts[0].template_type, "gadget");
        assert_eq!(artifacts[0].content, "{\"title\": \"Prices\"}");
        assert_eq!(artifacts[0].name, None);

        let err = artifacts[0]
            .clone()
            .into_deployed("br-1", "dashboards", ResourceNode::new("w", "localhost", 9090))
            .unwrap_err();
        assert_eq!(
            err,
            IdentifierError::UnsupportedTemplateType("gadget".to_string())
        );
    }

    #[test]
    fn test_render_business_rule_from_template() {
        let group = TemplateGroup::new("Alerting", "alerting", vec![stock_alert()]);
        let rule = BusinessRule::FromTemplate(BusinessRuleFromTemplate {
            uuid: "br-1".to_string(),
            name: "Prod".to_string(),
            template_group_uuid: "alerting".to_string(),
            rule_template_uuid: "stock-alert".to_string(),
            rule_type: "template".to_string(),
            properties: entered(&[("appName", "prod2")]),
        });

        let artifacts = render_business_rule(&group, &rule, &RhaiEvaluator::default()).unwrap();
        assert_eq!(artifacts[0].name.as_deref(), Some("prod2"));

        let deployed = artifacts[0]
            .clone()
            .into_deployed(
                "prod2",
                "br-1",
                ResourceNode::new("worker-1", "localhost", 9090),
            )
            .unwrap();
        assert_eq!(deployed.app_name(), "prod2");
        assert_eq!(deployed.content(), artifacts[0].content);
    }

    #[test]
    fn test_render_business_rule_unknown_rule_template() {
        let group = TemplateGroup::new("Alerting", "alerting", vec![stock_alert()]);
        let rule = BusinessRule::FromTemplate(BusinessRuleFromTemplate {
            uuid: "br-1".to_string(),
            name: "Prod".to_string(),
            template_group_uuid: "alerting".to_string(),
            rule_template_uuid: "missing".to_string(),
            rule_type: "template".to_string(),
            properties: Bindings::new(),
        });

        let err = render_business_rule(&group, &rule, &RhaiEvaluator::default()).unwrap_err();
        assert!(matches!(
            err,
            BusinessRulesError::Catalog(CatalogError::RuleTemplateNotFound { .. })
        ));
    }
}
