//! Business rule instances authored by users

use crate::types::Bindings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Either kind of business rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BusinessRule {
    FromTemplate(BusinessRuleFromTemplate),
    FromScratch(BusinessRuleFromScratch),
}

impl BusinessRule {
    pub fn uuid(&self) -> &str {
        match self {
            BusinessRule::FromTemplate(rule) => &rule.uuid,
            BusinessRule::FromScratch(rule) => &rule.uuid,
        }
    }

    pub fn template_group_uuid(&self) -> &str {
        match self {
            BusinessRule::FromTemplate(rule) => &rule.template_group_uuid,
            BusinessRule::FromScratch(rule) => &rule.template_group_uuid,
        }
    }
}

/// A business rule instantiated from a single rule template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRuleFromTemplate {
    pub uuid: String,
    pub name: String,

    #[serde(rename = "templateGroupUUID")]
    pub template_group_uuid: String,

    #[serde(rename = "ruleTemplateUUID")]
    pub rule_template_uuid: String,

    #[serde(rename = "type")]
    pub rule_type: String,

    /// Values entered for the rule template's placeholders
    #[serde(default)]
    pub properties: Bindings,
}

/// A business rule composed from an input and an output rule template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRuleFromScratch {
    pub uuid: String,
    pub name: String,

    #[serde(rename = "templateGroupUUID")]
    pub template_group_uuid: String,

    #[serde(rename = "inputRuleTemplateUUID")]
    pub input_rule_template_uuid: String,

    #[serde(rename = "outputRuleTemplateUUID")]
    pub output_rule_template_uuid: String,

    #[serde(rename = "type")]
    pub rule_type: String,

    pub properties: ScratchProperties,
}

/// Properties of a from-scratch business rule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScratchProperties {
    /// Values for the input rule template's placeholders
    #[serde(default)]
    pub input_data: Bindings,

    #[serde(default)]
    pub rule_components: RuleComponents,

    /// Values for the output rule template's placeholders
    #[serde(default)]
    pub output_data: Bindings,

    /// Output stream attribute to input stream attribute
    #[serde(default)]
    pub output_mappings: BTreeMap<String, String>,
}

/// Filters and the logic combining them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleComponents {
    #[serde(default)]
    pub filter_rules: Vec<String>,

    #[serde(default)]
    pub rule_logic: Vec<String>,
}
