#![forbid(unsafe_code)]

//! Template group, rule template and template definitions
//!
//! Fields that a document may omit are `Option`s; the validators report them
//! as missing values. Code that builds definitions directly goes through the
//! constructors, which take every mandatory field.

use crate::types::{InstanceCount, RuleTemplateType, TemplateType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named collection of rule templates distributed as a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub rule_templates: Vec<RuleTemplate>,
}

impl TemplateGroup {
    pub fn new(
        name: impl Into<String>,
        uuid: impl Into<String>,
        rule_templates: Vec<RuleTemplate>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            uuid: Some(uuid.into()),
            description: None,
            rule_templates,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Find a contained rule template by UUID
    pub fn rule_template(&self, uuid: &str) -> Option<&RuleTemplate> {
        self.rule_templates
            .iter()
            .find(|rt| rt.uuid.as_deref() == Some(uuid))
    }
}

/// A reusable, parameterized definition producing one or more artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rule_template_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Script deriving extra placeholder values; may itself contain placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    #[serde(default)]
    pub templates: Vec<Template>,

    /// Placeholder name to property definition
    #[serde(default)]
    pub properties: BTreeMap<String, RuleTemplateProperty>,
}

impl RuleTemplate {
    pub fn new(
        name: impl Into<String>,
        uuid: impl Into<String>,
        instance_count: InstanceCount,
        rule_template_type: RuleTemplateType,
        templates: Vec<Template>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            uuid: Some(uuid.into()),
            instance_count: Some(instance_count.as_str().to_string()),
            rule_template_type: Some(rule_template_type.as_str().to_string()),
            description: None,
            script: None,
            templates,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, property: RuleTemplateProperty) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// The rule template type, if it is one of the recognized tags
    pub fn kind(&self) -> Option<RuleTemplateType> {
        self.rule_template_type.as_deref()?.parse().ok()
    }

    /// The instance count, if it is one of the recognized values
    pub fn instance_count_kind(&self) -> Option<InstanceCount> {
        self.instance_count.as_deref()?.parse().ok()
    }

    /// A label for messages: the UUID, falling back to the name
    pub fn label(&self) -> &str {
        self.uuid
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// One piece of artifact content within a rule template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Stream shape exposed by input and output rule templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposed_stream_definition: Option<String>,
}

impl Template {
    pub fn new(template_type: TemplateType, content: impl Into<String>) -> Self {
        Self {
            template_type: Some(template_type.as_str().to_string()),
            content: Some(content.into()),
            exposed_stream_definition: None,
        }
    }

    pub fn with_exposed_stream_definition(mut self, definition: impl Into<String>) -> Self {
        self.exposed_stream_definition = Some(definition.into());
        self
    }

    /// The template type, if it is one of the recognized tags
    pub fn kind(&self) -> Option<TemplateType> {
        self.template_type.as_deref()?.parse().ok()
    }
}

/// A placeholder property of a rule template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTemplateProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Values offered to the user; informative only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl RuleTemplateProperty {
    pub fn new(default_value: impl Into<String>) -> Self {
        Self {
            field_name: None,
            description: None,
            default_value: Some(default_value.into()),
            options: None,
        }
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }
}
