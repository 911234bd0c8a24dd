#![forbid(unsafe_code)]

//! Conversion between JSON documents and typed entities
//!
//! Template group documents carry a single top-level `templateGroup` key and
//! business rule documents a `businessRule` key. Only the shape is checked
//! here; the validators decide whether a definition makes sense.

use crate::error::DocumentError;
use crate::model::{BusinessRule, BusinessRuleFromScratch, BusinessRuleFromTemplate, TemplateGroup};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const TEMPLATE_GROUP_KEY: &str = "templateGroup";
pub const BUSINESS_RULE_KEY: &str = "businessRule";

/// Read a JSON document from a file
///
/// # Errors
///
/// Returns `DocumentError::FileNotFound` if the file does not exist and
/// `DocumentError::Format` if its content is not a JSON object.
pub fn read_document(path: &Path) -> Result<Value, DocumentError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DocumentError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    parse_document(&content)
}

/// Parse a JSON document from a string
pub fn parse_document(content: &str) -> Result<Value, DocumentError> {
    let document: Value = serde_json::from_str(content)?;
    if !document.is_object() {
        return Err(DocumentError::Format(
            "document must be a JSON object".to_string(),
        ));
    }
    Ok(document)
}

/// Deserialize the entity stored under `key`
fn entity<T: DeserializeOwned>(document: &Value, key: &str) -> Result<T, DocumentError> {
    let value = document
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| DocumentError::Format(format!("missing top-level key '{}'", key)))?;
    T::deserialize(value)
        .map_err(|e| DocumentError::Format(format!("invalid '{}' definition: {}", key, e)))
}

/// Wrap an entity under `key`
fn wrap<T: Serialize>(entity: &T, key: &str) -> Result<Value, DocumentError> {
    let mut document = Map::new();
    document.insert(key.to_string(), serde_json::to_value(entity)?);
    Ok(Value::Object(document))
}

pub fn template_group_from_document(document: &Value) -> Result<TemplateGroup, DocumentError> {
    entity(document, TEMPLATE_GROUP_KEY)
}

pub fn template_group_from_str(content: &str) -> Result<TemplateGroup, DocumentError> {
    template_group_from_document(&parse_document(content)?)
}

/// Read a template group document from a file
pub fn load_template_group(path: &Path) -> Result<TemplateGroup, DocumentError> {
    template_group_from_document(&read_document(path)?)
}

pub fn template_group_to_document(group: &TemplateGroup) -> Result<Value, DocumentError> {
    wrap(group, TEMPLATE_GROUP_KEY)
}

pub fn business_rule_from_template_from_document(
    document: &Value,
) -> Result<BusinessRuleFromTemplate, DocumentError> {
    entity(document, BUSINESS_RULE_KEY)
}

pub fn business_rule_from_scratch_from_document(
    document: &Value,
) -> Result<BusinessRuleFromScratch, DocumentError> {
    entity(document, BUSINESS_RULE_KEY)
}

/// Business rule of either kind; the kind is recognized from its fields
pub fn business_rule_from_document(document: &Value) -> Result<BusinessRule, DocumentError> {
    entity(document, BUSINESS_RULE_KEY)
}

pub fn business_rule_from_str(content: &str) -> Result<BusinessRule, DocumentError> {
    business_rule_from_document(&parse_document(content)?)
}

/// Read a business rule document from a file
pub fn load_business_rule(path: &Path) -> Result<BusinessRule, DocumentError> {
    business_rule_from_document(&read_document(path)?)
}

pub fn business_rule_to_document(rule: &BusinessRule) -> Result<Value, DocumentError> {
    wrap(rule, BUSINESS_RULE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_group_round_trip() {
        let document = json!({
            "templateGroup": {
                "name": "Alerting",
                "uuid": "alerting",
                "ruleTemplates": [{
                    "name": "App Rule",
                    "uuid": "app-rule",
                    "instanceCount": "one",
                    "type": "template",
                    "templates": [{ "type": "siddhiApp", "content": "app = ${appName}" }],
                    "properties": { "appName": { "defaultValue": "defaultApp" } }
                }]
            }
        });

        let group = template_group_from_document(&document).unwrap();
        assert_eq!(group.rule_templates[0].templates.len(), 1);

        let back = template_group_to_document(&group).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn test_missing_key() {
        let err = template_group_from_document(&json!({ "businessRule": {} })).unwrap_err();
        assert!(err.to_string().contains("missing top-level key 'templateGroup'"));

        let err = template_group_from_document(&json!({ "templateGroup": null })).unwrap_err();
        assert!(matches!(err, DocumentError::Format(_)));
    }

    #[test]
    fn test_incompatible_shape() {
        let err = template_group_from_document(&json!({ "templateGroup": { "ruleTemplates": 3 } }))
            .unwrap_err();
        assert!(err.to_string().contains("invalid 'templateGroup' definition"));
    }

    #[test]
    fn test_malformed_and_non_object_documents() {
        assert!(matches!(
            parse_document("{ not json"),
            Err(DocumentError::Format(_))
        ));
        assert!(matches!(parse_document("[]"), Err(DocumentError::Format(_))));
        assert!(matches!(parse_document(""), Err(DocumentError::Format(_))));
    }

    #[test]
    fn test_business_rule_kind_detection() {
        let from_template = json!({ "businessRule": {
            "uuid": "br-1", "name": "n", "templateGroupUUID": "g",
            "ruleTemplateUUID": "rt", "type": "template", "properties": {}
        }});
        assert!(matches!(
            business_rule_from_document(&from_template).unwrap(),
            BusinessRule::FromTemplate(_)
        ));

        let from_scratch = json!({ "businessRule": {
            "uuid": "br-2", "name": "n", "templateGroupUUID": "g",
            "inputRuleTemplateUUID": "in", "outputRuleTemplateUUID": "out",
            "type": "scratch", "properties": {}
        }});
        let rule = business_rule_from_document(&from_scratch).unwrap();
        assert!(matches!(rule, BusinessRule::FromScratch(_)));
        assert_eq!(rule.uuid(), "br-2");
        assert!(business_rule_from_scratch_from_document(&from_scratch).is_ok());
        assert!(business_rule_from_template_from_document(&from_scratch).is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_document(Path::new("/nonexistent/group.json")).unwrap_err();
        assert!(matches!(err, DocumentError::FileNotFound { .. }));
    }
}
