//! Integration tests for rendering business rules into artifacts

mod common;

use business_rules::document::{load_business_rule, load_template_group};
use business_rules::error::{BusinessRulesError, CatalogError, IdentifierError};
use business_rules::identifier::identifier_from_entered_values;
use business_rules::model::ResourceNode;
use business_rules::placeholder;
use business_rules::render::{render_business_rule, render_rule_template, replacement_values};
use business_rules::{Bindings, RhaiEvaluator, validate_template_group};
use common::fixture;

fn values(pairs: &[(&str, &str)]) -> Bindings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_entered_value_replaces_default() {
    let group = assert_ok!(load_template_group(&fixture("groups/alerting.json")));
    let rule_template = assert_some!(group.rule_template("app-rule"));
    let evaluator = RhaiEvaluator::default();

    let replacements = assert_ok!(replacement_values(
        rule_template,
        &values(&[("appName", "prod1")]),
        &evaluator
    ));
    let content = assert_some!(rule_template.templates[0].content.as_deref());
    assert_eq!(
        assert_ok!(placeholder::resolve(content, &replacements)),
        "app = prod1"
    );

    let defaults = assert_ok!(replacement_values(rule_template, &Bindings::new(), &evaluator));
    assert_eq!(
        assert_ok!(placeholder::resolve(content, &defaults)),
        "app = defaultApp"
    );
}

#[test]
fn test_render_business_rule_from_template() {
    let group = assert_ok!(load_template_group(&fixture("groups/stock_alerts.json")));
    let rule = assert_ok!(load_business_rule(&fixture("rules/prod_alert.json")));

    let artifacts = assert_ok!(render_business_rule(&group, &rule, &RhaiEvaluator::default()));
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].name.as_deref(), Some("ProdAlerts"));
    assert_eq!(artifacts[0].template_type, "siddhiApp");
    assert!(artifacts[0].content.contains("from StockStream[price > 100]"));
    assert!(!artifacts[0].content.contains("${"));
}

#[test]
fn test_render_business_rule_from_scratch() {
    let group = assert_ok!(load_template_group(&fixture("groups/stock_alerts.json")));
    let rule = assert_ok!(load_business_rule(&fixture("rules/nasdaq_scratch.json")));

    let artifacts = assert_ok!(render_business_rule(&group, &rule, &RhaiEvaluator::default()));
    let names: Vec<Option<&str>> = artifacts.iter().map(|a| a.name.as_deref()).collect();
    assert_eq!(names, vec![Some("StockInput"), Some("AlertOutput")]);
    assert!(artifacts[0].content.contains("topic='nasdaq'"));
    assert!(artifacts[1].content.contains("prefix='NASDAQ'"));
}

#[test]
fn test_render_against_wrong_group_fails() {
    let group = assert_ok!(load_template_group(&fixture("groups/alerting.json")));
    let rule = assert_ok!(load_business_rule(&fixture("rules/prod_alert.json")));

    let err = render_business_rule(&group, &rule, &RhaiEvaluator::default()).unwrap_err();
    assert!(matches!(
        err,
        BusinessRulesError::Catalog(CatalogError::TemplateGroupNotFound(ref uuid)) if uuid == "stock-alerts"
    ));
}

#[test]
fn test_render_rule_template_with_entered_value() {
    let group = assert_ok!(load_template_group(&fixture("groups/alerting.json")));
    let rule_template = assert_some!(group.rule_template("app-rule"));

    let artifacts = assert_ok!(render_rule_template(
        rule_template,
        &values(&[("appName", "prod1")]),
        &RhaiEvaluator::default()
    ));
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].content, "app = prod1");
    assert_eq!(artifacts[0].template_type, "siddhiApp");
    assert_eq!(artifacts[0].name, None);
}

#[test]
fn test_render_gadget_and_dashboard_templates() {
    let group = assert_ok!(load_template_group(&fixture("groups/dashboards.json")));
    let evaluator = RhaiEvaluator::default();
    assert_ok!(validate_template_group(&group, &evaluator));
    let rule_template = assert_some!(group.rule_template("price-dashboard"));

    let artifacts = assert_ok!(render_rule_template(
        rule_template,
        &values(&[("title", "Stocks")]),
        &evaluator
    ));
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].template_type, "gadget");
    assert_eq!(
        artifacts[0].content,
        r#"{"id": "price-chart", "title": "Stocks"}"#
    );
    assert_eq!(artifacts[1].template_type, "dashboard");
    assert_eq!(
        artifacts[1].content,
        r#"{"name": "Stocks dashboard", "gadgets": ["price-chart"]}"#
    );

    // Only artifacts that declare a name can be deployed
    let node = ResourceNode::new("worker-1", "localhost", 9090);
    let err = assert_some!(artifacts.into_iter().next())
        .into_deployed("rule-1", "dashboards", node)
        .unwrap_err();
    assert_eq!(
        err,
        IdentifierError::UnsupportedTemplateType("gadget".to_string())
    );
}

#[test]
fn test_rendered_artifact_deploys_with_rule_identifier() {
    let group = assert_ok!(load_template_group(&fixture("groups/stock_alerts.json")));
    let rule_template = assert_some!(group.rule_template("stock-alert"));
    let entered = values(&[("appName", "Deployed"), ("threshold", "5")]);

    let artifacts = assert_ok!(render_rule_template(
        rule_template,
        &entered,
        &RhaiEvaluator::default()
    ));
    let rule_id = identifier_from_entered_values(&entered);
    let node = ResourceNode::new("worker-1", "localhost", 9090);

    let artifact = assert_some!(artifacts.into_iter().next());
    let deployed = assert_ok!(artifact.into_deployed(rule_id.clone(), "stock-alerts", node));
    assert_eq!(deployed.parent_app_name(), rule_id);
    assert_eq!(deployed.app_name(), "Deployed");
    assert!(deployed.content().contains("price > 10"));
}
