//! Typed entities read from template group and business rule documents

pub mod business_rule;
pub mod deployment;
pub mod template_group;

pub use business_rule::{
    BusinessRule, BusinessRuleFromScratch, BusinessRuleFromTemplate, RuleComponents, ScratchProperties,
};
pub use deployment::{DeployedArtifact, ResourceNode};
pub use template_group::{RuleTemplate, RuleTemplateProperty, Template, TemplateGroup};
