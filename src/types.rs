#![forbid(unsafe_code)]

//! Core domain types for the business rules engine
//!
//! Definitions are read from documents as plain strings so that an unknown
//! tag can be reported by the validators instead of failing deserialization.
//! The enums here are the recognized values of those tags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Name to value mapping used for placeholder replacements and script bindings
///
/// Ordered so that anything derived from it (fingerprints, debug output) is stable.
pub type Bindings = BTreeMap<String, String>;

/// How many business rules may be instantiated from a rule template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceCount {
    One,
    Many,
}

impl InstanceCount {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceCount::One => "one",
            InstanceCount::Many => "many",
        }
    }
}

impl FromStr for InstanceCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one" => Ok(InstanceCount::One),
            "many" => Ok(InstanceCount::Many),
            other => Err(format!("Unknown instance count '{}'", other)),
        }
    }
}

impl fmt::Display for InstanceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a rule template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleTemplateType {
    /// Complete rule built only from templates
    Template,
    /// Input half of a from-scratch business rule
    Input,
    /// Output half of a from-scratch business rule
    Output,
}

impl RuleTemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTemplateType::Template => "template",
            RuleTemplateType::Input => "input",
            RuleTemplateType::Output => "output",
        }
    }

    /// Input and output rule templates expose a stream and hold exactly one template
    pub fn exposes_stream(&self) -> bool {
        matches!(self, RuleTemplateType::Input | RuleTemplateType::Output)
    }
}

impl FromStr for RuleTemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "template" => Ok(RuleTemplateType::Template),
            "input" => Ok(RuleTemplateType::Input),
            "output" => Ok(RuleTemplateType::Output),
            other => Err(format!("Unknown rule template type '{}'", other)),
        }
    }
}

impl fmt::Display for RuleTemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type of a template
///
/// Only Siddhi apps are handled. Gadgets and dashboards are accepted inside
/// `template` rule templates but are never rendered differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateType {
    #[serde(rename = "siddhiApp")]
    SiddhiApp,
    #[serde(rename = "gadget")]
    Gadget,
    #[serde(rename = "dashboard")]
    Dashboard,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::SiddhiApp => "siddhiApp",
            TemplateType::Gadget => "gadget",
            TemplateType::Dashboard => "dashboard",
        }
    }
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "siddhiApp" => Ok(TemplateType::SiddhiApp),
            "gadget" => Ok(TemplateType::Gadget),
            "dashboard" => Ok(TemplateType::Dashboard),
            other => Err(format!("Unknown template type '{}'", other)),
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
