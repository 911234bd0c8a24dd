#![forbid(unsafe_code)]

//! Per-document validation outcomes shared by the formatters

use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

/// Result of checking one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The template group is valid
    Valid,
    /// The template group was read but failed validation
    Invalid,
    /// The document could not be read or decoded
    Error,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Valid => "valid",
            CheckStatus::Invalid => "invalid",
            CheckStatus::Error => "error",
        }
    }
}

/// Outcome of validating one template group document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_group: Option<String>,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn valid(path: PathBuf, template_group: Option<String>) -> Self {
        Self {
            path,
            template_group,
            status: CheckStatus::Valid,
            message: None,
        }
    }

    pub fn invalid(path: PathBuf, template_group: Option<String>, error: &dyn Error) -> Self {
        Self {
            path,
            template_group,
            status: CheckStatus::Invalid,
            message: Some(error_chain(error)),
        }
    }

    pub fn error(path: PathBuf, error: &dyn Error) -> Self {
        Self {
            path,
            template_group: None,
            status: CheckStatus::Error,
            message: Some(error_chain(error)),
        }
    }
}

/// Render an error and all of its sources on one line
///
/// A source whose message the chain already ends with is not repeated.
pub fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
