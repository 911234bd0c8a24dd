#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Validation output is one `outcome` record per document followed by one
//! `status` record. Render output is one `artifact` record per artifact.

use crate::output::{CheckStatus, ValidationOutcome};
use crate::render::RenderedArtifact;
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    pub fn format_validation(&self, outcomes: &[ValidationOutcome]) -> String {
        let mut output = String::new();

        for outcome in outcomes {
            push_record(
                &mut output,
                &Record {
                    record_type: "outcome",
                    body: outcome,
                },
            );
        }

        let count = |status: CheckStatus| outcomes.iter().filter(|o| o.status == status).count() as u64;
        let status = StatusRecord {
            record_type: "status",
            passed: outcomes.iter().all(|o| o.status == CheckStatus::Valid),
            documents: outcomes.len() as u64,
            valid: count(CheckStatus::Valid),
            invalid: count(CheckStatus::Invalid),
            errors: count(CheckStatus::Error),
        };
        push_record(&mut output, &status);

        output
    }

    pub fn format_artifacts(&self, artifacts: &[RenderedArtifact]) -> String {
        let mut output = String::new();
        for artifact in artifacts {
            push_record(
                &mut output,
                &Record {
                    record_type: "artifact",
                    body: artifact,
                },
            );
        }
        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// A typed record wrapping another serializable value
#[derive(Debug, Serialize)]
struct Record<'a, T: Serialize> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

/// Final status record for validation output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    documents: u64,
    valid: u64,
    invalid: u64,
    errors: u64,
}
