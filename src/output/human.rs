#![forbid(unsafe_code)]

//! Human-readable output with optional color

use crate::output::{CheckStatus, ValidationOutcome};
use crate::render::RenderedArtifact;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write one line per outcome followed by a summary line
    pub fn write_validation(
        &self,
        out: &mut dyn WriteColor,
        outcomes: &[ValidationOutcome],
    ) -> io::Result<()> {
        for outcome in outcomes {
            let (label, color) = match outcome.status {
                CheckStatus::Valid => ("PASS", Color::Green),
                CheckStatus::Invalid => ("FAIL", Color::Red),
                CheckStatus::Error => ("ERROR", Color::Yellow),
            };
            out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
            write!(out, "{:<5}", label)?;
            out.reset()?;

            write!(out, " {}", outcome.path.display())?;
            if let Some(group) = &outcome.template_group {
                write!(out, " ({})", group)?;
            }
            writeln!(out)?;

            if let Some(message) = &outcome.message {
                writeln!(out, "      {}", message)?;
            }
        }

        let valid = outcomes
            .iter()
            .filter(|o| o.status == CheckStatus::Valid)
            .count();
        writeln!(out)?;
        writeln!(
            out,
            "{} of {} template group document(s) valid",
            valid,
            outcomes.len()
        )
    }

    /// Write each artifact under a header naming it
    ///
    /// Artifacts that declare no name get a header with their type only.
    pub fn write_artifacts(
        &self,
        out: &mut dyn WriteColor,
        artifacts: &[RenderedArtifact],
    ) -> io::Result<()> {
        for artifact in artifacts {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            match &artifact.name {
                Some(name) => write!(out, "== {} ==", name)?,
                None => write!(out, "==")?,
            }
            out.reset()?;
            writeln!(out, " ({})", artifact.template_type)?;
            writeln!(out, "{}", artifact.content)?;
        }
        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}
