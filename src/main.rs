//! brules CLI entry point

use business_rules::cli::render::RenderSource;
use business_rules::cli::{Command, args::Cli, catalog, identify, render, validate};
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Validate { files, format } => {
            validate::run_validate(&cli.config, &files, format, cli.color)
        }
        Command::Catalog { dir } => catalog::run_catalog(&cli.config, dir.as_deref()),
        Command::Render {
            group,
            rule_template,
            values,
            business_rule,
            format,
        } => {
            let source = match (&business_rule, &rule_template) {
                (Some(path), _) => RenderSource::BusinessRule(path.as_path()),
                (None, Some(uuid)) => RenderSource::RuleTemplate {
                    uuid: uuid.as_str(),
                    values: &values,
                },
                (None, None) => {
                    eprintln!("Error: either --rule-template or --business-rule is required");
                    process::exit(2);
                }
            };
            render::run_render(&cli.config, &group, source, format, cli.color)
        }
        Command::Slug { name } => identify::run_slug(&name),
        Command::Fingerprint { values } => identify::run_fingerprint(&values),
        Command::ArtifactId { group } => identify::run_artifact_id(&group),
    };

    process::exit(exit_code);
}
