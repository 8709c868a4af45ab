//! Command execution: turns parsed arguments into a conversion run

use std::io;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{ConvertOutcome, ConvertRequest};
use crate::cli::args::Cli;
use crate::cli::output::{self, TerminalReporter};
use crate::cli::{CliError, CliResult};
use crate::config::{Settings, SettingsOverrides};
use crate::domain::ExclusionSet;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{RealCommandRunner, RealFileSystem};
use crate::infrastructure::InfraError;

/// Execute the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    if cli.config_template {
        output::info(&Settings::template());
        return Ok(());
    }

    let settings = load_settings(cli)?;

    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let request = build_request(cli)?;
    let container = ServiceContainer::with_deps(
        settings,
        Arc::new(RealFileSystem),
        Arc::new(RealCommandRunner),
        Arc::new(TerminalReporter),
    );
    let outcome = container.convert_service().convert(&request)?;
    report(&outcome);
    Ok(())
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    let overrides = SettingsOverrides {
        work_dir: cli.work_dir.clone(),
        template_dir: cli.template_dir.clone(),
        gradle_version: cli.gradle_version.clone(),
    };
    let settings = Settings::load(Some(&cwd))?.with_overrides(&overrides);
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Translate CLI flags into a conversion request.
#[instrument(skip(cli))]
pub fn build_request(cli: &Cli) -> CliResult<ConvertRequest> {
    let input = cli
        .input
        .clone()
        .ok_or_else(|| CliError::Usage("missing required option --input <path>".into()))?;
    let exclusions = cli
        .exclude
        .as_deref()
        .map(ExclusionSet::parse)
        .unwrap_or_default();
    debug!("exclusions: {:?}", exclusions.patterns());

    Ok(ConvertRequest {
        input,
        exclusions,
        exclude_resources: cli.exclude_resources,
        skip_build: cli.no_build,
    })
}

fn report(outcome: &ConvertOutcome) {
    output::action("Project", &outcome.project_dir.display());
    output::detail(&format!(
        "sources: {} copied, {} excluded",
        outcome.report.sources.copied, outcome.report.sources.excluded
    ));
    if outcome.built {
        output::success(&format!(
            "AAR file generated: {}",
            outcome.artifact_path.display()
        ));
    } else {
        output::warning(&format!(
            "build skipped, run gradle in {} to produce {}",
            outcome.project_dir.display(),
            outcome.artifact_path.display()
        ));
    }
}
