//! External tool invocation: apktool and gradle
//!
//! Every tool runs blocking with inherited stdio; a non-zero exit aborts the
//! pipeline. No retry, no timeout.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{Archive, ProjectLayout};
use crate::infrastructure::traits::CommandRunner;
use crate::infrastructure::InfraError;

/// Service wrapping the decompiler and build tool command lines.
pub struct ToolService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl ToolService {
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    /// `java -jar <apktool.jar> d <apk> -o <extract_dir>`
    #[instrument(skip(self))]
    pub fn decompile(&self, archive: &Archive, extract_dir: &Path) -> ApplicationResult<()> {
        let args = vec![
            "-jar".to_string(),
            path_arg(&self.settings.decompiler.jar),
            "d".to_string(),
            path_arg(&archive.path),
            "-o".to_string(),
            path_arg(extract_dir),
        ];
        self.run("apktool", &self.settings.decompiler.java, &args)
    }

    /// `gradle -p <project> wrapper --gradle-version <version>`
    #[instrument(skip(self))]
    pub fn generate_wrapper(&self, project_dir: &Path) -> ApplicationResult<()> {
        let args = vec![
            "-p".to_string(),
            path_arg(project_dir),
            "wrapper".to_string(),
            "--gradle-version".to_string(),
            self.settings.gradle.version.clone(),
        ];
        self.run("gradle wrapper", &self.settings.gradle.command, &args)
    }

    /// `<project>/gradlew -p <project> build`
    #[instrument(skip(self, layout), fields(project = %layout.root().display()))]
    pub fn build(&self, layout: &ProjectLayout) -> ApplicationResult<()> {
        let wrapper = path_arg(&layout.wrapper());
        let args = vec![
            "-p".to_string(),
            path_arg(layout.root()),
            "build".to_string(),
        ];
        self.run("gradle build", &wrapper, &args)
    }

    fn run(&self, tool: &str, command: &str, args: &[String]) -> ApplicationResult<()> {
        debug!("{}: {} {}", tool, command, args.join(" "));
        let exit = self.cmd.run_inherited(command, args).map_err(|e| {
            ApplicationError::OperationFailed {
                context: format!("run {tool}"),
                source: Box::new(InfraError::ToolUnavailable {
                    tool: tool.to_string(),
                    command: command.to_string(),
                    source: e,
                }),
            }
        })?;

        if !exit.success() {
            return Err(ApplicationError::OperationFailed {
                context: format!("run {tool}"),
                source: Box::new(InfraError::tool(tool, exit.code)),
            });
        }
        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
