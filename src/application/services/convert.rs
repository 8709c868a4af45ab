//! APK to AAR conversion pipeline
//!
//! Strictly sequential: reset, decompile, read manifest, materialize project,
//! generate wrapper, build. The first failure aborts the run.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::manifest::read_package;
use crate::application::services::{
    MaterializeReport, ProjectService, ToolService, WorkspaceService,
};
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    Archive, ExclusionSet, LibraryName, PipelineStep, ProjectLayout, Workspace,
};
use crate::infrastructure::traits::{CommandRunner, FileSystem, ProgressReporter};

/// One conversion as requested on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    /// APK to convert
    pub input: PathBuf,
    /// Substring patterns excluded from the source copy
    pub exclusions: ExclusionSet,
    /// Skip `res` and `assets`
    pub exclude_resources: bool,
    /// Stop after materializing the project (no gradle invocations)
    pub skip_build: bool,
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub library_name: LibraryName,
    pub project_dir: PathBuf,
    /// Expected AAR location (by naming convention, not verified)
    pub artifact_path: PathBuf,
    /// False when the build was skipped
    pub built: bool,
    pub report: MaterializeReport,
}

/// Orchestrates the whole pipeline.
pub struct ConvertService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    workspace: WorkspaceService,
    project: ProjectService,
    tools: ToolService,
    progress: Arc<dyn ProgressReporter>,
}

impl ConvertService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        settings: Arc<Settings>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            workspace: WorkspaceService::new(fs.clone()),
            project: ProjectService::new(fs.clone(), settings.clone()),
            tools: ToolService::new(cmd, settings.clone()),
            fs,
            settings,
            progress,
        }
    }

    /// Run the full conversion for one APK.
    #[instrument(skip(self, request), fields(input = %request.input.display()))]
    pub fn convert(&self, request: &ConvertRequest) -> ApplicationResult<ConvertOutcome> {
        let archive = Archive::new(&request.input)?;
        let work_root = std::path::absolute(&self.settings.work_dir)
            .with_path_context("resolve work directory", &self.settings.work_dir)?;
        let workspace = Workspace::new(&work_root, &archive);
        debug!("convert: archive={:?}, workspace={:?}", archive, workspace);

        self.progress.step(PipelineStep::Reset);
        self.workspace.reset(&workspace)?;

        self.progress.step(PipelineStep::Decompile);
        self.tools.decompile(&archive, &workspace.extract_dir)?;

        self.progress.step(PipelineStep::ReadManifest);
        let extracted = workspace.extracted();
        debug!("extracted tree: {}", extracted.root().display());
        let package = read_package(self.fs.as_ref(), &extracted.manifest())?;
        let library_name = LibraryName::from_package(&package)?;
        info!("library name: {}", library_name);

        self.progress.step(PipelineStep::CreateProject);
        let layout = ProjectLayout::new(workspace.project_dir(&library_name), library_name.clone());
        let report = self.project.materialize(
            &extracted,
            &layout,
            &request.exclusions,
            request.exclude_resources,
        )?;

        let built = if request.skip_build {
            info!("build skipped");
            false
        } else {
            self.progress.step(PipelineStep::GenerateWrapper);
            self.tools.generate_wrapper(layout.root())?;

            self.progress.step(PipelineStep::Build);
            self.tools.build(&layout)?;
            true
        };

        Ok(ConvertOutcome {
            library_name,
            project_dir: layout.root().to_path_buf(),
            artifact_path: layout.artifact_path(),
            built,
            report,
        })
    }
}
