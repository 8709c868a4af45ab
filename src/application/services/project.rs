//! Gradle project materialization
//!
//! Builds the library project from the template skeleton and the decompiled
//! tree. Each step assumes the previous one succeeded; nothing is rolled back.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{
    copy_excluding, ApplicationError, ApplicationResult, CopyStats, IoResultExt,
};
use crate::config::Settings;
use crate::domain::{
    substitute_placeholder, ExclusionSet, ExtractedTree, ProjectLayout, BUNDLED_TEMPLATE,
    LIBRARY_NAME_PLACEHOLDER,
};
use crate::infrastructure::traits::FileSystem;

/// What went into a materialized project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Files copied from the template directory or the bundled skeleton
    pub template_files: usize,
    /// Placeholder occurrences replaced across templated files
    pub substitutions: usize,
    /// Decompiled source copy (copied / excluded)
    pub sources: CopyStats,
    /// Resource files copied (`None` when resources were excluded)
    pub resources: Option<usize>,
    /// Asset files copied (`None` when excluded or absent in the extraction)
    pub assets: Option<usize>,
    /// Native library files copied (`None` when absent in the extraction)
    pub libs: Option<usize>,
}

/// Service creating the Gradle library project.
pub struct ProjectService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl ProjectService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Populate `layout` from the template and the extracted tree.
    ///
    /// Build tool invocations are not part of this step.
    pub fn materialize(
        &self,
        extracted: &ExtractedTree,
        layout: &ProjectLayout,
        exclusions: &ExclusionSet,
        exclude_resources: bool,
    ) -> ApplicationResult<MaterializeReport> {
        let mut report = MaterializeReport::default();
        let root = layout.root();

        self.fs
            .create_dir_all(root)
            .with_path_context("create project directory", root)?;

        report.template_files = self.copy_template(root)?;
        report.substitutions = self.substitute_library_name(layout)?;

        let java_dir = layout.java_dir();
        self.fs
            .create_dir_all(&java_dir)
            .with_path_context("create directory", &java_dir)?;
        if !exclude_resources {
            for dir in [layout.res_dir(), layout.assets_dir()] {
                self.fs
                    .create_dir_all(&dir)
                    .with_path_context("create directory", &dir)?;
            }
        }

        let manifest = layout.manifest();
        self.fs
            .ensure_parent(&manifest)
            .with_path_context("create directory", &manifest)?;
        self.fs
            .copy(&extracted.manifest(), &manifest)
            .with_path_context("copy manifest", &extracted.manifest())?;

        report.sources =
            copy_excluding(self.fs.as_ref(), &extracted.smali(), &java_dir, exclusions)?;
        info!(
            "sources: {} copied, {} excluded",
            report.sources.copied, report.sources.excluded
        );

        if exclude_resources {
            debug!("materialize: resources excluded");
        } else {
            report.resources =
                Some(self.copy_tree(&extracted.res(), &layout.res_dir(), "copy resources")?);
            report.assets =
                self.copy_optional_tree(&extracted.assets(), &layout.assets_dir(), "copy assets")?;
        }

        report.libs = self.copy_optional_tree(
            &extracted.lib(),
            &layout.libs_dir(),
            "copy native libraries",
        )?;

        debug!("materialize: {:?}", report);
        Ok(report)
    }

    fn copy_template(&self, project_dir: &Path) -> ApplicationResult<usize> {
        match &self.settings.template_dir {
            Some(template_dir) => self.copy_template_dir(template_dir, project_dir),
            None => self.write_bundled_template(project_dir),
        }
    }

    fn copy_template_dir(
        &self,
        template_dir: &Path,
        project_dir: &Path,
    ) -> ApplicationResult<usize> {
        if !self.fs.is_dir(template_dir) {
            return Err(ApplicationError::OperationFailed {
                context: format!("copy template: {}", template_dir.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "template directory not found",
                )),
            });
        }
        let copied = self
            .fs
            .copy_dir(template_dir, project_dir)
            .with_path_context("copy template", template_dir)?;
        debug!("copy_template: {} files from {}", copied, template_dir.display());
        Ok(copied)
    }

    fn write_bundled_template(&self, project_dir: &Path) -> ApplicationResult<usize> {
        for file in BUNDLED_TEMPLATE {
            let target = project_dir.join(file.path);
            self.fs
                .ensure_parent(&target)
                .with_path_context("create directory", &target)?;
            self.fs
                .write(&target, file.content)
                .with_path_context("write template file", &target)?;
        }
        debug!("copy_template: {} bundled files", BUNDLED_TEMPLATE.len());
        Ok(BUNDLED_TEMPLATE.len())
    }

    /// Replace the placeholder in `build.gradle` and `settings.gradle`.
    fn substitute_library_name(&self, layout: &ProjectLayout) -> ApplicationResult<usize> {
        let mut total = 0;
        for file in layout.templated_files() {
            let content = self
                .fs
                .read_to_string(&file)
                .with_path_context("read template file", &file)?;
            let (content, count) = substitute_placeholder(
                &content,
                LIBRARY_NAME_PLACEHOLDER,
                layout.library().as_str(),
            );
            self.fs
                .write(&file, &content)
                .with_path_context("write template file", &file)?;
            debug!("substitute: {} ({} replacements)", file.display(), count);
            total += count;
        }
        Ok(total)
    }

    fn copy_tree(&self, from: &Path, to: &Path, action: &str) -> ApplicationResult<usize> {
        self.fs.copy_dir(from, to).with_path_context(action, from)
    }

    /// Copy `from` if it exists; an absent subtree is skipped silently.
    fn copy_optional_tree(
        &self,
        from: &Path,
        to: &Path,
        action: &str,
    ) -> ApplicationResult<Option<usize>> {
        if !self.fs.exists(from) {
            debug!("{}: {} not present, skipping", action, from.display());
            return Ok(None);
        }
        self.copy_tree(from, to, action).map(Some)
    }
}
