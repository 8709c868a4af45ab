//! Domain entities: pure data structures for one conversion run.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::DomainError;

/// Token in templated files that is replaced by the library name.
pub const LIBRARY_NAME_PLACEHOLDER: &str = "LIBRARY_NAME";

/// Appended to the manifest package to form the library name.
pub const LIBRARY_SUFFIX: &str = "_library";

/// Template files (relative to the project root) that carry the placeholder.
pub const TEMPLATED_FILES: [&str; 2] = ["build.gradle", "settings.gradle"];

/// Input package to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// Path as given on the command line
    pub path: PathBuf,
    /// File name without extension, namespaces the working directories
    pub name: String,
}

impl Archive {
    /// Create an archive reference, deriving its name from the file stem.
    ///
    /// `app/sample.apk` becomes `sample`. The file itself is not checked;
    /// a missing archive surfaces later as a decompiler failure.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::InvalidArchivePath(path.clone()))?;
        Ok(Self { path, name })
    }
}

/// Name of the generated library project and its artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryName(String);

impl LibraryName {
    /// `com.example.app` -> `com.example.app_library`
    pub fn from_package(package: &str) -> Result<Self, DomainError> {
        let package = package.trim();
        if package.is_empty() {
            return Err(DomainError::EmptyPackage);
        }
        Ok(Self(format!("{package}{LIBRARY_SUFFIX}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Working directories owned by one run, namespaced by archive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Decompiler output: `<root>/tmp/<name>`
    pub extract_dir: PathBuf,
    /// Generated projects: `<root>/out/<name>`
    pub output_dir: PathBuf,
}

impl Workspace {
    pub fn new(work_root: &Path, archive: &Archive) -> Self {
        Self {
            extract_dir: work_root.join("tmp").join(&archive.name),
            output_dir: work_root.join("out").join(&archive.name),
        }
    }

    /// `<root>/out/<name>/<library>`
    pub fn project_dir(&self, library: &LibraryName) -> PathBuf {
        self.output_dir.join(library.as_str())
    }

    pub fn extracted(&self) -> ExtractedTree {
        ExtractedTree::new(&self.extract_dir)
    }
}

/// Layout of the decompiler's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTree {
    root: PathBuf,
}

impl ExtractedTree {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join("AndroidManifest.xml")
    }

    pub fn smali(&self) -> PathBuf {
        self.root.join("smali")
    }

    pub fn res(&self) -> PathBuf {
        self.root.join("res")
    }

    pub fn assets(&self) -> PathBuf {
        self.root.join("assets")
    }

    pub fn lib(&self) -> PathBuf {
        self.root.join("lib")
    }
}

/// Layout of a generated library project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    library: LibraryName,
}

impl ProjectLayout {
    pub fn new(root: PathBuf, library: LibraryName) -> Self {
        Self { root, library }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn library(&self) -> &LibraryName {
        &self.library
    }

    pub fn main_dir(&self) -> PathBuf {
        self.root.join("src").join("main")
    }

    pub fn java_dir(&self) -> PathBuf {
        self.main_dir().join("java")
    }

    pub fn res_dir(&self) -> PathBuf {
        self.main_dir().join("res")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.main_dir().join("assets")
    }

    pub fn manifest(&self) -> PathBuf {
        self.main_dir().join("AndroidManifest.xml")
    }

    pub fn libs_dir(&self) -> PathBuf {
        self.root.join("libs")
    }

    /// Files whose placeholder token gets replaced by the library name.
    pub fn templated_files(&self) -> Vec<PathBuf> {
        TEMPLATED_FILES.iter().map(|f| self.root.join(f)).collect()
    }

    /// Wrapper script generated by `gradle wrapper`.
    pub fn wrapper(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("gradlew.bat")
        } else {
            self.root.join("gradlew")
        }
    }

    /// Expected location of the built AAR (by gradle naming convention, not verified).
    pub fn artifact_path(&self) -> PathBuf {
        self.root
            .join("build")
            .join("outputs")
            .join("aar")
            .join(format!("{}-release.aar", self.library))
    }
}

/// Major pipeline steps, reported to the user before each one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Reset,
    Decompile,
    ReadManifest,
    CreateProject,
    GenerateWrapper,
    Build,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PipelineStep::Reset => "Cleaning up existing directories",
            PipelineStep::Decompile => "Decompiling APK",
            PipelineStep::ReadManifest => "Reading AndroidManifest.xml",
            PipelineStep::CreateProject => "Creating Gradle project",
            PipelineStep::GenerateWrapper => "Generating Gradle wrapper",
            PipelineStep::Build => "Building AAR",
        };
        f.write_str(msg)
    }
}

/// Replace every literal occurrence of `placeholder` in `content` with `value`.
///
/// Returns the new content and the number of replacements made.
pub fn substitute_placeholder(content: &str, placeholder: &str, value: &str) -> (String, usize) {
    if placeholder.is_empty() {
        return (content.to_string(), 0);
    }
    let count = content.matches(placeholder).count();
    (content.replace(placeholder, value), count)
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Unknown variables leave the input untouched.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
