//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/apk2aar/apk2aar.toml`
//! 3. Local config: `<dir>/apk2aar.toml` (usually the current directory)
//! 4. Environment variables: `APK2AAR_*` prefix
//! 5. Command line overrides (applied by the caller via [`Settings::with_overrides`])

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "apk2aar.toml";

/// Decompiler (apktool) invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecompilerConfig {
    /// Java launcher used to run the decompiler jar
    pub java: String,
    /// Path to the apktool jar
    pub jar: PathBuf,
}

impl Default for DecompilerConfig {
    fn default() -> Self {
        Self {
            java: "java".into(),
            jar: PathBuf::from("apktool_2.9.3.jar"),
        }
    }
}

/// Build tool (gradle) invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GradleConfig {
    /// Gradle executable used to generate the wrapper
    pub command: String,
    /// Gradle version the wrapper is pinned to
    pub version: String,
}

impl Default for GradleConfig {
    fn default() -> Self {
        Self {
            command: "gradle".into(),
            version: "7.5".into(),
        }
    }
}

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub work_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub decompiler: RawDecompilerConfig,
    pub gradle: RawGradleConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDecompilerConfig {
    pub java: Option<String>,
    pub jar: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawGradleConfig {
    pub command: Option<String>,
    pub version: Option<String>,
}

/// Unified configuration for apk2aar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root for `tmp/<apk>` and `out/<apk>` (default: current directory)
    pub work_dir: PathBuf,
    /// Gradle project skeleton copied into every generated project
    /// (`None`: the skeleton built into the binary)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// apktool settings
    pub decompiler: DecompilerConfig,
    /// gradle settings
    pub gradle: GradleConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            template_dir: None,
            decompiler: DecompilerConfig::default(),
            gradle: GradleConfig::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the loaded setting.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub work_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub gradle_version: Option<String>,
}

/// Get the XDG config directory for apk2aar.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "apk2aar").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("apk2aar.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.work_dir = PathBuf::from(expand_env_vars(&self.work_dir.to_string_lossy()));
        self.template_dir = self
            .template_dir
            .as_ref()
            .map(|dir| PathBuf::from(expand_env_vars(&dir.to_string_lossy())));
        self.decompiler.jar =
            PathBuf::from(expand_env_vars(&self.decompiler.jar.to_string_lossy()));
        self.decompiler.java = expand_env_vars(&self.decompiler.java);
        self.gradle.command = expand_env_vars(&self.gradle.command);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            work_dir: overlay
                .work_dir
                .clone()
                .unwrap_or_else(|| self.work_dir.clone()),
            template_dir: overlay
                .template_dir
                .clone()
                .or_else(|| self.template_dir.clone()),
            decompiler: DecompilerConfig {
                java: overlay
                    .decompiler
                    .java
                    .clone()
                    .unwrap_or_else(|| self.decompiler.java.clone()),
                jar: overlay
                    .decompiler
                    .jar
                    .clone()
                    .unwrap_or_else(|| self.decompiler.jar.clone()),
            },
            gradle: GradleConfig {
                command: overlay
                    .gradle
                    .command
                    .clone()
                    .unwrap_or_else(|| self.gradle.command.clone()),
                version: overlay
                    .gradle
                    .version
                    .clone()
                    .unwrap_or_else(|| self.gradle.version.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `apk2aar.toml` (usually cwd)
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply APK2AAR_* environment variables as explicit overrides.
    ///
    /// Nested keys use a double underscore: `APK2AAR_GRADLE__VERSION=8.2`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("APK2AAR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("work_dir") {
            settings.work_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("template_dir") {
            settings.template_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("decompiler.java") {
            settings.decompiler.java = val;
        }
        if let Ok(val) = config.get_string("decompiler.jar") {
            settings.decompiler.jar = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("gradle.command") {
            settings.gradle.command = val;
        }
        if let Ok(val) = config.get_string("gradle.version") {
            settings.gradle.version = val;
        }

        Ok(settings)
    }

    /// Apply command line overrides on top of loaded settings.
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(dir) = &overrides.work_dir {
            self.work_dir = dir.clone();
        }
        if let Some(dir) = &overrides.template_dir {
            self.template_dir = Some(dir.clone());
        }
        if let Some(version) = &overrides.gradle_version {
            self.gradle.version = version.clone();
        }
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# apk2aar configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/apk2aar/apk2aar.toml
#   Local:  ./apk2aar.toml
#   Env:    APK2AAR_* environment variables (APK2AAR_GRADLE__VERSION=8.2)
#   CLI:    --work-dir, --template-dir, --gradle-version

# Root for tmp/<apk> (decompiler output) and out/<apk> (generated projects)
# work_dir = "."

# Gradle project skeleton; build.gradle and settings.gradle contain LIBRARY_NAME.
# Unset: the skeleton built into apk2aar is used.
# template_dir = "~/android/aar-template"

[decompiler]
# java = "java"
# jar = "~/tools/apktool_2.9.3.jar"

[gradle]
# command = "gradle"
# version = "7.5"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
