//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ConvertService;
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, FileSystem, ProgressReporter};

/// Container holding the application's I/O dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Step notifications
    pub progress: Arc<dyn ProgressReporter>,
}

impl ServiceContainer {
    /// Create a service container from its I/O dependencies.
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            cmd,
            progress,
        }
    }

    /// Build the conversion pipeline.
    pub fn convert_service(&self) -> ConvertService {
        ConvertService::new(
            self.fs.clone(),
            self.cmd.clone(),
            self.settings.clone(),
            self.progress.clone(),
        )
    }
}
