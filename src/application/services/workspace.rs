//! Workspace reset service
//!
//! Removes the extraction and output directories of a previous run for the
//! same archive name, so decompilation always starts from a clean tree.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::Workspace;
use crate::infrastructure::traits::FileSystem;

/// Service owning the per-archive working directories.
pub struct WorkspaceService {
    fs: Arc<dyn FileSystem>,
}

impl WorkspaceService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Recursively remove extraction and output directories.
    ///
    /// Absent directories are not an error, so reset is idempotent.
    pub fn reset(&self, workspace: &Workspace) -> ApplicationResult<()> {
        self.remove_if_present(&workspace.extract_dir)?;
        self.remove_if_present(&workspace.output_dir)?;
        Ok(())
    }

    fn remove_if_present(&self, dir: &Path) -> ApplicationResult<()> {
        match self.fs.remove_dir_all(dir) {
            Ok(()) => {
                debug!("reset: removed {}", dir.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("reset: {} not present", dir.display());
                Ok(())
            }
            Err(e) => Err(e).with_path_context("remove directory", dir),
        }
    }
}
