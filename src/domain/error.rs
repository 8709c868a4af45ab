//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent invalid inputs to the conversion.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("cannot derive archive name from path: {0}")]
    InvalidArchivePath(PathBuf),

    #[error("manifest package name is empty")]
    EmptyPackage,
}
