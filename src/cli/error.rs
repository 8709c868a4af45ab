//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => infra_exit_code(e),
        }
    }

    /// Full cause chain, outermost first, joined for a single error line.
    pub fn chain_message(&self) -> String {
        let mut msg = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_msg = cause.to_string();
            if !msg.ends_with(&cause_msg) {
                msg.push_str(": ");
                msg.push_str(&cause_msg);
            }
            source = cause.source();
        }
        msg
    }
}

fn infra_exit_code(e: &InfraError) -> i32 {
    match e {
        InfraError::Io { .. } => crate::exitcode::IOERR,
        InfraError::Tool { .. } => crate::exitcode::SOFTWARE,
        InfraError::ToolUnavailable { .. } => crate::exitcode::UNAVAILABLE,
        InfraError::Application(app) => match app {
            ApplicationError::Domain(_) => crate::exitcode::USAGE,
            ApplicationError::Manifest { .. } => crate::exitcode::DATAERR,
            ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            ApplicationError::OperationFailed { source, .. } => {
                match source.downcast_ref::<InfraError>() {
                    Some(inner) => infra_exit_code(inner),
                    None => crate::exitcode::IOERR,
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use std::path::PathBuf;

    fn operation_failed(source: Box<dyn std::error::Error + Send + Sync>) -> CliError {
        CliError::from(ApplicationError::OperationFailed {
            context: "run apktool".into(),
            source,
        })
    }

    #[test]
    fn given_tool_failure_when_mapping_exit_code_then_software() {
        let err = operation_failed(Box::new(InfraError::tool("apktool", Some(1))));
        assert_eq!(err.exit_code(), crate::exitcode::SOFTWARE);
    }

    #[test]
    fn given_missing_tool_when_mapping_exit_code_then_unavailable() {
        let err = operation_failed(Box::new(InfraError::ToolUnavailable {
            tool: "apktool".into(),
            command: "java".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }));
        assert_eq!(err.exit_code(), crate::exitcode::UNAVAILABLE);
    }

    #[test]
    fn given_io_failure_when_mapping_exit_code_then_ioerr() {
        let err = operation_failed(Box::new(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )));
        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
    }

    #[test]
    fn given_manifest_error_when_mapping_exit_code_then_dataerr() {
        let err = CliError::from(ApplicationError::Manifest {
            path: PathBuf::from("AndroidManifest.xml"),
            message: "no root element".into(),
        });
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_domain_error_when_mapping_exit_code_then_usage() {
        let err = CliError::from(ApplicationError::Domain(DomainError::EmptyPackage));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn given_nested_failure_when_formatting_chain_then_includes_cause() {
        let err = operation_failed(Box::new(InfraError::tool("apktool", Some(2))));
        assert_eq!(
            err.chain_message(),
            "operation failed: run apktool: apktool failed: exit code 2"
        );
    }
}
