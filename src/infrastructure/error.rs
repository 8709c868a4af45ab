//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Infrastructure errors wrap application errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed: {message}")]
    Tool {
        tool: String,
        message: String,
        exit_code: Option<i32>,
    },

    #[error("cannot start {tool} ({command})")]
    ToolUnavailable {
        tool: String,
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a tool failure from its exit code (`None` = killed by signal).
    pub fn tool(tool: impl Into<String>, exit_code: Option<i32>) -> Self {
        let message = match exit_code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        Self::Tool {
            tool: tool.into(),
            message,
            exit_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_exit_code_when_creating_tool_error_then_message_contains_code() {
        let err = InfraError::tool("apktool", Some(1));
        assert_eq!(err.to_string(), "apktool failed: exit code 1");
    }

    #[test]
    fn given_signal_when_creating_tool_error_then_message_says_signal() {
        let err = InfraError::tool("gradle", None);
        assert_eq!(err.to_string(), "gradle failed: terminated by signal");
    }
}
