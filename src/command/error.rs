//! Command error types

use thiserror::Error;

/// Error types for command execution
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unbalanced quotes in command: {0}")]
    Unparsable(String),

    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' exited with code {code}")]
    Failed {
        command: String,
        code: i32,
        /// Combined stdout and stderr of the last attempt
        output: String,
    },
}

impl CommandError {
    /// Captured output, if the command ran at all
    pub fn output(&self) -> Option<&str> {
        match self {
            CommandError::Failed { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Only non-zero exits are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, CommandError::Failed { .. })
    }
}
