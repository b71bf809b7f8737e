//! External command execution with bounded retry

pub mod error;
pub mod retry;
pub mod subprocess;

use async_trait::async_trait;
use std::fmt;

pub use error::CommandError;
pub use retry::{execute, ExecuteOptions};
pub use subprocess::SubprocessRunner;

/// A command to run, either as a single line or as a pre-split argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Command line lexed like a POSIX shell, e.g. `git commit -m 'sync secrets'`
    Line(String),
    /// Program followed by its arguments
    Args(Vec<String>),
}

impl CommandLine {
    /// Split the command into program + arguments
    ///
    /// Fails on a line with unbalanced quotes.
    pub fn args(&self) -> Result<Vec<String>, CommandError> {
        match self {
            CommandLine::Line(line) => {
                shlex::split(line).ok_or_else(|| CommandError::Unparsable(line.clone()))
            }
            CommandLine::Args(args) => Ok(args.clone()),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLine::Line(line) => f.write_str(line),
            CommandLine::Args(args) => f.write_str(&args.join(" ")),
        }
    }
}

impl From<&str> for CommandLine {
    fn from(line: &str) -> Self {
        CommandLine::Line(line.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(line: String) -> Self {
        CommandLine::Line(line)
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(args: Vec<String>) -> Self {
        CommandLine::Args(args)
    }
}

/// Trait for running a command once - allows for different implementations
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the program `args[0]` with `args[1..]` and return its combined output
    ///
    /// `args` is never empty.
    async fn run(&self, args: &[String]) -> Result<String, CommandError>;
}
