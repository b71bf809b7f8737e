//! Subprocess runner - spawns the command and captures its output

use crate::command::{CommandError, CommandRunner};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs commands as child processes
#[derive(Debug, Clone, Default)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    /// Create a new subprocess runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SubprocessRunner {
    /// Spawn `args[0]` and wait for it
    ///
    /// stdout and stderr are both captured; the returned output is stdout
    /// followed by stderr, decoded as UTF-8 (lossily).
    ///
    /// # Errors
    /// Returns `CommandError` if:
    /// - The executable cannot be spawned
    /// - The command exits with a non-zero status
    async fn run(&self, args: &[String]) -> Result<String, CommandError> {
        let (program, rest) = args.split_first().ok_or(CommandError::Empty)?;
        debug!("Spawning {} with {} argument(s)", program, rest.len());

        let output = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: program.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            warn!("{} exited with code {}", program, code);
            return Err(CommandError::Failed {
                command: args.join(" "),
                code,
                output: combined,
            });
        }

        debug!("{} returned {} bytes of output", program, combined.len());
        Ok(combined)
    }
}
