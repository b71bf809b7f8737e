//! Bounded retry with a fixed delay between attempts

use crate::command::{CommandError, CommandLine, CommandRunner};
use std::time::Duration;
use tracing::{info, warn};

/// Delay between attempts unless overridden
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// How a command should be executed
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Total number of attempts (0 is treated as 1)
    pub max_tries: usize,

    /// Fixed sleep between attempts
    pub delay: Duration,

    /// Log the command line before each attempt
    pub log_command: bool,

    /// Log the command output
    pub log_output: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            max_tries: 1,
            delay: DEFAULT_RETRY_DELAY,
            log_command: true,
            log_output: true,
        }
    }
}

impl ExecuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Disable command and output logging (the output may contain secrets)
    pub fn quiet(mut self) -> Self {
        self.log_command = false;
        self.log_output = false;
        self
    }
}

/// Execute a command, retrying non-zero exits up to `options.max_tries` attempts
///
/// Spawn failures are returned immediately. After the last failed attempt the
/// `CommandError::Failed` of that attempt is returned, carrying its output.
pub async fn execute<R>(
    runner: &R,
    command: &CommandLine,
    options: &ExecuteOptions,
) -> Result<String, CommandError>
where
    R: CommandRunner + ?Sized,
{
    let args = command.args()?;
    if args.is_empty() {
        return Err(CommandError::Empty);
    }

    let max_tries = options.max_tries.max(1);
    let mut failures = 0;

    loop {
        if options.log_command {
            info!(target: "command", "{}", command);
        }

        match runner.run(&args).await {
            Ok(output) => {
                if options.log_output {
                    info!(target: "command", "{}", output);
                }
                return Ok(output);
            }
            Err(err) if err.is_retryable() => {
                failures += 1;
                if failures >= max_tries {
                    if options.log_output {
                        if let Some(output) = err.output() {
                            info!(target: "command", "{}", output);
                        }
                    }
                    return Err(err);
                }
                warn!(
                    attempt = failures,
                    max_tries,
                    "Command failed, retrying in {}s",
                    options.delay.as_secs()
                );
                tokio::time::sleep(options.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
