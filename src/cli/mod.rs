//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{InfoCommand, PushCommand, SecretsCommand};
use std::ffi::OsString;

/// Keep toolchain config in sync with live pipelines and the config repository
#[derive(Debug, Parser, Clone)]
#[command(name = "toolchain-sync")]
#[command(author = "Toolchain Sync Contributors")]
#[command(version)]
#[command(about = "Sync pipeline secret references and push toolchain config to git", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Cloud CLI executable (defaults to $IBMCLOUD_CLI or "ibmcloud")
    #[arg(long, global = true)]
    pub cloud_cli: Option<String>,

    /// Attempts made against the cloud CLI
    #[arg(long, global = true, default_value_t = crate::pipeline_info::MAX_RETRIES)]
    pub retries: usize,

    /// Seconds to wait between attempts
    #[arg(long, global = true, default_value_t = 10)]
    pub retry_delay_secs: u64,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Copy secret references from a pipeline into its config file
    Secrets(SecretsCommand),

    /// Push the files of the config folder to the repository branch
    Push(PushCommand),

    /// Print the pipeline info returned by the cloud CLI
    Info(InfoCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline_info::PipelineKind;

    #[test]
    fn test_parse_secrets() {
        let cli = Cli::try_parse_from(["toolchain-sync", "secrets", "abc-123", "pipeline.yml"]).unwrap();
        match cli.command {
            Command::Secrets(cmd) => {
                assert_eq!(cmd.pipeline_id, "abc-123");
                assert_eq!(cmd.file_name.to_str(), Some("pipeline.yml"));
                assert!(!cmd.dry_run);
            }
            other => panic!("Expected secrets, got {:?}", other),
        }
        assert_eq!(cli.retries, 5);
        assert_eq!(cli.retry_delay_secs, 10);
    }

    #[test]
    fn test_parse_push_defaults() {
        let cli = Cli::try_parse_from(["toolchain-sync", "push"]).unwrap();
        match cli.command {
            Command::Push(cmd) => {
                assert_eq!(cmd.dir.to_str(), Some(".bluemix"));
                assert_eq!(cmd.remote_dir(), ".bluemix");
                assert!(cmd.message.is_none());
            }
            other => panic!("Expected push, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_info_kind() {
        let cli = Cli::try_parse_from(["toolchain-sync", "-v", "info", "abc", "--kind", "classic"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Info(cmd) => assert_eq!(PipelineKind::from(cmd.kind), PipelineKind::Classic),
            other => panic!("Expected info, got {:?}", other),
        }
    }

    #[test]
    fn test_secrets_requires_file_name() {
        assert!(Cli::try_parse_from(["toolchain-sync", "secrets", "abc"]).is_err());
    }
}
