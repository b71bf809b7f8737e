//! toolchain-sync - keeps toolchain config in sync with live pipelines and the config repository

pub mod cli;
pub mod command;
pub mod config;
pub mod pipeline_info;
pub mod repo;
pub mod secrets;

// Re-export commonly used types
pub use command::{CommandError, CommandLine, CommandRunner, ExecuteOptions, SubprocessRunner};
pub use config::{ConfigError, PushConfig};
pub use pipeline_info::{PipelineInfo, PipelineInfoError, PipelineInfoFetcher, PipelineKind};
pub use repo::{ContentApi, GitHubContentClient, PushOutcome, RepoError, RepoRef};
pub use secrets::{is_hard_coded, SecretSynchronizer, SyncReport};
