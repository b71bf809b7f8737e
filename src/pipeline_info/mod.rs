//! Pipeline info fetcher - retrieves pipeline metadata through the cloud CLI

pub mod model;

pub use model::{PipelineInfo, PipelineProperty, PipelineTrigger, SECURE_TYPE};

use crate::command::{execute, CommandError, CommandLine, CommandRunner, ExecuteOptions};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Attempts made against the cloud CLI before giving up
pub const MAX_RETRIES: usize = 5;

/// Error types for pipeline info retrieval
#[derive(Debug, Error)]
pub enum PipelineInfoError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Failed to parse pipeline info: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which flavour of pipeline the identifier refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineKind {
    #[default]
    Tekton,
    Classic,
}

impl PipelineKind {
    /// `dev` subcommand that describes this kind of pipeline
    pub fn subcommand(&self) -> &'static str {
        match self {
            PipelineKind::Tekton => "tekton-info",
            PipelineKind::Classic => "pipeline-get",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::Tekton => f.write_str("tekton"),
            PipelineKind::Classic => f.write_str("classic"),
        }
    }
}

impl FromStr for PipelineKind {
    type Err = std::convert::Infallible;

    /// Anything other than "tekton" is a classic pipeline
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "tekton" {
            PipelineKind::Tekton
        } else {
            PipelineKind::Classic
        })
    }
}

/// Fetches pipeline info via `<cli> dev <subcommand> <id> --output JSON`
#[derive(Debug, Clone)]
pub struct PipelineInfoFetcher<R> {
    runner: R,
    cloud_cli: String,
    options: ExecuteOptions,
}

impl<R: CommandRunner> PipelineInfoFetcher<R> {
    /// Create a fetcher that retries `MAX_RETRIES` times without logging output
    pub fn new(runner: R, cloud_cli: impl Into<String>) -> Self {
        Self {
            runner,
            cloud_cli: cloud_cli.into(),
            options: ExecuteOptions::new().with_max_tries(MAX_RETRIES).quiet(),
        }
    }

    /// Override the retry policy
    pub fn with_retry(mut self, max_tries: usize, delay: Duration) -> Self {
        self.options = self.options.with_max_tries(max_tries).with_delay(delay);
        self
    }

    pub fn options(&self) -> &ExecuteOptions {
        &self.options
    }

    /// The command line used for a pipeline
    pub fn command_for(&self, pipeline_id: &str, kind: PipelineKind) -> CommandLine {
        CommandLine::Args(vec![
            self.cloud_cli.clone(),
            "dev".to_string(),
            kind.subcommand().to_string(),
            pipeline_id.to_string(),
            "--output".to_string(),
            "JSON".to_string(),
        ])
    }

    /// Return the raw JSON printed by the cloud CLI
    pub async fn fetch_raw(
        &self,
        pipeline_id: &str,
        kind: PipelineKind,
    ) -> Result<String, PipelineInfoError> {
        let command = self.command_for(pipeline_id, kind);
        debug!(%kind, pipeline_id, "Fetching pipeline info");

        match execute(&self.runner, &command, &self.options).await {
            Ok(output) => Ok(output),
            Err(e) => {
                if let Some(output) = e.output() {
                    error!("{}", output);
                }
                error!("Failed to run: {}", command);
                Err(e.into())
            }
        }
    }

    /// Fetch and parse pipeline info
    pub async fn fetch(
        &self,
        pipeline_id: &str,
        kind: PipelineKind,
    ) -> Result<PipelineInfo, PipelineInfoError> {
        let raw = self.fetch_raw(pipeline_id, kind).await?;
        parse_pipeline_info(&raw)
    }
}

/// Parse the JSON document printed by the cloud CLI
pub fn parse_pipeline_info(raw: &str) -> Result<PipelineInfo, PipelineInfoError> {
    Ok(serde_json::from_str(raw.trim())?)
}
