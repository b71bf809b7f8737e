//! Secret synchronizer - pipeline info in, config file out

use crate::command::CommandRunner;
use crate::pipeline_info::{PipelineInfoFetcher, PipelineKind};
use crate::secrets::{load_document, merge_pipeline_values, render_document, write_document, IndentStyle, SyncReport};
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::Path;
use tracing::info;

/// Updates a pipeline config file with the secret references of a live pipeline
pub struct SecretSynchronizer<R> {
    fetcher: PipelineInfoFetcher<R>,
    style: IndentStyle,
}

impl<R: CommandRunner> SecretSynchronizer<R> {
    pub fn new(fetcher: PipelineInfoFetcher<R>) -> Self {
        Self {
            fetcher,
            style: IndentStyle::TOOLCHAIN,
        }
    }

    pub fn with_style(mut self, style: IndentStyle) -> Self {
        self.style = style;
        self
    }

    /// Fetch, merge and render without touching the file
    pub async fn prepare(&self, pipeline_id: &str, file: &Path) -> Result<(SyncReport, String)> {
        let (report, document) = self.merged(pipeline_id, file).await?;
        let rendered = render_document(&document, &self.style)?;
        Ok((report, rendered))
    }

    async fn merged(&self, pipeline_id: &str, file: &Path) -> Result<(SyncReport, Value)> {
        let pipeline_info = self
            .fetcher
            .fetch(pipeline_id, PipelineKind::Tekton)
            .await
            .with_context(|| format!("Failed to get pipeline info for {}", pipeline_id))?;

        let mut document = load_document(file)?;
        let report = merge_pipeline_values(&mut document, &pipeline_info);
        Ok((report, document))
    }

    /// Fetch, merge and write the result back to `file`
    pub async fn sync_file(&self, pipeline_id: &str, file: &Path) -> Result<SyncReport> {
        let (report, document) = self.merged(pipeline_id, file).await?;
        write_document(file, &document, &self.style)?;

        info!(
            file = %file.display(),
            updated = report.updated.len(),
            skipped = report.skipped_hardcoded.len(),
            "Secret references synchronized"
        );
        Ok(report)
    }
}
