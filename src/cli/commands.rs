//! CLI command definitions

use crate::config::CONFIG_DIR;
use crate::pipeline_info::PipelineKind;
use clap::Args;
use std::path::PathBuf;

/// Copy secret references from a pipeline into its config file
#[derive(Debug, Args, Clone)]
pub struct SecretsCommand {
    /// Id of the Tekton pipeline
    pub pipeline_id: String,

    /// Config file generated for the pipeline
    pub file_name: PathBuf,

    /// Print the result instead of writing the file
    #[arg(long)]
    pub dry_run: bool,
}

/// Push the files of the config folder
#[derive(Debug, Args, Clone)]
pub struct PushCommand {
    /// Local folder holding the files
    #[arg(long, default_value = CONFIG_DIR)]
    pub dir: PathBuf,

    /// Folder in the repository (defaults to the local folder)
    #[arg(long)]
    pub remote_dir: Option<String>,

    /// Branch to push to (overrides $file_branch)
    #[arg(long)]
    pub branch: Option<String>,

    /// Git hosting API base URL (overrides $GIT_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Commit message (defaults to one per file)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Output per-file results in JSON format
    #[arg(long)]
    pub json: bool,
}

impl PushCommand {
    pub fn remote_dir(&self) -> String {
        self.remote_dir
            .clone()
            .unwrap_or_else(|| self.dir.to_string_lossy().replace('\\', "/"))
    }
}

/// Print pipeline info
#[derive(Debug, Args, Clone)]
pub struct InfoCommand {
    /// Id of the pipeline
    pub pipeline_id: String,

    /// Kind of pipeline
    #[arg(long, value_enum, default_value_t = PipelineKindArg::Tekton)]
    pub kind: PipelineKindArg,
}

/// Pipeline kind argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PipelineKindArg {
    Tekton,
    Classic,
}

impl From<PipelineKindArg> for PipelineKind {
    fn from(arg: PipelineKindArg) -> Self {
        match arg {
            PipelineKindArg::Tekton => PipelineKind::Tekton,
            PipelineKindArg::Classic => PipelineKind::Classic,
        }
    }
}
