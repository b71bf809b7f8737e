//! Runtime configuration from environment variables

use crate::repo::RepoRef;
use thiserror::Error;

/// Git hosting API used when `GIT_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://github.ibm.com/api/v3";

/// Cloud CLI used when `IBMCLOUD_CLI` is not set
pub const DEFAULT_CLOUD_CLI: &str = "ibmcloud";

/// Folder holding the files to push
pub const CONFIG_DIR: &str = ".bluemix";

/// `org/repo` the files are pushed to
pub const ORG_REPO_ENV: &str = "file_org_repo";
/// Branch the files are pushed to
pub const BRANCH_ENV: &str = "file_branch";
/// Access token for the git hosting API
pub const TOKEN_ENV: &str = "github-token";
pub const API_URL_ENV: &str = "GIT_API_URL";
pub const CLOUD_CLI_ENV: &str = "IBMCLOUD_CLI";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is not set")]
    MissingEnv(&'static str),

    #[error("Expected org/repo, got '{0}'")]
    InvalidOrgRepo(String),
}

/// Everything needed to push files to a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushConfig {
    pub repo: RepoRef,
    pub token: String,
    pub api_url: String,
}

impl PushConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };

        let (org, repo) = parse_org_repo(&require(ORG_REPO_ENV)?)?;
        let branch = require(BRANCH_ENV)?;
        let token = require(TOKEN_ENV)?;
        let api_url = lookup(API_URL_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            repo: RepoRef::new(org, repo, branch),
            token,
            api_url,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.repo.branch = branch.into();
        self
    }
}

/// Split `org/repo`
pub fn parse_org_repo(value: &str) -> Result<(String, String), ConfigError> {
    match value.trim().split_once('/') {
        Some((org, repo)) if !org.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((org.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidOrgRepo(value.to_string())),
    }
}

/// Cloud CLI executable, from `IBMCLOUD_CLI` or the default
pub fn cloud_cli_from_env() -> String {
    std::env::var(CLOUD_CLI_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CLOUD_CLI.to_string())
}
