//! Contents API data model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Repository and branch a push targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub org: String,
    pub repo: String,
    pub branch: String,
}

impl RepoRef {
    pub fn new(org: impl Into<String>, repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

/// Response of `GET /repos/{org}/{repo}/git/trees/{sha}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tree {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
}

/// One entry of a tree listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Name relative to the listed directory
    pub path: String,

    /// `blob` or `tree`
    #[serde(rename = "type", default)]
    pub kind: String,

    pub sha: String,

    /// API URL of the blob
    #[serde(default)]
    pub url: String,
}

/// Response of `GET` on a blob URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobContent {
    pub sha: String,

    /// Base64 content, usually wrapped with newlines
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub encoding: String,

    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub url: String,
}

impl BlobContent {
    /// Content with the line wrapping removed
    pub fn normalized_content(&self) -> String {
        self.content.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

/// Body of `PUT /repos/{org}/{repo}/contents/{path}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PutContentRequest {
    pub message: String,
    pub branch: String,

    /// Base64 file content
    pub content: String,

    /// Hash of the blob being replaced; absent when creating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// What a push did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "body", rename_all = "lowercase")]
pub enum PushOutcome {
    /// The file did not exist; API response of the create
    Created(Value),
    /// The file differed; API response of the update
    Updated(Value),
    /// Remote content was already identical; existing blob metadata
    Unchanged(BlobContent),
}

impl PushOutcome {
    /// Whether a write was issued
    pub fn wrote(&self) -> bool {
        !matches!(self, PushOutcome::Unchanged(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            PushOutcome::Created(_) => "created",
            PushOutcome::Updated(_) => "updated",
            PushOutcome::Unchanged(_) => "unchanged",
        }
    }
}
