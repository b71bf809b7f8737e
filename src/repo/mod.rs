//! Remote repository content push

pub mod client;
pub mod error;
pub mod model;
pub mod push;

use async_trait::async_trait;
use serde_json::Value;

pub use client::GitHubContentClient;
pub use error::RepoError;
pub use model::{BlobContent, PushOutcome, PutContentRequest, RepoRef, Tree, TreeEntry};
pub use push::{list_files, push_directory, push_file, push_listed_files, try_push_file, PushResults};

/// The subset of the git hosting REST API used for pushing files
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// List the entries of directory `parent` on the target branch
    ///
    /// Returns `Ok(None)` when the directory does not exist on the branch.
    async fn list_directory(&self, repo: &RepoRef, parent: &str) -> Result<Option<Vec<TreeEntry>>, RepoError>;

    /// Fetch a blob by its API URL
    async fn get_blob(&self, url: &str) -> Result<BlobContent, RepoError>;

    /// Create or update the file at `path`
    async fn put_content(&self, repo: &RepoRef, path: &str, request: &PutContentRequest) -> Result<Value, RepoError>;
}
