//! Read-compare-write push of local files through the contents API

use crate::repo::{ContentApi, PushOutcome, PutContentRequest, RepoError, RepoRef};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Per-file results of a directory push, keyed by file name
pub type PushResults = BTreeMap<String, Option<PushOutcome>>;

/// Split `a/b/c.yml` into (`a/b`, `c.yml`)
pub fn split_path(path: &str) -> Result<(&str, &str), RepoError> {
    let trimmed = path.trim_matches('/');
    let (parent, name) = match trimmed.rsplit_once('/') {
        Some((parent, name)) => (parent, name),
        None => ("", trimmed),
    };
    if name.is_empty() {
        return Err(RepoError::InvalidPath(path.to_string()));
    }
    Ok((parent, name))
}

/// Base64 as the contents API expects it
pub fn encode_content(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Commit message used when none is given
pub fn default_commit_message(path: &str, now: DateTime<Utc>) -> String {
    format!("Update {} ({})", path, now.format("%Y-%m-%d %H:%M:%S UTC"))
}

/// Push `local_path` to `path` on the target branch
///
/// Returns `None` on any failure; the error is logged and not retried.
pub async fn push_file<A>(
    api: &A,
    repo: &RepoRef,
    path: &str,
    message: &str,
    local_path: &Path,
) -> Option<PushOutcome>
where
    A: ContentApi + ?Sized,
{
    match try_push_file(api, repo, path, message, local_path).await {
        Ok(outcome) => {
            info!(path, outcome = outcome.label(), "Pushed file");
            Some(outcome)
        }
        Err(e) => {
            warn!(path, "Failed to push file: {}", e);
            None
        }
    }
}

/// Same as [`push_file`] but keeps the error
pub async fn try_push_file<A>(
    api: &A,
    repo: &RepoRef,
    path: &str,
    message: &str,
    local_path: &Path,
) -> Result<PushOutcome, RepoError>
where
    A: ContentApi + ?Sized,
{
    let (parent, name) = split_path(path)?;
    let bytes = tokio::fs::read(local_path).await.map_err(|source| RepoError::Io {
        path: local_path.display().to_string(),
        source,
    })?;
    let content = encode_content(&bytes);

    let existing = api
        .list_directory(repo, parent)
        .await?
        .and_then(|entries| {
            entries
                .into_iter()
                .find(|entry| entry.path == name && entry.kind != "tree")
        });

    let sha = match existing {
        Some(entry) => {
            let blob = api.get_blob(&entry.url).await?;
            if blob.normalized_content() == content {
                debug!(path, sha = %blob.sha, "Remote content is identical, skipping");
                return Ok(PushOutcome::Unchanged(blob));
            }
            Some(blob.sha)
        }
        None => None,
    };

    let request = PutContentRequest {
        message: message.to_string(),
        branch: repo.branch.clone(),
        content,
        sha,
    };
    let body = api.put_content(repo, path, &request).await?;

    Ok(if request.sha.is_some() {
        PushOutcome::Updated(body)
    } else {
        PushOutcome::Created(body)
    })
}

/// Names of the regular files directly inside `dir`, sorted
pub async fn list_files(dir: &Path) -> Result<Vec<String>, RepoError> {
    let io_err = |source| RepoError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        if entry.file_type().await.map_err(io_err)?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Push every file in `local_dir` to `remote_dir/<name>`
pub async fn push_directory<A>(
    api: &A,
    repo: &RepoRef,
    local_dir: &Path,
    remote_dir: &str,
    message: Option<&str>,
) -> Result<PushResults, RepoError>
where
    A: ContentApi + ?Sized,
{
    let files = list_files(local_dir).await?;
    Ok(push_listed_files(api, repo, local_dir, &files, remote_dir, message, |_, _| {}).await)
}

/// Push the named files of `local_dir`, invoking `on_file` after each one
///
/// A failed file is recorded as `None` and the remaining files are still pushed.
pub async fn push_listed_files<A, F>(
    api: &A,
    repo: &RepoRef,
    local_dir: &Path,
    files: &[String],
    remote_dir: &str,
    message: Option<&str>,
    mut on_file: F,
) -> PushResults
where
    A: ContentApi + ?Sized,
    F: FnMut(&str, Option<&PushOutcome>),
{
    info!("Pushing {} file(s) from {}", files.len(), local_dir.display());

    let remote_dir = remote_dir.trim_matches('/');
    let mut results = PushResults::new();

    for name in files {
        let remote_path = if remote_dir.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", remote_dir, name)
        };
        let message = match message {
            Some(m) => m.to_string(),
            None => default_commit_message(&remote_path, Utc::now()),
        };

        let outcome = push_file(api, repo, &remote_path, &message, &local_dir.join(name)).await;
        on_file(name, outcome.as_ref());
        results.insert(name.clone(), outcome);
    }

    results
}
