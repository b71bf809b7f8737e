//! Repository push error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid API URL: '{0}'")]
    InvalidUrl(String),

    #[error("Invalid repository path: '{0}'")]
    InvalidPath(String),
}
