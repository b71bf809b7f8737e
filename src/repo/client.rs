//! GitHub / GitHub Enterprise contents API client

use crate::repo::{BlobContent, ContentApi, PutContentRequest, RepoError, RepoRef, Tree, TreeEntry};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("toolchain-sync/", env!("CARGO_PKG_VERSION"));

/// `api_url` with `segments` appended, each percent-encoded
fn api_endpoint<'a, I>(api_url: &str, segments: I) -> Result<Url, RepoError>
where
    I: IntoIterator<Item = &'a str>,
{
    let invalid = || RepoError::InvalidUrl(api_url.to_string());
    let mut url = Url::parse(api_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments.into_iter().filter(|s| !s.is_empty()));
    Ok(url)
}

/// `{base}/repos/{org}/{repo}/git/trees/{branch}:{parent}?ref={branch}`
pub fn tree_url(api_url: &str, repo: &RepoRef, parent: &str) -> Result<String, RepoError> {
    // separators inside the branch or parent stay path separators
    let tree = format!("{}:{}", repo.branch, parent);
    let mut url = api_endpoint(
        api_url,
        ["repos", repo.org.as_str(), repo.repo.as_str(), "git", "trees"]
            .into_iter()
            .chain(tree.split('/')),
    )?;
    url.query_pairs_mut().append_pair("ref", &repo.branch);
    Ok(url.into())
}

/// `{base}/repos/{org}/{repo}/contents/{path}`
pub fn contents_url(api_url: &str, repo: &RepoRef, path: &str) -> Result<String, RepoError> {
    let url = api_endpoint(
        api_url,
        ["repos", repo.org.as_str(), repo.repo.as_str(), "contents"]
            .into_iter()
            .chain(path.split('/')),
    )?;
    Ok(url.into())
}

/// Interpret a tree listing response; 404 means the directory is absent
pub fn tree_response(url: &str, status: StatusCode, body: String) -> Result<Option<Vec<TreeEntry>>, RepoError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let tree: Tree = json_response(url, status, body)?;
    Ok(Some(tree.tree))
}

/// Decode a 2xx response body, anything else is `RepoError::Status`
pub fn json_response<T: DeserializeOwned>(url: &str, status: StatusCode, body: String) -> Result<T, RepoError> {
    if !status.is_success() {
        return Err(RepoError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| RepoError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Token-authenticated client for the v3 REST API
#[derive(Debug, Clone)]
pub struct GitHubContentClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubContentClient {
    /// Create a client for `api_url` (e.g. `https://github.ibm.com/api/v3`)
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, RepoError> {
        let api_url = api_url.into();
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| RepoError::Http {
                url: api_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            api_url,
            token: token.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
    }

    /// Send the request; returns the status and body text
    async fn send(&self, builder: RequestBuilder, url: &str) -> Result<(StatusCode, String), RepoError> {
        let response = builder.send().await.map_err(|source| RepoError::Http {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| RepoError::Http {
            url: url.to_string(),
            source,
        })?;
        debug!(%url, %status, "Contents API response");
        Ok((status, body))
    }
}

#[async_trait]
impl ContentApi for GitHubContentClient {
    async fn list_directory(&self, repo: &RepoRef, parent: &str) -> Result<Option<Vec<TreeEntry>>, RepoError> {
        let url = tree_url(&self.api_url, repo, parent)?;
        let (status, body) = self.send(self.request(Method::GET, &url), &url).await?;
        tree_response(&url, status, body)
    }

    async fn get_blob(&self, url: &str) -> Result<BlobContent, RepoError> {
        let (status, body) = self.send(self.request(Method::GET, url), url).await?;
        json_response(url, status, body)
    }

    async fn put_content(&self, repo: &RepoRef, path: &str, request: &PutContentRequest) -> Result<Value, RepoError> {
        let url = contents_url(&self.api_url, repo, path)?;
        let (status, body) = self
            .send(self.request(Method::PUT, &url).json(request), &url)
            .await?;
        json_response(&url, status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoRef {
        RepoRef::new("devops", "toolchain-config", "main")
    }

    const TREE_URL: &str = "https://github.ibm.com/api/v3/repos/devops/toolchain-config/git/trees/main:.bluemix?ref=main";

    #[test]
    fn test_tree_url() {
        assert_eq!(
            tree_url("https://github.ibm.com/api/v3/", &repo(), ".bluemix").unwrap(),
            TREE_URL
        );
        assert_eq!(
            tree_url("https://api.github.com", &repo(), "deploy/.bluemix").unwrap(),
            "https://api.github.com/repos/devops/toolchain-config/git/trees/main:deploy/.bluemix?ref=main"
        );
    }

    #[test]
    fn test_contents_url() {
        assert_eq!(
            contents_url("https://api.github.com", &repo(), ".bluemix/pipeline.yml").unwrap(),
            "https://api.github.com/repos/devops/toolchain-config/contents/.bluemix/pipeline.yml"
        );
    }

    #[test]
    fn test_urls_encode_file_names() {
        assert_eq!(
            contents_url("https://api.github.com", &repo(), ".bluemix/my pipeline#2.yml").unwrap(),
            "https://api.github.com/repos/devops/toolchain-config/contents/.bluemix/my%20pipeline%232.yml"
        );
        assert_eq!(
            tree_url("https://api.github.com", &repo(), "config dir").unwrap(),
            "https://api.github.com/repos/devops/toolchain-config/git/trees/main:config%20dir?ref=main"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(matches!(
            contents_url("not a url", &repo(), "a.yml"),
            Err(RepoError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_tree_response_ok() {
        let body = r#"{"sha": "d3adb33f", "tree": [
            {"path": "toolchain.yml", "type": "blob", "sha": "a1", "url": "https://github.ibm.com/api/v3/blobs/a1"},
            {"path": "nested", "type": "tree", "sha": "b2"}
        ]}"#;
        let entries = tree_response(TREE_URL, StatusCode::OK, body.to_string())
            .unwrap()
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "toolchain.yml");
        assert_eq!(entries[1].kind, "tree");
    }

    #[test]
    fn test_tree_response_not_found_is_absent_directory() {
        let result = tree_response(TREE_URL, StatusCode::NOT_FOUND, r#"{"message": "Not Found"}"#.to_string());
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_tree_response_server_error() {
        let result = tree_response(TREE_URL, StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string());
        match result {
            Err(RepoError::Status { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[test]
    fn test_json_response_rejects_conflict_and_garbage() {
        let conflict: Result<Value, _> = json_response("u", StatusCode::CONFLICT, "sha mismatch".to_string());
        assert!(matches!(conflict, Err(RepoError::Status { status: 409, .. })));

        let garbage: Result<BlobContent, _> = json_response("u", StatusCode::OK, "<html>".to_string());
        assert!(matches!(garbage, Err(RepoError::Decode { .. })));
    }

    #[test]
    fn test_requests_carry_token_and_accept_headers() {
        let client = GitHubContentClient::new("https://api.github.com", "t0ken").unwrap();
        assert_eq!(client.api_url(), "https://api.github.com");

        let request = client
            .request(Method::GET, TREE_URL)
            .build()
            .unwrap();
        let headers = request.headers();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "token t0ken");
        assert_eq!(headers.get(ACCEPT).unwrap(), GITHUB_ACCEPT);
    }
}
