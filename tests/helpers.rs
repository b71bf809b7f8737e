//! Test utilities: mock implementations of the command and contents API seams
#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use toolchain_sync::repo::{BlobContent, ContentApi, PutContentRequest, RepoError, RepoRef, TreeEntry};
use toolchain_sync::{CommandError, CommandRunner};

/// Mock runner that returns predefined results in order
///
/// Clones share their state, so a clone kept by the test sees every call.
#[derive(Clone)]
pub struct MockRunner {
    results: Arc<Vec<Result<String, String>>>,
    index: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockRunner {
    /// `Ok` is printed output, `Err` is the output of a non-zero exit
    pub fn new(results: Vec<Result<String, String>>) -> Self {
        Self {
            results: Arc::new(results),
            index: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A runner that prints `output` once
    pub fn succeeding(output: &str) -> Self {
        Self::new(vec![Ok(output.to_string())])
    }

    /// Argument lists seen so far
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, args: &[String]) -> Result<String, CommandError> {
        self.calls.lock().unwrap().push(args.to_vec());
        let idx = self.index.fetch_add(1, Ordering::SeqCst);

        match self.results.get(idx) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(output)) => Err(CommandError::Failed {
                command: args.join(" "),
                code: 1,
                output: output.clone(),
            }),
            None => Err(CommandError::Failed {
                command: args.join(" "),
                code: 1,
                output: format!("MockRunner: No result available for call {}", idx + 1),
            }),
        }
    }
}

/// A PUT seen by the mock API
#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub path: String,
    pub request: PutContentRequest,
}

/// In-memory repository exposing the contents API
#[derive(Default)]
pub struct MockContentApi {
    /// Remote files by full path
    files: Mutex<HashMap<String, Vec<u8>>>,
    puts: Mutex<Vec<RecordedPut>>,
    failing_paths: Mutex<Vec<String>>,
    tree_error: Mutex<bool>,
}

impl MockContentApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &[u8]) -> Self {
        self.files.lock().unwrap().insert(path.to_string(), content.to_vec());
        self
    }

    /// PUTs to `path` answer with 409
    pub fn failing_put(self, path: &str) -> Self {
        self.failing_paths.lock().unwrap().push(path.to_string());
        self
    }

    /// Tree listings answer with 500
    pub fn failing_tree(self) -> Self {
        *self.tree_error.lock().unwrap() = true;
        self
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn blob_sha(content: &[u8]) -> String {
        format!(
            "sha-{}-{}",
            content.len(),
            content.iter().map(|b| *b as usize).sum::<usize>()
        )
    }
}

#[async_trait]
impl ContentApi for MockContentApi {
    async fn list_directory(&self, _repo: &RepoRef, parent: &str) -> Result<Option<Vec<TreeEntry>>, RepoError> {
        if *self.tree_error.lock().unwrap() {
            return Err(RepoError::Status {
                url: format!("mock://trees/{}", parent),
                status: 500,
                body: "boom".to_string(),
            });
        }

        let prefix = if parent.is_empty() {
            String::new()
        } else {
            format!("{}/", parent)
        };
        let files = self.files.lock().unwrap();
        let entries: Vec<TreeEntry> = files
            .iter()
            .filter_map(|(path, content)| {
                let name = path.strip_prefix(&prefix)?;
                (!name.contains('/')).then(|| TreeEntry {
                    path: name.to_string(),
                    kind: "blob".to_string(),
                    sha: Self::blob_sha(content),
                    url: format!("mock://blobs/{}", path),
                })
            })
            .collect();

        // Like a 404 from the trees API
        if entries.is_empty() {
            Ok(None)
        } else {
            Ok(Some(entries))
        }
    }

    async fn get_blob(&self, url: &str) -> Result<BlobContent, RepoError> {
        let path = url.trim_start_matches("mock://blobs/");
        let content = self.file(path).ok_or_else(|| RepoError::Status {
            url: url.to_string(),
            status: 404,
            body: "Not Found".to_string(),
        })?;

        // The real API wraps base64 at 60 columns
        let encoded = STANDARD.encode(&content);
        let wrapped: Vec<String> = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();

        Ok(BlobContent {
            sha: Self::blob_sha(&content),
            content: format!("{}\n", wrapped.join("\n")),
            encoding: "base64".to_string(),
            size: content.len() as u64,
            url: url.to_string(),
        })
    }

    async fn put_content(&self, _repo: &RepoRef, path: &str, request: &PutContentRequest) -> Result<Value, RepoError> {
        self.puts.lock().unwrap().push(RecordedPut {
            path: path.to_string(),
            request: request.clone(),
        });

        if self.failing_paths.lock().unwrap().iter().any(|p| p == path) {
            return Err(RepoError::Status {
                url: format!("mock://contents/{}", path),
                status: 409,
                body: "sha mismatch".to_string(),
            });
        }

        let content = STANDARD.decode(&request.content).map_err(|e| RepoError::Decode {
            url: path.to_string(),
            message: e.to_string(),
        })?;
        let sha = Self::blob_sha(&content);
        self.files.lock().unwrap().insert(path.to_string(), content);

        Ok(json!({
            "content": {"path": path, "sha": sha},
            "commit": {"message": request.message}
        }))
    }
}

pub fn repo() -> RepoRef {
    RepoRef::new("devops", "toolchain-config", "main")
}

/// Pipeline info JSON as printed by `dev tekton-info`
pub const TEKTON_INFO: &str = r#"{
  "id": "2f1c9d6e",
  "name": "ci-pipeline",
  "envProperties": [
    {"name": "apikey", "type": "SECURE", "value": "{vault::key-protect.deploy-secret-1}"},
    {"name": "cos-key", "type": "SECURE", "value": "hard_coded"},
    {"name": "region", "type": "TEXT", "value": "eu-de"}
  ],
  "triggers": [
    {"name": "git-pr", "type": "scm", "properties": [
      {"name": "git-token", "type": "SECURE", "value": "crn:v1:bluemix:public:secrets-manager:eu-gb:a/1fdd:f0f1:secret:ea15"}
    ]}
  ]
}"#;

/// Pipeline config file as generated by toolchain export
pub const PIPELINE_CONFIG: &str = r#"name: ci-pipeline
properties:
  - name: apikey
    type: secure
    value: ""
  - name: cos-key
    type: secure
    value: ""
  - name: region
    type: text
    value: us-south
triggers:
  - name: git-pr
    type: scm
    properties:
      - name: git-token
        type: secure
        value: ""
"#;
