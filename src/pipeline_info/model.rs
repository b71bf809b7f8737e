//! Pipeline info response model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property type marking a sensitive value
pub const SECURE_TYPE: &str = "SECURE";

/// Pipeline metadata as returned by `dev tekton-info` / `dev pipeline-get`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineInfo {
    /// Pipeline-level environment properties
    #[serde(default)]
    pub env_properties: Vec<PipelineProperty>,

    /// Triggers with their own properties
    #[serde(default)]
    pub triggers: Vec<PipelineTrigger>,
}

/// A `{name, type, value}` property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineProperty {
    #[serde(default)]
    pub name: String,

    /// `SECURE`, `TEXT`, `INTEGRATION`, ...
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub value: Value,
}

impl PipelineProperty {
    pub fn is_secure(&self) -> bool {
        self.kind == SECURE_TYPE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineTrigger {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub properties: Vec<PipelineProperty>,
}
