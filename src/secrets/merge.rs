//! Merge of secure pipeline values into a pipeline config document

use crate::pipeline_info::{PipelineInfo, PipelineProperty};
use crate::secrets::is_hard_coded_value;
use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value;

/// What a merge changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Properties whose config value was overwritten (`trigger/name` for trigger properties)
    pub updated: Vec<String>,

    /// Secure properties present in the config but left alone because the
    /// pipeline holds a literal value
    pub skipped_hardcoded: Vec<String>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.skipped_hardcoded.is_empty()
    }
}

/// Copy secure, non-hardcoded pipeline values into `document`
///
/// Top-level `envProperties` are matched by name against `properties`;
/// trigger properties against the `properties` of the same-named entry in
/// `triggers`. Every other part of the document is left as is.
pub fn merge_pipeline_values(document: &mut Value, info: &PipelineInfo) -> SyncReport {
    let mut report = SyncReport::default();

    if let Some(properties) = sequence_mut(document, "properties") {
        for property in &info.env_properties {
            apply_property(properties, property, None, &mut report);
        }
    }

    if let Some(config_triggers) = sequence_mut(document, "triggers") {
        for trigger in &info.triggers {
            for config_trigger in config_triggers
                .iter_mut()
                .filter(|t| name_of(t) == Some(trigger.name.as_str()))
            {
                let Some(properties) = sequence_mut(config_trigger, "properties") else {
                    continue;
                };
                for property in &trigger.properties {
                    apply_property(properties, property, Some(&trigger.name), &mut report);
                }
            }
        }
    }

    report
}

fn apply_property(
    entries: &mut [Value],
    property: &PipelineProperty,
    trigger: Option<&str>,
    report: &mut SyncReport,
) {
    if !property.is_secure() {
        return;
    }

    let mut matching = entries
        .iter_mut()
        .filter(|entry| name_of(entry) == Some(property.name.as_str()))
        .filter_map(Value::as_mapping_mut)
        .peekable();
    if matching.peek().is_none() {
        return;
    }

    let label = match trigger {
        Some(trigger) => format!("{}/{}", trigger, property.name),
        None => property.name.clone(),
    };

    if is_hard_coded_value(&property.value) {
        report.skipped_hardcoded.push(label);
        return;
    }

    let value = to_yaml(&property.value);
    for entry in matching {
        entry.insert(Value::String("value".to_string()), value.clone());
    }
    report.updated.push(label);
}

fn sequence_mut<'a>(value: &'a mut Value, key: &str) -> Option<&'a mut Vec<Value>> {
    value.get_mut(key).and_then(Value::as_sequence_mut)
}

fn name_of(entry: &Value) -> Option<&str> {
    entry.get("name").and_then(Value::as_str)
}

// References and falsy literals get this far
fn to_yaml(value: &JsonValue) -> Value {
    match value {
        JsonValue::String(s) => Value::String(s.clone()),
        other => serde_yaml::to_value(other).unwrap_or(Value::Null),
    }
}
