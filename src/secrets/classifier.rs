//! Hardcoded secret detection

use serde_json::Value;

/// Prefix of a secret stored in a vault integration
pub const VAULT_PREFIX: &str = "{vault::";

/// Prefix of a cloud resource name
pub const CRN_PREFIX: &str = "crn:";

/// Whether a secret value is a literal rather than a reference
///
/// Absent or empty values, vault references and CRNs are not hardcoded.
pub fn is_hard_coded(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => !(v.is_empty() || v.starts_with(VAULT_PREFIX) || v.starts_with(CRN_PREFIX)),
    }
}

/// [`is_hard_coded`] for a JSON value
///
/// Falsy values (`null`, `false`, zero, empty string, list or object) are
/// not hardcoded; any other non-string value is.
pub fn is_hard_coded_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => is_hard_coded(Some(s)),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
