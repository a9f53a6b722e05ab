use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::analysis::lenient_text;

/// Tri-state backend availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Backend root answered 200
    Online,
    /// Backend answered with any other status
    Degraded,
    /// No response at all (refused, DNS failure, timeout)
    Offline,
}

/// Optional metadata the backend reports on its root endpoint
///
/// Each field is read on its own; a field with an unexpected shape is dropped
/// without losing the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BackendInfo {
    #[serde(default, deserialize_with = "lenient_text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub files: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BackendHealth {
    pub status: HealthStatus,
    pub backend_url: String,
    pub platform: Option<String>,
    /// Number of documents the backend reports as indexed
    pub files: Option<u64>,
}

/// Non-negative integers, integer strings, or a list whose length is the count
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(Value::Array(items)) => Some(items.len() as u64),
        _ => None,
    })
}
