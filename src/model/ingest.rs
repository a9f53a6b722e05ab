//! Ingestion request and acknowledgement types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /ingest`
#[derive(Debug, Clone, Serialize)]
pub struct IngestRequest {
    text: String,
    source: String,
}

impl IngestRequest {
    /// Returns `None` when the text is blank. A blank source falls back to `default_source`.
    pub fn new(text: &str, source: Option<&str>, default_source: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let source = source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default_source);

        Some(Self {
            text: text.to_string(),
            source: source.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Outcome of a best-effort ingestion; callers are free to ignore it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestAck {
    Indexed,
    Failed { notice: String },
}

impl IngestAck {
    pub fn is_indexed(&self) -> bool {
        matches!(self, IngestAck::Indexed)
    }
}
