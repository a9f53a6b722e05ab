//! Claim analysis request and result types
//!
//! The backend's analyze response is a loosely specified contract: any field
//! may be missing, null, or of an unexpected type. `AnalysisResponse` mirrors
//! the wire shape with every field optional and read leniently, and
//! `AnalysisResult` is the normalized form with all defaults applied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

const DEFAULT_SCORE: u8 = 50;
const DEFAULT_CONFIDENCE_SCORE: u8 = 0;
const DEFAULT_VERDICT: &str = "UNKNOWN";
const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_SENTIMENT: &str = "Neutral";

const HIGH_CREDIBILITY_MIN: u8 = 75;
const LOW_CREDIBILITY_BELOW: u8 = 25;

/// Strictness preset controlling how the backend weighs sources
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceProfile {
    #[default]
    StrictScience,
    InstitutionalInvestigative,
    Broad,
    Custom,
}

impl fmt::Display for EvidenceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EvidenceProfile::StrictScience => "strict_science",
            EvidenceProfile::InstitutionalInvestigative => "institutional_investigative",
            EvidenceProfile::Broad => "broad",
            EvidenceProfile::Custom => "custom",
        };
        f.write_str(label)
    }
}

/// Body of `POST /analyze`
///
/// Can only be built from a claim that is non-empty after trimming.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    claim: String,
    profile: EvidenceProfile,
}

impl AnalysisRequest {
    /// Returns `None` when the claim is empty or whitespace-only
    pub fn new(claim: &str, profile: EvidenceProfile) -> Option<Self> {
        let claim = claim.trim();
        if claim.is_empty() {
            return None;
        }

        Some(Self {
            claim: claim.to_string(),
            profile,
        })
    }

    pub fn claim(&self) -> &str {
        &self.claim
    }

    pub fn profile(&self) -> EvidenceProfile {
        self.profile
    }
}

/// Rating the backend attaches to a retrieved source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SourceRating {
    Low,
    Medium,
    High,
}

impl FromStr for SourceRating {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SourceRating::Low),
            "medium" => Ok(SourceRating::Medium),
            "high" => Ok(SourceRating::High),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SourceRecord {
    pub name: String,
    pub rating: Option<SourceRating>,
}

impl SourceRecord {
    /// Read a source entry; older backends send bare strings instead of objects
    fn from_wire(value: &Value) -> Option<Self> {
        let (name, rating) = match value {
            Value::String(name) => (name.as_str(), None),
            Value::Object(fields) => {
                let name = fields.get("name").and_then(Value::as_str)?;
                let rating = fields
                    .get("rating")
                    .and_then(Value::as_str)
                    .and_then(|r| r.parse::<SourceRating>().ok());
                (name, rating)
            }
            _ => return None,
        };

        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            rating,
        })
    }
}

/// Coarse credibility band used to colour a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CredibilityBand {
    High,
    Mixed,
    Low,
}

impl CredibilityBand {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_CREDIBILITY_MIN {
            CredibilityBand::High
        } else if score < LOW_CREDIBILITY_BELOW {
            CredibilityBand::Low
        } else {
            CredibilityBand::Mixed
        }
    }
}

/// Raw analyze response as received from the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub score: Option<u8>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub verdict: Option<String>,
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub confidence_score: Option<u8>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reasoning: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub key_evidence: Vec<String>,
    #[serde(default, deserialize_with = "lenient_sources")]
    pub sources: Vec<SourceRecord>,
}

/// Normalized analysis outcome; every field is populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    /// Credibility percentage (0-100)
    pub score: u8,
    pub verdict: String,
    /// Backend confidence in its own verdict (0-100), independent of `score`
    pub confidence_score: u8,
    pub category: String,
    pub sentiment: String,
    pub reasoning: String,
    pub key_evidence: Vec<String>,
    pub sources: Vec<SourceRecord>,
    pub band: CredibilityBand,
}

impl From<AnalysisResponse> for AnalysisResult {
    fn from(response: AnalysisResponse) -> Self {
        let score = response.score.unwrap_or(DEFAULT_SCORE);

        Self {
            score,
            verdict: response
                .verdict
                .unwrap_or_else(|| DEFAULT_VERDICT.to_string()),
            confidence_score: response.confidence_score.unwrap_or(DEFAULT_CONFIDENCE_SCORE),
            category: response
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            sentiment: response
                .sentiment
                .unwrap_or_else(|| DEFAULT_SENTIMENT.to_string()),
            reasoning: response.reasoning.unwrap_or_default(),
            key_evidence: response.key_evidence,
            sources: response.sources,
            band: CredibilityBand::from_score(score),
        }
    }
}

// ============================================================================
// Lenient field readers
// ============================================================================

fn lenient_percentage<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(percentage))
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text))
}

fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(text).collect(),
        _ => Vec::new(),
    })
}

fn lenient_sources<'de, D>(deserializer: D) -> Result<Vec<SourceRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(SourceRecord::from_wire).collect(),
        _ => Vec::new(),
    })
}

/// Accepts integers, floats and numeric strings ("82", "82.4", "82%")
fn percentage(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !raw.is_finite() {
        return None;
    }

    Some(raw.round().clamp(0.0, 100.0) as u8)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
