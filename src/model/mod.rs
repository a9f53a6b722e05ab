pub mod analysis;
pub mod config;
pub mod health;
pub mod ingest;

pub use analysis::{
    AnalysisRequest, AnalysisResponse, AnalysisResult, CredibilityBand, EvidenceProfile,
    SourceRating, SourceRecord,
};
pub use config::{BackendConfig, Config, ConfigError, DashboardConfig};
pub use health::{BackendHealth, BackendInfo, HealthStatus};
pub use ingest::{IngestAck, IngestRequest};
