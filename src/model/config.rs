use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::model::EvidenceProfile;

const ENV_BACKEND_URL: &str = "BACKEND_URL";
const ENV_ANALYZE_TIMEOUT: &str = "CREDIBILITY_ANALYZE_TIMEOUT_SECS";
const ENV_HEALTH_TIMEOUT: &str = "CREDIBILITY_HEALTH_TIMEOUT_SECS";
const ENV_CONFIG_PATH: &str = "CREDIBILITY_CONFIG_PATH";
const ENV_HOST: &str = "HOST";
const ENV_PORT: &str = "PORT";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_ANALYZE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 2;
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_INGEST_SOURCE: &str = "Reuters";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },
}

/// Where and how the analysis backend is reached
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base address without a trailing slash
    pub base_url: String,
    pub analyze_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            analyze_timeout: Duration::from_secs(DEFAULT_ANALYZE_TIMEOUT_SECS),
            health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBackendUrl {
            url: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme '{}'", other))),
        }
    }
}

/// Dashboard defaults, optionally overridden by the YAML config file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Profile used when a submission does not name one
    pub default_profile: EvidenceProfile,
    /// Source label used when an ingestion does not name one
    pub default_source: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_profile: EvidenceProfile::default(),
            default_source: DEFAULT_INGEST_SOURCE.to_string(),
        }
    }
}

/// Layout of the optional dashboard config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Application configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub dashboard: DashboardConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            dashboard: DashboardConfig::default(),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the process environment
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secs = |key: &str, default: u64| {
            let parsed = lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0);
            Duration::from_secs(parsed.unwrap_or(default))
        };

        let base_url = lookup(ENV_BACKEND_URL)
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let backend = BackendConfig {
            base_url,
            analyze_timeout: secs(ENV_ANALYZE_TIMEOUT, DEFAULT_ANALYZE_TIMEOUT_SECS),
            health_timeout: secs(ENV_HEALTH_TIMEOUT, DEFAULT_HEALTH_TIMEOUT_SECS),
        };

        let port = lookup(ENV_PORT)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let config_path =
            lookup(ENV_CONFIG_PATH).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let dashboard = Self::read_dashboard_file(&config_path);

        Self {
            backend,
            dashboard,
            port,
            host,
        }
    }

    /// Dashboard defaults from the optional YAML file
    ///
    /// A missing file is normal; an unreadable or invalid one is logged and
    /// ignored so the console still starts with built-in defaults.
    fn read_dashboard_file(path: &str) -> DashboardConfig {
        let path = Path::new(path);

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No dashboard config file");
                return DashboardConfig::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Dashboard config file unreadable; keeping built-in defaults");
                return DashboardConfig::default();
            }
        };

        if contents.trim().is_empty() {
            return DashboardConfig::default();
        }

        match serde_yaml::from_str::<ConfigFile>(&contents) {
            Ok(file) => {
                tracing::info!(
                    path = %path.display(),
                    profile = %file.dashboard.default_profile,
                    source = %file.dashboard.default_source,
                    "Dashboard defaults loaded"
                );
                file.dashboard
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Dashboard config file invalid; keeping built-in defaults");
                DashboardConfig::default()
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
