use crate::personas::{PersonaProfile, RecommendationTable, defaults};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default outbound User-Agent, a current desktop browser
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default bind address of the HTTP service
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration for one crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// URL to start crawling from
    pub start_url: String,

    /// Maximum number of successfully fetched pages
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Maximum number of requests in flight; 1 keeps strict breadth-first order
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Regex patterns for URLs to include
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Default value for max_pages
pub fn default_max_pages() -> usize {
    25
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    1
}

/// Default value for request_timeout_secs
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Default value for user_agent
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl CrawlerConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            max_pages: default_max_pages(),
            max_concurrency: default_max_concurrency(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Persona profiles and recommendation tables
///
/// Built once at startup and shared read-only by every crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Personas in the order they are scored
    pub personas: Vec<PersonaProfile>,

    /// Suggestions per persona and issue
    #[serde(default)]
    pub recommendations: RecommendationTable,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            personas: defaults::personas(),
            recommendations: defaults::recommendations(),
        }
    }
}

impl ScoringConfig {
    /// Load scoring tables from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load scoring tables from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.lowercase_keywords();
        config.validate()?;
        Ok(config)
    }

    /// Page text is lowercased before scoring, so keywords must be too
    fn lowercase_keywords(&mut self) {
        for persona in &mut self.personas {
            for list in [&mut persona.positive, &mut persona.negative, &mut persona.proof] {
                for word in list.iter_mut() {
                    *word = word.to_lowercase();
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for persona in &self.personas {
            if persona.name.trim().is_empty() {
                return Err(ConfigError::Invalid("persona name is empty".to_string()));
            }
            if !names.insert(persona.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate persona: {}",
                    persona.name
                )));
            }
            if persona.keywords().any(|w| w.is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "persona {} has an empty keyword",
                    persona.name
                )));
            }
        }

        for name in self.recommendations.personas() {
            if !names.contains(name) {
                ::log::warn!("Recommendations for unknown persona {} are never used", name);
            }
        }
        Ok(())
    }
}

/// Settings for the HTTP service
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Accepted values of the `X-API-Key` header
    pub api_keys: HashSet<String>,
}

impl ServerConfig {
    /// Reads `API_KEYS` (comma-separated) and `BIND_ADDRESS` from the environment
    pub fn from_env() -> Self {
        let api_keys = std::env::var("API_KEYS")
            .map(|keys| parse_api_keys(&keys))
            .unwrap_or_default();
        let bind_address = std::env::var("BIND_ADDRESS")
            .ok()
            .filter(|address| !address.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Self {
            bind_address,
            api_keys,
        }
    }
}

/// Splits a comma-separated key list, ignoring blanks and surrounding spaces
pub fn parse_api_keys(keys: &str) -> HashSet<String> {
    keys.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
