//! Configuration management for the NutriGraph search service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{NutriGraphError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub text_index: TextIndexConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Graph store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphConfig {
    /// SPARQL query endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Domain ontology namespace (bound to the empty prefix)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// Text index configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextIndexConfig {
    /// Directory holding the Tantivy index
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Page size used when the caller gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Largest accepted page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Number of text hits requested before post-filtering
    #[serde(default = "default_text_over_fetch")]
    pub text_over_fetch: usize,

    /// Maximum autocomplete suggestions
    #[serde(default = "default_autocomplete_limit")]
    pub autocomplete_limit: usize,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// Enrichment worker pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    /// Detail lookups running in parallel
    #[serde(default = "default_workers")]
    pub workers: usize,
}

// Default value functions
fn default_endpoint() -> String {
    "http://localhost:3030/african-middle-eastern-kg/sparql".to_string()
}

fn default_namespace() -> String {
    "http://example.org/food-ontology#".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./data/index")
}

fn default_page_size() -> usize {
    crate::core::types::DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    100
}

fn default_text_over_fetch() -> usize {
    100
}

fn default_autocomplete_limit() -> usize {
    10
}

fn default_max_query_length() -> usize {
    500
}

fn default_workers() -> usize {
    4
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            namespace: default_namespace(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl GraphConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for TextIndexConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            text_over_fetch: default_text_over_fetch(),
            autocomplete_limit: default_autocomplete_limit(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| NutriGraphError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. NUTRIGRAPH_CONFIG env var
    /// 2. XDG config file (~/.config/nutrigraph/config.toml)
    /// 3. ./nutrigraph.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("NUTRIGRAPH_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("nutrigraph.toml").exists() {
                Self::from_file("nutrigraph.toml")?
            } else {
                Self::default()
            }
        };

        // Index lives under the XDG data directory unless set explicitly
        if env::var("NUTRIGRAPH_INDEX_DIR").is_err()
            && config.text_index.index_dir == default_index_dir()
        {
            config.text_index.index_dir = xdg.index_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Graph store
        if let Ok(endpoint) = env::var("NUTRIGRAPH_ENDPOINT") {
            self.graph.endpoint = endpoint;
        }
        if let Ok(namespace) = env::var("NUTRIGRAPH_NAMESPACE") {
            self.graph.namespace = namespace;
        }
        if let Ok(timeout) = env::var("NUTRIGRAPH_REQUEST_TIMEOUT_MS") {
            if let Ok(t) = timeout.parse() {
                self.graph.request_timeout_ms = t;
            }
        }

        // Text index
        if let Ok(index_dir) = env::var("NUTRIGRAPH_INDEX_DIR") {
            self.text_index.index_dir = PathBuf::from(index_dir);
        }

        // Search
        if let Ok(size) = env::var("NUTRIGRAPH_DEFAULT_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                self.search.default_page_size = s;
            }
        }
        if let Ok(size) = env::var("NUTRIGRAPH_MAX_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                self.search.max_page_size = s;
            }
        }
        if let Ok(over_fetch) = env::var("NUTRIGRAPH_TEXT_OVER_FETCH") {
            if let Ok(n) = over_fetch.parse() {
                self.search.text_over_fetch = n;
            }
        }
        if let Ok(limit) = env::var("NUTRIGRAPH_AUTOCOMPLETE_LIMIT") {
            if let Ok(n) = limit.parse() {
                self.search.autocomplete_limit = n;
            }
        }
        if let Ok(max_query_len) = env::var("NUTRIGRAPH_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }

        // Enrichment
        if let Ok(workers) = env::var("NUTRIGRAPH_WORKERS") {
            if let Ok(w) = workers.parse() {
                self.enrichment.workers = w;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.graph.endpoint.trim().is_empty() {
            return Err(NutriGraphError::ConfigError(
                "Graph endpoint must not be empty".to_string(),
            ));
        }

        if !self.graph.namespace.ends_with('#') && !self.graph.namespace.ends_with('/') {
            return Err(NutriGraphError::ConfigError(
                "Namespace must end with '#' or '/'".to_string(),
            ));
        }

        if self.graph.request_timeout_ms == 0 {
            return Err(NutriGraphError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        if self.search.default_page_size == 0 {
            return Err(NutriGraphError::ConfigError(
                "Default page size must be non-zero".to_string(),
            ));
        }

        if self.search.default_page_size > self.search.max_page_size {
            return Err(NutriGraphError::ConfigError(
                "Default page size cannot exceed max page size".to_string(),
            ));
        }

        if self.search.text_over_fetch == 0 {
            return Err(NutriGraphError::ConfigError(
                "Text over-fetch must be non-zero".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(NutriGraphError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        if self.enrichment.workers == 0 {
            return Err(NutriGraphError::ConfigError(
                "Enrichment workers must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  Graph endpoint: {}", self.graph.endpoint);
        tracing::debug!("  Namespace: {}", self.graph.namespace);
        tracing::debug!("  Request timeout: {}ms", self.graph.request_timeout_ms);
        tracing::debug!("  Index dir: {:?}", self.text_index.index_dir);
        tracing::debug!("  Default page size: {}", self.search.default_page_size);
        tracing::debug!("  Max page size: {}", self.search.max_page_size);
        tracing::debug!("  Text over-fetch: {}", self.search.text_over_fetch);
        tracing::debug!("  Autocomplete limit: {}", self.search.autocomplete_limit);
        tracing::debug!("  Max query length: {}", self.search.max_query_length);
        tracing::debug!("  Enrichment workers: {}", self.enrichment.workers);
    }
}
