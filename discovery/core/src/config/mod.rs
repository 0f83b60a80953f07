//! TOML Configuration File Support
//!
//! Centralized configuration loading for cinescope, with an optional TOML
//! file at `~/.config/cinescope/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [catalog]
//! base_url = "https://api.themoviedb.org/3/"
//! api_token = "eyJhbGciOi..."
//! request_timeout_ms = 10000
//!
//! [counter_store]
//! endpoint = "https://cloud.appwrite.io/v1"
//! project_id = "cinescope"
//! database_id = "cinescope"
//! collection_id = "metrics"
//! trending_limit = 5
//!
//! [search]
//! quiet_period_ms = 700
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::DEFAULT_BASE_URL;
use crate::counter_store::{MemoryStore, DEFAULT_TRENDING_LIMIT};

/// Default debounce quiet period
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(700);

/// Quiet period of the slower variant
pub const RELAXED_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default Appwrite cloud endpoint
pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Catalog section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogToml {
    /// API root URL
    pub base_url: Option<String>,

    /// Bearer token for the metadata API
    pub api_token: Option<String>,

    /// Request timeout in milliseconds
    pub request_timeout_ms: Option<u64>,
}

/// Counter store section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterStoreToml {
    /// Appwrite endpoint URL
    pub endpoint: Option<String>,

    /// Appwrite project id (absent = in-memory store)
    pub project_id: Option<String>,

    /// Appwrite API key
    pub api_key: Option<String>,

    /// Database id
    pub database_id: Option<String>,

    /// Collection id holding the counters
    pub collection_id: Option<String>,

    /// Number of trending entries to show
    pub trending_limit: Option<usize>,
}

/// Search section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchToml {
    /// Debounce quiet period in milliseconds
    pub quiet_period_ms: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CinescopeToml {
    /// Catalog configuration section
    pub catalog: CatalogToml,

    /// Counter store configuration section
    pub counter_store: CounterStoreToml,

    /// Search configuration section
    pub search: SearchToml,
}

// =============================================================================
// Effective Configuration
// =============================================================================

/// Movie catalog settings
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// API root URL
    pub base_url: String,
    /// Bearer token, if any
    pub api_token: Option<String>,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Counter store settings
#[derive(Clone, Debug)]
pub struct CounterStoreConfig {
    /// Appwrite endpoint URL
    pub endpoint: String,
    /// Appwrite project id; `None` selects the in-memory store
    pub project_id: Option<String>,
    /// Appwrite API key
    pub api_key: Option<String>,
    /// Database id
    pub database_id: String,
    /// Collection id
    pub collection_id: String,
    /// Number of trending entries to show
    pub trending_limit: usize,
}

impl Default for CounterStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_APPWRITE_ENDPOINT.to_string(),
            project_id: None,
            api_key: None,
            database_id: "cinescope".to_string(),
            collection_id: "metrics".to_string(),
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

impl CounterStoreConfig {
    /// In-memory store sized by this configuration
    #[must_use]
    pub fn memory_store(&self) -> MemoryStore {
        MemoryStore::new(self.trending_limit)
    }
}

/// Centralized configuration for cinescope
#[derive(Clone, Debug)]
pub struct CinescopeConfig {
    /// Catalog settings
    pub catalog: CatalogConfig,

    /// Counter store settings
    pub counter_store: CounterStoreConfig,

    /// Debounce quiet period
    pub quiet_period: Duration,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for CinescopeConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            counter_store: CounterStoreConfig::default(),
            quiet_period: DEFAULT_QUIET_PERIOD,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl CinescopeConfig {
    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would make the client unusable
    ///
    /// A missing API token is deliberately not an error: every fetch then
    /// fails with the generic error state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "catalog.base_url must not be empty".to_string(),
            ));
        }
        if self.catalog.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "catalog.request_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.counter_store.trending_limit == 0 {
            return Err(ConfigError::ValidationError(
                "counter_store.trending_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/cinescope/config.toml` or
/// `~/.config/cinescope/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cinescope").join("config.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// resulting values fail validation. A missing config file is not an error.
pub fn load_config() -> Result<CinescopeConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<CinescopeConfig, ConfigError> {
    let mut config = CinescopeConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: CinescopeToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, |key| std::env::var(key).ok());

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut CinescopeConfig, toml: &CinescopeToml) {
    // Catalog settings
    if let Some(ref url) = toml.catalog.base_url {
        config.catalog.base_url.clone_from(url);
    }
    if toml.catalog.api_token.is_some() {
        config.catalog.api_token.clone_from(&toml.catalog.api_token);
    }
    if let Some(ms) = toml.catalog.request_timeout_ms {
        config.catalog.request_timeout = Duration::from_millis(ms);
    }

    // Counter store settings
    let store = &toml.counter_store;
    if let Some(ref endpoint) = store.endpoint {
        config.counter_store.endpoint.clone_from(endpoint);
    }
    if store.project_id.is_some() {
        config.counter_store.project_id.clone_from(&store.project_id);
    }
    if store.api_key.is_some() {
        config.counter_store.api_key.clone_from(&store.api_key);
    }
    if let Some(ref db) = store.database_id {
        config.counter_store.database_id.clone_from(db);
    }
    if let Some(ref coll) = store.collection_id {
        config.counter_store.collection_id.clone_from(coll);
    }
    if let Some(limit) = store.trending_limit {
        config.counter_store.trending_limit = limit;
    }

    // Search settings
    if let Some(ms) = toml.search.quiet_period_ms {
        config.quiet_period = Duration::from_millis(ms);
    }
}

/// Apply environment variable overrides to the config
///
/// `lookup` resolves a variable name; production passes `std::env::var`.
fn apply_env_config(config: &mut CinescopeConfig, lookup: impl Fn(&str) -> Option<String>) {
    // Vite builds of the web client name the token VITE_API_KEY
    if let Some(token) = lookup("TMDB_API_TOKEN").or_else(|| lookup("VITE_API_KEY")) {
        config.catalog.api_token = Some(token);
        config.source = ConfigSource::Env;
    }
    if let Some(url) = lookup("TMDB_BASE_URL") {
        config.catalog.base_url = url;
        config.source = ConfigSource::Env;
    }

    if let Some(endpoint) = lookup("APPWRITE_ENDPOINT") {
        config.counter_store.endpoint = endpoint;
        config.source = ConfigSource::Env;
    }
    if let Some(project) = lookup("APPWRITE_PROJECT_ID") {
        config.counter_store.project_id = Some(project);
        config.source = ConfigSource::Env;
    }
    if let Some(key) = lookup("APPWRITE_API_KEY") {
        config.counter_store.api_key = Some(key);
        config.source = ConfigSource::Env;
    }
    if let Some(db) = lookup("APPWRITE_DATABASE_ID") {
        config.counter_store.database_id = db;
        config.source = ConfigSource::Env;
    }
    if let Some(coll) = lookup("APPWRITE_COLLECTION_ID") {
        config.counter_store.collection_id = coll;
        config.source = ConfigSource::Env;
    }

    if let Some(quiet) = lookup("CINESCOPE_QUIET_PERIOD_MS") {
        if let Ok(ms) = quiet.parse::<u64>() {
            config.quiet_period = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %quiet, "Ignoring non-numeric CINESCOPE_QUIET_PERIOD_MS");
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Quiet period override (milliseconds)
    pub quiet_period_ms: Option<u64>,

    /// Catalog base URL override
    pub catalog_base_url: Option<String>,

    /// Force the in-memory counter store
    pub memory_store: bool,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set quiet period override
    #[must_use]
    pub fn with_quiet_period_ms(mut self, ms: u64) -> Self {
        self.quiet_period_ms = Some(ms);
        self
    }

    /// Set catalog base URL override
    #[must_use]
    pub fn with_catalog_base_url(mut self, url: String) -> Self {
        self.catalog_base_url = Some(url);
        self
    }

    /// Force the in-memory counter store
    #[must_use]
    pub fn with_memory_store(mut self, enabled: bool) -> Self {
        self.memory_store = enabled;
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut CinescopeConfig) {
        if self.quiet_period_ms.is_some() || self.catalog_base_url.is_some() || self.memory_store {
            config.source = ConfigSource::Cli;
        }

        if let Some(ms) = self.quiet_period_ms {
            config.quiet_period = Duration::from_millis(ms);
        }

        if let Some(ref url) = self.catalog_base_url {
            config.catalog.base_url.clone_from(url);
        }

        if self.memory_store {
            config.counter_store.project_id = None;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
