//! Configuration management for CiteGraph
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{APP_ENV}.toml, config/local.toml)
//! - An explicit file passed on the command line
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Dataset location
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Defaults for the analysis commands
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// Path to the article JSON array
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Default k for core decomposition
    #[serde(default = "default_k")]
    pub k: NonZeroUsize,

    /// Number of ranked entries to print
    #[serde(default = "default_top")]
    pub top: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log filter directive (e.g. "info", "citegraph_analytics=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,
}

// Default value functions
fn default_k() -> NonZeroUsize { NonZeroUsize::MIN.saturating_add(1) }
fn default_top() -> usize { 20 }
fn default_log_level() -> String { "warn".to_string() }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            top: default_top(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
        }
    }
}

impl AppConfig {
    /// Load configuration, layering an optional explicit file above the
    /// `config/` directory and below environment variables
    pub fn load_with(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder()
            // Start with defaults
            .set_default("analysis.top", default_top() as u64)?
            .set_default("observability.log_level", default_log_level())?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::with_name(path));
        }

        let config = builder
            // Load from environment variables with APP__ prefix
            // e.g., APP__ANALYSIS__TOP=50
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific file only (plus environment overrides)
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            analysis: AnalysisConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
