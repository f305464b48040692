//! Configuration file structure
//!
//! ```json
//! {
//!   "http": {"host": "127.0.0.1", "port": 8080},
//!   "store": {"backend": "file", "path": "./data/restservice.json"},
//!   "id_strategy": "monotonic",
//!   "content": {
//!     "fixture_path": "./content.json",
//!     "base_url": "http://localhost:8080",
//!     "broken_references": "skip"
//!   }
//! }
//! ```
//!
//! Every section is optional and falls back to its defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregation::AggregationSettings;
use crate::http_server::HttpServerConfig;
use crate::resource::IdStrategy;

use super::errors::{CliError, CliResult};

/// Record store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Lost on restart
    Memory,
    /// JSON file at `store.path`
    #[default]
    File,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Store file (default: "./data/restservice.json")
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/restservice.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
        }
    }
}

/// Content repository and file URL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// JSON fixture to serve content from. Without one the directory is empty.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,

    /// Absolute base for generated file URLs (default: "http://localhost:8080")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory under `base_url` serving `public://` files
    /// (default: "sites/default/files")
    #[serde(default = "default_public_path")]
    pub public_path: String,

    #[serde(flatten)]
    pub aggregation: AggregationSettings,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_public_path() -> String {
    "sites/default/files".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            fixture_path: None,
            base_url: default_base_url(),
            public_path: default_public_path(),
            aggregation: AggregationSettings::default(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub id_strategy: IdStrategy,

    #[serde(default)]
    pub content: ContentConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.store.backend == StoreBackend::File && self.store.path.as_os_str().is_empty() {
            return Err(CliError::config_error(
                "store.path must be set for the file backend",
            ));
        }

        let base_url = &self.content.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::config_error(format!(
                "Invalid content.base_url: '{}'. Must start with http:// or https://.",
                base_url
            )));
        }

        if self.content.aggregation.parent_type.is_empty() {
            return Err(CliError::config_error("content.parent_type must not be empty"));
        }

        if self.content.aggregation.child_field.is_empty() {
            return Err(CliError::config_error("content.child_field must not be empty"));
        }

        Ok(())
    }
}
