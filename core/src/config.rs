//! Session configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working demo: the users resource at `/api/users`, three seed users, and
//! 200-700 ms of simulated latency.
//!
//! ```toml
//! collection_path = "/api/users"
//! default_section = "docs"
//!
//! [latency]
//! enabled = true
//! min_ms = 200
//! max_ms = 700
//!
//! [[seed_users]]
//! id = 1
//! name = "John Doe"
//! email = "john@example.com"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::router::Section;
use crate::types::UserRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Root of the users resource.
    pub collection_path: String,
    /// Path answered by the synthetic health payload.
    pub health_path: String,
    /// Version string reported by the health payload.
    pub version: String,
    /// Uptime string reported by the health payload.
    pub uptime: String,
    pub default_section: Section,
    pub latency: LatencyConfig,
    pub seed_users: Vec<UserRecord>,
    /// Replaces the built-in route fixtures with a JSON file.
    pub fixtures_path: Option<PathBuf>,
    /// Replaces the built-in annotation catalog with a JSON file.
    pub docs_path: Option<PathBuf>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            collection_path: "/api/users".to_string(),
            health_path: "/api/health".to_string(),
            version: "2.1.0".to_string(),
            uptime: "99.9%".to_string(),
            default_section: Section::default(),
            latency: LatencyConfig::default(),
            seed_users: default_seed_users(),
            fixtures_path: None,
            docs_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_ms: 200,
            max_ms: 700,
        }
    }
}

fn default_seed_users() -> Vec<UserRecord> {
    [
        (1, "John Doe", "john@example.com"),
        (2, "Jane Smith", "jane@example.com"),
        (3, "Bob Johnson", "bob@example.com"),
    ]
    .into_iter()
    .map(|(id, name, email)| UserRecord {
        id,
        name: name.to_string(),
        email: email.to_string(),
    })
    .collect()
}

impl ShowcaseConfig {
    /// Read and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Same settings with simulated latency switched off.
    pub fn without_latency(mut self) -> Self {
        self.latency.enabled = false;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, path) in [
            ("collection_path", &self.collection_path),
            ("health_path", &self.health_path),
        ] {
            if !path.starts_with('/') || path.len() < 2 {
                return Err(ConfigError::invalid(format!(
                    "{name} must start with '/' and name a resource, got {path:?}"
                )));
            }
            if path.ends_with('/') {
                return Err(ConfigError::invalid(format!(
                    "{name} must not end with '/', got {path:?}"
                )));
            }
        }
        if self.collection_path == self.health_path {
            return Err(ConfigError::invalid(
                "collection_path and health_path must differ",
            ));
        }
        if self.latency.min_ms > self.latency.max_ms {
            return Err(ConfigError::invalid(format!(
                "latency.min_ms ({}) exceeds latency.max_ms ({})",
                self.latency.min_ms, self.latency.max_ms
            )));
        }
        Ok(())
    }
}
