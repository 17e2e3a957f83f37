//! Estate Config
//!
//! Startup configuration for the advisor: where the reference dataset and the
//! two pipeline artifacts live, which address to bind, and the few knobs of
//! the insights page. Values come from, in increasing precedence:
//!
//! 1. built-in defaults
//! 2. a YAML file (`--config`, or `<config dir>/estate-advisor/config.yaml`)
//! 3. `ESTATE_*` environment variables

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use estate_core::{InsightLimits, Placeholders};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_DATASET: &str = "ESTATE_DATASET";
pub const ENV_DATASET_ENTRY: &str = "ESTATE_DATASET_ENTRY";
pub const ENV_CLASSIFIER: &str = "ESTATE_CLASSIFIER";
pub const ENV_REGRESSOR: &str = "ESTATE_REGRESSOR";
pub const ENV_BIND: &str = "ESTATE_BIND";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Zip archive holding the reference CSV.
    pub dataset_path: PathBuf,
    /// Entry name of the CSV inside the archive.
    pub dataset_entry: String,
    pub classifier_path: PathBuf,
    pub regressor_path: PathBuf,
    pub bind: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    pub insights: InsightLimits,
    pub placeholders: Placeholders,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/processed/cleaned_data.zip"),
            dataset_entry: "cleaned_data.csv".to_string(),
            classifier_path: PathBuf::from("app/models/classification_pipeline.json"),
            regressor_path: PathBuf::from("app/models/regression_pipeline.json"),
            bind: "127.0.0.1:8501".to_string(),
            log_filter: None,
            insights: InsightLimits::default(),
            placeholders: Placeholders::default(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/estate-advisor/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("estate-advisor").join("config.yaml"))
    }

    /// Load from an explicit file, or from the default location when present,
    /// then apply environment overrides and validate.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file just means built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `ESTATE_*` overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_DATASET) {
            self.dataset_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_DATASET_ENTRY) {
            if v.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: ENV_DATASET_ENTRY,
                    reason: "must not be empty".into(),
                });
            }
            self.dataset_entry = v;
        }
        if let Some(v) = lookup(ENV_CLASSIFIER) {
            self.classifier_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_REGRESSOR) {
            self.regressor_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_BIND) {
            self.bind = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.dataset_entry.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "dataset_entry",
                reason: "must not be empty".into(),
            });
        }
        if self.insights.city_price_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "insights.city_price_limit",
                reason: "must be at least 1".into(),
            });
        }
        if self.insights.growth_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "insights.growth_limit",
                reason: "must be at least 1".into(),
            });
        }
        let opacity = self.insights.scatter_opacity;
        if !(opacity > 0.0 && opacity <= 1.0) {
            return Err(ConfigError::Invalid {
                key: "insights.scatter_opacity",
                reason: format!("{opacity} is not in (0, 1]"),
            });
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e| ConfigError::Invalid {
            key: "bind",
            reason: format!("'{}': {e}", self.bind),
        })
    }
}
