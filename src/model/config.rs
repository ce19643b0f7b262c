use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use url::Url;
use utoipa::ToSchema;

const ENV_CONFIG_PATH: &str = "FACTGUARD_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 50.0;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FACTCHECK_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOP_N: usize = 3;
const DEFAULT_LANGUAGE: &str = "en";

/// Historical F1 scores of the models the ensemble was first shipped with
const DEFAULT_WEIGHTS: &[(&str, f64)] = &[("DT", 0.93), ("RF", 0.97), ("XGB", 0.98)];

/// Family of a classifier behind an adapter (reporting only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    TreeEnsemble,
    Sequence,
    Transformer,
}

/// One model served behind an HTTP inference endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEndpointConfig {
    pub name: String,
    pub kind: AdapterKind,
    pub endpoint: Url,
}

/// Ensemble configuration: which models vote and how much each vote weighs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Vote weight (historical F1 score) per model name
    pub weights: BTreeMap<String, f64>,
    pub models: Vec<ModelEndpointConfig>,
    /// Used when a detect request does not carry its own threshold
    pub default_confidence_threshold: f64,
    pub request_timeout_secs: u64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|(name, weight)| (name.to_string(), *weight))
                .collect(),
            models: vec![],
            default_confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            request_timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
        }
    }
}

/// Fact-check lookup configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FactCheckConfig {
    /// Overrides `FACTCHECK_BASE_URL` and the public API URL when set
    pub base_url: Option<Url>,
    /// Number of ranked reviews returned per query
    pub top_n: usize,
    pub default_language: String,
    /// Forwarded as `pageSize` when set
    pub page_size: Option<u32>,
    pub request_timeout_secs: u64,
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            top_n: DEFAULT_TOP_N,
            default_language: DEFAULT_LANGUAGE.to_string(),
            page_size: None,
            request_timeout_secs: DEFAULT_FACTCHECK_TIMEOUT_SECS,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub ensemble: EnsembleConfig,
    #[serde(default)]
    pub factcheck: FactCheckConfig,
}

/// A config file exists but cannot be used
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub ensemble: EnsembleConfig,
    pub factcheck: FactCheckConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ensemble: EnsembleConfig::default(),
            factcheck: FactCheckConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    ///
    /// A missing or empty file means defaults; an unreadable or malformed one is an error,
    /// since the file defines which models vote.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path)?.unwrap_or_default();

        Ok(Self {
            ensemble: file.ensemble,
            factcheck: file.factcheck,
            port,
            host,
        })
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Result<Option<ConfigFile>, ConfigError> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(None);
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse_config(&contents, path).map(Some)
    }

    fn parse_config(contents: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(ConfigFile::default());
        }

        let config = serde_yaml::from_str::<ConfigFile>(contents).map_err(|source| {
            ConfigError::Parse {
                path: path.display().to_string(),
                source,
            }
        })?;

        tracing::info!(
            path = %path.display(),
            models = config.ensemble.models.len(),
            weights = config.ensemble.weights.len(),
            "Loaded configuration from file"
        );

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
