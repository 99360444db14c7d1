use crate::error::{Result, TimeseriesError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_BASE_PATH: &str = "/timeseries-service/api/v1";

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_ENV: &str = "TIMESERIES_CONFIG";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Dataset entry in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Length of the dataset's time axis
    pub value_count: usize,
}

/// Known datasets and the length of their time axis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetCatalog {
    datasets: BTreeMap<String, DatasetEntry>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, dataset_id: impl Into<String>, value_count: usize) -> Self {
        self.insert(dataset_id, value_count);
        self
    }

    pub fn insert(&mut self, dataset_id: impl Into<String>, value_count: usize) {
        self.datasets.insert(dataset_id.into(), DatasetEntry { value_count });
    }

    pub fn value_count(&self, dataset_id: &str) -> Option<usize> {
        self.datasets.get(dataset_id).map(|entry| entry.value_count)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }
}

/// Layered configuration for the timeseries service
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub port: ConfigValue<u16>,
    pub base_path: ConfigValue<String>,
    pub catalog: ConfigValue<DatasetCatalog>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            port: ConfigValue::new(DEFAULT_PORT, ConfigSource::Default),
            base_path: ConfigValue::new(DEFAULT_BASE_PATH.to_string(), ConfigSource::Default),
            catalog: ConfigValue::new(DatasetCatalog::new(), ConfigSource::Default),
        }
    }

    /// Defaults, then the file named by `TIMESERIES_CONFIG` if set, then the environment
    pub fn load() -> Result<Self> {
        let config = Self::with_defaults();
        let config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => config.load_from_file(path)?,
            Err(_) => config,
        };
        Ok(config.load_from_env())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| TimeseriesError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| TimeseriesError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(port) = file_config.port {
            self.port.update(port, ConfigSource::File);
        }

        if let Some(base_path) = file_config.base_path {
            self.base_path.update(normalize_base_path(&base_path), ConfigSource::File);
        }

        if let Some(datasets) = file_config.datasets {
            self.catalog.update(datasets, ConfigSource::File);
        }

        tracing::debug!(
            path = %path.as_ref().display(),
            datasets = self.catalog.value.len(),
            "Loaded configuration file"
        );

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // TIMESERIES_PORT
        if let Ok(port_str) = env::var("TIMESERIES_PORT") {
            match port_str.parse::<u16>() {
                Ok(port) => self.port.update(port, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TIMESERIES_PORT value '{}': expected a port number",
                    port_str
                ),
            }
        }

        // TIMESERIES_BASE_PATH
        if let Ok(base_path) = env::var("TIMESERIES_BASE_PATH") {
            self.base_path.update(normalize_base_path(&base_path), ConfigSource::Environment);
        }

        self
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("port".to_string(), (self.port.value.to_string(), self.port.source));

        map.insert(
            "base_path".to_string(),
            (self.base_path.value.clone(), self.base_path.source),
        );

        map.insert(
            "datasets".to_string(),
            (self.catalog.value.ids().collect::<Vec<_>>().join(", "), self.catalog.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    port: Option<u16>,
    base_path: Option<String>,
    datasets: Option<DatasetCatalog>,
}

/// Strip trailing slashes and ensure a leading one; the root becomes ""
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
