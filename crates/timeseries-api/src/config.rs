use std::env;

use timeseries_core::config::{DatasetCatalog, LayeredConfig};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub base_path: String,
    pub cors_origin: String,
    pub catalog: DatasetCatalog,
}

impl ApiConfig {
    /// Build from layered configuration plus API-only environment variables
    pub fn from_layered(config: LayeredConfig) -> Self {
        let cors_origin = env::var("TIMESERIES_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            port: config.port.value,
            base_path: config.base_path.value,
            cors_origin,
            catalog: config.catalog.value,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
