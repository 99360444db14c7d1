//! Error types for timeseries requests

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeseriesError {
    // Request errors
    #[error("Missing required property: {name}")]
    MissingProperty { name: String },

    #[error("Invalid argument: {description}{}", .value.as_ref().map(|v| format!(" ({})", v)).unwrap_or_default())]
    InvalidArgument {
        description: String,
        value: Option<String>,
    },

    #[error("Unsupported time resolution: {resolution}")]
    UnsupportedTimeResolution { resolution: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TimeseriesError {
    pub fn missing_property(name: impl Into<String>) -> Self {
        Self::MissingProperty { name: name.into() }
    }

    pub fn invalid_argument(description: impl Into<String>) -> Self {
        Self::InvalidArgument { description: description.into(), value: None }
    }

    pub fn invalid_value(description: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidArgument {
            description: description.into(),
            value: Some(value.into()),
        }
    }

    /// Whether the error was caused by the caller's request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TimeseriesError::MissingProperty { .. } | TimeseriesError::InvalidArgument { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TimeseriesError>;
