//! Error types for heatmap configuration and rendering.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap operations.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Configuration Errors ===
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid band range '{range}': {message}")]
    InvalidRange { range: String, message: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Failed to read configuration: {0}")]
    ConfigRead(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    // === Output Errors ===
    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl HeatmapError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        HeatmapError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether the error stems from bad configuration rather than output.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HeatmapError::MissingConfig(_)
                | HeatmapError::InvalidRange { .. }
                | HeatmapError::InvalidColor(_)
                | HeatmapError::InvalidParameter { .. }
                | HeatmapError::ConfigRead(_)
                | HeatmapError::ConfigParse(_)
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::ConfigRead(err.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::ConfigParse(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for HeatmapError {
    fn from(err: serde_yaml::Error) -> Self {
        HeatmapError::ConfigParse(format!("YAML error: {}", err))
    }
}
