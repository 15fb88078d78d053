//! Heatmap layer configuration.
//!
//! Configuration can be written as JSON or YAML:
//!
//! ```yaml
//! data_type: value
//! radius: 8
//! blur: 15
//! weight: magnitude
//! gradient:
//!   - { range: "0-50", color: "#00f" }
//!   - { range: "50-100", color: "#f00" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};
use crate::style::{parse_bands, BandSpec, DataType};

pub const DEFAULT_RADIUS: f64 = 8.0;
pub const DEFAULT_BLUR: f64 = 15.0;
pub const DEFAULT_SHADOW: f64 = 250.0;
pub const DEFAULT_WEIGHT_FIELD: &str = "weight";

/// Largest accepted radius or blur in pixels
pub const MAX_EXTENT: f64 = 1024.0;

/// Serializable configuration for one heatmap layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Ordered color bands; first match wins
    pub gradient: Vec<BandSpec>,

    /// Weight interpretation
    pub data_type: DataType,

    /// Stamp radius in pixels
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Blur width in pixels
    #[serde(default = "default_blur")]
    pub blur: f64,

    /// Offset of the hard circle from its shadow in pixels
    #[serde(default = "default_shadow")]
    pub shadow: f64,

    /// Sample property holding the weight
    #[serde(default = "default_weight_field")]
    pub weight: String,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

fn default_blur() -> f64 {
    DEFAULT_BLUR
}

fn default_shadow() -> f64 {
    DEFAULT_SHADOW
}

fn default_weight_field() -> String {
    DEFAULT_WEIGHT_FIELD.to_string()
}

impl LayerConfig {
    /// Create a configuration with default radius, blur, shadow and weight field.
    pub fn new(gradient: Vec<BandSpec>, data_type: DataType) -> Self {
        Self {
            gradient,
            data_type,
            radius: DEFAULT_RADIUS,
            blur: DEFAULT_BLUR,
            shadow: DEFAULT_SHADOW,
            weight: default_weight_field(),
        }
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> HeatmapResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| HeatmapError::ConfigRead(format!("{}: {}", path.display(), e)))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            Self::from_yaml(&content)?
        } else {
            Self::from_json(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            bands = config.gradient.len(),
            "Loaded heatmap layer configuration"
        );
        Ok(config)
    }

    /// Check everything a layer needs before it is built from this configuration.
    pub fn validate(&self) -> HeatmapResult<()> {
        self.check().map_err(|e| {
            tracing::warn!(error = %e, "Rejected heatmap layer configuration");
            e
        })
    }

    fn check(&self) -> HeatmapResult<()> {
        if self.gradient.is_empty() {
            return Err(HeatmapError::MissingConfig("gradient".to_string()));
        }
        parse_bands(&self.gradient)?;
        validate_extent("radius", self.radius)?;
        validate_extent("blur", self.blur)?;
        if !self.shadow.is_finite() {
            return Err(HeatmapError::invalid_parameter("shadow", "must be finite"));
        }
        if self.weight.trim().is_empty() {
            return Err(HeatmapError::invalid_parameter("weight", "field name is empty"));
        }
        Ok(())
    }
}

/// Radius and blur must be finite and within `0..=MAX_EXTENT` pixels.
pub fn validate_extent(param: &str, value: f64) -> HeatmapResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(HeatmapError::invalid_parameter(
            param,
            format!("must be a finite, non-negative number of pixels, got {}", value),
        ));
    }
    if value > MAX_EXTENT {
        return Err(HeatmapError::invalid_parameter(
            param,
            format!("must be at most {} pixels, got {}", MAX_EXTENT, value),
        ));
    }
    Ok(())
}
