//! Color band classification and weight interpretation settings.
//!
//! A heatmap gradient is configured as an ordered list of bands, each
//! mapping a closed numeric interval (written as a `"min-max"` string) to
//! one solid color. Overlapping bands resolve by first match.

use serde::{Deserialize, Serialize};

use crate::color::{ColorSpec, Rgba};
use crate::error::{HeatmapError, HeatmapResult};

/// How raw sample weights are turned into stamp opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Weights are already fractions in [0, 1]
    Percent,

    /// Weights are raw values scaled against the gradient's band bounds
    Value,
}

impl std::str::FromStr for DataType {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percent" => Ok(DataType::Percent),
            "value" => Ok(DataType::Value),
            other => Err(HeatmapError::invalid_parameter(
                "data_type",
                format!("expected 'percent' or 'value', got '{}'", other),
            )),
        }
    }
}

/// A color band as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSpec {
    /// Closed interval, e.g. `"0-50"` or `"-10--5"`
    pub range: String,

    /// Color for values inside the interval
    pub color: ColorSpec,

    /// Optional label for legends
    #[serde(default)]
    pub label: Option<String>,
}

impl BandSpec {
    pub fn new(range: impl Into<String>, color: impl Into<ColorSpec>) -> Self {
        Self {
            range: range.into(),
            color: color.into(),
            label: None,
        }
    }
}

/// A parsed color band: every value in `[min, max]` maps to `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBand {
    pub min: f64,
    pub max: f64,
    pub color: Rgba,
}

impl ColorBand {
    pub fn new(min: f64, max: f64, color: Rgba) -> Self {
        Self { min, max, color }
    }

    /// Parse a configured band, failing on malformed ranges or colors.
    pub fn from_spec(spec: &BandSpec) -> HeatmapResult<Self> {
        let (min, max) = parse_range(&spec.range)?;
        let color = spec.color.resolve()?;
        Ok(Self::new(min as f64, max as f64, color))
    }

    /// Closed-interval membership.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Parse all configured bands, preserving order.
pub fn parse_bands(specs: &[BandSpec]) -> HeatmapResult<Vec<ColorBand>> {
    specs.iter().map(ColorBand::from_spec).collect()
}

/// Parse a `"min-max"` range string into two integers with `min <= max`.
///
/// A `-` at the start of either bound is a sign, so `"-10--5"` is the
/// interval from -10 to -5 and `"-5-5"` spans -5 to 5.
pub fn parse_range(range: &str) -> HeatmapResult<(i64, i64)> {
    let invalid = |message: &str| HeatmapError::InvalidRange {
        range: range.to_string(),
        message: message.to_string(),
    };

    let s = range.trim();
    let bytes = s.as_bytes();
    let sep = (1..bytes.len())
        .find(|&i| bytes[i] == b'-' && (bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b' '))
        .ok_or_else(|| invalid("expected 'min-max'"))?;

    let min = s[..sep]
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid("lower bound is not an integer"))?;
    let max = s[sep + 1..]
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid("upper bound is not an integer"))?;

    if min > max {
        return Err(invalid("lower bound exceeds upper bound"));
    }

    Ok((min, max))
}
