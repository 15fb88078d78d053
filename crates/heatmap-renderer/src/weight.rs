//! Sample weights and their mapping to stamp opacity.

use std::fmt;
use std::sync::Arc;

use heatmap_common::DataType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of distinct opacity buckets
pub const BUCKET_COUNT: usize = 256;

/// A point sample at a screen position with arbitrary properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Horizontal screen position in pixels
    pub x: f64,

    /// Vertical screen position in pixels
    pub y: f64,

    /// Remaining properties, one of which usually carries the weight
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            properties: Map::new(),
        }
    }

    /// A sample with a numeric `weight` property.
    pub fn weighted(x: f64, y: f64, weight: f64) -> Self {
        Self::new(x, y).with_property("weight", weight)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A resolved weight accessor.
pub type WeightFn = Arc<dyn Fn(&Sample) -> Option<f64> + Send + Sync>;

/// Where a sample's weight comes from.
#[derive(Clone)]
pub enum WeightSource {
    /// Read a numeric property by name
    Field(String),

    /// Compute the weight with a caller-supplied function
    Custom(WeightFn),
}

impl WeightSource {
    pub fn field(name: impl Into<String>) -> Self {
        WeightSource::Field(name.into())
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Sample) -> Option<f64> + Send + Sync + 'static,
    {
        WeightSource::Custom(Arc::new(f))
    }

    /// Read the weight of one sample.
    ///
    /// Anything that is not a finite number reads as `None`.
    pub fn extract(&self, sample: &Sample) -> Option<f64> {
        let weight = match self {
            WeightSource::Field(name) => sample.get(name).and_then(Value::as_f64),
            WeightSource::Custom(f) => f(sample),
        };
        weight.filter(|w| w.is_finite())
    }

    /// Collapse the source into a single callable.
    pub fn into_fn(self) -> WeightFn {
        match self {
            WeightSource::Field(name) => Arc::new(move |sample: &Sample| {
                sample
                    .get(&name)
                    .and_then(Value::as_f64)
                    .filter(|w| w.is_finite())
            }),
            WeightSource::Custom(f) => {
                Arc::new(move |sample: &Sample| f(sample).filter(|w| w.is_finite()))
            }
        }
    }
}

impl Default for WeightSource {
    fn default() -> Self {
        WeightSource::Field(heatmap_common::config::DEFAULT_WEIGHT_FIELD.to_string())
    }
}

impl fmt::Debug for WeightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightSource::Field(name) => f.debug_tuple("Field").field(name).finish(),
            WeightSource::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// Map a raw weight to stamp opacity.
///
/// - no weight: full opacity
/// - `Percent`: the weight clamped to [0, 1]
/// - `Value`: `(weight - min) / (max - min)`, not clamped; a degenerate
///   domain yields full opacity
pub fn normalize(weight: Option<f64>, data_type: DataType, min: f64, max: f64) -> f64 {
    let weight = match weight {
        Some(w) if w.is_finite() => w,
        _ => return 1.0,
    };

    match data_type {
        DataType::Percent => weight.clamp(0.0, 1.0),
        DataType::Value => {
            let span = max - min;
            if !span.is_finite() || span <= 0.0 {
                return 1.0;
            }
            (weight - min) / span
        }
    }
}

/// Quantize an opacity to a stamp bucket, clamping out-of-range values.
pub fn bucket(opacity: f64) -> u8 {
    if opacity.is_nan() {
        return 0;
    }
    (opacity.clamp(0.0, 1.0) * 255.0).floor() as u8
}

/// Opacity represented by a bucket.
pub fn bucket_opacity(bucket: u8) -> f32 {
    bucket as f32 / 255.0
}
