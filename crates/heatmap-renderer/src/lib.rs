//! Heatmap rendering for weighted point samples.
//!
//! The pipeline:
//! - Color band classification into a 256-entry lookup table
//! - Weight normalization and opacity bucketing
//! - Radial stamp sprites, cached per opacity bucket
//! - Alpha accumulation of stamps
//! - Colorization of accumulated alpha through the lookup table

pub mod colorize;
pub mod composite;
pub mod layer;
pub mod lut;
pub mod png;
pub mod stamp;
pub mod stamp_cache;
pub mod weight;

pub use colorize::colorize;
pub use composite::AccumulationBuffer;
pub use layer::{Frame, HeatmapLayer, LayerChange, LayerOptions};
pub use lut::GradientLut;
pub use stamp::{Stamp, StampSprite};
pub use stamp_cache::StampCache;
pub use weight::{bucket, normalize, Sample, WeightSource};
