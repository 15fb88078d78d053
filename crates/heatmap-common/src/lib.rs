//! Common types shared by the heatmap renderer and its front ends.

pub mod color;
pub mod config;
pub mod error;
pub mod style;

pub use color::{ColorSpec, Rgba};
pub use config::LayerConfig;
pub use error::{HeatmapError, HeatmapResult};
pub use style::{parse_bands, parse_range, BandSpec, ColorBand, DataType};
