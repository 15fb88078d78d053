//! Heatmap layer: configuration, derived tables and frame rendering.
//!
//! The layer owns everything derived from its configuration:
//! - the gradient lookup table and the VALUE normalization bounds
//! - the base stamp sprite for the current radius/blur
//! - the per-bucket stamp cache
//!
//! Setters rebuild exactly what depends on the changed field. A gradient
//! change rebuilds the table and leaves stamps alone; a radius or blur
//! change regenerates the sprite and empties the stamp cache, leaving the
//! table alone. Every change bumps [`HeatmapLayer::revision`] and notifies
//! listeners so the host knows to render again.

use std::fmt;
use std::sync::Arc;

use heatmap_common::config::{DEFAULT_BLUR, DEFAULT_RADIUS, DEFAULT_SHADOW};
use heatmap_common::{BandSpec, DataType, HeatmapError, HeatmapResult, LayerConfig};

use crate::colorize::colorize;
use crate::composite::AccumulationBuffer;
use crate::lut::GradientLut;
use crate::png;
use crate::stamp::{Stamp, StampSprite};
use crate::stamp_cache::StampCache;
use crate::weight::{bucket, normalize, Sample, WeightFn, WeightSource};

/// What a configuration change invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerChange {
    /// Color bands changed; the lookup table was rebuilt
    Gradient,

    /// Radius or blur changed; the sprite was regenerated and stamps dropped
    Style,
}

type Listener = Box<dyn FnMut(LayerChange) + Send>;

/// Construction options for a [`HeatmapLayer`].
///
/// Gradient and data type have no defaults; leaving either unset makes
/// construction fail.
#[derive(Debug, Clone)]
pub struct LayerOptions {
    pub gradient: Option<Vec<BandSpec>>,
    pub data_type: Option<DataType>,
    pub radius: f64,
    pub blur: f64,
    pub shadow: f64,
    pub weight: WeightSource,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            gradient: None,
            data_type: None,
            radius: DEFAULT_RADIUS,
            blur: DEFAULT_BLUR,
            shadow: DEFAULT_SHADOW,
            weight: WeightSource::default(),
        }
    }
}

impl LayerOptions {
    pub fn new(gradient: Vec<BandSpec>, data_type: DataType) -> Self {
        Self {
            gradient: Some(gradient),
            data_type: Some(data_type),
            ..Self::default()
        }
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn blur(mut self, blur: f64) -> Self {
        self.blur = blur;
        self
    }

    pub fn shadow(mut self, shadow: f64) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn weight(mut self, weight: WeightSource) -> Self {
        self.weight = weight;
        self
    }
}

/// A rendered, colorized heatmap image.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn pixel_at(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Encode as an RGBA PNG.
    pub fn to_png(&self) -> HeatmapResult<Vec<u8>> {
        png::encode_rgba(&self.pixels, self.width, self.height)
    }

    /// Encode as a palette PNG when possible, RGBA otherwise.
    pub fn to_png_auto(&self) -> HeatmapResult<Vec<u8>> {
        png::encode_auto(&self.pixels, self.width, self.height)
    }
}

/// A weighted-point heatmap layer.
pub struct HeatmapLayer {
    gradient: Vec<BandSpec>,
    data_type: DataType,
    radius: f64,
    blur: f64,
    shadow: f64,
    weight_fn: WeightFn,
    lut: GradientLut,
    sprite: StampSprite,
    stamps: StampCache,
    revision: u64,
    listeners: Vec<Listener>,
}

impl HeatmapLayer {
    /// Build a layer, failing on missing or malformed configuration.
    pub fn new(options: LayerOptions) -> HeatmapResult<Self> {
        let gradient = options
            .gradient
            .ok_or_else(|| HeatmapError::MissingConfig("gradient".to_string()))?;
        let data_type = options
            .data_type
            .ok_or_else(|| HeatmapError::MissingConfig("data_type".to_string()))?;

        let lut = GradientLut::from_specs(&gradient)?;
        let sprite = StampSprite::generate(options.radius, options.blur, options.shadow)?;

        tracing::debug!(
            bands = gradient.len(),
            ?data_type,
            radius = options.radius,
            blur = options.blur,
            weight = ?options.weight,
            "Created heatmap layer"
        );

        Ok(Self {
            gradient,
            data_type,
            radius: options.radius,
            blur: options.blur,
            shadow: options.shadow,
            weight_fn: options.weight.into_fn(),
            lut,
            sprite,
            stamps: StampCache::new(),
            revision: 0,
            listeners: Vec::new(),
        })
    }

    /// Build a layer from a serialized configuration.
    pub fn from_config(config: &LayerConfig) -> HeatmapResult<Self> {
        config.validate()?;
        Self::new(LayerOptions {
            gradient: Some(config.gradient.clone()),
            data_type: Some(config.data_type),
            radius: config.radius,
            blur: config.blur,
            shadow: config.shadow,
            weight: WeightSource::field(config.weight.clone()),
        })
    }

    // === Configuration ===

    pub fn gradient(&self) -> &[BandSpec] {
        &self.gradient
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn blur(&self) -> f64 {
        self.blur
    }

    pub fn shadow(&self) -> f64 {
        self.shadow
    }

    /// Replace the color bands and rebuild the lookup table.
    ///
    /// On error the previous gradient stays in effect.
    pub fn set_gradient(&mut self, gradient: Vec<BandSpec>) -> HeatmapResult<()> {
        let lut = GradientLut::from_specs(&gradient)?;
        self.gradient = gradient;
        self.handle_gradient_changed(lut);
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) -> HeatmapResult<()> {
        if radius == self.radius {
            return Ok(());
        }
        let sprite = StampSprite::generate(radius, self.blur, self.shadow)?;
        self.radius = radius;
        self.handle_style_changed(sprite);
        Ok(())
    }

    pub fn set_blur(&mut self, blur: f64) -> HeatmapResult<()> {
        if blur == self.blur {
            return Ok(());
        }
        let sprite = StampSprite::generate(self.radius, blur, self.shadow)?;
        self.blur = blur;
        self.handle_style_changed(sprite);
        Ok(())
    }

    fn handle_gradient_changed(&mut self, lut: GradientLut) {
        self.lut = lut;
        self.changed(LayerChange::Gradient);
    }

    fn handle_style_changed(&mut self, sprite: StampSprite) {
        self.sprite = sprite;
        self.stamps.clear();
        self.changed(LayerChange::Style);
    }

    fn changed(&mut self, change: LayerChange) {
        self.revision += 1;
        tracing::debug!(?change, revision = self.revision, "Heatmap layer changed");
        for listener in &mut self.listeners {
            listener(change);
        }
    }

    /// Register a callback fired after every configuration change.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(LayerChange) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Incremented on every configuration change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // === Derived state ===

    pub fn lut(&self) -> &GradientLut {
        &self.lut
    }

    /// VALUE normalization domain taken from the bands.
    pub fn bounds(&self) -> (f64, f64) {
        self.lut.bounds()
    }

    pub fn sprite(&self) -> &StampSprite {
        &self.sprite
    }

    pub fn stamp_cache(&self) -> &StampCache {
        &self.stamps
    }

    // === Per-sample styling ===

    /// The sample's weight as read by the configured source.
    pub fn weight_of(&self, sample: &Sample) -> Option<f64> {
        (self.weight_fn)(sample)
    }

    /// Normalized stamp opacity for a sample; VALUE opacities are not clamped.
    pub fn opacity_for(&self, sample: &Sample) -> f64 {
        let (min, max) = self.lut.bounds();
        normalize(self.weight_of(sample), self.data_type, min, max)
    }

    /// Stamp bucket for a sample.
    pub fn bucket_for(&self, sample: &Sample) -> u8 {
        bucket(self.opacity_for(sample))
    }

    /// The cached stamp to draw for a sample.
    pub fn stamp_for(&mut self, sample: &Sample) -> Arc<Stamp> {
        let bucket = self.bucket_for(sample);
        self.stamps.get_or_create(bucket, &self.sprite)
    }

    // === Rendering ===

    /// Composite every sample and colorize the result.
    ///
    /// Fails only for frames larger than the accumulation buffer allows;
    /// individual samples never abort the frame.
    pub fn render(
        &mut self,
        width: usize,
        height: usize,
        samples: &[Sample],
    ) -> HeatmapResult<Frame> {
        let mut buffer = AccumulationBuffer::new(width, height)?;
        let mut drawn = 0usize;
        for sample in samples {
            let stamp = self.stamp_for(sample);
            if buffer.draw(&stamp, sample.x, sample.y) {
                drawn += 1;
            }
        }

        let mut pixels = buffer.into_pixels();
        self.colorize_frame(&mut pixels);

        tracing::trace!(
            width,
            height,
            samples = samples.len(),
            drawn,
            cached_stamps = self.stamps.len(),
            "Rendered heatmap frame"
        );

        Ok(Frame {
            width,
            height,
            pixels,
        })
    }

    /// Colorize a buffer the host composited itself.
    pub fn colorize_frame(&self, pixels: &mut [u8]) {
        colorize(pixels, &self.lut);
    }
}

impl fmt::Debug for HeatmapLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatmapLayer")
            .field("bands", &self.gradient.len())
            .field("data_type", &self.data_type)
            .field("radius", &self.radius)
            .field("blur", &self.blur)
            .field("shadow", &self.shadow)
            .field("revision", &self.revision)
            .field("cached_stamps", &self.stamps.len())
            .finish()
    }
}
