//! Radial opacity sprites drawn once per sample.
//!
//! A browser canvas produces the heatmap sprite by filling a circle far off
//! the canvas and keeping only its blurred shadow, which lands centered in
//! the sprite. The same picture is rasterized here directly: the shadow is a
//! disk of `radius` convolved with a Gaussian of sigma `blur / 2`, whose
//! radial edge profile is `0.5 * erfc((d - radius) / (sigma * sqrt(2)))`.
//! The hard circle is still painted where it lands on the sprite, which
//! only happens for small shadow distances.

use heatmap_common::config::validate_extent;
use heatmap_common::{HeatmapError, HeatmapResult};

use crate::weight::bucket_opacity;

/// Base alpha mask for one radius/blur/shadow configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StampSprite {
    radius: f64,
    blur: f64,
    shadow: f64,
    size: usize,
    alpha: Vec<u8>,
}

impl StampSprite {
    /// Rasterize the sprite.
    ///
    /// The sprite is square with side `2 * (radius + blur + 1)`, centered on
    /// `radius + blur + 1`. Pixels at least `radius + blur` from the center
    /// are transparent unless the hard circle lands on them.
    pub fn generate(radius: f64, blur: f64, shadow: f64) -> HeatmapResult<Self> {
        validate_extent("radius", radius)?;
        validate_extent("blur", blur)?;
        if !shadow.is_finite() {
            return Err(HeatmapError::invalid_parameter("shadow", "must be finite"));
        }

        let half = radius + blur + 1.0;
        let size = (2.0 * half).ceil() as usize;
        let circle_center = half - shadow;
        let reach = radius + blur;
        let sigma = blur / 2.0;

        let mut alpha = Vec::with_capacity(size * size);
        for y in 0..size {
            let py = y as f64 + 0.5;
            for x in 0..size {
                let px = x as f64 + 0.5;

                let d = ((px - half).powi(2) + (py - half).powi(2)).sqrt();
                let shadow_alpha = if d >= reach {
                    0.0
                } else if sigma <= 0.0 {
                    if d <= radius { 1.0 } else { 0.0 }
                } else {
                    0.5 * erfc((d - radius) / (sigma * std::f64::consts::SQRT_2))
                };

                let dc = ((px - circle_center).powi(2) + (py - circle_center).powi(2)).sqrt();
                let circle_alpha = if dc <= radius { 1.0 } else { 0.0 };

                // Canvas paints the shadow first, then the shape over it
                let a = circle_alpha + shadow_alpha * (1.0 - circle_alpha);
                alpha.push((a * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }

        tracing::debug!(radius, blur, shadow, size, "Generated stamp sprite");

        Ok(Self {
            radius,
            blur,
            shadow,
            size,
            alpha,
        })
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

    /// Side length in pixels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major alpha mask, `size * size` bytes.
    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
        self.alpha[y * self.size + x]
    }

    /// Bake the bucket's opacity into a drawable stamp.
    pub fn with_opacity(&self, bucket: u8) -> Stamp {
        let opacity = bucket_opacity(bucket);
        let mut pixels = vec![0u8; self.size * self.size * 4];
        for (px, &a) in pixels.chunks_exact_mut(4).zip(&self.alpha) {
            px[3] = (a as f32 * opacity).round() as u8;
        }
        Stamp {
            bucket,
            opacity,
            size: self.size,
            pixels,
        }
    }
}

/// A drawable sprite with its opacity multiplier applied.
///
/// RGB is black; only alpha carries information.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    bucket: u8,
    opacity: f32,
    size: usize,
    pixels: Vec<u8>,
}

impl Stamp {
    pub fn bucket(&self) -> u8 {
        self.bucket
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major RGBA pixels, `size * size * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y * self.size + x) * 4 + 3]
    }
}

/// Complementary error function, Abramowitz & Stegun 7.1.26 (|error| < 1.5e-7).
fn erfc(x: f64) -> f64 {
    const P: f64 = 0.327_591_1;
    const A: [f64; 5] = [
        0.254_829_592,
        -0.284_496_736,
        1.421_413_741,
        -1.453_152_027,
        1.061_405_429,
    ];

    let z = x.abs();
    let t = 1.0 / (1.0 + P * z);
    let poly = t * (A[0] + t * (A[1] + t * (A[2] + t * (A[3] + t * A[4]))));
    let tail = poly * (-z * z).exp();
    if x >= 0.0 {
        tail
    } else {
        2.0 - tail
    }
}
