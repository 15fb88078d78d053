//! Alpha accumulation of stamps.
//!
//! Stands in for the host renderer's icon drawing: each stamp is anchored
//! at its center on the sample position and composited source-over, so
//! overlapping stamps build up alpha as `out = src + dst * (1 - src)`.
//! RGB stays black until colorization.

use heatmap_common::{HeatmapError, HeatmapResult};

use crate::stamp::Stamp;

/// Largest accepted frame side in pixels
pub const MAX_DIMENSION: usize = 16_384;

/// RGBA canvas that stamps are composited into.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl AccumulationBuffer {
    /// A fully transparent buffer.
    ///
    /// Fails when either side exceeds [`MAX_DIMENSION`].
    pub fn new(width: usize, height: usize) -> HeatmapResult<Self> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(HeatmapError::Render(format!(
                "frame {}x{} exceeds the {} pixel limit per side",
                width, height, MAX_DIMENSION
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn alpha_at(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y * self.width + x) * 4 + 3]
    }

    /// Composite `stamp` centered on `(x, y)`, clipping at the edges.
    ///
    /// Returns false when the stamp misses the buffer entirely or the
    /// position is not finite.
    pub fn draw(&mut self, stamp: &Stamp, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }

        // Reject far off-canvas positions before converting to integers
        let extent = stamp.size() as f64;
        if x < -extent
            || y < -extent
            || x > self.width as f64 + extent
            || y > self.height as f64 + extent
        {
            return false;
        }

        let size = stamp.size() as i64;
        // Icons are snapped to whole pixels
        let left = (x - extent / 2.0).round() as i64;
        let top = (y - extent / 2.0).round() as i64;

        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = left.saturating_add(size).min(self.width as i64);
        let y1 = top.saturating_add(size).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for dy in y0..y1 {
            let sy = (dy - top) as usize;
            for dx in x0..x1 {
                let sx = (dx - left) as usize;
                let src = stamp.alpha_at(sx, sy);
                if src == 0 {
                    continue;
                }
                let idx = (dy as usize * self.width + dx as usize) * 4 + 3;
                self.pixels[idx] = source_over(src, self.pixels[idx]);
            }
        }
        true
    }
}

/// 8-bit source-over alpha: `src + dst * (1 - src)`, rounded.
#[inline(always)]
pub fn source_over(src: u8, dst: u8) -> u8 {
    let src = src as u32;
    let dst = dst as u32;
    (src + (dst * (255 - src) + 127) / 255).min(255) as u8
}
