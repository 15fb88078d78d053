//! Classified color lookup table for heatmap colorization.
//!
//! The table holds 256 RGBA texels laid out as a flat byte array, so texel
//! `i` lives at bytes `4 * i .. 4 * i + 4`. Slot `i` samples the band domain
//! at `min + i * (max - min) / 255` and takes the color of the first band
//! containing that value. There is no blending between bands: the ramp is a
//! step function.

use heatmap_common::style::parse_bands;
use heatmap_common::{BandSpec, ColorBand, HeatmapError, HeatmapResult, Rgba};

/// Number of texels in the table
pub const LUT_SIZE: usize = 256;

/// Number of bytes in the flat table
pub const LUT_BYTES: usize = LUT_SIZE * 4;

/// Color used for values no band covers
pub const FALLBACK_COLOR: Rgba = Rgba::WHITE;

/// A 256-entry color table built from classified bands.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientLut {
    table: [u8; LUT_BYTES],
    bands: Vec<ColorBand>,
    min: f64,
    max: f64,
}

impl GradientLut {
    /// Build the table from parsed bands.
    ///
    /// Fails when the band list is empty or a band has non-finite or
    /// inverted bounds.
    pub fn build(bands: &[ColorBand]) -> HeatmapResult<Self> {
        if bands.is_empty() {
            return Err(HeatmapError::MissingConfig("gradient".to_string()));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for band in bands {
            if !band.min.is_finite() || !band.max.is_finite() || band.min > band.max {
                return Err(HeatmapError::InvalidRange {
                    range: format!("{}-{}", band.min, band.max),
                    message: "bounds must be finite with min <= max".to_string(),
                });
            }
            min = min.min(band.min);
            max = max.max(band.max);
        }

        let span = max - min;
        let mut table = [0u8; LUT_BYTES];
        for (i, texel) in table.chunks_exact_mut(4).enumerate() {
            // Multiply before dividing so the last slot lands exactly on `max`
            let value = min + (i as f64 * span) / (LUT_SIZE - 1) as f64;
            texel.copy_from_slice(&first_match(bands, value).to_array());
        }

        tracing::debug!(bands = bands.len(), min, max, "Built gradient lookup table");

        Ok(Self {
            table,
            bands: bands.to_vec(),
            min,
            max,
        })
    }

    /// Parse configured bands and build the table.
    pub fn from_specs(specs: &[BandSpec]) -> HeatmapResult<Self> {
        Self::build(&parse_bands(specs)?)
    }

    /// The flat RGBA table.
    pub fn bytes(&self) -> &[u8; LUT_BYTES] {
        &self.table
    }

    /// Texel at slot `index`.
    pub fn color_at(&self, index: u8) -> Rgba {
        let i = index as usize * 4;
        Rgba::new(
            self.table[i],
            self.table[i + 1],
            self.table[i + 2],
            self.table[i + 3],
        )
    }

    /// First-match band color for an arbitrary value, or the fallback.
    pub fn classify(&self, value: f64) -> Rgba {
        first_match(&self.bands, value)
    }

    /// `(min, max)` across all bands; the VALUE normalization domain.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn bands(&self) -> &[ColorBand] {
        &self.bands
    }
}

fn first_match(bands: &[ColorBand], value: f64) -> Rgba {
    bands
        .iter()
        .find(|band| band.contains(value))
        .map(|band| band.color)
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(min: f64, max: f64, color: Rgba) -> ColorBand {
        ColorBand::new(min, max, color)
    }

    #[test]
    fn test_single_band_fills_table() {
        let red = Rgba::opaque(255, 0, 0);
        let lut = GradientLut::build(&[band(0.0, 1.0, red)]).unwrap();
        for i in 0..=255u8 {
            assert_eq!(lut.color_at(i), red);
        }
    }

    #[test]
    fn test_degenerate_domain() {
        let green = Rgba::opaque(0, 255, 0);
        let lut = GradientLut::build(&[band(5.0, 5.0, green)]).unwrap();
        assert_eq!(lut.bounds(), (5.0, 5.0));
        assert_eq!(lut.color_at(0), green);
        assert_eq!(lut.color_at(255), green);
    }

    #[test]
    fn test_empty_bands_rejected() {
        assert!(matches!(
            GradientLut::build(&[]),
            Err(HeatmapError::MissingConfig(_))
        ));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let result = GradientLut::build(&[band(10.0, 0.0, Rgba::BLACK)]);
        assert!(matches!(result, Err(HeatmapError::InvalidRange { .. })));
    }

    #[test]
    fn test_flat_layout() {
        let blue = Rgba::opaque(0, 0, 255);
        let lut = GradientLut::build(&[band(0.0, 10.0, blue)]).unwrap();
        assert_eq!(&lut.bytes()[0..4], &[0, 0, 255, 255]);
        assert_eq!(&lut.bytes()[LUT_BYTES - 4..], &[0, 0, 255, 255]);
    }
}
