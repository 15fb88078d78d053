//! Alpha-to-color remapping of an accumulated heatmap buffer.
//!
//! After all stamps are composited, each pixel's alpha says how much
//! coverage landed there. That alpha, scaled by 4, is the byte offset of
//! its texel in the flat lookup table; R, G and B are overwritten from the
//! texel and alpha is kept. Fully transparent pixels are never touched.

use rayon::prelude::*;

use crate::lut::{GradientLut, LUT_BYTES};

/// Minimum pixels to benefit from parallel colorization
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

/// Colorize an RGBA buffer in place.
///
/// A trailing partial pixel is left as is.
pub fn colorize(pixels: &mut [u8], lut: &GradientLut) {
    let table = lut.bytes();
    let num_pixels = pixels.len() / 4;

    if num_pixels >= PARALLEL_THRESHOLD {
        let chunk_size = (num_pixels / rayon::current_num_threads()).max(256) * 4;
        pixels
            .par_chunks_mut(chunk_size)
            .for_each(|chunk| colorize_run(chunk, table));
    } else {
        colorize_run(pixels, table);
    }
}

fn colorize_run(pixels: &mut [u8], table: &[u8; LUT_BYTES]) {
    for px in pixels.chunks_exact_mut(4) {
        let alpha = px[3];
        if alpha == 0 {
            continue;
        }
        let offset = texel_offset(alpha);
        px[0] = table[offset];
        px[1] = table[offset + 1];
        px[2] = table[offset + 2];
    }
}

/// Byte offset of the texel for `alpha`, clamped to the last texel.
#[inline(always)]
pub fn texel_offset(alpha: u8) -> usize {
    (alpha as usize * 4).min(LUT_BYTES - 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_common::{ColorBand, Rgba};

    fn two_tone_lut() -> GradientLut {
        GradientLut::build(&[
            ColorBand::new(0.0, 49.0, Rgba::opaque(0, 0, 255)),
            ColorBand::new(50.0, 100.0, Rgba::opaque(255, 0, 0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_texel_offset_stays_in_table() {
        assert_eq!(texel_offset(1), 4);
        assert_eq!(texel_offset(64), 256);
        assert_eq!(texel_offset(255), LUT_BYTES - 4);
    }

    #[test]
    fn test_transparent_pixels_untouched() {
        let lut = two_tone_lut();
        let mut pixels = vec![12, 34, 56, 0, 0, 0, 0, 255];
        colorize(&mut pixels, &lut);
        assert_eq!(&pixels[..4], &[12, 34, 56, 0]);
        assert_eq!(&pixels[4..], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_partial_pixel_ignored() {
        let lut = two_tone_lut();
        let mut pixels = vec![0, 0, 0, 10, 9, 9];
        colorize(&mut pixels, &lut);
        assert_eq!(&pixels[..4], &[0, 0, 255, 10]);
        assert_eq!(&pixels[4..], &[9, 9]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let lut = two_tone_lut();
        let mut large: Vec<u8> = (0..128 * 128)
            .flat_map(|i| [0u8, 0, 0, (i % 256) as u8])
            .collect();
        let mut expected = large.clone();

        colorize(&mut large, &lut);
        colorize_run(&mut expected, lut.bytes());
        assert_eq!(large, expected);
    }
}
