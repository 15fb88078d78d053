//! PNG encoding for rendered heatmap frames.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the frame has ≤256 distinct
//!   RGBA values. Band-classified heatmaps with few overlap levels often do.
//! - **RGBA PNG (color type 6)**: the general case.
//!
//! Use [`encode_auto`] for automatic mode selection, or [`encode_rgba`] for
//! explicit RGBA encoding.

use std::collections::HashMap;
use std::io::Write;

use heatmap_common::{HeatmapError, HeatmapResult};
use rayon::prelude::*;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

type Palette = Vec<[u8; 4]>;

/// Encode with automatic format selection.
///
/// Falls back to RGBA as soon as more than 256 distinct colors are seen.
pub fn encode_auto(pixels: &[u8], width: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    check_dimensions(pixels, width, height)?;

    let palette = if width * height >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette {
        Some((palette, indices)) => encode_indexed(width, height, &palette, &indices),
        None => encode_rgba(pixels, width, height),
    }
}

/// Encode RGBA pixels (color type 6).
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    check_dimensions(pixels, width, height)?;

    let mut png = Vec::with_capacity(pixels.len() / 2 + 64);
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header(width, height, COLOR_TYPE_RGBA));

    let idat = deflate_scanlines(pixels, width * 4, height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Encode palette indices (color type 3).
pub fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> HeatmapResult<Vec<u8>> {
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(HeatmapError::Encode(format!(
            "palette must hold 1..=256 colors, got {}",
            palette.len()
        )));
    }
    if indices.len() != width * height {
        return Err(HeatmapError::Encode(format!(
            "expected {} indices for {}x{}, got {}",
            width * height,
            width,
            height,
            indices.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &header(width, height, COLOR_TYPE_INDEXED));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only when some entry is not opaque
    if palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn check_dimensions(pixels: &[u8], width: usize, height: usize) -> HeatmapResult<()> {
    if width == 0 || height == 0 {
        return Err(HeatmapError::Encode(format!(
            "image dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    if pixels.len() != width * height * 4 {
        return Err(HeatmapError::Encode(format!(
            "expected {} bytes for {}x{} RGBA, got {}",
            width * height * 4,
            width,
            height,
            pixels.len()
        )));
    }
    Ok(())
}

fn header(width: usize, height: usize, color_type: u8) -> [u8; 13] {
    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    ihdr[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    ihdr[8] = 8; // bit depth
    ihdr[9] = color_type;
    // compression, filter and interlace methods stay 0
    ihdr
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(px: &[u8]) -> u32 {
    u32::from_le_bytes([px[0], px[1], px[2], px[3]])
}

fn extract_palette_sequential(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.chunks_exact(4) {
        let key = pack_color(px);
        let index = match lookup.get(&key) {
            Some(&index) => index,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let index = palette.len() as u8;
                palette.push([px[0], px[1], px[2], px[3]]);
                lookup.insert(key, index);
                index
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Collect distinct colors per chunk in parallel, merge, then map pixels to
/// indices in parallel.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let chunk_pixels = (pixels.len() / 4 / rayon::current_num_threads()).max(256);

    let distinct: Vec<u32> = pixels
        .par_chunks(chunk_pixels * 4)
        .flat_map_iter(|chunk| {
            let mut local: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            for px in chunk.chunks_exact(4) {
                local.insert(pack_color(px), ());
                if local.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local.into_keys()
        })
        .collect();

    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    for key in distinct {
        if lookup.contains_key(&key) {
            continue;
        }
        if palette.len() >= MAX_PALETTE_SIZE {
            return None;
        }
        lookup.insert(key, palette.len() as u8);
        palette.push(key.to_le_bytes());
    }

    let indices: Vec<u8> = pixels
        .par_chunks_exact(4)
        .map(|px| lookup.get(&pack_color(px)).copied().unwrap_or(0))
        .collect();

    Some((palette, indices))
}

/// Prefix each row with filter byte 0 and zlib-compress.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> HeatmapResult<Vec<u8>> {
    let mut raw = Vec::with_capacity(height * (row_bytes + 1));
    for row in data.chunks_exact(row_bytes).take(height) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&raw)
        .map_err(|e| HeatmapError::Encode(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| HeatmapError::Encode(format!("IDAT compression failed: {}", e)))
}

/// Length, type, data, CRC over type + data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
