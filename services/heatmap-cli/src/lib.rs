//! File-level driver for the heatmap command line renderer.
//!
//! Loads a layer configuration and a sample file, renders one frame and
//! writes it as PNG. Kept apart from `main` so the whole flow can be
//! exercised without a process boundary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heatmap_common::LayerConfig;
use heatmap_renderer::{HeatmapLayer, Sample};
use tracing::{debug, info};

/// One render request.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub config: PathBuf,
    pub samples: PathBuf,
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub radius: Option<f64>,
    pub blur: Option<f64>,
    pub indexed: bool,
}

/// Summary of a finished render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub samples: usize,
    pub bytes: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// Load the configuration, apply overrides and build the layer.
pub fn load_layer(path: &Path, radius: Option<f64>, blur: Option<f64>) -> Result<HeatmapLayer> {
    let mut config = LayerConfig::from_file(path)
        .with_context(|| format!("Failed to load layer configuration {}", path.display()))?;
    if let Some(radius) = radius {
        config.radius = radius;
    }
    if let Some(blur) = blur {
        config.blur = blur;
    }

    HeatmapLayer::from_config(&config)
        .with_context(|| format!("Invalid layer configuration {}", path.display()))
}

/// Read a JSON array of `{x, y, ...properties}` objects.
pub fn load_samples(path: &Path) -> Result<Vec<Sample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read samples {}", path.display()))?;
    let samples: Vec<Sample> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse samples {}", path.display()))?;
    debug!(path = %path.display(), count = samples.len(), "Loaded samples");
    Ok(samples)
}

/// Render the job and write the PNG.
pub fn run(job: &RenderJob) -> Result<RenderReport> {
    if job.width == 0 || job.height == 0 {
        anyhow::bail!("Frame size must be non-zero, got {}x{}", job.width, job.height);
    }

    let mut layer = load_layer(&job.config, job.radius, job.blur)?;
    let samples = load_samples(&job.samples)?;

    info!(
        samples = samples.len(),
        width = job.width,
        height = job.height,
        radius = layer.radius(),
        blur = layer.blur(),
        "Rendering heatmap"
    );

    let frame = layer
        .render(job.width, job.height, &samples)
        .context("Failed to render heatmap")?;
    let encoded = if job.indexed {
        frame.to_png_auto()
    } else {
        frame.to_png()
    };
    let png = encoded.context("Failed to encode PNG")?;

    if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&job.output, &png)
        .with_context(|| format!("Failed to write {}", job.output.display()))?;

    let stats = layer.stamp_cache().stats();
    info!(
        output = %job.output.display(),
        bytes = png.len(),
        cache_hits = stats.hits,
        cache_misses = stats.misses,
        "Wrote heatmap"
    );

    Ok(RenderReport {
        samples: samples.len(),
        bytes: png.len(),
        cache_hits: stats.hits,
        cache_misses: stats.misses,
    })
}
