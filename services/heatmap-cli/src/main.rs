//! Heatmap renderer command line.
//!
//! Renders weighted point samples through a banded color gradient and
//! writes the result as PNG.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap_cli::RenderJob;

#[derive(Parser, Debug)]
#[command(name = "heatmap-cli")]
#[command(about = "Render weighted point samples to a heatmap PNG")]
struct Args {
    /// Layer configuration (JSON, or YAML for .yaml/.yml)
    #[arg(short, long, env = "HEATMAP_CONFIG")]
    config: PathBuf,

    /// JSON array of samples: {"x": .., "y": .., <weight field>: ..}
    #[arg(short, long)]
    samples: PathBuf,

    /// Output PNG path
    #[arg(short, long, env = "HEATMAP_OUTPUT", default_value = "heatmap.png")]
    output: PathBuf,

    /// Frame width in pixels
    #[arg(long, default_value = "256")]
    width: usize,

    /// Frame height in pixels
    #[arg(long, default_value = "256")]
    height: usize,

    /// Override the configured stamp radius
    #[arg(long)]
    radius: Option<f64>,

    /// Override the configured blur width
    #[arg(long)]
    blur: Option<f64>,

    /// Write a palette PNG when the frame has few enough colors
    #[arg(long)]
    indexed: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let job = RenderJob {
        config: args.config,
        samples: args.samples,
        output: args.output,
        width: args.width,
        height: args.height,
        radius: args.radius,
        blur: args.blur,
        indexed: args.indexed,
    };

    let report = heatmap_cli::run(&job)?;
    info!(samples = report.samples, bytes = report.bytes, "Done");

    Ok(())
}
