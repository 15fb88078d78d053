//! Tests for the file-level render flow.

use std::path::Path;

use heatmap_cli::{load_layer, load_samples, run, RenderJob};
use heatmap_common::DataType;
use test_utils::{configs, write_temp_file};

const SAMPLES_JSON: &str = r#"[
  { "x": 16, "y": 16, "magnitude": 90 },
  { "x": 16, "y": 16, "magnitude": 90 },
  { "x": 48, "y": 16, "magnitude": 20 },
  { "x": 48, "y": 48, "magnitude": "n/a" }
]"#;

fn job(config: &Path, samples: &Path, output: &Path) -> RenderJob {
    RenderJob {
        config: config.to_path_buf(),
        samples: samples.to_path_buf(),
        output: output.to_path_buf(),
        width: 64,
        height: 64,
        radius: None,
        blur: None,
        indexed: false,
    }
}

#[test]
fn test_render_writes_png() {
    let (dir, config) = write_temp_file("layer.json", configs::VALUE_JSON);
    let samples = dir.path().join("samples.json");
    std::fs::write(&samples, SAMPLES_JSON).unwrap();
    let output = dir.path().join("out").join("heatmap.png");

    let report = run(&job(&config, &samples, &output)).unwrap();
    assert_eq!(report.samples, 4);
    // Two samples share a bucket
    assert_eq!(report.cache_hits, 1);
    assert_eq!(report.cache_misses, 3);

    let png = std::fs::read(&output).unwrap();
    assert_eq!(png.len(), report.bytes);
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(png[25], 6);
}

#[test]
fn test_indexed_output() {
    let (dir, config) = write_temp_file("layer.yaml", configs::PERCENT_YAML);
    let samples = dir.path().join("samples.json");
    std::fs::write(&samples, r#"[{ "x": 8, "y": 8, "weight": 1.0 }]"#).unwrap();
    let output = dir.path().join("heatmap.png");

    let mut job = job(&config, &samples, &output);
    job.width = 16;
    job.height = 16;
    job.indexed = true;
    run(&job).unwrap();

    let png = std::fs::read(&output).unwrap();
    assert_eq!(png[25], 3);
}

#[test]
fn test_overrides_apply() {
    let (_dir, config) = write_temp_file("layer.json", configs::VALUE_JSON);
    let layer = load_layer(&config, Some(3.0), Some(0.0)).unwrap();
    assert_eq!(layer.radius(), 3.0);
    assert_eq!(layer.blur(), 0.0);
    assert_eq!(layer.data_type(), DataType::Value);
}

#[test]
fn test_negative_override_rejected() {
    let (_dir, config) = write_temp_file("layer.json", configs::VALUE_JSON);
    let err = load_layer(&config, Some(-1.0), None).unwrap_err();
    assert!(err.to_string().contains("Invalid layer configuration"));
}

#[test]
fn test_bad_range_is_fatal() {
    let (dir, config) = write_temp_file("layer.json", configs::BAD_RANGE_JSON);
    let samples = dir.path().join("samples.json");
    std::fs::write(&samples, "[]").unwrap();
    let output = dir.path().join("heatmap.png");

    assert!(run(&job(&config, &samples, &output)).is_err());
    assert!(!output.exists());
}

#[test]
fn test_samples_must_be_an_array() {
    let (_dir, samples) = write_temp_file("samples.json", r#"{"x": 1, "y": 2}"#);
    let err = load_samples(&samples).unwrap_err();
    assert!(err.to_string().contains("Failed to parse samples"));
}

#[test]
fn test_missing_files_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(load_layer(&missing, None, None).is_err());
    assert!(load_samples(&missing).is_err());
}

#[test]
fn test_zero_size_rejected() {
    let (dir, config) = write_temp_file("layer.json", configs::VALUE_JSON);
    let samples = dir.path().join("samples.json");
    std::fs::write(&samples, "[]").unwrap();

    let mut job = job(&config, &samples, &dir.path().join("heatmap.png"));
    job.width = 0;
    assert!(run(&job).is_err());
}

#[test]
fn test_oversized_frame_rejected() {
    let (dir, config) = write_temp_file("layer.json", configs::VALUE_JSON);
    let samples = dir.path().join("samples.json");
    std::fs::write(&samples, SAMPLES_JSON).unwrap();
    let output = dir.path().join("heatmap.png");

    let mut job = job(&config, &samples, &output);
    job.width = usize::MAX;
    job.height = usize::MAX;
    let err = run(&job).unwrap_err();
    assert!(err.to_string().contains("Failed to render heatmap"));
    assert!(!output.exists());
}
