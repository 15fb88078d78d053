//! Tests for layer configuration loading and band parsing.

use heatmap_common::color::ColorSpec;
use heatmap_common::{parse_bands, BandSpec, DataType, HeatmapError, LayerConfig, Rgba};
use test_utils::{bands, configs, write_temp_file};

fn specs(pairs: &[(&str, &str)]) -> Vec<BandSpec> {
    pairs.iter().map(|(r, c)| BandSpec::new(*r, *c)).collect()
}

// ============================================================================
// File loading tests
// ============================================================================

#[test]
fn test_load_json_file() {
    let (_dir, path) = write_temp_file("layer.json", configs::VALUE_JSON);
    let config = LayerConfig::from_file(&path).unwrap();

    assert_eq!(config.data_type, DataType::Value);
    assert_eq!(config.radius, 6.0);
    assert_eq!(config.blur, 4.0);
    assert_eq!(config.shadow, 250.0);
    assert_eq!(config.weight, "magnitude");
    assert_eq!(config.gradient.len(), 2);
    assert_eq!(config.gradient[1].label.as_deref(), Some("high"));
    config.validate().unwrap();
}

#[test]
fn test_load_yaml_file() {
    let (_dir, path) = write_temp_file("layer.yaml", configs::PERCENT_YAML);
    let config = LayerConfig::from_file(&path).unwrap();

    assert_eq!(config.data_type, DataType::Percent);
    assert_eq!(config.gradient[1].color, ColorSpec::Array(vec![255, 0, 0]));
    config.validate().unwrap();
}

#[test]
fn test_load_missing_file() {
    let err = LayerConfig::from_file("/nonexistent/layer.json").unwrap_err();
    assert!(matches!(err, HeatmapError::ConfigRead(_)));
}

#[test]
fn test_load_malformed_json() {
    let (_dir, path) = write_temp_file("layer.json", "{ not json");
    let err = LayerConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, HeatmapError::ConfigParse(_)));
}

#[test]
fn test_bad_range_parses_but_fails_validation() {
    let config = LayerConfig::from_json(configs::BAD_RANGE_JSON).unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, HeatmapError::InvalidRange { .. }));
    assert!(err.is_config_error());
}

#[test]
fn test_serialize_roundtrip_preserves_bands() {
    let config = LayerConfig::new(specs(&bands::FIVE_STEP), DataType::Percent);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(LayerConfig::from_json(&json).unwrap(), config);
}

// ============================================================================
// Band parsing tests
// ============================================================================

#[test]
fn test_parse_bands_preserves_order() {
    let parsed = parse_bands(&specs(&bands::BLUE_RED)).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].min, 0.0);
    assert_eq!(parsed[0].max, 50.0);
    assert_eq!(parsed[0].color, Rgba::opaque(0, 0, 255));
    assert_eq!(parsed[1].color, Rgba::opaque(255, 0, 0));
}

#[test]
fn test_parse_negative_bands() {
    let parsed = parse_bands(&specs(&bands::NEGATIVE)).unwrap();
    assert_eq!(parsed[0].min, -100.0);
    assert_eq!(parsed[0].max, -1.0);
}

#[test]
fn test_parse_bands_rejects_bad_color() {
    let err = parse_bands(&[BandSpec::new("0-10", "#zzz")]).unwrap_err();
    assert!(matches!(err, HeatmapError::InvalidColor(_)));
}

#[test]
fn test_huge_radius_fails_validation() {
    let json = r##"{
        "data_type": "value",
        "radius": 1e10,
        "gradient": [{ "range": "0-10", "color": "#000" }]
    }"##;
    let config = LayerConfig::from_json(json).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.is_config_error());
    assert!(matches!(err, HeatmapError::InvalidParameter { ref param, .. } if param == "radius"));
}

#[test]
fn test_signed_hex_digits_rejected() {
    let err = parse_bands(&[BandSpec::new("0-10", "#+f+f+f")]).unwrap_err();
    assert!(matches!(err, HeatmapError::InvalidColor(_)));
}
