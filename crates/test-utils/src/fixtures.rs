//! Common test fixtures for heatmap tests.
//!
//! Bands are given as `(range, color)` pairs so that this crate stays free
//! of workspace dependencies.

/// Common color band sets.
pub mod bands {
    /// Blue below 50, red above; the end-to-end scenario gradient.
    pub const BLUE_RED: [(&str, &str); 2] = [("0-50", "#00f"), ("50-100", "#f00")];

    /// Two bands sharing the boundary value 10.
    pub const SHARED_BOUNDARY: [(&str, &str); 2] = [("0-10", "#000"), ("10-20", "#fff")];

    /// A gap between 40 and 60 that no band covers.
    pub const GAPPED: [(&str, &str); 2] = [("0-40", "#0f0"), ("60-100", "#f00")];

    /// Classic five-step heat ramp over percentages.
    pub const FIVE_STEP: [(&str, &str); 5] = [
        ("0-20", "#00f"),
        ("20-40", "#0ff"),
        ("40-60", "#0f0"),
        ("60-80", "#ff0"),
        ("80-100", "#f00"),
    ];

    /// Bands spanning negative values.
    pub const NEGATIVE: [(&str, &str); 2] = [("-100--1", "#00f"), ("0-100", "#f00")];
}

/// Configuration documents.
pub mod configs {
    /// Minimal JSON layer configuration using VALUE weights.
    pub const VALUE_JSON: &str = r##"{
  "data_type": "value",
  "radius": 6,
  "blur": 4,
  "weight": "magnitude",
  "gradient": [
    { "range": "0-50", "color": "#00f" },
    { "range": "50-100", "color": "#f00", "label": "high" }
  ]
}"##;

    /// Equivalent YAML layer configuration using PERCENT weights.
    pub const PERCENT_YAML: &str = r##"data_type: percent
gradient:
  - range: "0-50"
    color: "#00f"
  - range: "50-100"
    color: [255, 0, 0]
"##;

    /// Configuration with a malformed band range.
    pub const BAD_RANGE_JSON: &str = r##"{
  "data_type": "value",
  "gradient": [{ "range": "zero-fifty", "color": "#00f" }]
}"##;
}
