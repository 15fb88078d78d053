//! Synthetic sample generators.
//!
//! Samples are produced as `(x, y, weight)` triples in screen pixels.

/// Evenly spaced samples along a horizontal line with weights rising
/// linearly from `min_weight` to `max_weight`.
///
/// # Example
///
/// ```
/// use test_utils::create_weight_ramp;
///
/// let samples = create_weight_ramp(3, 100.0, 10.0, 0.0, 100.0);
/// assert_eq!(samples.len(), 3);
/// assert_eq!(samples[0], (0.0, 10.0, 0.0));
/// assert_eq!(samples[2], (100.0, 10.0, 100.0));
/// ```
pub fn create_weight_ramp(
    count: usize,
    width: f64,
    y: f64,
    min_weight: f64,
    max_weight: f64,
) -> Vec<(f64, f64, f64)> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![(0.0, y, min_weight)];
    }
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            (t * width, y, min_weight + t * (max_weight - min_weight))
        })
        .collect()
}
