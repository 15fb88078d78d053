//! Shared test utilities for the heatmap workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Approximate floating-point assertions
//! - Color band fixtures and configuration documents
//! - Synthetic weighted sample generators
//! - Temporary configuration files
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures};
//! ```

pub mod fixtures;
pub mod generators;
pub mod files;

// Re-export commonly used items at the crate root
pub use files::*;
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro asserting that an RGBA pixel is dominated by one channel.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_channel_dominant;
///
/// assert_channel_dominant!([200, 10, 10, 255], 0); // red dominates
/// ```
#[macro_export]
macro_rules! assert_channel_dominant {
    ($pixel:expr, $channel:expr) => {{
        let pixel: &[u8] = &$pixel[..];
        let channel: usize = $channel;
        for other in 0..3 {
            if other != channel && pixel[other] >= pixel[channel] {
                panic!(
                    "assertion failed: channel {} not dominant in pixel {:?}",
                    channel, pixel
                );
            }
        }
    }};
}
