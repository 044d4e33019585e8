//! Fixtures shared by the workspace test suites: STAC documents and
//! synthetic Landsat bands, plus in-memory GeoTIFFs in strip or tile layout.

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Asserts two numbers are within `epsilon` of each other, comparing as `f64`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        assert!(
            diff <= epsilon,
            "assertion failed: {} is not within {} of {} (diff {})",
            left,
            epsilon,
            right,
            diff
        );
    }};
}
