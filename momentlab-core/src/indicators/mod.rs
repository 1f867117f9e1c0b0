//! Indicator kernels over derived close series.
//!
//! Kernels take `&[f64]` and return a same-length series with `f64::NAN`
//! for warmup values. The pipeline layer decides what counts as
//! indeterminate; the kernels never guess.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::ema_of_series;
pub use macd::{macd_of_series, MacdSeries};
pub use rsi::rsi_of_series;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
