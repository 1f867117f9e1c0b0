//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 → RSI = 0.

/// Compute RSI over a raw value series.
///
/// Returns a series of the same length; the first `period` entries are
/// `f64::NAN` (warmup). A NaN input taints every value from that index on.
pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    // Value changes
    let mut changes = vec![f64::NAN; n];
    for i in 1..n {
        if values[i].is_nan() || values[i - 1].is_nan() {
            changes[i] = f64::NAN;
        } else {
            changes[i] = values[i] - values[i - 1];
        }
    }

    // Seed: average gain and average loss over first `period` changes
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &ch in &changes[1..=period] {
        if ch.is_nan() {
            return result;
        }
        if ch > 0.0 {
            avg_gain += ch;
        } else {
            avg_loss -= ch;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    result[period] = compute_rsi(avg_gain, avg_loss);

    // Wilder smoothing for subsequent values
    let alpha = 1.0 / period as f64;
    for i in (period + 1)..n {
        if changes[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }

        let gain = if changes[i] > 0.0 { changes[i] } else { 0.0 };
        let loss = if changes[i] < 0.0 { -changes[i] } else { 0.0 };

        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;

        result[i] = compute_rsi(avg_gain, avg_loss);
    }

    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_all_gains() {
        let result = rsi_of_series(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0], 3);
        assert_approx(result[3], 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses() {
        let result = rsi_of_series(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0], 3);
        assert_approx(result[3], 0.0, 1e-6);
    }

    #[test]
    fn rsi_no_movement_is_midpoint() {
        let result = rsi_of_series(&[100.0; 6], 3);
        assert_approx(result[3], 50.0, 1e-6);
    }

    #[test]
    fn rsi_mixed() {
        // Values: 44, 44.34, 44.09, 43.61, 44.33
        // Changes: +0.34, -0.25, -0.48, +0.72
        // period=3, seed from changes[1..=3]: gains=0.34, losses=0.73
        // RSI[3] = 100 - 100/(1 + 0.34/0.73) ≈ 31.78
        let result = rsi_of_series(&[44.0, 44.34, 44.09, 43.61, 44.33], 3);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(result[3] > 0.0 && result[3] < 100.0);
        assert_approx(result[3], 31.775, 1e-2);
    }

    #[test]
    fn rsi_bounds() {
        let result = rsi_of_series(
            &[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0],
            3,
        );
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_nan_propagation() {
        let result = rsi_of_series(&[100.0, 101.0, f64::NAN, 103.0, 104.0], 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_short_series_is_all_nan() {
        let result = rsi_of_series(&[100.0, 101.0, 102.0], 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
