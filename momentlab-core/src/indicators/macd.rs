//! MACD-style momentum oscillator.
//!
//! MACD line = EMA(fast) - EMA(slow)
//! Signal line = EMA(signal_period) of the MACD line, seeded on the first
//! valid MACD suffix.
//! Lookback: slow - 1 for the line, slow - 1 + signal_period - 1 for the
//! signal.

use crate::indicators::ema::ema_of_series;

/// MACD line and its smoothed signal line, aligned to the input series.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

impl MacdSeries {
    fn all_nan(n: usize) -> Self {
        Self {
            macd: vec![f64::NAN; n],
            signal: vec![f64::NAN; n],
        }
    }
}

/// Compute MACD over a raw value series.
///
/// Warmup entries are `f64::NAN`; NaN inputs taint everything downstream
/// the way the EMA kernel does.
pub fn macd_of_series(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let n = values.len();
    if n == 0 || fast == 0 || slow == 0 || signal_period == 0 {
        return MacdSeries::all_nan(n);
    }

    let ema_fast = ema_of_series(values, fast);
    let ema_slow = ema_of_series(values, slow);

    // NaN warmup propagates: the line is NaN until the slow EMA is seeded.
    let macd: Vec<f64> = (0..n).map(|i| ema_fast[i] - ema_slow[i]).collect();

    let mut signal = vec![f64::NAN; n];
    let line_start = slow - 1;
    if n > line_start {
        let tail = ema_of_series(&macd[line_start..], signal_period);
        for (offset, v) in tail.into_iter().enumerate() {
            signal[line_start + offset] = v;
        }
    }

    MacdSeries { macd, signal }
}
