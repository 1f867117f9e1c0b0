//! Snapshots of the most recent oscillator values.
//!
//! A snapshot exists only when every value the engines compare is finite;
//! otherwise the pipeline yields `None` and the caller treats the bar as
//! "no action". The tails are kept for audit records, comparisons go
//! through the typed accessors.

use crate::indicators::MacdSeries;

/// Last few MACD/signal values, newest last.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumSnapshot {
    /// Up to five most recent MACD values (audit).
    pub macd_tail: Vec<f64>,
    /// Up to five most recent signal values (audit).
    pub signal_tail: Vec<f64>,
    macd3: [f64; 3],
    signal2: [f64; 2],
}

impl MomentumSnapshot {
    /// Extract the comparison window from a computed series.
    ///
    /// Returns `None` unless the last three MACD values and last two
    /// signal values are all finite.
    pub fn from_series(series: &MacdSeries) -> Option<Self> {
        let n = series.macd.len();
        if n < 3 {
            return None;
        }
        let macd3 = [series.macd[n - 3], series.macd[n - 2], series.macd[n - 1]];
        let signal2 = [series.signal[n - 2], series.signal[n - 1]];
        if macd3.iter().any(|v| !v.is_finite()) || signal2.iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(Self {
            macd_tail: tail(&series.macd, 5),
            signal_tail: tail(&series.signal, 5),
            macd3,
            signal2,
        })
    }

    /// Most recent MACD value.
    pub fn macd(&self) -> f64 {
        self.macd3[2]
    }

    pub fn macd_prev(&self) -> f64 {
        self.macd3[1]
    }

    pub fn macd_prev2(&self) -> f64 {
        self.macd3[0]
    }

    /// Most recent signal-line value.
    pub fn signal(&self) -> f64 {
        self.signal2[1]
    }

    pub fn signal_prev(&self) -> f64 {
        self.signal2[0]
    }
}

/// Last few bounded-ratio (RSI) values, newest last.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSnapshot {
    /// Up to three most recent values (audit).
    pub tail: Vec<f64>,
    last: f64,
}

impl RatioSnapshot {
    /// Returns `None` unless the latest value is finite.
    pub fn from_series(values: &[f64]) -> Option<Self> {
        let last = *values.last()?;
        if !last.is_finite() {
            return None;
        }
        Some(Self {
            tail: tail(values, 3),
            last,
        })
    }

    pub fn last(&self) -> f64 {
        self.last
    }
}

fn tail(values: &[f64], n: usize) -> Vec<f64> {
    values[values.len().saturating_sub(n)..].to_vec()
}
