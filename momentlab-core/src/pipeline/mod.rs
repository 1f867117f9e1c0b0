//! Indicator pipeline — session-filtered price series to oscillator
//! snapshots.
//!
//! Two modes feed the engines:
//! - coarse: 5-minute resampled closes → MACD 13/21/9, for entry analysis;
//! - fine: raw 1-minute closes with the current bar's VWAP substituted for
//!   the latest close → MACD 13/21/9, plus RSI 14 on the unmodified
//!   series, for exit analysis.
//!
//! Either mode yields `None` when the history cannot support a
//! determinate reading; callers treat that as "no action", never as a
//! signal.

pub mod snapshot;

pub use snapshot::{MomentumSnapshot, RatioSnapshot};

use crate::config::StrategyConfig;
use crate::domain::{resample_last, PriceHistory};
use crate::indicators::{macd_of_series, rsi_of_series};

pub const MACD_FAST: usize = 13;
pub const MACD_SLOW: usize = 21;
pub const MACD_SIGNAL: usize = 9;
pub const RSI_PERIOD: usize = 14;
/// Bucket width for the coarse (entry) series.
pub const COARSE_BUCKET_MINUTES: u32 = 5;

/// Coarse-mode momentum: MACD on the 5-minute resampled session closes.
pub fn coarse(history: &PriceHistory, config: &StrategyConfig) -> Option<MomentumSnapshot> {
    let points = history.session_closes(config.session_open, config.session_close);
    let buckets = resample_last(&points, COARSE_BUCKET_MINUTES);
    let series = macd_of_series(&buckets, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    MomentumSnapshot::from_series(&series)
}

/// Bounded-ratio oscillator on the full (non-resampled) session closes.
///
/// Used by the entry risk gate; exit analysis gets it through `fine`.
pub fn session_ratio(history: &PriceHistory, config: &StrategyConfig) -> Option<RatioSnapshot> {
    let points = history.session_closes(config.session_open, config.session_close);
    let closes: Vec<f64> = points.into_iter().map(|(_, c)| c).collect();
    RatioSnapshot::from_series(&rsi_of_series(&closes, RSI_PERIOD))
}

/// Fine-mode output: momentum on the VWAP-substituted series, ratio on the
/// unmodified one.
#[derive(Debug, Clone, PartialEq)]
pub struct FineIndicators {
    pub momentum: MomentumSnapshot,
    pub ratio: RatioSnapshot,
}

/// Fine-mode pipeline for exit analysis.
///
/// When the current bar carries a VWAP, it replaces the most recent close
/// before the MACD computation — intraperiod movement the raw close would
/// miss. The ratio oscillator always sees the unmodified closes.
pub fn fine(history: &PriceHistory, config: &StrategyConfig) -> Option<FineIndicators> {
    let points = history.session_closes(config.session_open, config.session_close);
    let mut closes: Vec<f64> = points.into_iter().map(|(_, c)| c).collect();

    let ratio = RatioSnapshot::from_series(&rsi_of_series(&closes, RSI_PERIOD))?;

    if let Some(vwap) = history.current().and_then(|b| b.vwap) {
        if let Some(last) = closes.last_mut() {
            *last = vwap;
        }
    }
    let momentum =
        MomentumSnapshot::from_series(&macd_of_series(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL))?;

    Some(FineIndicators { momentum, ratio })
}
