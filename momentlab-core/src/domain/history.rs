//! PriceHistory — ordered minute bars for one symbol.
//!
//! The feed owns the full history; the decision core only reads a suffix
//! view ending at "now". Indicator math runs on the session-filtered close
//! series, optionally resampled to coarser buckets.

use crate::domain::MinuteBar;
use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// Ordered, timestamp-indexed sequence of minute bars for one symbol.
///
/// Timestamps must be strictly increasing; the feed appends in order and
/// never rewrites past bars.
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    bars: Vec<MinuteBar>,
}

impl PriceHistory {
    pub fn new(bars: Vec<MinuteBar>) -> Self {
        debug_assert!(
            bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp),
            "bars must be strictly increasing in time"
        );
        Self { bars }
    }

    pub fn bars(&self) -> &[MinuteBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The bar being evaluated (most recent in the suffix view).
    pub fn current(&self) -> Option<&MinuteBar> {
        self.bars.last()
    }

    /// The bar before the current one.
    pub fn previous(&self) -> Option<&MinuteBar> {
        self.bars.len().checked_sub(2).map(|i| &self.bars[i])
    }

    /// Session-filtered `(timestamp, close)` series.
    ///
    /// Keeps bars whose wall-clock time falls inside `[open, close]` and
    /// whose close is finite; everything else is dropped before indicator
    /// math, matching the feed's session-hours contract.
    pub fn session_closes(&self, open: NaiveTime, close: NaiveTime) -> Vec<(NaiveDateTime, f64)> {
        self.bars
            .iter()
            .filter(|b| {
                let t = b.timestamp.time();
                t >= open && t <= close && b.close.is_finite()
            })
            .map(|b| (b.timestamp, b.close))
            .collect()
    }

    /// Highest session close at or after `since`.
    pub fn max_close_since(
        &self,
        since: NaiveDateTime,
        open: NaiveTime,
        close: NaiveTime,
    ) -> Option<f64> {
        self.session_closes(open, close)
            .into_iter()
            .filter(|&(ts, _)| ts >= since)
            .map(|(_, c)| c)
            .fold(None, |acc, c| Some(acc.map_or(c, |m: f64| m.max(c))))
    }
}

/// Resample a close series to `minutes`-wide wall-clock buckets, keeping
/// the last value in each bucket.
///
/// Buckets are aligned to the clock (a 5-minute bucket starting at :00,
/// :05, ...), so a partially elapsed current bucket contributes its
/// latest value.
pub fn resample_last(points: &[(NaiveDateTime, f64)], minutes: u32) -> Vec<f64> {
    debug_assert!(minutes > 0 && 60 % minutes == 0);
    let mut out = Vec::new();
    let mut current: Option<(NaiveDateTime, f64)> = None;
    for &(ts, value) in points {
        let bucket = bucket_start(ts, minutes);
        match current {
            Some((b, _)) if b == bucket => current = Some((bucket, value)),
            Some((_, done)) => {
                out.push(done);
                current = Some((bucket, value));
            }
            None => current = Some((bucket, value)),
        }
    }
    if let Some((_, last)) = current {
        out.push(last);
    }
    out
}

fn bucket_start(ts: NaiveDateTime, minutes: u32) -> NaiveDateTime {
    let floored = ts.minute() - ts.minute() % minutes;
    ts.with_minute(floored)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("floored minute is valid")
}
