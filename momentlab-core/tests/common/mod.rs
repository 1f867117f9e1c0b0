//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use momentlab_core::config::StrategyConfig;
use momentlab_core::domain::{MinuteBar, PriceHistory};
use momentlab_core::gateway::{ExecutionGateway, GatewayError, TradingCalendar};
use std::sync::atomic::{AtomicU32, Ordering};

/// Session open on an arbitrary trading day.
pub fn session_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 4)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub fn config() -> StrategyConfig {
    StrategyConfig::day_trade("momentum_long", 0.01).unwrap()
}

/// Synthetic minute bars from close prices, one per minute from the
/// session open. VWAP and average mirror the close.
pub fn bars_from(closes: &[f64]) -> Vec<MinuteBar> {
    bars_with_volume(closes, 1_000)
}

pub fn bars_with_volume(closes: &[f64], volume: u64) -> Vec<MinuteBar> {
    let start = session_start();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| MinuteBar {
            timestamp: start + Duration::minutes(i as i64),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume,
            vwap: Some(close),
            average: Some(close),
        })
        .collect()
}

pub fn minute_history(closes: &[f64]) -> PriceHistory {
    PriceHistory::new(bars_from(closes))
}

/// Calendar with fixed answers, independent of the timestamp.
pub struct FixedCalendar {
    pub buy: bool,
    pub sell: bool,
}

impl TradingCalendar for FixedCalendar {
    fn is_buy_window(&self, _now: NaiveDateTime) -> bool {
        self.buy
    }

    fn is_sell_window(&self, _now: NaiveDateTime) -> bool {
        self.sell
    }
}

/// Gateway that serves a fixed portfolio value, optionally failing the
/// first few calls with a connectivity error.
pub struct FixedGateway {
    value: f64,
    failures_left: AtomicU32,
    calls: AtomicU32,
}

impl FixedGateway {
    pub fn new(value: f64) -> Self {
        Self::failing_first(value, 0)
    }

    pub fn failing_first(value: f64, failures: u32) -> Self {
        Self {
            value,
            failures_left: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExecutionGateway for FixedGateway {
    fn name(&self) -> &str {
        "fixed"
    }

    fn portfolio_value(&self) -> Result<f64, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(GatewayError::Connectivity("connection reset".into()));
        }
        Ok(self.value)
    }
}

/// Gateway whose connectivity never recovers.
pub struct DeadGateway;

impl ExecutionGateway for DeadGateway {
    fn name(&self) -> &str {
        "dead"
    }

    fn portfolio_value(&self) -> Result<f64, GatewayError> {
        Err(GatewayError::Connectivity("network unreachable".into()))
    }
}
