//! Strategy configuration — explicit, immutable, validated at construction.
//!
//! Session hours, risk fraction and liquidity floor are passed into the
//! evaluator rather than read from ambient process state, so a test or a
//! backtest can run any number of differently configured evaluators side
//! by side.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("risk_fraction must be in (0, 1): {0}")]
    RiskFraction(f64),

    #[error("session open {open} must precede session close {close}")]
    SessionWindow { open: NaiveTime, close: NaiveTime },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Immutable evaluator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub name: String,
    /// Exchange session open, local wall-clock time.
    pub session_open: NaiveTime,
    /// Exchange session close, inclusive.
    pub session_close: NaiveTime,
    /// Fraction of portfolio value risked per trade.
    pub risk_fraction: f64,
    /// Minutes after session open during which limit fills are considered
    /// unreliable and market orders are used instead.
    pub morning_rush_minutes: i64,
    /// Minimum current-bar volume for an entry to be considered.
    pub min_entry_volume: u64,
}

impl StrategyConfig {
    pub fn new(
        name: impl Into<String>,
        session_open: NaiveTime,
        session_close: NaiveTime,
        risk_fraction: f64,
        morning_rush_minutes: i64,
        min_entry_volume: u64,
    ) -> Result<Self, ConfigError> {
        if !(risk_fraction > 0.0 && risk_fraction < 1.0) {
            return Err(ConfigError::RiskFraction(risk_fraction));
        }
        if session_open >= session_close {
            return Err(ConfigError::SessionWindow {
                open: session_open,
                close: session_close,
            });
        }
        Ok(Self {
            name: name.into(),
            session_open,
            session_close,
            risk_fraction,
            morning_rush_minutes,
            min_entry_volume,
        })
    }

    /// US-equities day-trade defaults: 9:30–16:00 session, 30-minute
    /// morning rush, 500-share liquidity floor.
    pub fn day_trade(name: impl Into<String>, risk_fraction: f64) -> Result<Self, ConfigError> {
        Self::new(
            name,
            NaiveTime::from_hms_opt(9, 30, 0).expect("valid session open"),
            NaiveTime::from_hms_opt(16, 0, 0).expect("valid session close"),
            risk_fraction,
            30,
            500,
        )
    }

    /// Parse a config from TOML, then run the same validation as `new`.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let parsed: Self = toml::from_str(raw)?;
        Self::new(
            parsed.name,
            parsed.session_open,
            parsed.session_close,
            parsed.risk_fraction,
            parsed.morning_rush_minutes,
            parsed.min_entry_volume,
        )
    }

    /// True within the first `morning_rush_minutes` of the session.
    pub fn is_morning_rush(&self, now: NaiveDateTime) -> bool {
        let since_open = now.time().signed_duration_since(self.session_open);
        since_open >= chrono::Duration::zero()
            && since_open < chrono::Duration::minutes(self.morning_rush_minutes)
    }
}
