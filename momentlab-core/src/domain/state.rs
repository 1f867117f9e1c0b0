//! Per-symbol signal state carried between evaluations.
//!
//! One record per symbol, created lazily on first reference, never
//! destroyed while the symbol is tracked. Evaluations for the same symbol
//! must be serialized by the caller — the book is not locked internally
//! and concurrent writers on one symbol are undefined behavior at the
//! strategy level (not memory unsafety).

use crate::domain::Symbol;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Signal memory for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolSignalState {
    /// Close price at the moment a downward momentum crossing was first
    /// observed; cleared when momentum crosses back above zero.
    pub reversal_anchor: Option<f64>,
    /// Set once price drops materially below cost basis after entry;
    /// cleared only by the next entry.
    pub whipsawed: bool,
    /// Minute-granularity entry suppression window.
    pub cooldown_until: Option<NaiveDateTime>,
}

impl SymbolSignalState {
    /// One-shot cooldown check.
    ///
    /// Returns true (suppressed, field untouched) while `cooldown_until`
    /// is at or after the truncated current minute; otherwise the field is
    /// cleared — consumed — and evaluation may proceed.
    pub fn consume_cooldown(&mut self, now: NaiveDateTime) -> bool {
        match self.cooldown_until {
            Some(until) if until >= truncate_minute(now) => true,
            Some(_) => {
                self.cooldown_until = None;
                false
            }
            None => false,
        }
    }

    /// Arm the cooldown for `minutes` past the truncated current minute.
    pub fn arm_cooldown(&mut self, now: NaiveDateTime, minutes: i64) {
        self.cooldown_until = Some(truncate_minute(now) + chrono::Duration::minutes(minutes));
    }
}

/// Truncate a timestamp to minute granularity (seconds and finer dropped).
pub fn truncate_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .expect("zero seconds is always valid")
}

/// All per-symbol signal states, keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StateBook {
    states: HashMap<Symbol, SymbolSignalState>,
}

impl StateBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, symbol: &str) -> Option<&SymbolSignalState> {
        self.states.get(symbol)
    }

    /// Fetch the symbol's state, creating the default record on first
    /// reference.
    pub fn state_mut(&mut self, symbol: &str) -> &mut SymbolSignalState {
        self.states.entry(symbol.to_string()).or_default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
