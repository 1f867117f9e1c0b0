//! Audit records — indicator context captured at decision time.
//!
//! Every acted-upon evaluation snapshots the oscillator tails and the
//! triggering reasons so the surrounding system can log or persist them.
//! Audit data never feeds back into control flow.

use crate::domain::MinuteBar;
use crate::pipeline::{MomentumSnapshot, RatioSnapshot};
use serde::{Deserialize, Serialize};

/// Snapshot attached to an emitted order intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditRecord {
    Entry {
        strategy: String,
        macd: Vec<f64>,
        macd_signal: Vec<f64>,
        vwap: Option<f64>,
        average: Option<f64>,
        reasons: Vec<String>,
    },
    Exit {
        strategy: String,
        rsi: Vec<f64>,
        movement: f64,
        macd: Vec<f64>,
        macd_signal: Vec<f64>,
        vwap: Option<f64>,
        average: Option<f64>,
        reasons: Vec<String>,
    },
}

impl AuditRecord {
    pub fn entry(
        strategy: &str,
        momentum: &MomentumSnapshot,
        bar: &MinuteBar,
        reasons: Vec<String>,
    ) -> Self {
        AuditRecord::Entry {
            strategy: strategy.to_string(),
            macd: momentum.macd_tail.clone(),
            macd_signal: momentum.signal_tail.clone(),
            vwap: bar.vwap,
            average: bar.average,
            reasons,
        }
    }

    pub fn exit(
        strategy: &str,
        momentum: &MomentumSnapshot,
        ratio: &RatioSnapshot,
        movement: f64,
        bar: &MinuteBar,
        reasons: Vec<String>,
    ) -> Self {
        AuditRecord::Exit {
            strategy: strategy.to_string(),
            rsi: ratio.tail.clone(),
            movement,
            macd: momentum.macd_tail.clone(),
            macd_signal: momentum.signal_tail.clone(),
            vwap: bar.vwap,
            average: bar.average,
            reasons,
        }
    }

    /// Reason labels joined for log lines.
    pub fn reason_label(&self) -> String {
        let reasons = match self {
            AuditRecord::Entry { reasons, .. } => reasons,
            AuditRecord::Exit { reasons, .. } => reasons,
        };
        reasons.join(" AND ")
    }
}
