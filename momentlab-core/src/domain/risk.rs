//! Per-symbol risk context — the surface of the shared external store.
//!
//! Cost basis, scalp basis, target/stop prices, the open-order flag, the
//! owning strategy and the buy timestamp live in a store the surrounding
//! system owns. The core reads and overwrites fields through this record
//! but does not own the map; the caller passes the book `&mut` into each
//! evaluation and persists it however it likes.

use crate::domain::Symbol;
use crate::fingerprint::StrategyId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position/risk context for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskContext {
    /// True while an order for this symbol is pending at the gateway.
    pub open_order: bool,
    /// Fill price of the original entry.
    pub cost_basis: Option<f64>,
    /// Tactical reference price, updated on every fill.
    pub scalp_basis: Option<f64>,
    pub target_price: Option<f64>,
    pub stop_price: Option<f64>,
    /// Identity of the strategy that opened the position.
    pub owning_strategy: Option<StrategyId>,
    /// Timestamp of the entry fill.
    pub buy_time: Option<NaiveDateTime>,
}

/// Risk contexts for all symbols, keyed by symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskBook {
    contexts: HashMap<Symbol, RiskContext>,
}

impl RiskBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self, symbol: &str) -> Option<&RiskContext> {
        self.contexts.get(symbol)
    }

    /// Fetch the symbol's context, creating an empty record on first
    /// reference.
    pub fn context_mut(&mut self, symbol: &str) -> &mut RiskContext {
        self.contexts.entry(symbol.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_by_default() {
        let mut book = RiskBook::new();
        let ctx = book.context_mut("AAPL");
        assert!(!ctx.open_order);
        assert!(ctx.cost_basis.is_none());
        assert!(ctx.owning_strategy.is_none());
    }

    #[test]
    fn contexts_are_independent_per_symbol() {
        let mut book = RiskBook::new();
        book.context_mut("AAPL").cost_basis = Some(187.5);
        assert!(book.context("TSLA").is_none());
        assert_eq!(book.context("AAPL").unwrap().cost_basis, Some(187.5));
    }

    #[test]
    fn book_serialization_roundtrip() {
        let mut book = RiskBook::new();
        let ctx = book.context_mut("AAPL");
        ctx.cost_basis = Some(187.5);
        ctx.open_order = true;

        let json = serde_json::to_string(&book).unwrap();
        let deser: RiskBook = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.context("AAPL"), book.context("AAPL"));
    }
}
