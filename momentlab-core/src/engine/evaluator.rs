//! Top-level evaluator — one decision per bar tick per symbol.
//!
//! Routes each tick through the eligibility gates to the entry or exit
//! engine. Owns the per-symbol signal state; the risk book stays with the
//! caller. Evaluations for distinct symbols are independent; evaluations
//! for the same symbol must be serialized by the caller.

use crate::config::StrategyConfig;
use crate::domain::{PriceHistory, RiskBook, StateBook, SymbolSignalState};
use crate::engine::{entry, exit, EvalError, Evaluation};
use crate::fingerprint::StrategyId;
use crate::gateway::{ExecutionGateway, TradingCalendar};
use chrono::NaiveDateTime;

/// Everything one evaluation consumes from its collaborators.
pub struct EvalRequest<'a> {
    pub symbol: &'a str,
    /// Currently held share count (this strategy is long-only).
    pub position: u64,
    /// Price history suffix ending at the bar being evaluated.
    pub history: &'a PriceHistory,
    pub now: NaiveDateTime,
    /// Externally supplied portfolio value; when absent the gateway is
    /// asked instead.
    pub portfolio_value: Option<f64>,
    pub gateway: Option<&'a dyn ExecutionGateway>,
    pub calendar: &'a dyn TradingCalendar,
    /// Interface parity with the surrounding runner; a long-only strategy
    /// never consults it.
    pub shortable: bool,
}

/// Single-bar decision engine for the momentum-long strategy.
pub struct MomentumEvaluator {
    config: StrategyConfig,
    identity: StrategyId,
    states: StateBook,
}

impl MomentumEvaluator {
    pub fn new(config: StrategyConfig) -> Self {
        let identity = config.fingerprint();
        Self {
            config,
            identity,
            states: StateBook::new(),
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn identity(&self) -> &StrategyId {
        &self.identity
    }

    /// Signal state for a symbol, if it has ever been evaluated.
    pub fn state(&self, symbol: &str) -> Option<&SymbolSignalState> {
        self.states.state(symbol)
    }

    /// Manually arm the entry cooldown for a symbol.
    ///
    /// The surrounding system cools symbols down around halts or its own
    /// risk events; the evaluator treats it like any other cooldown.
    pub fn cool_down(&mut self, symbol: &str, until: NaiveDateTime) {
        self.states.state_mut(symbol).cooldown_until = Some(until);
    }

    /// Evaluate one bar tick for one symbol.
    ///
    /// Gates are checked in order because later checks have side effects
    /// the earlier ones must gate: the cooldown check consumes an expired
    /// cooldown, so it only runs once the window, position and open-order
    /// gates have passed.
    pub fn evaluate(
        &mut self,
        req: &EvalRequest<'_>,
        risk: &mut RiskBook,
    ) -> Result<Evaluation, EvalError> {
        let Some(bar) = req.history.current() else {
            return Ok(Evaluation::no_action());
        };
        let bar = bar.clone();
        let ctx = risk.context_mut(req.symbol);

        let entry_eligible = req.calendar.is_buy_window(req.now)
            && req.position == 0
            && !ctx.open_order
            && !self
                .states
                .state_mut(req.symbol)
                .consume_cooldown(req.now)
            && bar.volume > self.config.min_entry_volume;

        if entry_eligible {
            let state = self.states.state_mut(req.symbol);
            entry::evaluate(&self.config, &self.identity, req, &bar, state, ctx)
        } else if req.calendar.is_sell_window(req.now)
            && req.position > 0
            && ctx.cost_basis.is_some()
            && ctx.owning_strategy.as_ref() == Some(&self.identity)
            && !ctx.open_order
        {
            let state = self.states.state_mut(req.symbol);
            exit::evaluate(&self.config, &self.identity, req, &bar, state, ctx)
        } else {
            Ok(Evaluation::no_action())
        }
    }

    /// Entry fill reported by the execution layer: both bases move to the
    /// fill price and the position is stamped as ours.
    pub fn on_buy_fill(
        &mut self,
        symbol: &str,
        price: f64,
        filled_at: NaiveDateTime,
        risk: &mut RiskBook,
    ) {
        let ctx = risk.context_mut(symbol);
        ctx.cost_basis = Some(price);
        ctx.scalp_basis = Some(price);
        ctx.buy_time = Some(filled_at);
        ctx.owning_strategy = Some(self.identity.clone());
    }

    /// Sell fill reported by the execution layer: only the tactical basis
    /// moves, the original cost basis stays.
    pub fn on_sell_fill(&mut self, symbol: &str, price: f64, risk: &mut RiskBook) {
        risk.context_mut(symbol).scalp_basis = Some(price);
    }
}
