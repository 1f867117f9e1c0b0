//! Exit engine — priority-ordered sell rules.
//!
//! Rules are an ordered table of named predicates over a precomputed
//! `ExitInputs`; the first match wins and no lower-priority rule is
//! considered. Keeping the table flat makes the priority contract
//! testable without the surrounding control flow.

use crate::audit::AuditRecord;
use crate::config::StrategyConfig;
use crate::domain::{MinuteBar, OrderIntent, OrderSide, RiskContext, SymbolSignalState};
use crate::engine::entry::COOLDOWN_MINUTES;
use crate::engine::evaluator::EvalRequest;
use crate::engine::{EvalError, Evaluation};
use crate::fingerprint::StrategyId;
use crate::pipeline;
use tracing::{info, warn};

/// Bounded-ratio exit trigger.
pub const RSI_EXIT: f64 = 79.0;
/// Looser trigger while morning volatility is still settling.
pub const RSI_EXIT_MORNING_RUSH: f64 = 85.0;
/// Close this fraction below cost basis marks the position whipsawed.
pub const WHIPSAW_FRACTION: f64 = 0.99;

/// Everything the sell rules compare, computed once per evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitInputs {
    pub close: f64,
    pub vwap: Option<f64>,
    pub cost_basis: f64,
    pub scalp_basis: f64,
    pub stop_price: f64,
    pub target_price: f64,
    /// Midpoint between target and scalp basis.
    pub scalp_threshold: f64,
    /// Close vs scalp basis, fractional.
    pub movement: f64,
    /// Highest movement observed since the entry fill.
    pub max_movement: f64,
    pub macd: f64,
    pub macd_prev: f64,
    pub signal: f64,
    pub rsi: f64,
    /// Decimal places for oscillator comparisons; fewer when the values
    /// are large enough that sub-millesimal noise cannot flip a sign.
    pub round_factor: u32,
    pub whipsawed: bool,
    pub morning_rush: bool,
}

impl ExitInputs {
    pub fn macd_below_signal(&self) -> bool {
        round_to(self.macd, self.round_factor) < round_to(self.signal, self.round_factor)
    }

    pub fn macd_falling(&self) -> bool {
        round_to(self.macd, self.round_factor) < round_to(self.macd_prev, self.round_factor)
    }

    pub fn rsi_limit(&self) -> f64 {
        if self.morning_rush {
            RSI_EXIT_MORNING_RUSH
        } else {
            RSI_EXIT
        }
    }
}

/// Comparison precision: two decimals once either oscillator value is
/// large in magnitude, three near zero to avoid false flips from floating
/// noise.
pub fn round_factor(macd: f64, signal: f64) -> u32 {
    if macd.abs() >= 0.1 || signal.abs() >= 0.1 {
        2
    } else {
        3
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// What a matched rule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAction {
    /// Sell the whole position at market.
    MarketAll,
    /// Sell the whole position at market and cool the symbol down.
    MarketAllCoolDown,
    /// Sell half the position (minimum one share) at a limit at the close.
    LimitHalf,
    /// Sell the whole position at a limit at the close.
    LimitAll,
}

pub struct ExitRule {
    pub name: &'static str,
    pub action: ExitAction,
    pub matches: fn(&ExitInputs) -> bool,
}

fn stop_hit(i: &ExitInputs) -> bool {
    i.close <= i.stop_price
}

fn target_reached(i: &ExitInputs) -> bool {
    i.close >= i.target_price && i.macd <= 0.0
}

fn overbought(i: &ExitInputs) -> bool {
    i.rsi >= i.rsi_limit()
}

fn bail_out(i: &ExitInputs) -> bool {
    (i.scalp_basis > i.cost_basis || (i.max_movement > 0.02 && i.max_movement > i.movement))
        && i.macd_below_signal()
        && i.macd_falling()
}

fn scale_out(i: &ExitInputs) -> bool {
    i.movement > 0.04 || i.vwap.is_some_and(|v| v > i.scalp_threshold)
}

fn whipsaw_bail(i: &ExitInputs) -> bool {
    i.whipsawed && i.movement > 0.01 && i.macd_below_signal() && i.macd_falling()
}

/// Sell rules in priority order; the first match wins.
pub static EXIT_RULES: &[ExitRule] = &[
    ExitRule {
        name: "stopped",
        action: ExitAction::MarketAll,
        matches: stop_hit,
    },
    ExitRule {
        name: "above target & macd negative",
        action: ExitAction::MarketAll,
        matches: target_reached,
    },
    ExitRule {
        name: "rsi max, cool-down for 5 minutes",
        action: ExitAction::MarketAllCoolDown,
        matches: overbought,
    },
    ExitRule {
        name: "bail",
        action: ExitAction::MarketAll,
        matches: bail_out,
    },
    ExitRule {
        name: "scale-out",
        action: ExitAction::LimitHalf,
        matches: scale_out,
    },
    ExitRule {
        name: "bail post whipsawed",
        action: ExitAction::LimitAll,
        matches: whipsaw_bail,
    },
];

/// First matching rule, or `None` when the position should be held.
pub fn first_match(inputs: &ExitInputs) -> Option<&'static ExitRule> {
    EXIT_RULES.iter().find(|rule| (rule.matches)(inputs))
}

/// Scale-out sells half the position, floored, never less than one share.
pub fn scale_out_quantity(position: u64) -> u64 {
    if position > 1 {
        position / 2
    } else {
        1
    }
}

pub fn evaluate(
    config: &StrategyConfig,
    identity: &StrategyId,
    req: &EvalRequest<'_>,
    bar: &MinuteBar,
    state: &mut SymbolSignalState,
    risk: &mut RiskContext,
) -> Result<Evaluation, EvalError> {
    // Preconditions guarantee a cost basis; the rest of the context is
    // written by the entry path and the fill hooks.
    let Some(cost_basis) = risk.cost_basis else {
        return Ok(Evaluation::no_action());
    };

    if !state.whipsawed && bar.close < cost_basis * WHIPSAW_FRACTION {
        state.whipsawed = true;
    }

    let (Some(scalp_basis), Some(stop_price), Some(target_price), Some(buy_time)) = (
        risk.scalp_basis,
        risk.stop_price,
        risk.target_price,
        risk.buy_time,
    ) else {
        warn!(
            symbol = req.symbol,
            "risk context incomplete, holding position"
        );
        return Ok(Evaluation::no_action());
    };

    let Some(fine) = pipeline::fine(req.history, config) else {
        return Ok(Evaluation::no_action());
    };

    let movement = (bar.close - scalp_basis) / scalp_basis;
    let max_close = req
        .history
        .max_close_since(buy_time, config.session_open, config.session_close)
        .unwrap_or(bar.close);
    let max_movement = (max_close - scalp_basis) / scalp_basis;

    let inputs = ExitInputs {
        close: bar.close,
        vwap: bar.vwap,
        cost_basis,
        scalp_basis,
        stop_price,
        target_price,
        scalp_threshold: (target_price + scalp_basis) / 2.0,
        movement,
        max_movement,
        macd: fine.momentum.macd(),
        macd_prev: fine.momentum.macd_prev(),
        signal: fine.momentum.signal(),
        rsi: fine.ratio.last(),
        round_factor: round_factor(fine.momentum.macd(), fine.momentum.signal()),
        whipsawed: state.whipsawed,
        morning_rush: config.is_morning_rush(req.now),
    };

    let Some(rule) = first_match(&inputs) else {
        return Ok(Evaluation::no_action());
    };

    let intent = match rule.action {
        ExitAction::MarketAll => OrderIntent::market(OrderSide::Sell, req.position),
        ExitAction::MarketAllCoolDown => {
            state.arm_cooldown(req.now, COOLDOWN_MINUTES);
            OrderIntent::market(OrderSide::Sell, req.position)
        }
        ExitAction::LimitHalf => OrderIntent::limit(
            OrderSide::Sell,
            scale_out_quantity(req.position),
            bar.close,
        ),
        ExitAction::LimitAll => OrderIntent::limit(OrderSide::Sell, req.position, bar.close),
    };

    info!(
        symbol = req.symbol,
        quantity = intent.quantity,
        price = bar.close,
        reason = rule.name,
        "submitting sell"
    );
    let audit = AuditRecord::exit(
        &identity.0,
        &fine.momentum,
        &fine.ratio,
        movement,
        bar,
        vec![rule.name.to_string()],
    );
    Ok(Evaluation::act(intent, audit))
}
