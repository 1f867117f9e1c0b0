//! Entry engine — momentum-reversal detection and buy authorization.
//!
//! A buy is only authorized after the coarse oscillator crossed below
//! zero (anchor set), later showed a confirmed upward trend while price
//! stayed below the anchor, and the bounded-ratio gate found the symbol
//! not overbought. Detection and trading are decoupled: the cycle that
//! sets or clears the anchor never trades.

use crate::audit::AuditRecord;
use crate::config::StrategyConfig;
use crate::domain::{MinuteBar, OrderIntent, OrderSide, RiskContext, SymbolSignalState};
use crate::engine::evaluator::EvalRequest;
use crate::engine::retry::RetryPolicy;
use crate::engine::sizing::{price_levels, shares_to_buy};
use crate::engine::{EvalError, Evaluation};
use crate::fingerprint::StrategyId;
use crate::pipeline::{self, MomentumSnapshot};
use tracing::{debug, info};

/// Bounded-ratio reading at or above this level vetoes the buy.
pub const RSI_OVERBOUGHT: f64 = 75.0;
/// Entry suppression window armed on a vetoed buy.
pub const COOLDOWN_MINUTES: i64 = 5;
/// Attempt bound for the portfolio-value fetch.
pub const PORTFOLIO_FETCH_ATTEMPTS: u32 = 3;

/// Outcome of advancing the reversal state machine by one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversalAction {
    /// Downward zero-crossing observed; anchor recorded. No trade this
    /// cycle.
    AnchorSet,
    /// Momentum crossed back above zero; the reversal thesis is
    /// invalidated and the anchor cleared. No trade this cycle.
    AnchorCleared,
    /// No transition.
    Hold,
}

/// Advance the reversal state machine on the latest coarse reading.
pub fn advance_reversal(
    state: &mut SymbolSignalState,
    momentum: &MomentumSnapshot,
    close: f64,
) -> ReversalAction {
    if momentum.macd() < 0.0 && momentum.macd_prev() >= 0.0 && state.reversal_anchor.is_none() {
        state.reversal_anchor = Some(close);
        return ReversalAction::AnchorSet;
    }
    if state.reversal_anchor.is_some() && momentum.macd() >= 0.0 {
        state.reversal_anchor = None;
        return ReversalAction::AnchorCleared;
    }
    ReversalAction::Hold
}

/// Trend-change confirmation after an anchor was set.
///
/// Three strictly rising oscillator readings, the latest above a rising
/// signal line, the prior reading already above the prior signal — and
/// price still below the anchor, so the move has not already run away.
pub fn trend_confirmed(momentum: &MomentumSnapshot, anchor: f64, close: f64) -> bool {
    momentum.macd() > momentum.macd_prev()
        && momentum.macd_prev() > momentum.macd_prev2()
        && momentum.macd() > momentum.signal()
        && momentum.signal() > momentum.signal_prev()
        && momentum.macd_prev() > momentum.signal_prev()
        && close < anchor
}

/// Overbought veto: at or above the limit the buy is aborted and the
/// symbol cools down for five minutes.
pub fn overbought_veto(
    state: &mut SymbolSignalState,
    rsi: f64,
    now: chrono::NaiveDateTime,
) -> bool {
    if rsi < RSI_OVERBOUGHT {
        return false;
    }
    state.arm_cooldown(now, COOLDOWN_MINUTES);
    true
}

pub fn evaluate(
    config: &StrategyConfig,
    identity: &StrategyId,
    req: &EvalRequest<'_>,
    bar: &MinuteBar,
    state: &mut SymbolSignalState,
    risk: &mut RiskContext,
) -> Result<Evaluation, EvalError> {
    let Some(momentum) = pipeline::coarse(req.history, config) else {
        return Ok(Evaluation::no_action());
    };

    match advance_reversal(state, &momentum, bar.close) {
        ReversalAction::AnchorSet => {
            info!(
                symbol = req.symbol,
                anchor = bar.close,
                "downward zero-crossing of coarse momentum, anchor set"
            );
            return Ok(Evaluation::no_action());
        }
        ReversalAction::AnchorCleared => {
            info!(
                symbol = req.symbol,
                "upward zero-crossing of coarse momentum, anchor cleared"
            );
            return Ok(Evaluation::no_action());
        }
        ReversalAction::Hold => {}
    }

    let Some(anchor) = state.reversal_anchor else {
        return Ok(Evaluation::no_action());
    };
    if !trend_confirmed(&momentum, anchor, bar.close) {
        return Ok(Evaluation::no_action());
    }
    info!(
        symbol = req.symbol,
        macd = momentum.macd(),
        close = bar.close,
        anchor,
        "upward trend confirmed below anchor"
    );

    let Some(ratio) = pipeline::session_ratio(req.history, config) else {
        return Ok(Evaluation::no_action());
    };
    debug!(symbol = req.symbol, rsi = ratio.last(), "entry risk gate");
    if overbought_veto(state, ratio.last(), req.now) {
        info!(
            symbol = req.symbol,
            rsi = ratio.last(),
            "overbought, cooling down for {COOLDOWN_MINUTES} minutes"
        );
        return Ok(Evaluation::no_action());
    }

    let (stop, target) = price_levels(bar.close, anchor);
    risk.stop_price = Some(stop);
    risk.target_price = Some(target);

    let Some(portfolio_value) = resolve_portfolio_value(req)? else {
        return Ok(Evaluation::no_action());
    };

    let quantity = shares_to_buy(
        portfolio_value,
        config.risk_fraction,
        bar.close,
        stop,
        req.position,
    );
    if quantity <= 0 {
        return Ok(Evaluation::no_action());
    }
    let quantity = quantity as u64;

    // New entry: the previous position's whipsaw memory is void.
    state.whipsawed = false;

    let buy_price = bar.vwap.map_or(bar.close, |v| bar.close.max(v));
    let intent = if config.is_morning_rush(req.now) {
        OrderIntent::market(OrderSide::Buy, quantity)
    } else {
        OrderIntent::limit(OrderSide::Buy, quantity, buy_price)
    };

    info!(
        symbol = req.symbol,
        quantity,
        price = buy_price,
        target,
        stop,
        "submitting buy"
    );
    let audit = AuditRecord::entry(
        &identity.0,
        &momentum,
        bar,
        vec!["macd signal".to_string()],
    );
    Ok(Evaluation::act(intent, audit))
}

/// Portfolio value: the supplied value wins; otherwise fetch through the
/// gateway under the bounded retry policy. No gateway and no value is a
/// structural misuse, not a runtime condition.
fn resolve_portfolio_value(req: &EvalRequest<'_>) -> Result<Option<f64>, EvalError> {
    if let Some(value) = req.portfolio_value {
        return Ok(Some(value));
    }
    let Some(gateway) = req.gateway else {
        return Err(EvalError::NoPortfolioSource);
    };
    match RetryPolicy::new(PORTFOLIO_FETCH_ATTEMPTS).run(|| gateway.portfolio_value()) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::error!(symbol = req.symbol, error = %err, "failed to fetch portfolio value");
            Ok(None)
        }
    }
}
