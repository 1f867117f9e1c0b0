//! Momentlab Core — single-bar decision engine for an intraday
//! momentum-long strategy.
//!
//! This crate contains the decision core only:
//! - Domain types (minute bars, histories, order intents, per-symbol
//!   signal state, the risk-context surface of the external store)
//! - Indicator kernels (EMA, MACD, RSI) with NaN-warmup semantics
//! - The indicator pipeline with coarse (entry) and fine (exit) modes
//! - Entry engine: reversal-anchor state machine and trend confirmation
//! - Exit engine: priority-ordered sell rules, first match wins
//! - Sizing and throttling: risk-fraction share sizing, minute cooldowns
//!
//! Scheduling, market data, order execution and persistence live with the
//! surrounding system and reach the core only through the traits in
//! `gateway`.

pub mod audit;
pub mod config;
pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod gateway;
pub mod indicators;
pub mod pipeline;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types the runner shares across threads are
    /// Send + Sync. If any type loses this, the build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::MinuteBar>();
        require_sync::<domain::MinuteBar>();
        require_send::<domain::PriceHistory>();
        require_sync::<domain::PriceHistory>();
        require_send::<domain::OrderIntent>();
        require_sync::<domain::OrderIntent>();
        require_send::<domain::SymbolSignalState>();
        require_sync::<domain::SymbolSignalState>();
        require_send::<domain::StateBook>();
        require_sync::<domain::StateBook>();
        require_send::<domain::RiskContext>();
        require_sync::<domain::RiskContext>();
        require_send::<domain::RiskBook>();
        require_sync::<domain::RiskBook>();

        // Configuration and identity
        require_send::<config::StrategyConfig>();
        require_sync::<config::StrategyConfig>();
        require_send::<fingerprint::StrategyId>();
        require_sync::<fingerprint::StrategyId>();

        // Engine types
        require_send::<engine::MomentumEvaluator>();
        require_sync::<engine::MomentumEvaluator>();
        require_send::<engine::Evaluation>();
        require_sync::<engine::Evaluation>();
        require_send::<audit::AuditRecord>();
        require_sync::<audit::AuditRecord>();
    }
}
