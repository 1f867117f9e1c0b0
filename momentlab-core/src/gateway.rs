//! External collaborator traits and structured error types.
//!
//! The scheduling authority decides which windows are buy- or
//! sell-eligible; the broker gateway answers account queries. Both are
//! abstracted behind traits so the runner can swap implementations and
//! tests can mock them.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Structured error types for gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("connectivity failure: {0}")]
    Connectivity(String),

    #[error("gateway rejected request: {0}")]
    Rejected(String),
}

impl GatewayError {
    /// Transient failures are worth retrying; rejections are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, GatewayError::Connectivity(_))
    }
}

/// Broker/account surface the core consumes.
pub trait ExecutionGateway: Send + Sync {
    /// Human-readable name of this gateway.
    fn name(&self) -> &str;

    /// Current total portfolio value.
    fn portfolio_value(&self) -> Result<f64, GatewayError>;
}

/// Trading-window authority: whether "now" is eligible for entries or
/// exits. Owned by the scheduling layer; the core only asks.
pub trait TradingCalendar: Send + Sync {
    fn is_buy_window(&self, now: NaiveDateTime) -> bool;
    fn is_sell_window(&self, now: NaiveDateTime) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_is_transient() {
        assert!(GatewayError::Connectivity("reset by peer".into()).is_transient());
        assert!(!GatewayError::Rejected("bad account".into()).is_transient());
    }

    #[test]
    fn errors_display_context() {
        let err = GatewayError::Connectivity("timed out".into());
        assert_eq!(err.to_string(), "connectivity failure: timed out");
    }
}
