//! Order intents — the decision core's only output.
//!
//! Engines emit *intents*, never fills. An intent is a value object handed
//! to the external execution gateway and consumed immediately; the core
//! never mutates or tracks it afterwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order type taxonomy for this core: immediate market or priced limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit { limit_price: f64 },
}

impl OrderType {
    pub fn limit_price(&self) -> Option<f64> {
        match self {
            OrderType::Limit { limit_price } => Some(*limit_price),
            OrderType::Market => None,
        }
    }
}

/// A fully specified, bounded order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub side: OrderSide,
    /// Share quantity, always positive.
    pub quantity: u64,
    pub order_type: OrderType,
}

impl OrderIntent {
    pub fn market(side: OrderSide, quantity: u64) -> Self {
        debug_assert!(quantity > 0, "order quantity must be positive");
        Self {
            side,
            quantity,
            order_type: OrderType::Market,
        }
    }

    pub fn limit(side: OrderSide, quantity: u64, limit_price: f64) -> Self {
        debug_assert!(quantity > 0, "order quantity must be positive");
        Self {
            side,
            quantity,
            order_type: OrderType::Limit { limit_price },
        }
    }

    pub fn is_market(&self) -> bool {
        matches!(self.order_type, OrderType::Market)
    }

    pub fn limit_price(&self) -> Option<f64> {
        self.order_type.limit_price()
    }
}
