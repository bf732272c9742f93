//! Order, fill, and position data as reported by the host runtime
//!
//! The decision core never owns these: orders live in the host's book, and
//! the core only reads point-in-time copies to decide whether to act.

use crate::{Offset, Side, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order ID assigned by the host runtime
pub type OrderId = u64;

/// Order state machine as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    /// Submitted to the host, not yet acknowledged
    Submitted,

    /// Acknowledged and resting in the book
    Open,

    /// Partially filled, remainder still live
    PartiallyFilled,

    /// Completely filled
    Filled,

    /// Cancelled before completion
    Cancelled,

    /// Rejected by the host or venue
    Rejected,
}

impl OrderState {
    /// True while the order can still trade
    pub fn is_active(self) -> bool {
        matches!(
            self,
            OrderState::Submitted | OrderState::Open | OrderState::PartiallyFilled
        )
    }
}

/// A single order as seen in a live-order snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub symbol: Symbol,
    pub side: Side,
    pub offset: Offset,
    pub price: f64,
    pub volume: f64,
    pub state: OrderState,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: Side,
        offset: Offset,
        price: f64,
        volume: f64,
    ) -> Self {
        Self {
            id,
            symbol,
            side,
            offset,
            price,
            volume,
            state: OrderState::Submitted,
            created_at: Utc::now(),
        }
    }

    pub fn with_state(mut self, state: OrderState) -> Self {
        self.state = state;
        self
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// Fill notification for one trade execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    pub symbol: Symbol,
    pub side: Side,
    pub offset: Offset,
    pub price: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Fill {
    /// True when this fill opened (part of) a position
    pub fn opens_position(&self) -> bool {
        self.offset == Offset::Open
    }
}

/// Position as reported by the host runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: Symbol,
    pub side: Side,
    pub volume: f64,
    pub entry_price: f64,
}
