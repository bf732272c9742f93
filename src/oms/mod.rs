//! Host-runtime order interface
//!
//! The decision core never talks to a venue. It drives whatever implements
//! [`TradingRuntime`]: submissions are fire-and-forget (the core does not
//! inspect results; failures surface through the host's own fault handling
//! and the next interval's `cancel_all`), and position/order state is read
//! as point-in-time snapshots fetched fresh where they are used.

pub mod types;

pub use types::{Fill, Order, OrderId, OrderState, Position};

use crate::{Offset, Side, Symbol};

/// Immutable point-in-time view of the order book as the host reports it
///
/// Taken once per query and never updated; the in-flight window between a
/// submission and its appearance here is covered by the strategy's local
/// exit latch, not by this view.
#[derive(Debug, Clone, Default)]
pub struct OrderSnapshot {
    orders: Vec<Order>,
}

impl OrderSnapshot {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// True if a still-active close order in `side` exists for `symbol`
    ///
    /// This is the duplicate-exit check: a live sell-close means a long
    /// position already has an exit in flight, a live buy-close covers a
    /// short.
    pub fn has_live_close(&self, symbol: &Symbol, side: Side) -> bool {
        self.orders.iter().any(|order| {
            order.is_active()
                && order.symbol == *symbol
                && order.side == side
                && order.offset == Offset::Close
        })
    }
}

/// Order-routing and account-state interface supplied by the host runtime
///
/// The controller drives this from a single thread, so implementations need
/// no internal locking on behalf of the strategy core.
pub trait TradingRuntime {
    /// Submit an order that opens a position: buy-to-open or sell-to-open
    fn submit_open(&mut self, side: Side, price: f64, volume: f64);

    /// Submit an order that closes a position; `stop` requests a stop order
    /// triggered at `price` rather than a resting limit
    fn submit_close(&mut self, side: Side, price: f64, volume: f64, stop: bool);

    /// Cancel every outstanding order for this strategy instance
    fn cancel_all(&mut self);

    /// Signed net position: zero flat, positive long, negative short
    fn net_position(&self) -> f64;

    /// Point-in-time view of currently live orders
    fn live_orders(&self) -> OrderSnapshot;

    /// All open positions the host tracks for this account
    fn positions(&self) -> Vec<Position>;

    /// Advisory "strategy state changed" notification (UI refresh etc.)
    fn publish_state(&mut self) {}
}
