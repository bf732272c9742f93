//! Shared test double for the host runtime

use crate::oms::{Order, OrderSnapshot, Position, TradingRuntime};
use crate::Side;

/// Runtime mock that records every call and plays back scripted state
///
/// `position` and `orders` are set by the test to script what the host
/// reports; the `submitted_*` and counter fields capture what the strategy
/// did in response.
#[derive(Debug, Default)]
pub(crate) struct MockRuntime {
    pub position: f64,
    pub orders: Vec<Order>,
    pub held_positions: Vec<Position>,
    pub submitted_opens: Vec<(Side, f64, f64)>,
    pub submitted_closes: Vec<(Side, f64, f64, bool)>,
    pub cancel_all_calls: usize,
    pub publish_calls: usize,
}

impl TradingRuntime for MockRuntime {
    fn submit_open(&mut self, side: Side, price: f64, volume: f64) {
        self.submitted_opens.push((side, price, volume));
    }

    fn submit_close(&mut self, side: Side, price: f64, volume: f64, stop: bool) {
        self.submitted_closes.push((side, price, volume, stop));
    }

    fn cancel_all(&mut self) {
        self.cancel_all_calls += 1;
    }

    fn net_position(&self) -> f64 {
        self.position
    }

    fn live_orders(&self) -> OrderSnapshot {
        OrderSnapshot::new(self.orders.clone())
    }

    fn positions(&self) -> Vec<Position> {
        self.held_positions.clone()
    }

    fn publish_state(&mut self) {
        self.publish_calls += 1;
    }
}
