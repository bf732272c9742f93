//! Intraday CTA Strategy Engine
//!
//! The decision core of an automated intraday trading system: tick-to-bar
//! aggregation, rolling indicator state, regime classification, breakout
//! signal generation, and order lifecycle management. The host runtime
//! owns connectivity and order routing and drives a [`strategies::Strategy`]
//! through market-data and fill callbacks; everything here is deterministic
//! given the event stream it is fed.

pub mod aggregator;
pub mod config;
pub mod history;
pub mod indicators;
pub mod oms;
pub mod strategies;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use types::*;
