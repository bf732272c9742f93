//! Indicator math backed by the `ta` crate
//!
//! Thin wrappers that feed a value series through a `ta` indicator and pad
//! the warmup region with `None`, so callers can index positions without
//! tracking warmup lengths themselves.

use ta::indicators::{SimpleMovingAverage, StandardDeviation};
use ta::Next;

/// Simple moving average over `values` with the given period
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if values.is_empty() || period == 0 {
        return vec![];
    }

    let mut indicator = match SimpleMovingAverage::new(period) {
        Ok(i) => i,
        Err(_) => return vec![None; values.len()],
    };

    let mut result = Vec::with_capacity(values.len());

    for (i, &value) in values.iter().enumerate() {
        let sma_val = indicator.next(value);
        if i + 1 >= period {
            result.push(Some(sma_val));
        } else {
            result.push(None);
        }
    }

    result
}

/// Rolling population standard deviation over `values` with the given period
pub fn std_dev(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if values.is_empty() || period == 0 {
        return vec![];
    }

    let mut indicator = match StandardDeviation::new(period) {
        Ok(i) => i,
        Err(_) => return vec![None; values.len()],
    };

    let mut result = Vec::with_capacity(values.len());

    for (i, &value) in values.iter().enumerate() {
        let std_val = indicator.next(value);
        if i + 1 >= period {
            result.push(Some(std_val));
        } else {
            result.push(None);
        }
    }

    result
}
