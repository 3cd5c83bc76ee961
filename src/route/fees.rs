use serde::{Deserialize, Serialize};

use crate::types::{Amount, Weight};

use super::engine::PathFinder;

const MILLION: i128 = 1_000_000;

/// Forwarding fee of a payment channel: a proportional part in parts per
/// million of the forwarded amount plus a flat base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingFee {
    /// Proportional fee, parts per million.
    pub ppm: i64,
    /// Flat fee per forward.
    pub base: i64,
}

impl RoutingFee {
    /// Creates a fee schedule.
    pub fn new(ppm: i64, base: i64) -> Self {
        Self { ppm, base }
    }

    /// `amount * ppm / 1_000_000 + base`, saturating at the `i64` range.
    pub fn fee(&self, amount: Amount) -> Weight {
        let proportional = i128::from(amount) * i128::from(self.ppm) / MILLION;
        saturate(proportional + i128::from(self.base))
    }

    /// Amount leaving the channel: the arriving amount plus the fee.
    pub fn forward(&self, amount: Amount) -> Amount {
        amount.saturating_add(self.fee(amount))
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

impl<P> PathFinder<P, RoutingFee> {
    /// Prices every edge by its [`RoutingFee`] and carries the forwarded
    /// amount along the path. Edges without a fee cost nothing and forward
    /// the amount unchanged.
    pub fn use_routing_fees(&mut self) {
        self.set_weight_fn(|amount, fee: Option<&RoutingFee>| fee.map_or(0, |fee| fee.fee(amount)));
        self.set_amount_fn(|amount, fee: Option<&RoutingFee>| {
            fee.map_or(amount, |fee| fee.forward(amount))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_part_truncates() {
        let fee = RoutingFee::new(500, 10);
        assert_eq!(fee.fee(1_001_200), 510);
        assert_eq!(fee.forward(1_001_200), 1_001_710);
        assert_eq!(RoutingFee::new(0, 5000).fee(123), 5000);
    }

    #[test]
    fn large_amounts_saturate() {
        let fee = RoutingFee::new(2_000_000, 0);
        assert_eq!(fee.fee(i64::MAX), i64::MAX);
        assert_eq!(fee.forward(i64::MAX), i64::MAX);
    }
}
