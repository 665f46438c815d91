//! Balance coordination between the two venues.
//!
//! Admission control for new primary-venue offers against the backing
//! venue's unspent balance. One coordinator exists per side per update
//! cycle and is discarded afterwards; balances are re-read at the next
//! `pre_update`.

use std::fmt;

use mirror_core::Number;
use tracing::debug;

/// Which backing asset a coordinator draws down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackingAssetKind {
    Base,
    Quote,
}

impl fmt::Display for BackingAssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Quote => write!(f, "quote"),
        }
    }
}

/// Tracks cumulative units committed within one update cycle against a
/// backing-venue balance snapshot.
#[derive(Debug)]
pub struct BalanceCoordinator {
    placed_units: Number,
    backing_balance: Number,
    backing_asset: BackingAssetKind,
    /// When the hedge side buys on the backing venue, admission is
    /// measured in quote units (`volume * price`); otherwise in base
    /// units.
    is_backing_buy: bool,
}

impl BalanceCoordinator {
    pub fn new(
        backing_balance: Number,
        backing_asset: BackingAssetKind,
        is_backing_buy: bool,
    ) -> Self {
        Self {
            placed_units: Number::zero(backing_balance.precision()),
            backing_balance,
            backing_asset,
            is_backing_buy,
        }
    }

    /// Admit `volume` at `price`, committing the additional units on
    /// success. Rejections log and leave the committed units unchanged.
    pub fn check_balance(&mut self, volume: Number, price: Number) -> bool {
        let additional = if self.is_backing_buy {
            volume * price
        } else {
            volume
        };

        let new_placed = self.placed_units + additional;
        if new_placed > self.backing_balance {
            debug!(
                asset = %self.backing_asset,
                balance = %self.backing_balance,
                required = %new_placed,
                "skip level creation, not enough balance on backing exchange"
            );
            return false;
        }

        self.placed_units = new_placed;
        true
    }

    /// Units committed so far this cycle.
    pub fn placed_units(&self) -> Number {
        self.placed_units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn n(value: f64) -> Number {
        Number::from_f64(value, 8)
    }

    #[test]
    fn test_admits_until_balance_exhausted() {
        let mut bc = BalanceCoordinator::new(n(1.5), BackingAssetKind::Base, false);

        assert!(bc.check_balance(n(1.0), n(99.0)));
        assert_eq!(bc.placed_units().as_decimal(), dec!(1));

        // 1 + 1 = 2 > 1.5
        assert!(!bc.check_balance(n(1.0), n(98.0)));
        assert!(!bc.check_balance(n(1.0), n(97.0)));
        assert_eq!(bc.placed_units().as_decimal(), dec!(1));
    }

    #[test]
    fn test_backing_buy_measures_quote_units() {
        let mut bc = BalanceCoordinator::new(n(150.0), BackingAssetKind::Quote, true);

        // 1 * 100 = 100 quote units
        assert!(bc.check_balance(n(1.0), n(100.0)));
        assert_eq!(bc.placed_units().as_decimal(), dec!(100));

        // 100 + 100 > 150
        assert!(!bc.check_balance(n(1.0), n(100.0)));
    }

    #[test]
    fn test_exact_balance_is_admitted() {
        let mut bc = BalanceCoordinator::new(n(2.0), BackingAssetKind::Base, false);

        assert!(bc.check_balance(n(2.0), n(1.0)));
        assert!(!bc.check_balance(n(0.1), n(1.0)));
    }

    #[test]
    fn test_rejection_leaves_state_unchanged() {
        let mut bc = BalanceCoordinator::new(n(1.0), BackingAssetKind::Base, false);

        assert!(!bc.check_balance(n(2.0), n(1.0)));
        assert_eq!(bc.placed_units().as_decimal(), dec!(0));
        // a smaller level still fits afterwards
        assert!(bc.check_balance(n(0.8), n(1.0)));
    }
}
