//! Asset-surplus ledger for hedging.
//!
//! Tracks, per hedge side, how many base units of primary-venue fills
//! are still waiting to be offset on the backing venue. The ledger
//! mediates between cumulative fills and the backing venue's
//! minimum-lot constraint: small fills accumulate until half the
//! minimum is reached, and a hedge below the minimum is rounded up to
//! it, leaving a deliberate deficit on that side.

use mirror_core::{Number, Side};

/// Precision of the zero-initialized surplus records; fills carry their
/// own precision and arithmetic narrows to the smaller of the two.
const SURPLUS_PRECISION: u32 = 16;

/// Surplus state for one hedge side, in base units.
///
/// At rest `committed <= total`. Between `commit` and `settle` inside a
/// single fill handling, `committed` may exceed `total`; after settling
/// an over-hedge, `total` itself goes negative until later fills repay
/// the deficit. A failed hedge submission leaves `committed` inflated,
/// and that side skips every subsequent hedge until an operator
/// reconciles the ledger.
#[derive(Debug, Clone, Copy)]
pub struct AssetSurplus {
    /// Base units pending offset.
    pub total: Number,
    /// Base units already committed to an in-flight offset.
    pub committed: Number,
}

impl AssetSurplus {
    fn new() -> Self {
        Self {
            total: Number::zero(SURPLUS_PRECISION),
            committed: Number::zero(SURPLUS_PRECISION),
        }
    }

    /// Base units not yet claimed by any hedge order.
    pub fn uncommitted(&self) -> Number {
        self.total - self.committed
    }
}

/// Per-side surplus records, keyed by the hedge order's side.
#[derive(Debug)]
pub struct SurplusLedger {
    buy: AssetSurplus,
    sell: AssetSurplus,
}

impl SurplusLedger {
    pub fn new() -> Self {
        Self {
            buy: AssetSurplus::new(),
            sell: AssetSurplus::new(),
        }
    }

    pub fn side(&self, side: Side) -> &AssetSurplus {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut AssetSurplus {
        match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        }
    }

    /// Record a primary-venue fill that needs offsetting on `side`.
    pub fn add_fill(&mut self, side: Side, volume: Number) {
        let surplus = self.side_mut(side);
        surplus.total = surplus.total + volume;
    }

    /// Volume to hedge right now, or `None` to keep accumulating.
    ///
    /// Skips while the uncommitted surplus is below half the backing
    /// minimum. Above the minimum the whole uncommitted surplus is
    /// hedged; in between, the minimum itself is hedged (over-hedge).
    /// The result is capped to the backing venue's volume precision.
    pub fn hedge_volume(
        &self,
        side: Side,
        min_base: Number,
        volume_precision: u32,
    ) -> Option<Number> {
        let uncommitted = self.side(side).uncommitted();

        if uncommitted < min_base.scale(0.5) {
            return None;
        }

        let volume = if uncommitted > min_base {
            uncommitted
        } else {
            min_base
        };
        Some(volume.cap_precision(volume_precision))
    }

    /// Claim `volume` so a concurrent handler does not double-count it.
    pub fn commit(&mut self, side: Side, volume: Number) {
        let surplus = self.side_mut(side);
        surplus.committed = surplus.committed + volume;
    }

    /// Release `volume` after the backing venue accepted the hedge.
    pub fn settle(&mut self, side: Side, volume: Number) {
        let surplus = self.side_mut(side);
        surplus.total = surplus.total - volume;
        surplus.committed = surplus.committed - volume;
    }
}

impl Default for SurplusLedger {
    fn default() -> Self {
        Self::new()
    }
}
