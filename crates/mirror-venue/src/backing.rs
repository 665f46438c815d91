//! Backing-venue client capability.

use std::collections::HashMap;

use mirror_core::{Asset, ConstraintsOverride, Number, Order, OrderBook, OrderConstraints, TradingPair};

use crate::error::VenueResult;

/// Client for the venue whose order book is mirrored.
pub trait BackingVenue: Send + Sync {
    /// Fetch the top `depth` levels of the book for a pair.
    fn order_book(&self, pair: &TradingPair, depth: u32) -> VenueResult<OrderBook>;

    /// Fetch account balances for the given assets.
    ///
    /// Assets the venue does not know may be absent from the result.
    fn account_balances(&self, assets: &[Asset]) -> VenueResult<HashMap<Asset, Number>>;

    /// Submit an order; returns the venue transaction id when the
    /// venue assigned one.
    fn add_order(&self, order: &Order) -> VenueResult<Option<String>>;

    /// Resolve a configured asset string to this venue's asset.
    fn asset_from_string(&self, symbol: &str) -> VenueResult<Asset>;

    /// Order constraints for a pair on this venue.
    fn order_constraints(&self, pair: &TradingPair) -> OrderConstraints;

    /// Override parts of the constraints for a pair.
    fn override_order_constraints(&self, pair: &TradingPair, overrides: ConstraintsOverride);
}
