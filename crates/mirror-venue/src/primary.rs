//! Primary-venue client capability.

use mirror_core::{Asset, Number, OpIntent, OrderConstraints, RestingOffer, TradingPair};

use crate::error::VenueResult;

/// Client for the venue holding the mirrored offers.
///
/// Create and modify methods return `Ok(None)` when the client decides
/// no change is warranted; the engine interprets a `None` modify as
/// "withdraw this offer". The client owns the venue's buy-offer price
/// inversion: `create_buy_offer`/`modify_buy_offer` take the price as
/// quote-per-base like everything else in the engine.
pub trait PrimaryVenue: Send + Sync {
    /// Order constraints for a pair on this venue.
    fn order_constraints(&self, pair: &TradingPair) -> OrderConstraints;

    /// Ledger-native fee/reserve cost of creating (`is_new_offer`) or
    /// modifying one offer.
    fn incremental_native_amount(&self, is_new_offer: bool) -> f64;

    fn create_buy_offer(
        &self,
        base: &Asset,
        quote: &Asset,
        price: Number,
        amount: Number,
        native_increment: f64,
    ) -> VenueResult<Option<OpIntent>>;

    fn create_sell_offer(
        &self,
        base: &Asset,
        quote: &Asset,
        price: Number,
        amount: Number,
        native_increment: f64,
    ) -> VenueResult<Option<OpIntent>>;

    fn modify_buy_offer(
        &self,
        offer: &RestingOffer,
        price: Number,
        amount: Number,
        native_increment: f64,
    ) -> VenueResult<Option<OpIntent>>;

    fn modify_sell_offer(
        &self,
        offer: &RestingOffer,
        price: Number,
        amount: Number,
        native_increment: f64,
    ) -> VenueResult<Option<OpIntent>>;

    /// Build the intent withdrawing an existing offer. Always succeeds;
    /// a delete needs no venue-side validation.
    fn delete_offer(&self, offer: &RestingOffer) -> OpIntent;
}
