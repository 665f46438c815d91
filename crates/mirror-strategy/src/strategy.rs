//! The mirror engine.
//!
//! Each update cycle fetches the backing book, truncates both sides to
//! the per-side operation cap, and walks the old-offer / new-level
//! pairs producing delete, modify, and create intents. Deletes are
//! emitted before modifies and creates within each side so liability
//! capacity is freed before it is re-consumed, and a crossed book flips
//! the side order so fresh asks land before the stale bids they would
//! trade against.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use mirror_core::{
    Asset, ConstraintsOverride, Number, OpIntent, OrderBookLevel, OrderConstraints, RestingOffer,
    Side, TradingPair,
};
use mirror_venue::{BackingVenue, LiabilityModel, PrimaryVenue, VenueResult};

use crate::balance::{BackingAssetKind, BalanceCoordinator};
use crate::config::MirrorConfig;
use crate::error::{StrategyError, StrategyResult};
use crate::ledger::{AssetSurplus, SurplusLedger};

/// Maximum levels mirrored per side; half of the primary venue's
/// 100-operation batch ceiling.
pub const MAX_LEVELS_PER_SIDE: usize = 50;

/// Tolerance for deciding that a modify would be a no-op.
const NOOP_EPSILON: f64 = 1e-4;

type ModifyFn<'a> =
    dyn Fn(&RestingOffer, Number, Number, f64) -> VenueResult<Option<OpIntent>> + 'a;
type CreateFn<'a> =
    dyn Fn(&Asset, &Asset, Number, Number, f64) -> VenueResult<Option<OpIntent>> + 'a;

/// Backing-venue balances snapshotted at `pre_update`.
#[derive(Debug, Clone, Copy)]
struct BackingBalances {
    base: Number,
    quote: Number,
}

/// Strategy that mirrors the order book of a backing venue.
pub struct MirrorStrategy {
    primary: Arc<dyn PrimaryVenue>,
    liability: Arc<dyn LiabilityModel>,
    pub(crate) backing: Arc<dyn BackingVenue>,
    pair: TradingPair,
    primary_constraints: OrderConstraints,
    backing_pair: TradingPair,
    backing_constraints: OrderConstraints,
    orderbook_depth: u32,
    per_level_spread: f64,
    volume_divide_by: f64,
    offset_trades: bool,
    /// Only state shared with the fill-handler threads.
    pub(crate) ledger: Mutex<SurplusLedger>,
    backing_balances: Mutex<Option<BackingBalances>>,
}

impl std::fmt::Debug for MirrorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorStrategy")
            .field("pair", &self.pair)
            .field("backing_pair", &self.backing_pair)
            .field("orderbook_depth", &self.orderbook_depth)
            .field("per_level_spread", &self.per_level_spread)
            .field("volume_divide_by", &self.volume_divide_by)
            .field("offset_trades", &self.offset_trades)
            .finish_non_exhaustive()
    }
}

impl MirrorStrategy {
    /// Construct the strategy, resolving configuration and applying
    /// constraint overrides to the backing venue.
    pub fn new(
        primary: Arc<dyn PrimaryVenue>,
        liability: Arc<dyn LiabilityModel>,
        backing: Arc<dyn BackingVenue>,
        pair: TradingPair,
        mut config: MirrorConfig,
    ) -> StrategyResult<Self> {
        config.resolve_deprecated();
        config.validate()?;

        let primary_constraints = primary.order_constraints(&pair);

        // the backing pair comes from the strategy config, not from the
        // primary pair passed in
        let backing_pair = TradingPair::new(
            backing.asset_from_string(&config.exchange_base)?,
            backing.asset_from_string(&config.exchange_quote)?,
        );

        backing.override_order_constraints(
            &backing_pair,
            ConstraintsOverride {
                price_precision: config.price_precision_override,
                volume_precision: config.volume_precision_override,
                ..Default::default()
            },
        );
        if let Some(min_base) = config.min_base_volume_override {
            // the updated volume precision converts the override
            let precision = backing.order_constraints(&backing_pair).volume_precision;
            backing.override_order_constraints(
                &backing_pair,
                ConstraintsOverride {
                    min_base_volume: Some(Number::from_f64(min_base, precision)),
                    ..Default::default()
                },
            );
        }
        if let Some(min_quote) = config.min_quote_volume_override {
            let precision = backing.order_constraints(&backing_pair).volume_precision;
            backing.override_order_constraints(
                &backing_pair,
                ConstraintsOverride {
                    min_quote_volume: Some(Number::from_f64(min_quote, precision)),
                    ..Default::default()
                },
            );
        }
        let backing_constraints = backing.order_constraints(&backing_pair);

        info!(pair = %pair, constraints = %primary_constraints, "primary venue");
        info!(pair = %backing_pair, constraints = %backing_constraints, "backing venue");

        Ok(Self {
            primary,
            liability,
            backing,
            pair,
            primary_constraints,
            backing_pair,
            backing_constraints,
            orderbook_depth: config.orderbook_depth,
            per_level_spread: config.per_level_spread,
            volume_divide_by: config.volume_divide_by,
            offset_trades: config.offset_trades,
            ledger: Mutex::new(SurplusLedger::new()),
            backing_balances: Mutex::new(None),
        })
    }

    /// Whether fills should be routed to the fill handler.
    pub fn offsets_trades(&self) -> bool {
        self.offset_trades
    }

    pub fn primary_constraints(&self) -> &OrderConstraints {
        &self.primary_constraints
    }

    pub fn backing_constraints(&self) -> &OrderConstraints {
        &self.backing_constraints
    }

    pub fn backing_pair(&self) -> &TradingPair {
        &self.backing_pair
    }

    /// Snapshot of the surplus record for one hedge side.
    pub fn surplus(&self, side: Side) -> AssetSurplus {
        *self.ledger.lock().side(side)
    }

    /// The engine prunes nothing; all resting offers stay in play.
    pub fn prune_existing_offers(
        &self,
        buying_a_offers: Vec<RestingOffer>,
        selling_a_offers: Vec<RestingOffer>,
    ) -> (Vec<OpIntent>, Vec<RestingOffer>, Vec<RestingOffer>) {
        (Vec::new(), buying_a_offers, selling_a_offers)
    }

    /// Prepare the next update; with hedging enabled this refreshes the
    /// backing-venue balance snapshot used by the balance coordinators.
    pub fn pre_update(
        &self,
        _max_asset_a: f64,
        _max_asset_b: f64,
        _trust_a: f64,
        _trust_b: f64,
    ) -> StrategyResult<()> {
        if self.offset_trades {
            self.record_balances()
        } else {
            Ok(())
        }
    }

    fn record_balances(&self) -> StrategyResult<()> {
        let assets = [self.backing_pair.base.clone(), self.backing_pair.quote.clone()];
        let balances = self.backing.account_balances(&assets)?;

        let base = *balances
            .get(&self.backing_pair.base)
            .ok_or_else(|| StrategyError::MissingBalance(self.backing_pair.base.clone()))?;
        let quote = *balances
            .get(&self.backing_pair.quote)
            .ok_or_else(|| StrategyError::MissingBalance(self.backing_pair.quote.clone()))?;

        *self.backing_balances.lock() = Some(BackingBalances { base, quote });
        Ok(())
    }

    /// Build the batched operations for one update cycle.
    ///
    /// `buying_a_offers` are the resting primary-venue bids (stored
    /// inverted per the venue convention), `selling_a_offers` the
    /// resting asks. The returned intents are ordered for submission.
    pub fn update_with_ops(
        &self,
        buying_a_offers: &[RestingOffer],
        selling_a_offers: &[RestingOffer],
    ) -> StrategyResult<Vec<OpIntent>> {
        let book = self
            .backing
            .order_book(&self.backing_pair, self.orderbook_depth)?
            .truncated(MAX_LEVELS_PER_SIDE);
        let bids = book.bids();
        let asks = book.asks();

        let balances = *self.backing_balances.lock();
        if self.offset_trades && balances.is_none() {
            return Err(StrategyError::BalancesNotRecorded);
        }

        // we sell on the backing venue to offset trades bought on the
        // primary venue, and vice versa
        let mut sell_coordinator =
            balances.map(|b| BalanceCoordinator::new(b.base, BackingAssetKind::Base, false));
        let modify_buy = |offer: &RestingOffer, price: Number, amount: Number, native: f64| {
            self.primary.modify_buy_offer(offer, price, amount, native)
        };
        let create_buy = |base: &Asset, quote: &Asset, price: Number, amount: Number, native: f64| {
            self.primary.create_buy_offer(base, quote, price, amount, native)
        };
        let buy_ops = self.update_levels(
            buying_a_offers,
            bids,
            &modify_buy,
            &create_buy,
            1.0 - self.per_level_spread,
            true,
            sell_coordinator.as_mut(),
        )?;
        info!(count = buy_ops.len(), "buy-side ops in this update");

        let mut buy_coordinator =
            balances.map(|b| BalanceCoordinator::new(b.quote, BackingAssetKind::Quote, true));
        let modify_sell = |offer: &RestingOffer, price: Number, amount: Number, native: f64| {
            self.primary.modify_sell_offer(offer, price, amount, native)
        };
        let create_sell = |base: &Asset, quote: &Asset, price: Number, amount: Number, native: f64| {
            self.primary.create_sell_offer(base, quote, price, amount, native)
        };
        let sell_ops = self.update_levels(
            selling_a_offers,
            asks,
            &modify_sell,
            &create_sell,
            1.0 + self.per_level_spread,
            false,
            buy_coordinator.as_mut(),
        )?;
        info!(count = sell_ops.len(), "sell-side ops in this update");

        let mut ops = Vec::with_capacity(buy_ops.len() + sell_ops.len());
        if self.is_crossed(book.bids(), selling_a_offers)? {
            ops.extend(sell_ops);
            ops.extend(buy_ops);
        } else {
            ops.extend(buy_ops);
            ops.extend(sell_ops);
        }
        Ok(ops)
    }

    /// Reserved; the engine keeps no per-cycle state to tear down.
    pub fn post_update(&self) -> StrategyResult<()> {
        Ok(())
    }

    /// Top backing bid at or above the top existing primary ask.
    fn is_crossed(
        &self,
        bids: &[OrderBookLevel],
        selling_a_offers: &[RestingOffer],
    ) -> StrategyResult<bool> {
        let (Some(top_bid), Some(top_ask)) = (bids.first(), selling_a_offers.first()) else {
            return Ok(false);
        };
        let ask_price = Number::parse(&top_ask.price, self.primary_constraints.price_precision)?;
        Ok(top_bid.price >= ask_price)
    }

    /// Diff one side's resting offers against the backing levels.
    #[allow(clippy::too_many_arguments)]
    fn update_levels(
        &self,
        old_offers: &[RestingOffer],
        new_orders: &[OrderBookLevel],
        modify_offer: &ModifyFn<'_>,
        create_offer: &CreateFn<'_>,
        price_multiplier: f64,
        invert_for_buy_check: bool,
        mut coordinator: Option<&mut BalanceCoordinator>,
    ) -> StrategyResult<Vec<OpIntent>> {
        let mut ops = Vec::new();
        let mut delete_ops = Vec::new();

        for (old_offer, new_order) in old_offers.iter().zip(new_orders.iter()) {
            let (modify_op, delete_op) = self.do_modify_offer(
                old_offer,
                new_order,
                price_multiplier,
                modify_offer,
                invert_for_buy_check,
            )?;
            if let Some(op) = modify_op {
                // admission runs on the raw backing level, before the
                // spread and precision adjustments
                if let Some(bc) = coordinator.as_deref_mut() {
                    if !bc.check_balance(new_order.volume, new_order.price) {
                        continue;
                    }
                }
                ops.push(op);
            }
            if let Some(op) = delete_op {
                delete_ops.push(op);
            }
        }

        if new_orders.len() >= old_offers.len() {
            // create offers for the remaining new levels
            for new_order in &new_orders[old_offers.len()..] {
                let price = new_order.price.scale(price_multiplier);
                let vol = new_order.volume.scale(1.0 / self.volume_divide_by);
                let native_increment = self.primary.incremental_native_amount(true);

                if vol < self.backing_constraints.min_base_volume {
                    debug!(
                        volume = %vol,
                        min_base_volume = %self.backing_constraints.min_base_volume,
                        "skip level creation, volume below backing venue minimum"
                    );
                    continue;
                }
                if let Some(bc) = coordinator.as_deref_mut() {
                    if !bc.check_balance(vol, price) {
                        continue;
                    }
                }

                let offer_price = price.cap_precision(self.primary_constraints.price_precision);
                let offer_amount = vol.cap_precision(self.primary_constraints.volume_precision);
                if let Some(op) = create_offer(
                    &self.pair.base,
                    &self.pair.quote,
                    offer_price,
                    offer_amount,
                    native_increment,
                )? {
                    if invert_for_buy_check {
                        self.liability.add_liabilities(
                            &self.pair.quote,
                            &self.pair.base,
                            (offer_amount * offer_price).as_f64(),
                            offer_amount.as_f64(),
                            native_increment,
                        );
                    } else {
                        self.liability.add_liabilities(
                            &self.pair.base,
                            &self.pair.quote,
                            offer_amount.as_f64(),
                            (offer_amount * offer_price).as_f64(),
                            native_increment,
                        );
                    }
                    ops.push(op);
                }
            }
        } else {
            // delete the prior offers with no matching level
            for old_offer in &old_offers[new_orders.len()..] {
                delete_ops.push(self.primary.delete_offer(old_offer));
            }
        }

        // deletes go first so liability capacity is freed before the
        // new and modified offers consume it
        debug!(count = delete_ops.len(), "prepended delete ops");
        delete_ops.extend(ops);
        Ok(delete_ops)
    }

    /// Decide what to do with one (old offer, new level) pair.
    ///
    /// Returns `(modify, delete)` where at most one is set; both empty
    /// means the resting offer already matches the target within
    /// tolerance and only the liability projection was refreshed.
    fn do_modify_offer(
        &self,
        old_offer: &RestingOffer,
        new_order: &OrderBookLevel,
        price_multiplier: f64,
        modify_offer: &ModifyFn<'_>,
        invert_for_buy_check: bool,
    ) -> StrategyResult<(Option<OpIntent>, Option<OpIntent>)> {
        let price = new_order.price.scale(price_multiplier);
        let vol = new_order.volume.scale(1.0 / self.volume_divide_by);
        let mut old_price =
            Number::parse(&old_offer.price, self.primary_constraints.price_precision)?;
        let mut old_vol =
            Number::parse(&old_offer.amount, self.primary_constraints.volume_precision)?;
        if invert_for_buy_check {
            // buy offers rest with the amount in quote units and the
            // price inverted; undo both so the comparison is in the
            // backing book's terms
            old_vol = old_vol * old_price;
            old_price = old_price.invert();
        }

        let native_increment = self.primary.incremental_native_amount(false);
        if old_price.equals_within_epsilon(price, NOOP_EPSILON)
            && old_vol.equals_within_epsilon(vol, NOOP_EPSILON)
        {
            // the caller cleared its projection at the start of the
            // cycle, so a retained offer must still be re-added
            if invert_for_buy_check {
                self.liability.add_liabilities(
                    &old_offer.selling,
                    &old_offer.buying,
                    (old_vol * old_price).as_f64(),
                    old_vol.as_f64(),
                    native_increment,
                );
            } else {
                self.liability.add_liabilities(
                    &old_offer.selling,
                    &old_offer.buying,
                    old_vol.as_f64(),
                    (old_vol * old_price).as_f64(),
                    native_increment,
                );
            }
            return Ok((None, None));
        }

        // convert from backing-venue precision to the primary venue's
        let offer_price = price.cap_precision(self.primary_constraints.price_precision);
        let offer_amount = vol.cap_precision(self.primary_constraints.volume_precision);
        if self.offset_trades && offer_amount < self.backing_constraints.min_base_volume {
            info!(
                volume = %offer_amount,
                min_base_volume = %self.backing_constraints.min_base_volume,
                "deleting level, volume dropped below the backing venue minimum"
            );
            return Ok((None, Some(self.primary.delete_offer(old_offer))));
        }

        match modify_offer(old_offer, offer_price, offer_amount, native_increment)? {
            Some(op) => {
                if invert_for_buy_check {
                    self.liability.add_liabilities(
                        &old_offer.selling,
                        &old_offer.buying,
                        (offer_amount * offer_price).as_f64(),
                        offer_amount.as_f64(),
                        native_increment,
                    );
                } else {
                    self.liability.add_liabilities(
                        &old_offer.selling,
                        &old_offer.buying,
                        offer_amount.as_f64(),
                        (offer_amount * offer_price).as_f64(),
                        native_increment,
                    );
                }
                Ok((Some(op), None))
            }
            // a nil modify means the offer should be withdrawn
            None => Ok((None, Some(self.primary.delete_offer(old_offer)))),
        }
    }
}
