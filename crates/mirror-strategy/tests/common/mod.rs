//! Recording mock venues for strategy tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mirror_core::{
    Asset, ConstraintsOverride, Number, OpIntent, Order, OrderBook, OrderConstraints, RestingOffer,
    Side, TradingPair,
};
use mirror_strategy::{MirrorConfig, MirrorStrategy};
use mirror_venue::{BackingVenue, LiabilityModel, PrimaryVenue, VenueResult};

/// Primary venue that turns every call into the corresponding intent.
pub struct MockPrimary {
    pub constraints: OrderConstraints,
    /// When set, modify calls report "no change warranted".
    pub refuse_modify: Mutex<bool>,
}

impl MockPrimary {
    pub fn new(constraints: OrderConstraints) -> Self {
        Self {
            constraints,
            refuse_modify: Mutex::new(false),
        }
    }
}

impl PrimaryVenue for MockPrimary {
    fn order_constraints(&self, _pair: &TradingPair) -> OrderConstraints {
        self.constraints.clone()
    }

    fn incremental_native_amount(&self, is_new_offer: bool) -> f64 {
        if is_new_offer {
            0.5
        } else {
            0.0
        }
    }

    fn create_buy_offer(
        &self,
        base: &Asset,
        quote: &Asset,
        price: Number,
        amount: Number,
        _native_increment: f64,
    ) -> VenueResult<Option<OpIntent>> {
        Ok(Some(OpIntent::Create {
            selling: quote.clone(),
            buying: base.clone(),
            side: Side::Buy,
            price,
            amount,
        }))
    }

    fn create_sell_offer(
        &self,
        base: &Asset,
        quote: &Asset,
        price: Number,
        amount: Number,
        _native_increment: f64,
    ) -> VenueResult<Option<OpIntent>> {
        Ok(Some(OpIntent::Create {
            selling: base.clone(),
            buying: quote.clone(),
            side: Side::Sell,
            price,
            amount,
        }))
    }

    fn modify_buy_offer(
        &self,
        offer: &RestingOffer,
        price: Number,
        amount: Number,
        _native_increment: f64,
    ) -> VenueResult<Option<OpIntent>> {
        if *self.refuse_modify.lock().unwrap() {
            return Ok(None);
        }
        Ok(Some(OpIntent::Modify {
            offer_id: offer.id,
            selling: offer.selling.clone(),
            buying: offer.buying.clone(),
            side: Side::Buy,
            price,
            amount,
        }))
    }

    fn modify_sell_offer(
        &self,
        offer: &RestingOffer,
        price: Number,
        amount: Number,
        _native_increment: f64,
    ) -> VenueResult<Option<OpIntent>> {
        if *self.refuse_modify.lock().unwrap() {
            return Ok(None);
        }
        Ok(Some(OpIntent::Modify {
            offer_id: offer.id,
            selling: offer.selling.clone(),
            buying: offer.buying.clone(),
            side: Side::Sell,
            price,
            amount,
        }))
    }

    fn delete_offer(&self, offer: &RestingOffer) -> OpIntent {
        OpIntent::Delete {
            offer_id: offer.id,
            selling: offer.selling.clone(),
            buying: offer.buying.clone(),
        }
    }
}

/// One recorded liability projection entry.
#[derive(Debug, Clone)]
pub struct LiabilityCall {
    pub selling: Asset,
    pub buying: Asset,
    pub selling_amount: f64,
    pub buying_amount: f64,
    pub native_increment: f64,
}

/// Liability model that records every projection.
#[derive(Default)]
pub struct RecordingLiability {
    pub calls: Mutex<Vec<LiabilityCall>>,
}

impl RecordingLiability {
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl LiabilityModel for RecordingLiability {
    fn add_liabilities(
        &self,
        selling: &Asset,
        buying: &Asset,
        selling_amount: f64,
        buying_amount: f64,
        native_increment: f64,
    ) {
        self.calls.lock().unwrap().push(LiabilityCall {
            selling: selling.clone(),
            buying: buying.clone(),
            selling_amount,
            buying_amount,
            native_increment,
        });
    }
}

/// Backing venue backed by in-memory fixtures.
pub struct MockBacking {
    pub book: Mutex<OrderBook>,
    pub balances: Mutex<HashMap<Asset, Number>>,
    pub constraints: Mutex<OrderConstraints>,
    pub submitted: Mutex<Vec<Order>>,
    pub add_order_result: Mutex<VenueResult<Option<String>>>,
}

impl MockBacking {
    pub fn new(constraints: OrderConstraints) -> Self {
        Self {
            book: Mutex::new(OrderBook::default()),
            balances: Mutex::new(HashMap::new()),
            constraints: Mutex::new(constraints),
            submitted: Mutex::new(Vec::new()),
            add_order_result: Mutex::new(Ok(Some("backing-tx-1".to_string()))),
        }
    }

    pub fn set_book(&self, book: OrderBook) {
        *self.book.lock().unwrap() = book;
    }

    pub fn set_balance(&self, asset: Asset, balance: Number) {
        self.balances.lock().unwrap().insert(asset, balance);
    }

    pub fn set_add_order_result(&self, result: VenueResult<Option<String>>) {
        *self.add_order_result.lock().unwrap() = result;
    }

    pub fn submitted_orders(&self) -> Vec<Order> {
        self.submitted.lock().unwrap().clone()
    }
}

impl BackingVenue for MockBacking {
    fn order_book(&self, _pair: &TradingPair, _depth: u32) -> VenueResult<OrderBook> {
        Ok(self.book.lock().unwrap().clone())
    }

    fn account_balances(&self, assets: &[Asset]) -> VenueResult<HashMap<Asset, Number>> {
        let balances = self.balances.lock().unwrap();
        Ok(assets
            .iter()
            .filter_map(|a| balances.get(a).map(|b| (a.clone(), *b)))
            .collect())
    }

    fn add_order(&self, order: &Order) -> VenueResult<Option<String>> {
        self.submitted.lock().unwrap().push(order.clone());
        self.add_order_result.lock().unwrap().clone()
    }

    fn asset_from_string(&self, symbol: &str) -> VenueResult<Asset> {
        Ok(Asset::new(symbol))
    }

    fn order_constraints(&self, _pair: &TradingPair) -> OrderConstraints {
        self.constraints.lock().unwrap().clone()
    }

    fn override_order_constraints(&self, _pair: &TradingPair, overrides: ConstraintsOverride) {
        self.constraints.lock().unwrap().apply(&overrides);
    }
}

pub fn base() -> Asset {
    Asset::new("XLM")
}

pub fn quote() -> Asset {
    Asset::new("USD")
}

pub fn pair() -> TradingPair {
    TradingPair::new(base(), quote())
}

/// Primary venue precisions mirror an SDEX-like venue.
pub fn primary_constraints() -> OrderConstraints {
    OrderConstraints::new(7, 7, Number::from_f64(0.0000001, 7))
}

pub fn backing_constraints(min_base_volume: f64) -> OrderConstraints {
    OrderConstraints::new(8, 8, Number::from_f64(min_base_volume, 8))
}

pub struct Fixture {
    pub primary: Arc<MockPrimary>,
    pub liability: Arc<RecordingLiability>,
    pub backing: Arc<MockBacking>,
    pub strategy: MirrorStrategy,
}

/// Build a strategy wired to fresh mocks.
pub fn fixture(config: MirrorConfig, backing: OrderConstraints) -> Fixture {
    let primary = Arc::new(MockPrimary::new(primary_constraints()));
    let liability = Arc::new(RecordingLiability::default());
    let backing = Arc::new(MockBacking::new(backing));

    let strategy = MirrorStrategy::new(
        primary.clone(),
        liability.clone(),
        backing.clone(),
        pair(),
        config,
    )
    .expect("strategy construction");

    Fixture {
        primary,
        liability,
        backing,
        strategy,
    }
}

/// Config pointing the backing pair at the same asset strings.
pub fn config() -> MirrorConfig {
    MirrorConfig {
        exchange: "mock".to_string(),
        exchange_base: "XLM".to_string(),
        exchange_quote: "USD".to_string(),
        orderbook_depth: 20,
        volume_divide_by: 2.0,
        per_level_spread: 0.01,
        ..Default::default()
    }
}

pub fn level(price: f64, volume: f64) -> mirror_core::OrderBookLevel {
    mirror_core::OrderBookLevel::new(Number::from_f64(price, 8), Number::from_f64(volume, 8))
}

pub fn bid_offer(id: u64, price: &str, amount: &str) -> RestingOffer {
    // primary-venue bids rest inverted: selling quote, buying base,
    // price in base-per-quote, amount in quote units
    RestingOffer {
        id,
        selling: quote(),
        buying: base(),
        price: price.to_string(),
        amount: amount.to_string(),
    }
}

pub fn ask_offer(id: u64, price: &str, amount: &str) -> RestingOffer {
    RestingOffer {
        id,
        selling: base(),
        buying: quote(),
        price: price.to_string(),
        amount: amount.to_string(),
    }
}
