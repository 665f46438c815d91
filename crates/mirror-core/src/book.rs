//! Order-book snapshot types for the backing venue.

use serde::{Deserialize, Serialize};

use crate::number::Number;

/// One price/volume rung of an order book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    /// Level price, quote-per-base.
    pub price: Number,
    /// Level volume in base units.
    pub volume: Number,
}

impl OrderBookLevel {
    pub fn new(price: Number, volume: Number) -> Self {
        Self { price, volume }
    }
}

/// A two-sided order book snapshot.
///
/// Bids are ordered by descending price, asks by ascending price; the
/// ordering is the backing venue client's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    bids: Vec<OrderBookLevel>,
    asks: Vec<OrderBookLevel>,
}

impl OrderBook {
    pub fn new(bids: Vec<OrderBookLevel>, asks: Vec<OrderBookLevel>) -> Self {
        Self { bids, asks }
    }

    #[inline]
    pub fn bids(&self) -> &[OrderBookLevel] {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &[OrderBookLevel] {
        &self.asks
    }

    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    /// Copy of the book keeping at most `n` levels per side.
    pub fn truncated(&self, n: usize) -> OrderBook {
        OrderBook {
            bids: self.bids[..self.bids.len().min(n)].to_vec(),
            asks: self.asks[..self.asks.len().min(n)].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(price: f64, volume: f64) -> OrderBookLevel {
        OrderBookLevel::new(Number::from_f64(price, 8), Number::from_f64(volume, 8))
    }

    #[test]
    fn test_best_levels() {
        let book = OrderBook::new(
            vec![level(100.0, 2.0), level(99.0, 1.0)],
            vec![level(101.0, 3.0), level(102.0, 1.0)],
        );

        assert_eq!(book.best_bid().unwrap().price, Number::from_f64(100.0, 8));
        assert_eq!(book.best_ask().unwrap().price, Number::from_f64(101.0, 8));
    }

    #[test]
    fn test_empty_book() {
        let book = OrderBook::default();
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
    }

    #[test]
    fn test_truncated_caps_each_side() {
        let book = OrderBook::new(
            vec![level(100.0, 2.0), level(99.0, 1.0), level(98.0, 1.0)],
            vec![level(101.0, 3.0)],
        );

        let capped = book.truncated(2);
        assert_eq!(capped.bids().len(), 2);
        assert_eq!(capped.asks().len(), 1);
        // the best levels survive truncation
        assert_eq!(capped.best_bid(), book.best_bid());
        assert_eq!(capped.best_ask(), book.best_ask());
    }

    #[test]
    fn test_truncated_beyond_depth_is_identity() {
        let book = OrderBook::new(vec![level(100.0, 2.0)], vec![level(101.0, 3.0)]);
        assert_eq!(book.truncated(50), book);
    }
}
