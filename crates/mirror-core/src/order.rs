//! Order, trade, and resting-offer types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::asset::{Asset, TradingPair};
use crate::number::Number;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side.
    ///
    /// A fill on the primary venue is hedged by an order on the
    /// backing venue on the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "limit"),
            Self::Market => write!(f, "market"),
        }
    }
}

/// An order to be placed on a venue.
///
/// Volumes are denominated in base units; prices are quote-per-base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub pair: TradingPair,
    pub side: Side,
    pub order_type: OrderType,
    pub price: Number,
    pub volume: Number,
    /// Placement timestamp (Unix milliseconds), when known.
    pub timestamp_ms: Option<i64>,
}

/// A fill notification from the primary venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Venue transaction id of the fill.
    pub transaction_id: String,
    pub pair: TradingPair,
    /// Side of the filled offer on the primary venue.
    pub side: Side,
    pub price: Number,
    /// Filled volume in base units.
    pub volume: Number,
    pub timestamp_ms: Option<i64>,
}

/// An offer resting on the primary venue.
///
/// Price and amount are the venue's string representations, parsed at
/// the primary venue's precisions when compared. Buy offers follow the
/// venue convention of resting inverted: selling = quote, buying =
/// base, price = base-per-quote, amount in selling (quote) units. The
/// engine compensates for this when diffing against the backing book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOffer {
    pub id: u64,
    pub selling: Asset,
    pub buying: Asset,
    pub price: String,
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Buy.to_string(), "buy");
        assert_eq!(Side::Sell.to_string(), "sell");
    }
}
