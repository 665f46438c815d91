//! Core domain types for the mirror trading engine.
//!
//! This crate provides the fundamental types used throughout the
//! mirroring system:
//! - `Number`: precision-carrying decimal arithmetic
//! - `Asset`, `TradingPair`: venue-agnostic asset identification
//! - `Order`, `Trade`, `RestingOffer`: trading primitives
//! - `OrderBook`, `OrderBookLevel`: backing-venue book snapshots
//! - `OrderConstraints`: per-venue precision and minimum-volume limits
//! - `OpIntent`: batched create/modify/delete operation intents

pub mod asset;
pub mod book;
pub mod constraints;
pub mod error;
pub mod intent;
pub mod number;
pub mod order;

pub use asset::{Asset, TradingPair};
pub use book::{OrderBook, OrderBookLevel};
pub use constraints::{ConstraintsOverride, OrderConstraints};
pub use error::{CoreError, Result};
pub use intent::OpIntent;
pub use number::Number;
pub use order::{Order, OrderType, RestingOffer, Side, Trade};
