//! Mirror market-making strategy.
//!
//! Replicates the order book of a backing venue onto a primary venue:
//! each update cycle diffs the resting primary-venue offers against the
//! (truncated, rescaled, spread-adjusted) backing book and emits a
//! batched sequence of create/modify/delete intents for the hosting
//! harness to sign and submit. With `OFFSET_TRADES` enabled, fills on
//! the primary venue are hedged by compensating orders on the backing
//! venue, mediated by a per-side surplus ledger.

pub mod balance;
pub mod config;
pub mod error;
mod fill;
pub mod ledger;
pub mod strategy;

pub use balance::{BackingAssetKind, BalanceCoordinator};
pub use config::MirrorConfig;
pub use error::{StrategyError, StrategyResult};
pub use ledger::{AssetSurplus, SurplusLedger};
pub use strategy::{MirrorStrategy, MAX_LEVELS_PER_SIDE};
