//! Error types for mirror-strategy.

use mirror_core::{Asset, CoreError};
use mirror_venue::VenueError;
use thiserror::Error;

/// Strategy error types.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Invalid mirror config: {0}")]
    Config(String),

    #[error("Venue error: {0}")]
    Venue(#[from] VenueError),

    #[error("Numeric error: {0}")]
    Core(#[from] CoreError),

    #[error("Unable to fetch balance for asset: {0}")]
    MissingBalance(Asset),

    #[error("Backing balances were not recorded before the update")]
    BalancesNotRecorded,

    #[error("Error when offsetting trade: {0}")]
    Offset(String),
}

/// Result type alias for strategy operations.
pub type StrategyResult<T> = std::result::Result<T, StrategyError>;
