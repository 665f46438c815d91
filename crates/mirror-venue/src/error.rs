//! Error types for venue clients.

use thiserror::Error;

/// Errors surfaced by venue client implementations.
#[derive(Debug, Clone, Error)]
pub enum VenueError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Venue rejected request: {0}")]
    Rejected(String),

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Missing data: {0}")]
    MissingData(String),
}

/// Result type alias for venue operations.
pub type VenueResult<T> = std::result::Result<T, VenueError>;
