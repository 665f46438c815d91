//! Asset identification types.
//!
//! An asset is an opaque `(code, issuer)` pair; venues without issued
//! assets leave the issuer empty. A trading pair is an ordered
//! `(base, quote)` of assets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An asset identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    /// Asset code (e.g. "XLM", "USD").
    pub code: String,
    /// Issuing account, when the venue distinguishes issuers.
    pub issuer: Option<String>,
}

impl Asset {
    /// Create an asset with no issuer.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            issuer: None,
        }
    }

    /// Create an issued asset.
    pub fn with_issuer(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            issuer: Some(issuer.into()),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issuer {
            Some(issuer) => write!(f, "{}:{}", self.code, issuer),
            None => write!(f, "{}", self.code),
        }
    }
}

/// An ordered (base, quote) trading pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    pub base: Asset,
    pub quote: Asset,
}

impl TradingPair {
    pub fn new(base: Asset, quote: Asset) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
