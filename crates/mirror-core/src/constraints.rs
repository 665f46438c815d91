//! Per-venue order constraints.
//!
//! Each venue imposes a price precision, a volume precision, and
//! minimum volumes on a trading pair. Constraints are immutable once a
//! strategy is constructed; configuration overrides are applied
//! member-wise beforehand through [`ConstraintsOverride`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::number::Number;

/// Order constraints for one venue and pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConstraints {
    /// Decimals allowed in a price.
    pub price_precision: u32,
    /// Decimals allowed in a volume.
    pub volume_precision: u32,
    /// Smallest order volume in base units.
    pub min_base_volume: Number,
    /// Smallest order volume in quote units, when the venue has one.
    pub min_quote_volume: Option<Number>,
}

impl OrderConstraints {
    pub fn new(price_precision: u32, volume_precision: u32, min_base_volume: Number) -> Self {
        Self {
            price_precision,
            volume_precision,
            min_base_volume,
            min_quote_volume: None,
        }
    }

    /// Apply an override member-wise.
    pub fn apply(&mut self, overrides: &ConstraintsOverride) {
        if let Some(p) = overrides.price_precision {
            self.price_precision = p;
        }
        if let Some(p) = overrides.volume_precision {
            self.volume_precision = p;
        }
        if let Some(v) = overrides.min_base_volume {
            self.min_base_volume = v;
        }
        if let Some(v) = overrides.min_quote_volume {
            self.min_quote_volume = Some(v);
        }
    }
}

impl fmt::Display for OrderConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrderConstraints[pricePrecision={}, volumePrecision={}, minBaseVolume={}, minQuoteVolume={}]",
            self.price_precision,
            self.volume_precision,
            self.min_base_volume,
            self.min_quote_volume
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
        )
    }
}

/// Partial override of [`OrderConstraints`]; `None` members are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintsOverride {
    pub price_precision: Option<u32>,
    pub volume_precision: Option<u32>,
    pub min_base_volume: Option<Number>,
    pub min_quote_volume: Option<Number>,
}
