//! Batched operation intents.
//!
//! The engine never submits anything itself: each update cycle returns
//! an ordered sequence of intents that the hosting harness signs and
//! submits as one batch.

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::number::Number;
use crate::order::Side;

/// One create/modify/delete operation against the primary venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpIntent {
    /// Place a new offer.
    Create {
        selling: Asset,
        buying: Asset,
        side: Side,
        price: Number,
        amount: Number,
    },
    /// Re-price or re-size an existing offer.
    Modify {
        offer_id: u64,
        selling: Asset,
        buying: Asset,
        side: Side,
        price: Number,
        amount: Number,
    },
    /// Withdraw an existing offer.
    Delete {
        offer_id: u64,
        selling: Asset,
        buying: Asset,
    },
}

impl OpIntent {
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create { .. })
    }

    pub fn is_modify(&self) -> bool {
        matches!(self, Self::Modify { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }

    /// Side of a create/modify intent; deletes carry none.
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Create { side, .. } | Self::Modify { side, .. } => Some(*side),
            Self::Delete { .. } => None,
        }
    }
}
