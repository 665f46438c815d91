//! Liability projection capability.

use mirror_core::Asset;

/// Running tally of the selling-asset and buying-asset obligations the
/// primary account incurs if all currently pending offers fill.
///
/// The projection is cleared by its owner at the start of every update
/// cycle; the engine re-adds one entry per offer it creates, modifies,
/// or knowingly retains. Implementations use interior mutability; the
/// engine only ever calls this from the single-threaded update path.
pub trait LiabilityModel: Send + Sync {
    fn add_liabilities(
        &self,
        selling: &Asset,
        buying: &Asset,
        selling_amount: f64,
        buying_amount: f64,
        native_increment: f64,
    );
}
