//! Venue capability traits for the mirror engine.
//!
//! The engine consumes its collaborators as capability sets:
//! - [`PrimaryVenue`]: builds operation intents for the venue holding
//!   the mirrored offers
//! - [`BackingVenue`]: the venue whose book is copied and on which
//!   hedging orders are placed
//! - [`LiabilityModel`]: running projection of the obligations the
//!   primary account incurs if its pending offers fill
//!
//! Authentication, transport, signing, and retries live behind these
//! traits in the hosting harness; every call is blocking from the
//! engine's perspective.

pub mod backing;
pub mod error;
pub mod liability;
pub mod primary;

pub use backing::BackingVenue;
pub use error::{VenueError, VenueResult};
pub use liability::LiabilityModel;
pub use primary::PrimaryVenue;
