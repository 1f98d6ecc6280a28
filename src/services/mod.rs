//! Service layer for Forkly
//!
//! Business rules on top of the backend traits: validation, defaults,
//! ordering and journaling of remote writes.

pub mod nearby;
pub mod places;
pub mod saved_lists;

pub use nearby::{format_distance, NearbyService};
pub use places::PlacesService;
pub use saved_lists::SavedListService;
