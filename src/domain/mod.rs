pub mod build;
pub mod listing;
pub mod property_type;
pub mod status;

pub use build::{build_listings, latest_status, ListingSet};
pub use listing::Listing;
pub use property_type::PropertyType;
pub use status::{Direction, Status};
