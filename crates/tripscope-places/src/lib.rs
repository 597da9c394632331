//! Nearby points-of-interest search against a Nominatim-compatible backend.
//!
//! One request is issued per configured search category; the results are
//! merged, deduplicated, capped, normalized, and enriched with the distance
//! from the search origin.

pub mod client;
pub mod dedupe;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{PlacesClient, DEFAULT_RADIUS_M};
pub use dedupe::{dedupe_by_key, MissingKeyPolicy};
pub use error::PlacesError;
pub use normalize::{normalize_place, normalize_places};
pub use types::{
    CategoryFailure, Coordinate, NearbyPlace, NearbySearch, NormalizedPlace, PlaceKey, Point,
    RawPlaceRecord,
};
