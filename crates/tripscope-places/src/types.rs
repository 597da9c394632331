use serde::{Deserialize, Serialize};
use tripscope_core::{haversine_km, round_km, GeoPoint, SearchCategory};

/// A latitude or longitude as the backend sends it.
///
/// Nominatim returns coordinates as decimal strings; some mirrors and proxies
/// return plain JSON numbers. Any other JSON value is kept as `Other` and
/// never parses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Coordinate {
    /// Parses the coordinate, returning `None` for unparsable or non-finite values.
    #[must_use]
    pub fn to_degrees(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// One match as returned by the search endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPlaceRecord {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lat: Option<Coordinate>,
    #[serde(default)]
    pub lon: Option<Coordinate>,
    #[serde(rename = "type", default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub osm_id: Option<u64>,
    #[serde(default)]
    pub osm_type: Option<String>,
}

impl RawPlaceRecord {
    /// Identity used for deduplication. `None` when the record has no `osm_id`.
    #[must_use]
    pub fn key(&self) -> Option<PlaceKey> {
        self.osm_id.map(|osm_id| PlaceKey {
            osm_type: self.osm_type.clone().unwrap_or_default(),
            osm_id,
        })
    }
}

/// Nodes, ways and relations have independent id spaces, so the kind is part
/// of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceKey {
    pub osm_type: String,
    pub osm_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    #[must_use]
    pub fn to_geo(self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPlace {
    pub name: String,
    pub address: String,
    pub category: String,
    pub geometry: Point,
    pub osm_id: Option<u64>,
    pub osm_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlace {
    #[serde(flatten)]
    pub place: NormalizedPlace,
    /// Great-circle distance from the search origin, rounded to 0.1 km.
    pub distance_km: f64,
    pub osm_link: String,
}

impl NearbyPlace {
    #[must_use]
    pub fn new(place: NormalizedPlace, origin: GeoPoint) -> Self {
        let distance_km = round_km(haversine_km(origin, place.geometry.to_geo()));
        let osm_link = osm_link(place.geometry);
        Self {
            place,
            distance_km,
            osm_link,
        }
    }
}

/// Link to the place on openstreetmap.org at street zoom.
#[must_use]
pub fn osm_link(point: Point) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=16/{lat}/{lon}",
        lat = point.lat,
        lon = point.lon
    )
}

/// A category whose request produced no records because it failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryFailure {
    pub category: SearchCategory,
    pub reason: String,
}

/// Result of a nearby search.
///
/// `failed_categories` and `rejected` are diagnostics; `places` is the
/// renderable result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbySearch {
    pub origin: GeoPoint,
    pub radius_m: f64,
    pub places: Vec<NearbyPlace>,
    pub failed_categories: Vec<CategoryFailure>,
    /// Records dropped because they were malformed or their coordinates
    /// were unusable.
    pub rejected: usize,
}

impl NearbySearch {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed_categories.is_empty() || self.rejected > 0
    }
}
