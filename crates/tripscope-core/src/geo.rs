//! Geographic primitives: points, search boxes, and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate length of one degree of latitude in meters.
const METERS_PER_LAT_DEGREE: f64 = 111_320.0;

/// Smallest cosine used when widening the longitude span, so boxes near the
/// poles stay finite.
const MIN_LATITUDE_COSINE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both coordinates are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Axis-aligned search box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Box that encloses the circle of `radius_m` meters around `center`.
    ///
    /// The longitude span widens with latitude so the box covers the same
    /// physical distance east-west as north-south. Edges are clamped to the
    /// valid coordinate ranges.
    #[must_use]
    pub fn around(center: GeoPoint, radius_m: f64) -> Self {
        let delta_lat = radius_m / METERS_PER_LAT_DEGREE;
        let cos_lat = center.lat.to_radians().cos().abs().max(MIN_LATITUDE_COSINE);
        let delta_lon = (radius_m / (METERS_PER_LAT_DEGREE * cos_lat)).min(180.0);

        Self {
            min_lon: (center.lon - delta_lon).max(-180.0),
            min_lat: (center.lat - delta_lat).max(-90.0),
            max_lon: (center.lon + delta_lon).min(180.0),
            max_lat: (center.lat + delta_lat).min(90.0),
        }
    }

    /// Renders the box in Nominatim `viewbox` order: `minLon,minLat,maxLon,maxLat`.
    #[must_use]
    pub fn to_viewbox(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }

    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }
}

/// Great-circle distance between two points in kilometers (haversine).
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).abs().to_radians();
    let d_lon = (b.lon - a.lon).abs().to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    let h = sin_lat * sin_lat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * sin_lon * sin_lon;
    // Rounding can push h a hair past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Rounds a distance to one decimal place for display.
#[must_use]
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 10.0).round() / 10.0
}
