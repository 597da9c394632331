use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripscope_core::GeoPoint;

// ---------------------------------------------------------------------------
// Wire types for `/weather`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    pub name: String,
    pub coord: WireCoord,
    #[serde(default)]
    pub sys: WireSys,
    pub main: WireMain,
    #[serde(default)]
    pub wind: WireWind,
    #[serde(default)]
    pub weather: Vec<WireCondition>,
    /// Observation time, Unix seconds.
    #[serde(default)]
    pub dt: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCoord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireSys {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireMain {
    pub temp: f64,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireWind {
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCondition {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

// ---------------------------------------------------------------------------
// Domain type
// ---------------------------------------------------------------------------

/// Current conditions at a location, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    /// Location name as resolved by the weather service.
    pub location: String,
    /// ISO 3166-1 alpha-2 code of the location's country.
    pub country_code: Option<String>,
    pub coordinates: GeoPoint,
    pub temperature_c: f64,
    pub feels_like_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherReading {
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_deref()
            .map(|icon| format!("https://openweathermap.org/img/wn/{icon}@2x.png"))
    }
}

impl From<CurrentWeatherResponse> for WeatherReading {
    fn from(raw: CurrentWeatherResponse) -> Self {
        let condition = raw.weather.into_iter().next();
        let (description, icon) = match condition {
            Some(c) => (c.description, c.icon),
            None => (None, None),
        };

        Self {
            location: raw.name,
            country_code: raw.sys.country.filter(|c| !c.trim().is_empty()),
            coordinates: GeoPoint::new(raw.coord.lat, raw.coord.lon),
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            pressure_hpa: raw.main.pressure,
            wind_speed_ms: raw.wind.speed,
            description,
            icon,
            observed_at: raw.dt.and_then(|secs| DateTime::from_timestamp(secs, 0)),
        }
    }
}
