//! Command handlers that drive the API clients.
//!
//! `explore` resolves the location through the weather service first, then
//! loads places and country facts concurrently. A failure in either of those
//! two is shown in its section of the report instead of aborting the run.

use serde::Serialize;
use tripscope_core::{AppConfig, GeoPoint};
use tripscope_country::{CountryClient, CountryProfile};
use tripscope_places::{NearbySearch, PlacesClient};
use tripscope_weather::{WeatherClient, WeatherReading};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Location {
    City(String),
    Coordinates(GeoPoint),
}

#[derive(Debug, Serialize)]
pub(crate) struct ExploreReport {
    pub weather: WeatherReading,
    pub places: Option<NearbySearch>,
    pub places_error: Option<String>,
    pub country: Option<CountryProfile>,
    pub country_error: Option<String>,
}

/// Full location report.
///
/// For a city, places are searched around the coordinates the weather
/// service resolved; for explicit coordinates, around those coordinates.
///
/// # Errors
///
/// Returns an error if configuration is incomplete (no weather API key, bad
/// categories file), a client cannot be built, or the weather lookup fails.
/// Place and country failures are reported inside the returned report.
pub(crate) async fn run_explore(
    config: &AppConfig,
    location: Location,
    radius_m: f64,
) -> anyhow::Result<ExploreReport> {
    let weather_client = WeatherClient::new(config)?;
    let places_client = PlacesClient::new(config, config.search_categories()?)?;
    let country_client = CountryClient::new(config)?;

    let (weather, origin) = match location {
        Location::City(city) => {
            let weather = weather_client.current_by_city(&city).await?;
            let origin = weather.coordinates;
            (weather, origin)
        }
        Location::Coordinates(point) => {
            let weather = weather_client.current_by_coordinates(point).await?;
            (weather, point)
        }
    };
    tracing::info!(location = %weather.location, origin = %origin, "location resolved");

    let country_code = weather.country_code.clone();
    let (places, country) = tokio::join!(
        places_client.search_nearby(origin, radius_m),
        lookup_country(&country_client, country_code.as_deref()),
    );

    let (places, places_error) = match places {
        Ok(search) => (Some(search), None),
        Err(e) => {
            tracing::warn!(error = %e, "place search failed");
            (None, Some(e.to_string()))
        }
    };
    let (country, country_error) = match country {
        Ok(profile) => (profile, None),
        Err(e) => {
            tracing::warn!(error = %e, "country lookup failed");
            (None, Some(e.to_string()))
        }
    };

    Ok(ExploreReport {
        weather,
        places,
        places_error,
        country,
        country_error,
    })
}

/// Places only, with diagnostics.
///
/// # Errors
///
/// Returns an error if the categories file is invalid, the client cannot be
/// built, the origin is invalid, or every category request failed.
pub(crate) async fn run_places(
    config: &AppConfig,
    origin: GeoPoint,
    radius_m: f64,
) -> anyhow::Result<NearbySearch> {
    let client = PlacesClient::new(config, config.search_categories()?)?;
    Ok(client.search_nearby(origin, radius_m).await?)
}

/// # Errors
///
/// Returns an error if the code is invalid or the lookup fails.
pub(crate) async fn run_country(config: &AppConfig, code: &str) -> anyhow::Result<CountryProfile> {
    let client = CountryClient::new(config)?;
    let country = client.by_code(code).await?;
    Ok(CountryProfile::from(&country))
}

/// Locations outside any country (open sea) have no code; that is not an error.
async fn lookup_country(
    client: &CountryClient,
    code: Option<&str>,
) -> Result<Option<CountryProfile>, tripscope_country::CountryError> {
    let Some(code) = code else {
        return Ok(None);
    };
    let country = client.by_code(code).await?;
    Ok(Some(CountryProfile::from(&country)))
}

#[cfg(test)]
#[path = "explore_test.rs"]
mod tests;
