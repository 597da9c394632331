//! HTTP client for the OpenWeatherMap current-weather endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use tripscope_core::{AppConfig, GeoPoint};

use crate::error::WeatherError;
use crate::messages::error_message;
use crate::types::{CurrentWeatherResponse, WeatherReading};

const DEFAULT_LANGUAGE: &str = "de";

/// Error envelope returned alongside non-2xx statuses. `cod` arrives as
/// either a string or a number depending on the endpoint.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    cod: Option<serde_json::Value>,
}

pub struct WeatherClient {
    client: Client,
    weather_url: Url,
    api_key: String,
    language: String,
}

impl WeatherClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::MissingApiKey`] if no API key is configured,
    /// [`WeatherError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`WeatherError::InvalidBaseUrl`] if the base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, WeatherError> {
        let api_key = config
            .weather_api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey)?;
        let client = Self::with_base_url(
            &config.weather_base_url,
            api_key,
            config.http_timeout_secs,
            &config.user_agent,
        )?;
        Ok(client.with_language(&config.language))
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::MissingApiKey`] if `api_key` is blank,
    /// [`WeatherError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`WeatherError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, WeatherError> {
        if api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let raw = format!("{}/weather", base_url.trim_end_matches('/'));
        let weather_url = Url::parse(&raw).map_err(|e| WeatherError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            weather_url,
            api_key: api_key.trim().to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    #[must_use]
    pub fn with_language(mut self, language: &str) -> Self {
        language.clone_into(&mut self.language);
        self
    }

    /// Current weather for a city name (optionally `"City,CC"`).
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Api`] on a non-2xx status, with a message chosen by
    ///   the API's error code.
    /// - [`WeatherError::Http`] on network failure.
    /// - [`WeatherError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn current_by_city(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        let city = city.trim();
        let url = self.build_url(&[("q", city)]);
        tracing::debug!(city, "fetching weather by city");
        self.fetch(url, Some(city)).await
    }

    /// Current weather at a coordinate.
    ///
    /// # Errors
    ///
    /// Same as [`WeatherClient::current_by_city`].
    pub async fn current_by_coordinates(
        &self,
        point: GeoPoint,
    ) -> Result<WeatherReading, WeatherError> {
        let lat = point.lat.to_string();
        let lon = point.lon.to_string();
        let url = self.build_url(&[("lat", &lat), ("lon", &lon)]);
        tracing::debug!(%point, "fetching weather by coordinates");
        self.fetch(url, None).await
    }

    fn build_url(&self, location: &[(&str, &str)]) -> Url {
        let mut url = self.weather_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in location {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("units", "metric");
            pairs.append_pair("lang", &self.language);
            pairs.append_pair("appid", &self.api_key);
        }
        url
    }

    async fn fetch(&self, url: Url, city: Option<&str>) -> Result<WeatherReading, WeatherError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let code = api_error_code(&body).unwrap_or(status.as_u16());
            tracing::warn!(status = status.as_u16(), code, "weather API returned an error");
            return Err(WeatherError::Api {
                code,
                message: error_message(code, city),
            });
        }

        let raw: CurrentWeatherResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
                context: city.map_or_else(
                    || "weather(coordinates)".to_string(),
                    |c| format!("weather(q={c})"),
                ),
                source: e,
            })?;

        Ok(raw.into())
    }
}

/// Extracts the numeric `cod` from an error body, if there is one.
fn api_error_code(body: &str) -> Option<u16> {
    let parsed: ApiErrorBody = serde_json::from_str(body).ok()?;
    match parsed.cod? {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
