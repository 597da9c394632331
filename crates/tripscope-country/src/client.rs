//! HTTP client for the REST Countries v3.1 API.

use std::time::Duration;

use reqwest::{Client, Url};
use tripscope_core::AppConfig;

use crate::cache::CountryCache;
use crate::error::CountryError;
use crate::messages::error_message;
use crate::types::Country;

/// Client for REST Countries.
///
/// Lookups by code are served from the attached [`CountryCache`] when
/// possible. Use [`CountryClient::with_cache`] to share a cache between
/// clients, and [`CountryClient::clear_cache`] to force fresh fetches.
pub struct CountryClient {
    client: Client,
    base_url: Url,
    cache: CountryCache,
}

impl CountryClient {
    /// # Errors
    ///
    /// Returns [`CountryError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`CountryError::InvalidBaseUrl`] if the configured base URL
    /// does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, CountryError> {
        Self::with_base_url(
            &config.country_base_url,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`CountryError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CountryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let invalid = |reason: String| CountryError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        Ok(Self {
            client,
            base_url: parsed,
            cache: CountryCache::new(),
        })
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CountryCache) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn cache(&self) -> &CountryCache {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Looks up a country by ISO 3166-1 alpha-2 or alpha-3 code.
    ///
    /// The code is upper-cased before use. Cached records are returned
    /// without a request.
    ///
    /// # Errors
    ///
    /// - [`CountryError::InvalidCode`] if `code` is not 2 or 3 ASCII letters.
    /// - [`CountryError::Api`] on a non-2xx status.
    /// - [`CountryError::Http`] on network failure.
    /// - [`CountryError::Deserialize`] if the body does not match.
    /// - [`CountryError::Empty`] if the API returned an empty list.
    pub async fn by_code(&self, code: &str) -> Result<Country, CountryError> {
        let code = normalize_code(code)?;

        if let Some(country) = self.cache.get(&code) {
            tracing::debug!(code = %code, "country cache hit");
            return Ok(country);
        }

        let url = self.endpoint("alpha", &code)?;
        let country = self.fetch_first(url, &code).await?;
        self.cache.insert(&code, country.clone());
        Ok(country)
    }

    /// Looks up a country by (partial) name; the first match wins.
    ///
    /// The result is cached under its alpha-2 code so a later
    /// [`CountryClient::by_code`] is served locally.
    ///
    /// # Errors
    ///
    /// Same as [`CountryClient::by_code`], except `InvalidCode`.
    pub async fn by_name(&self, name: &str) -> Result<Country, CountryError> {
        let name = name.trim();
        let url = self.endpoint("name", name)?;
        let country = self.fetch_first(url, name).await?;
        if !country.cca2.is_empty() {
            self.cache.insert(&country.cca2, country.clone());
        }
        Ok(country)
    }

    /// `{base}/{kind}/{value}`, with `value` percent-encoded as a path segment.
    fn endpoint(&self, kind: &str, value: &str) -> Result<Url, CountryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CountryError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push(kind)
            .push(value);
        Ok(url)
    }

    async fn fetch_first(&self, url: Url, identifier: &str) -> Result<Country, CountryError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), identifier, "country API returned an error");
            return Err(CountryError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), identifier),
            });
        }

        let body = response.text().await?;
        let countries: Vec<Country> =
            serde_json::from_str(&body).map_err(|e| CountryError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        countries
            .into_iter()
            .next()
            .ok_or_else(|| CountryError::Empty(identifier.to_string()))
    }
}

fn normalize_code(code: &str) -> Result<String, CountryError> {
    let trimmed = code.trim();
    if (2..=3).contains(&trimmed.len()) && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(CountryError::InvalidCode(code.to_string()))
    }
}
