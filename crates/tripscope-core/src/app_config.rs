use std::path::PathBuf;

use crate::categories::{default_categories, load_categories, SearchCategory};
use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Preferred response language sent to the place and weather backends.
    pub language: String,
    pub places_base_url: String,
    /// Per-category result cap and global result limit.
    pub places_limit: usize,
    pub places_radius_m: f64,
    pub categories_path: Option<PathBuf>,
    pub weather_base_url: String,
    pub weather_api_key: Option<String>,
    pub country_base_url: String,
}

impl AppConfig {
    /// Resolve the search categories for this run.
    ///
    /// Uses the YAML file at `categories_path` when set, otherwise the
    /// built-in list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the categories file cannot be read, parsed,
    /// or fails validation.
    pub fn search_categories(&self) -> Result<Vec<SearchCategory>, ConfigError> {
        match &self.categories_path {
            Some(path) => load_categories(path),
            None => Ok(default_categories()),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("language", &self.language)
            .field("places_base_url", &self.places_base_url)
            .field("places_limit", &self.places_limit)
            .field("places_radius_m", &self.places_radius_m)
            .field("categories_path", &self.categories_path)
            .field("weather_base_url", &self.weather_base_url)
            .field(
                "weather_api_key",
                &self.weather_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("country_base_url", &self.country_base_url)
            .finish()
    }
}
