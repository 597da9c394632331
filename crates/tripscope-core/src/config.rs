use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str = "TripScope/0.1 (weather-travel-companion)";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_COUNTRY_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Upper bound on `TRIPSCOPE_PLACES_LIMIT`; Nominatim caps `limit` at 50.
const MAX_PLACES_LIMIT: usize = 50;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests
/// can drive this with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| invalid(var, e.to_string()))
    };

    let base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw.trim_end_matches('/').to_string())
        } else {
            Err(invalid(var, format!("'{raw}' is not an http(s) URL")))
        }
    };

    let log_level = or_default("TRIPSCOPE_LOG_LEVEL", "info");
    let http_timeout_secs = parse_u64("TRIPSCOPE_HTTP_TIMEOUT_SECS", "10")?;
    if http_timeout_secs == 0 {
        return Err(invalid(
            "TRIPSCOPE_HTTP_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    let user_agent = or_default("TRIPSCOPE_USER_AGENT", DEFAULT_USER_AGENT);
    let language = or_default("TRIPSCOPE_LANGUAGE", "de");

    let places_base_url = base_url("TRIPSCOPE_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL)?;
    let places_limit = parse_usize("TRIPSCOPE_PLACES_LIMIT", "6")?;
    if !(1..=MAX_PLACES_LIMIT).contains(&places_limit) {
        return Err(invalid(
            "TRIPSCOPE_PLACES_LIMIT",
            format!("limit must be between 1 and {MAX_PLACES_LIMIT}, got {places_limit}"),
        ));
    }

    let places_radius_m = parse_f64("TRIPSCOPE_PLACES_RADIUS_M", "1500")?;
    if !places_radius_m.is_finite() || places_radius_m <= 0.0 {
        return Err(invalid(
            "TRIPSCOPE_PLACES_RADIUS_M",
            format!("radius must be a positive number of meters, got {places_radius_m}"),
        ));
    }

    let categories_path = optional("TRIPSCOPE_CATEGORIES_PATH").map(PathBuf::from);

    let weather_base_url = base_url("TRIPSCOPE_WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL)?;
    let weather_api_key = optional("OPENWEATHER_API_KEY");
    let country_base_url = base_url("TRIPSCOPE_COUNTRY_BASE_URL", DEFAULT_COUNTRY_BASE_URL)?;

    Ok(AppConfig {
        log_level,
        http_timeout_secs,
        user_agent,
        language,
        places_base_url,
        places_limit,
        places_radius_m,
        categories_path,
        weather_base_url,
        weather_api_key,
        country_base_url,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
