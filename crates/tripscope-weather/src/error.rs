use thiserror::Error;

/// Errors returned by the weather client.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. `code` is the API's own `cod`
    /// when present, otherwise the HTTP status.
    #[error("weather API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no OpenWeatherMap API key configured (set OPENWEATHER_API_KEY)")]
    MissingApiKey,

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
