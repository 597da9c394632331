use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountryError {
    #[error("invalid country code \"{0}\": expected a 2- or 3-letter ISO code")]
    InvalidCode(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("country API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no country returned for \"{0}\"")]
    Empty(String),

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
