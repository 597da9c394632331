use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid coordinates for place {}: {reason}", display_osm_id(.osm_id))]
    InvalidCoordinates { osm_id: Option<u64>, reason: String },

    #[error("invalid search origin: {0}")]
    InvalidOrigin(String),

    /// Every category request failed; there is no partial result to return.
    #[error("all {attempted} place categories failed")]
    AllCategoriesFailed { attempted: usize },
}

fn display_osm_id(osm_id: &Option<u64>) -> String {
    osm_id.map_or_else(|| "<unknown>".to_string(), |id| id.to_string())
}
