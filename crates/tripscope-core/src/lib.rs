//! Shared configuration, search categories, and geo primitives for `TripScope`.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod geo;

pub use app_config::AppConfig;
pub use categories::{default_categories, load_categories, SearchCategory};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_km, round_km, BoundingBox, GeoPoint, EARTH_RADIUS_KM};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
