//! OpenWeatherMap current-conditions client.

pub mod client;
pub mod error;
pub mod messages;
pub mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use messages::error_message;
pub use types::{CurrentWeatherResponse, WeatherReading};
