//! REST Countries client with a per-instance memo cache.

pub mod cache;
pub mod client;
pub mod error;
pub mod messages;
pub mod profile;
pub mod types;

pub use cache::CountryCache;
pub use client::CountryClient;
pub use error::CountryError;
pub use messages::error_message;
pub use profile::{format_population, CountryProfile};
pub use types::Country;
