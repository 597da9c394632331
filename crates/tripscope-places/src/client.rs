//! HTTP client for the Nominatim `/search` endpoint.
//!
//! [`PlacesClient::search_nearby`] fans out one request per search category,
//! waits for all of them, and merges whatever succeeded. A failing category
//! only costs its own records.

use std::time::Duration;

use futures::future::join_all;
use reqwest::{Client, Url};
use tripscope_core::{AppConfig, BoundingBox, GeoPoint, SearchCategory};

use crate::dedupe::{dedupe_by_key, MissingKeyPolicy};
use crate::error::PlacesError;
use crate::normalize::normalize_places;
use crate::types::{CategoryFailure, NearbyPlace, NearbySearch, RawPlaceRecord};

/// Search radius used when the caller has no preference.
pub const DEFAULT_RADIUS_M: f64 = 1500.0;

const DEFAULT_LIMIT: usize = 6;
const DEFAULT_LANGUAGE: &str = "de";

pub struct PlacesClient {
    client: Client,
    search_url: Url,
    categories: Vec<SearchCategory>,
    /// Sent as the per-request `limit` and applied to the merged list.
    limit: usize,
    language: String,
    missing_key_policy: MissingKeyPolicy,
}

impl PlacesClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig, categories: Vec<SearchCategory>) -> Result<Self, PlacesError> {
        let client = Self::with_base_url(
            &config.places_base_url,
            config.http_timeout_secs,
            &config.user_agent,
            categories,
        )?;
        Ok(client
            .with_limit(config.places_limit)
            .with_language(&config.language))
    }

    /// Creates a client against an arbitrary base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        categories: Vec<SearchCategory>,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let raw = format!("{}/search", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&raw).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            search_url,
            categories,
            limit: DEFAULT_LIMIT,
            language: DEFAULT_LANGUAGE.to_string(),
            missing_key_policy: MissingKeyPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: &str) -> Self {
        language.clone_into(&mut self.language);
        self
    }

    #[must_use]
    pub fn with_missing_key_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key_policy = policy;
        self
    }

    #[must_use]
    pub fn categories(&self) -> &[SearchCategory] {
        &self.categories
    }

    /// Finds points of interest within `radius_m` meters of `origin`.
    ///
    /// All category requests run concurrently. A category that fails (bad
    /// status, transport error, undecodable body) contributes no records and
    /// is listed in [`NearbySearch::failed_categories`]. Records are merged
    /// in category order, deduplicated by OSM identity, capped at the
    /// configured limit, and normalized; records with unusable coordinates
    /// are dropped and counted in [`NearbySearch::rejected`].
    ///
    /// # Errors
    ///
    /// - [`PlacesError::InvalidOrigin`] if `origin` is out of range or
    ///   `radius_m` is not a positive finite number.
    /// - [`PlacesError::AllCategoriesFailed`] if every category request failed.
    pub async fn search_nearby(
        &self,
        origin: GeoPoint,
        radius_m: f64,
    ) -> Result<NearbySearch, PlacesError> {
        if !origin.is_valid() {
            return Err(PlacesError::InvalidOrigin(format!(
                "coordinates ({}, {}) are out of range",
                origin.lat, origin.lon
            )));
        }
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(PlacesError::InvalidOrigin(format!(
                "radius must be a positive number of meters, got {radius_m}"
            )));
        }

        let viewbox = BoundingBox::around(origin, radius_m).to_viewbox();
        let results = join_all(
            self.categories
                .iter()
                .map(|category| self.fetch_category(category, &viewbox)),
        )
        .await;

        let mut merged = Vec::new();
        let mut malformed = 0;
        let mut failed_categories = Vec::new();
        for (category, result) in self.categories.iter().zip(results) {
            match result {
                Ok(batch) => {
                    tracing::debug!(
                        category = %category,
                        count = batch.records.len(),
                        malformed = batch.malformed,
                        "category search complete"
                    );
                    merged.extend(batch.records);
                    malformed += batch.malformed;
                }
                Err(e) => {
                    tracing::warn!(category = %category, error = %e, "category search failed");
                    failed_categories.push(CategoryFailure {
                        category: category.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !self.categories.is_empty() && failed_categories.len() == self.categories.len() {
            return Err(PlacesError::AllCategoriesFailed {
                attempted: self.categories.len(),
            });
        }

        let mut unique = dedupe_by_key(merged, RawPlaceRecord::key, self.missing_key_policy);
        unique.truncate(self.limit);

        let (normalized, unusable) = normalize_places(unique);
        let rejected = malformed + unusable;
        let places = normalized
            .into_iter()
            .map(|place| NearbyPlace::new(place, origin))
            .collect::<Vec<_>>();

        tracing::info!(
            origin = %origin,
            places = places.len(),
            failed = failed_categories.len(),
            rejected,
            "nearby search complete"
        );

        Ok(NearbySearch {
            origin,
            radius_m,
            places,
            failed_categories,
            rejected,
        })
    }

    async fn fetch_category(
        &self,
        category: &SearchCategory,
        viewbox: &str,
    ) -> Result<CategoryBatch, PlacesError> {
        let url = self.build_url(category, viewbox);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        // Some mirrors answer `null` instead of `[]` when nothing matched.
        let items: Option<Vec<serde_json::Value>> =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("search(category={category})"),
                source: e,
            })?;

        Ok(decode_records(category, items.unwrap_or_default()))
    }

    fn build_url(&self, category: &SearchCategory, viewbox: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", &category.value)
            .append_pair("viewbox", viewbox)
            .append_pair("bounded", "1")
            .append_pair("limit", &self.limit.to_string())
            .append_pair("accept-language", &self.language);
        url
    }
}

/// Records decoded from one category response.
struct CategoryBatch {
    records: Vec<RawPlaceRecord>,
    /// Items whose fields had the wrong JSON type.
    malformed: usize,
}

/// Decodes each item on its own so one bad record does not cost the rest.
fn decode_records(category: &SearchCategory, items: Vec<serde_json::Value>) -> CategoryBatch {
    let mut records = Vec::with_capacity(items.len());
    let mut malformed = 0;

    for item in items {
        match serde_json::from_value::<RawPlaceRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "dropping malformed place record");
                malformed += 1;
            }
        }
    }

    CategoryBatch { records, malformed }
}
