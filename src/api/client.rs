use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::time::timeout;

use crate::api::endpoint::{Endpoint, QueryKey};
use crate::api::error::ApiError;
use crate::api::models::{CountryDetail, CountrySummary};
use crate::api::transform;
use crate::config::ApiConfig;
use crate::store::EntityStore;

/// HTTP client for the REST Countries API.
///
/// Each method issues exactly one request; caching and deduplication live
/// in [`crate::query`].
#[derive(Clone)]
pub struct CountriesClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl CountriesClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, key: &QueryKey) -> String {
        format!("{}{}", self.base_url, key.path())
    }

    /// Fetch the raw body for `key`, failing on any non-2xx status.
    pub async fn fetch_bytes(&self, key: &QueryKey) -> Result<Vec<u8>, ApiError> {
        let url = self.url_for(key);
        let started = Instant::now();

        let result = timeout(self.request_timeout, self.do_fetch(&url)).await;

        let body = match result {
            Ok(body) => body,
            Err(_) => Err(ApiError::Timeout {
                seconds: self.request_timeout.as_secs(),
            }),
        };

        match &body {
            Ok(bytes) => tracing::debug!(
                endpoint = %key.endpoint,
                url = %url,
                bytes = bytes.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Fetched"
            ),
            Err(e) => tracing::warn!(
                endpoint = %key.endpoint,
                url = %url,
                kind = e.kind(),
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Fetch failed"
            ),
        }

        body
    }

    async fn do_fetch(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    pub async fn get_countries(&self) -> Result<EntityStore<CountrySummary>, ApiError> {
        let body = self.fetch_bytes(&QueryKey::countries()).await?;
        transform::countries_response(&body)
    }

    pub async fn get_country(&self, id: &str) -> Result<CountryDetail, ApiError> {
        let body = self.fetch_bytes(&QueryKey::country(id)).await?;
        transform::country_response(&body)
    }

    pub async fn get_border_countries<S: AsRef<str>>(
        &self,
        codes: &[S],
    ) -> Result<Vec<String>, ApiError> {
        let key = QueryKey::border_countries(codes);
        if key.arg.is_empty() {
            return Ok(Vec::new());
        }
        let body = self.fetch_bytes(&key).await?;
        transform::names_response(Endpoint::GetBorderCountries, &body)
    }

    pub async fn search_country(&self, fragment: &str) -> Result<Vec<String>, ApiError> {
        let body = self.fetch_bytes(&QueryKey::search(fragment)).await?;
        transform::names_response(Endpoint::SearchCountry, &body)
    }
}
