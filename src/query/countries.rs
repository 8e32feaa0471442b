use std::sync::Arc;

use tokio::time::Instant;

use crate::alerts::{AlertKind, AlertQueue};
use crate::api::{ApiError, CountriesClient, CountryDetail, Endpoint, QueryKey};
use crate::config::Config;
use crate::query::cache::{Begin, InflightTicket, QueryCache, SharedResult};
use crate::query::data::{QueryData, QueryPayload};
use crate::query::handle::{LazyQuery, QueryHandle, QueryResult};
use crate::query::policy::{long_running, LoadingPolicy};
use crate::query::status::QueryStatus;
use crate::store::CountryStore;

/// Query context: HTTP client, cache, alert queue and loading policy.
///
/// Cheap to clone; clones share the same cache.
#[derive(Clone)]
pub struct CountriesApi {
    inner: Arc<ApiInner>,
}

struct ApiInner {
    client: CountriesClient,
    cache: QueryCache,
    alerts: AlertQueue,
    policy: LoadingPolicy,
}

impl CountriesApi {
    pub fn new(
        client: CountriesClient,
        cache: QueryCache,
        alerts: AlertQueue,
        policy: LoadingPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(ApiInner {
                client,
                cache,
                alerts,
                policy,
            }),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = CountriesClient::new(&config.api)?;
        Ok(Self::new(
            client,
            QueryCache::new(config.cache.keep_unused_for()),
            AlertQueue::new(),
            LoadingPolicy::from(&config.loading),
        ))
    }

    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    pub fn alerts(&self) -> &AlertQueue {
        &self.inner.alerts
    }

    pub fn client(&self) -> &CountriesClient {
        &self.inner.client
    }

    pub(crate) fn policy_for(&self, endpoint: Endpoint) -> LoadingPolicy {
        if endpoint.uses_loading_policy() {
            self.inner.policy
        } else {
            LoadingPolicy::IMMEDIATE
        }
    }

    /// All countries, normalized and sorted by name.
    pub fn countries(&self) -> QueryHandle<CountryStore> {
        self.subscribe(QueryKey::countries())
    }

    /// One country by name, exact full-text match.
    pub fn country(&self, id: &str) -> QueryHandle<CountryDetail> {
        self.subscribe(QueryKey::country(id))
    }

    /// Common names for a list of cca3 codes.
    pub fn border_countries<S: AsRef<str>>(&self, codes: &[S]) -> QueryHandle<Vec<String>> {
        self.subscribe(QueryKey::border_countries(codes))
    }

    /// Common names matching a name fragment, fetched immediately.
    pub fn search_country(&self, fragment: &str) -> QueryHandle<Vec<String>> {
        self.subscribe(QueryKey::search(fragment))
    }

    /// Search that waits for [`LazyQuery::trigger`].
    pub fn lazy_search_country(&self) -> LazyQuery {
        LazyQuery::new(self.clone())
    }

    /// Cached `getCountries` result without subscribing or fetching.
    pub fn countries_result(&self) -> QueryResult<CountryStore> {
        self.result_at(&QueryKey::countries(), Instant::now())
    }

    /// Cached country store, or an empty one when nothing is loaded yet.
    pub fn countries_store(&self) -> Arc<CountryStore> {
        self.countries_result()
            .data
            .unwrap_or_else(|| Arc::new(CountryStore::default()))
    }

    fn subscribe<T: QueryPayload>(&self, key: QueryKey) -> QueryHandle<T> {
        let subscription = self.inner.cache.subscribe(key.clone());
        self.start(&key, false);
        QueryHandle::new(self.clone(), subscription)
    }

    /// Begin a fetch for `key` in the background unless cached or in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn start(&self, key: &QueryKey, force: bool) {
        if let Begin::Started(ticket) = self.inner.cache.begin(key, force) {
            let api = self.clone();
            tokio::spawn(async move {
                let _ = api.complete(ticket).await;
            });
        }
    }

    async fn complete(&self, ticket: InflightTicket) -> SharedResult {
        let key = ticket.key().clone();
        let started = Instant::now();

        let result = if key.endpoint.uses_loading_policy() {
            long_running(
                self.fetch(&key),
                self.inner.policy,
                &self.inner.alerts,
                &describe(&key),
            )
            .await
        } else {
            self.fetch(&key).await
        };

        match &result {
            Ok(_) => tracing::info!(
                key = %key,
                request_id = %ticket.request_id(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Query fulfilled"
            ),
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    request_id = %ticket.request_id(),
                    kind = e.kind(),
                    error = %e,
                    "Query rejected"
                );
                self.inner.alerts.push(
                    AlertKind::Error,
                    format!("Failed to load {}: {}", describe(&key), e),
                );
            }
        }

        ticket.complete(result)
    }

    async fn fetch(&self, key: &QueryKey) -> Result<QueryData, ApiError> {
        let client = &self.inner.client;
        match key.endpoint {
            Endpoint::GetCountries => Ok(QueryData::Countries(Arc::new(
                client.get_countries().await?,
            ))),
            Endpoint::GetCountry => Ok(QueryData::Country(Arc::new(
                client.get_country(&key.arg).await?,
            ))),
            Endpoint::GetBorderCountries => {
                let codes: Vec<&str> = key.arg.split(',').collect();
                Ok(QueryData::Names(Arc::new(
                    client.get_border_countries(&codes).await?,
                )))
            }
            Endpoint::SearchCountry => Ok(QueryData::Names(Arc::new(
                client.search_country(&key.arg).await?,
            ))),
        }
    }

    pub(crate) fn result_at<T: QueryPayload>(&self, key: &QueryKey, now: Instant) -> QueryResult<T> {
        let state = self.inner.cache.entry_state(key);
        let policy = self.policy_for(key.endpoint);
        let is_loading = match (state.status, state.started_at) {
            (QueryStatus::Pending, Some(started)) => {
                policy.is_loading_visible(started, None, now)
            }
            (QueryStatus::Fulfilled | QueryStatus::Rejected, Some(started)) => {
                policy.is_loading_visible(started, state.settled_at, now)
            }
            _ => false,
        };
        QueryResult::from_state(&state, is_loading)
    }
}

fn describe(key: &QueryKey) -> String {
    match key.endpoint {
        Endpoint::GetCountries => "countries".to_string(),
        Endpoint::GetCountry => format!("country '{}'", key.arg),
        Endpoint::GetBorderCountries => format!("border countries ({})", key.arg),
        Endpoint::SearchCountry => format!("search results for '{}'", key.arg),
    }
}
