use std::marker::PhantomData;
use std::sync::Arc;

use tokio::time::Instant;

use crate::api::QueryKey;
use crate::query::cache::Subscription;
use crate::query::countries::CountriesApi;
use crate::query::data::QueryPayload;
use crate::query::status::{EntryState, QueryStatus};

/// Snapshot of a query as a consumer sees it.
#[derive(Debug)]
pub struct QueryResult<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<String>,
    pub is_loading: bool,
    pub is_error: bool,
}

impl<T> Clone for QueryResult<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.is_loading,
            is_error: self.is_error,
        }
    }
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Uninitialized,
            data: None,
            error: None,
            is_loading: false,
            is_error: false,
        }
    }
}

impl<T: QueryPayload> QueryResult<T> {
    pub(crate) fn from_state(state: &EntryState, is_loading: bool) -> Self {
        Self {
            status: state.status,
            data: state.data.as_ref().and_then(T::from_data),
            error: state.error.clone(),
            is_loading,
            is_error: state.status == QueryStatus::Rejected,
        }
    }
}

impl<T> QueryResult<T> {
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Fulfilled
    }
}

/// A live subscription to one query.
///
/// Keeps the cache entry alive while held; dropping it starts the
/// retention timer.
pub struct QueryHandle<T: QueryPayload> {
    api: CountriesApi,
    subscription: Subscription,
    _payload: PhantomData<fn() -> T>,
}

impl<T: QueryPayload> QueryHandle<T> {
    pub(crate) fn new(api: CountriesApi, subscription: Subscription) -> Self {
        Self {
            api,
            subscription,
            _payload: PhantomData,
        }
    }

    pub fn key(&self) -> &QueryKey {
        self.subscription.key()
    }

    /// Current state, with `is_loading` shaped by the loading policy.
    pub fn result(&self) -> QueryResult<T> {
        self.api.result_at(self.key(), Instant::now())
    }

    /// Wait for the fetch to settle and for the loading indicator to clear.
    pub async fn settled(&self) -> QueryResult<T> {
        let state = self.api.cache().settled(self.key()).await;
        if let (Some(started), Some(settled)) = (state.started_at, state.settled_at) {
            let policy = self.api.policy_for(self.key().endpoint);
            let remaining = policy.remaining_display(started, settled, Instant::now());
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
        }
        self.result()
    }

    /// Fetch again even if a fulfilled payload is cached.
    pub async fn refetch(&self) -> QueryResult<T> {
        self.api.start(self.key(), true);
        self.settled().await
    }
}

/// Search query that only fetches when triggered.
///
/// Each trigger replaces the previous subscription, so only the latest
/// argument keeps its cache entry alive.
pub struct LazyQuery {
    api: CountriesApi,
    active: Option<QueryHandle<Vec<String>>>,
}

impl LazyQuery {
    pub(crate) fn new(api: CountriesApi) -> Self {
        Self { api, active: None }
    }

    /// Start (or reuse) a search for `fragment`.
    pub fn trigger(&mut self, fragment: &str) -> &QueryHandle<Vec<String>> {
        let handle = self.api.search_country(fragment);
        self.active.insert(handle)
    }

    /// Trigger and wait for the result.
    pub async fn trigger_and_wait(&mut self, fragment: &str) -> QueryResult<Vec<String>> {
        self.trigger(fragment).settled().await
    }

    /// Result of the last trigger; uninitialized if never triggered.
    pub fn result(&self) -> QueryResult<Vec<String>> {
        self.active
            .as_ref()
            .map(QueryHandle::result)
            .unwrap_or_default()
    }

    pub fn last_arg(&self) -> Option<&str> {
        self.active.as_ref().map(|h| h.key().arg.as_str())
    }
}
