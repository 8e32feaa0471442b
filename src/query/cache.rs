//! Query cache with in-flight deduplication and reference-counted eviction.
//!
//! Entries are keyed by [`QueryKey`]. At most one fetch per key is in flight:
//! the first caller receives an [`InflightTicket`] and performs the fetch,
//! later callers wait on a `watch` channel for the ticket's result. An entry
//! with no [`Subscription`] left is purged once `keep_unused_for` has elapsed.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

use crate::api::{ApiError, QueryKey};
use crate::mvi::Reducer;
use crate::query::data::QueryData;
use crate::query::status::{EntryIntent, EntryReducer, EntryState, QueryStatus};

/// Outcome shared between the fetch owner and every waiter.
pub type SharedResult = Result<QueryData, Arc<ApiError>>;

type Slot = watch::Receiver<Option<SharedResult>>;

struct CacheEntry {
    state: EntryState,
    subscribers: usize,
    unused_since: Option<Instant>,
    inflight: Option<Slot>,
}

impl CacheEntry {
    fn new(now: Instant) -> Self {
        Self {
            state: EntryState::default(),
            subscribers: 0,
            unused_since: Some(now),
            inflight: None,
        }
    }

    fn is_expired(&self, keep_unused_for: Duration, now: Instant) -> bool {
        if self.subscribers > 0 || self.inflight.is_some() {
            return false;
        }
        match self.unused_since {
            Some(since) => now.saturating_duration_since(since) >= keep_unused_for,
            None => false,
        }
    }
}

struct CacheInner {
    entries: HashMap<QueryKey, CacheEntry>,
    keep_unused_for: Duration,
}

/// What a caller should do after [`QueryCache::begin`].
pub enum Begin {
    /// A fulfilled payload is already cached.
    Cached(QueryData),
    /// Another caller owns the fetch; wait with [`QueryCache::join`].
    InFlight(watch::Receiver<Option<SharedResult>>),
    /// The caller owns the fetch and must complete the ticket.
    Started(InflightTicket),
}

/// Shared handle to the cache; clones refer to the same entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl QueryCache {
    pub fn new(keep_unused_for: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                keep_unused_for,
            })),
        }
    }

    /// Register interest in `key`, creating the entry if needed.
    pub fn subscribe(&self, key: QueryKey) -> Subscription {
        let mut inner = self.inner.lock();
        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(Instant::now()));
        entry.subscribers += 1;
        entry.unused_since = None;
        tracing::trace!(key = %key, subscribers = entry.subscribers, "Subscribed");
        drop(inner);

        Subscription {
            cache: self.clone(),
            key,
        }
    }

    fn release(&self, key: &QueryKey) {
        let schedule = {
            let mut inner = self.inner.lock();
            let Some(entry) = inner.entries.get_mut(key) else {
                return;
            };
            entry.subscribers = entry.subscribers.saturating_sub(1);
            tracing::trace!(key = %key, subscribers = entry.subscribers, "Unsubscribed");
            if entry.subscribers == 0 {
                entry.unused_since = Some(Instant::now());
                true
            } else {
                false
            }
        };

        if schedule {
            self.schedule_eviction(key.clone());
        }
    }

    /// Decide whether to serve from cache, join an in-flight fetch, or own a new one.
    ///
    /// `force` skips a fulfilled cache hit but still joins an in-flight fetch.
    pub fn begin(&self, key: &QueryKey, force: bool) -> Begin {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(now));

        if let Some(slot) = &entry.inflight {
            tracing::debug!(key = %key, "Joining in-flight request");
            return Begin::InFlight(slot.clone());
        }

        if !force && entry.state.status == QueryStatus::Fulfilled {
            if let Some(data) = &entry.state.data {
                tracing::trace!(key = %key, "Cache hit");
                return Begin::Cached(data.clone());
            }
        }

        let request_id = Uuid::new_v4();
        let (tx, rx) = watch::channel(None);
        entry.inflight = Some(rx);
        entry.state = EntryReducer::reduce(
            std::mem::take(&mut entry.state),
            EntryIntent::Started {
                request_id,
                at: now,
            },
        );
        tracing::debug!(key = %key, request_id = %request_id, "Request started");

        Begin::Started(InflightTicket {
            cache: self.clone(),
            key: key.clone(),
            request_id,
            tx,
            armed: true,
        })
    }

    /// Wait for the owner of an in-flight fetch to publish its result.
    pub async fn join(mut slot: watch::Receiver<Option<SharedResult>>) -> SharedResult {
        match slot.wait_for(Option::is_some).await {
            Ok(value) => value
                .clone()
                .unwrap_or_else(|| Err(Arc::new(ApiError::Cancelled))),
            Err(_) => Err(Arc::new(ApiError::Cancelled)),
        }
    }

    /// Fetch through the cache: serve a hit, join an in-flight request, or run `fetch`.
    pub async fn run<F, Fut>(&self, key: &QueryKey, force: bool, fetch: F) -> SharedResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<QueryData, ApiError>>,
    {
        match self.begin(key, force) {
            Begin::Cached(data) => Ok(data),
            Begin::InFlight(slot) => Self::join(slot).await,
            Begin::Started(ticket) => {
                let result = fetch().await;
                ticket.complete(result)
            }
        }
    }

    /// Wait until `key` has no fetch in flight and return its state.
    pub async fn settled(&self, key: &QueryKey) -> EntryState {
        let slot = self
            .inner
            .lock()
            .entries
            .get(key)
            .and_then(|e| e.inflight.clone());
        if let Some(slot) = slot {
            let _ = Self::join(slot).await;
        }
        self.entry_state(key)
    }

    fn settle(&self, key: &QueryKey, intent: EntryIntent) {
        let schedule = {
            let mut inner = self.inner.lock();
            let Some(entry) = inner.entries.get_mut(key) else {
                return;
            };
            entry.state = EntryReducer::reduce(std::mem::take(&mut entry.state), intent);
            if !entry.state.is_pending() {
                entry.inflight = None;
            }
            if entry.subscribers == 0 {
                entry.unused_since = Some(Instant::now());
            }
            entry.subscribers == 0
        };

        if schedule {
            self.schedule_eviction(key.clone());
        }
    }

    fn schedule_eviction(&self, key: QueryKey) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let weak: Weak<Mutex<CacheInner>> = Arc::downgrade(&self.inner);
        let delay = self.inner.lock().keep_unused_for;

        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                QueryCache { inner }.purge_key(&key, Instant::now());
            }
        });
    }

    fn purge_key(&self, key: &QueryKey, now: Instant) -> bool {
        let mut inner = self.inner.lock();
        let keep = inner.keep_unused_for;
        let expired = inner
            .entries
            .get(key)
            .is_some_and(|e| e.is_expired(keep, now));
        if expired {
            inner.entries.remove(key);
            tracing::debug!(key = %key, "Evicted unused entry");
        }
        expired
    }

    /// Drop every unused entry whose retention period has elapsed by `now`.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let mut inner = self.inner.lock();
        let keep = inner.keep_unused_for;
        let before = inner.entries.len();
        inner.entries.retain(|_, e| !e.is_expired(keep, now));
        before - inner.entries.len()
    }

    /// Forget the cached payload of `key` so the next request refetches.
    ///
    /// A pending entry is left alone; its fetch settles as usual.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut inner = self.inner.lock();
        if let Some(entry) = inner.entries.get_mut(key) {
            if !entry.state.is_pending() {
                entry.state = EntryState::default();
            }
        }
    }

    pub fn entry_state(&self, key: &QueryKey) -> EntryState {
        self.inner
            .lock()
            .entries
            .get(key)
            .map(|e| e.state.clone())
            .unwrap_or_default()
    }

    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.inner
            .lock()
            .entries
            .get(key)
            .map_or(0, |e| e.subscribers)
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a cache entry alive; dropping the last one starts the eviction timer.
pub struct Subscription {
    cache: QueryCache,
    key: QueryKey,
}

impl Subscription {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cache.release(&self.key);
    }
}

/// Ownership of an in-flight fetch.
///
/// Dropping it without calling [`InflightTicket::complete`] cancels the
/// request: the entry rolls back and waiters receive [`ApiError::Cancelled`].
pub struct InflightTicket {
    cache: QueryCache,
    key: QueryKey,
    request_id: Uuid,
    tx: watch::Sender<Option<SharedResult>>,
    armed: bool,
}

impl InflightTicket {
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Record the fetch outcome and wake every waiter.
    pub fn complete(mut self, result: Result<QueryData, ApiError>) -> SharedResult {
        self.armed = false;
        let at = Instant::now();
        let shared: SharedResult = result.map_err(Arc::new);

        let intent = match &shared {
            Ok(data) => EntryIntent::Fulfilled {
                request_id: self.request_id,
                data: data.clone(),
                at,
            },
            Err(e) => EntryIntent::Rejected {
                request_id: self.request_id,
                error: e.to_string(),
                at,
            },
        };
        self.cache.settle(&self.key, intent);
        self.tx.send_replace(Some(shared.clone()));
        shared
    }
}

impl Drop for InflightTicket {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!(key = %self.key, request_id = %self.request_id, "Request cancelled");
            self.cache.settle(
                &self.key,
                EntryIntent::Cancelled {
                    request_id: self.request_id,
                },
            );
        }
    }
}
