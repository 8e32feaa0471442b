use std::sync::Arc;

use crate::api::CountryDetail;
use crate::store::CountryStore;

/// Transformed payload held by a cache entry.
#[derive(Debug, Clone)]
pub enum QueryData {
    Countries(Arc<CountryStore>),
    Country(Arc<CountryDetail>),
    Names(Arc<Vec<String>>),
}

/// Identity comparison: two payloads are equal when they share an allocation.
impl PartialEq for QueryData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (QueryData::Countries(a), QueryData::Countries(b)) => Arc::ptr_eq(a, b),
            (QueryData::Country(a), QueryData::Country(b)) => Arc::ptr_eq(a, b),
            (QueryData::Names(a), QueryData::Names(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Payload types that can be read back out of a [`QueryData`].
pub trait QueryPayload: Send + Sync + 'static {
    fn from_data(data: &QueryData) -> Option<Arc<Self>>;
}

impl QueryPayload for CountryStore {
    fn from_data(data: &QueryData) -> Option<Arc<Self>> {
        match data {
            QueryData::Countries(store) => Some(store.clone()),
            _ => None,
        }
    }
}

impl QueryPayload for CountryDetail {
    fn from_data(data: &QueryData) -> Option<Arc<Self>> {
        match data {
            QueryData::Country(detail) => Some(detail.clone()),
            _ => None,
        }
    }
}

impl QueryPayload for Vec<String> {
    fn from_data(data: &QueryData) -> Option<Arc<Self>> {
        match data {
            QueryData::Names(names) => Some(names.clone()),
            _ => None,
        }
    }
}
