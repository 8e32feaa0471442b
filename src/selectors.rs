//! Derived views over the normalized country store.
//!
//! [`select_country_ids_by_region`] is the pure computation;
//! [`RegionSelector`] memoizes it against its last inputs.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::api::CountrySummary;
use crate::query::{CountriesApi, QueryResult};
use crate::store::{locale_compare, CountryStore};

/// Names of the countries in `region`.
///
/// With `search_results`, the output follows that order and skips names that
/// are unknown or outside the region. Without, the output is alphabetical.
/// Region matching ignores case.
pub fn select_country_ids_by_region(
    store: &CountryStore,
    search_results: Option<&[String]>,
    region: &str,
) -> Vec<String> {
    let region = region.to_lowercase();
    let in_region = |c: &&CountrySummary| c.region == region;

    match search_results {
        Some(names) => names
            .iter()
            .filter_map(|name| store.select_by_id(name))
            .filter(in_region)
            .map(|c| c.name.clone())
            .collect(),
        None => {
            let mut names: Vec<String> = store
                .entities()
                .values()
                .filter(in_region)
                .map(|c| c.name.clone())
                .collect();
            names.sort_by(|a, b| locale_compare(a, b));
            names
        }
    }
}

struct Memo {
    store: Weak<CountryStore>,
    search_results: Option<Vec<String>>,
    region: String,
    output: Arc<[String]>,
}

/// Memoized [`select_country_ids_by_region`].
///
/// The store is compared by identity (the same `Arc`), the search list and
/// region by value. Unchanged inputs return the previous `Arc`.
#[derive(Default)]
pub struct RegionSelector {
    memo: Mutex<Option<Memo>>,
    recomputations: Mutex<usize>,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(
        &self,
        store: &Arc<CountryStore>,
        search_results: Option<&[String]>,
        region: &str,
    ) -> Arc<[String]> {
        let mut memo = self.memo.lock();

        if let Some(m) = memo.as_ref() {
            let same_store = m
                .store
                .upgrade()
                .is_some_and(|prev| Arc::ptr_eq(&prev, store));
            if same_store
                && m.search_results.as_deref() == search_results
                && m.region == region
            {
                return m.output.clone();
            }
        }

        let output: Arc<[String]> =
            select_country_ids_by_region(store, search_results, region).into();
        *self.recomputations.lock() += 1;
        tracing::trace!(region = %region, count = output.len(), "Recomputed region view");

        *memo = Some(Memo {
            store: Arc::downgrade(store),
            search_results: search_results.map(<[String]>::to_vec),
            region: region.to_string(),
            output: output.clone(),
        });
        output
    }

    /// How many times the view has actually been computed.
    pub fn recomputations(&self) -> usize {
        *self.recomputations.lock()
    }
}

/// Cached `getCountries` query result.
pub fn select_countries_result(api: &CountriesApi) -> QueryResult<CountryStore> {
    api.countries_result()
}

pub fn select_all_countries(store: &CountryStore) -> Vec<&CountrySummary> {
    store.select_all()
}

pub fn select_country_by_id<'a>(store: &'a CountryStore, id: &str) -> Option<&'a CountrySummary> {
    store.select_by_id(id)
}

pub fn select_country_ids(store: &CountryStore) -> &[String] {
    store.select_ids()
}

pub fn select_countries_total(store: &CountryStore) -> usize {
    store.select_total()
}
