//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use countries_explorer::config::{
    ApiConfig, CacheConfig, Config, LoadingConfig, PaginationConfig,
};
use countries_explorer::query::CountriesApi;
use std::path::PathBuf;
use tempfile::TempDir;

/// `/all` payload: unsorted, with a duplicate and sparse records.
pub const ALL_COUNTRIES: &str = r#"[
  {"name":{"common":"Sweden","official":"Kingdom of Sweden"},"flags":{"png":"se.png","svg":"se.svg"},
   "population":10353442,"region":"Europe","capital":["Stockholm"]},
  {"name":{"common":"Chad","official":"Republic of Chad"},"flags":{"png":"td.png","svg":"td.svg"},
   "population":0,"region":"Africa","capital":["N'Djamena"]},
  {"name":{"common":"Åland Islands","official":"Åland Islands"},"flags":{"png":"ax.png","svg":"ax.svg"},
   "population":29458,"region":"Europe","capital":["Mariehamn"]},
  {"name":{"common":"Finland","official":"Republic of Finland"},"flags":{"png":"fi.png","svg":"fi.svg"},
   "population":5530719,"region":"Europe","capital":["Helsinki"]},
  {"name":{"common":"Niger","official":"Republic of Niger"},"flags":{"png":"ne.png","svg":"ne.svg"},
   "population":24206636,"region":"Africa","capital":["Niamey"]},
  {"name":{"common":"Antarctica","official":"Antarctica"},"flags":{"png":"aq.png","svg":"aq.svg"},
   "population":1000,"region":"Antarctic"}
]"#;

pub const FINLAND_DETAIL: &str = r#"[
  {"name":{"common":"Finland","official":"Republic of Finland",
     "nativeName":{"fin":{"official":"Suomen tasavalta","common":"Suomi"},
                   "swe":{"official":"Republiken Finland","common":"Finland"}}},
   "flags":{"png":"fi.png","svg":"fi.svg","alt":"White with a blue cross"},
   "population":5530719,"region":"Europe","subregion":"Northern Europe",
   "capital":["Helsinki"],"tld":[".fi"],
   "currencies":{"EUR":{"name":"Euro","symbol":"€"}},
   "languages":{"fin":"Finnish","swe":"Swedish"},
   "borders":["NOR","SWE","RUS"]}
]"#;

pub const FINLAND_BORDERS: &str =
    r#"[{"name":{"common":"Norway"}},{"name":{"common":"Sweden"}},{"name":{"common":"Russia"}}]"#;

/// Search for "land": relevance order, includes a name absent from `/all`.
pub const SEARCH_LAND: &str = r#"[
  {"name":{"common":"Finland"}},{"name":{"common":"Iceland"}},{"name":{"common":"Åland Islands"}}
]"#;

/// Config pointed at `base_url`, with loading delays disabled.
pub fn test_config(base_url: &str) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
            connect_timeout_seconds: 2,
        },
        cache: CacheConfig {
            keep_unused_for_seconds: 60,
        },
        loading: LoadingConfig {
            show_after_ms: 0,
            min_display_ms: 0,
            notice_after_ms: 10_000,
        },
        pagination: PaginationConfig { items_per_page: 2 },
    }
}

pub fn make_api(base_url: &str) -> CountriesApi {
    CountriesApi::from_config(&test_config(base_url)).expect("Failed to build api")
}

/// Write `content` to a temporary config.toml.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
