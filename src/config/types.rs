use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Remote data source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the countries API (e.g., "https://restcountries.com/v3.1").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Query cache retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long an entry with no subscribers is kept before eviction (default: 60).
    #[serde(default = "default_keep_unused_for")]
    pub keep_unused_for_seconds: u64,
}

/// Loading indicator timing for long-running queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Pending time before `is_loading` is reported (default: 150).
    #[serde(default = "default_show_after")]
    pub show_after_ms: u64,
    /// Minimum time loading stays visible once shown (default: 400).
    #[serde(default = "default_min_display")]
    pub min_display_ms: u64,
    /// Pending time before a "still loading" alert is raised (default: 3000).
    #[serde(default = "default_notice_after")]
    pub notice_after_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_keep_unused_for() -> u64 {
    60
}

fn default_show_after() -> u64 {
    150
}

fn default_min_display() -> u64 {
    400
}

fn default_notice_after() -> u64 {
    3000
}

fn default_items_per_page() -> usize {
    12
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }
}

impl CacheConfig {
    pub fn keep_unused_for(&self) -> Duration {
        Duration::from_secs(self.keep_unused_for_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            keep_unused_for_seconds: default_keep_unused_for(),
        }
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            show_after_ms: default_show_after(),
            min_display_ms: default_min_display(),
            notice_after_ms: default_notice_after(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}
