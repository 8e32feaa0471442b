//! Configuration loading and storage.

mod loader;
mod store;
mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{
    ApiConfig, CacheConfig, Config, LoadingConfig, PaginationConfig, DEFAULT_BASE_URL,
};
