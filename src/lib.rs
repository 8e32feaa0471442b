//! Country data explorer backed by the REST Countries API.
//!
//! The crate is organised leaf-first:
//!
//! ```text
//! api (endpoints + transforms) ──→ query (cache, dedup, loading policy)
//!        │                                  │
//!        └──→ store (normalized, sorted) ──→ selectors (memoized views)
//!                                           │
//!                          pagination / alerts (presentation helpers)
//! ```

pub mod alerts;
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod pagination;
pub mod query;
pub mod selectors;
pub mod store;
