//! REST Countries endpoints: request paths, wire records and transforms.

mod client;
mod endpoint;
mod error;
mod models;
pub mod raw;
pub mod transform;

pub use client::CountriesClient;
pub use endpoint::{Endpoint, QueryKey};
pub use error::ApiError;
pub use models::{CountryDetail, CountrySummary, Flags, InfoItem, PLACEHOLDER};
