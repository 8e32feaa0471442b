//! Normalized, name-sorted record storage.

mod collate;
mod entity;

pub use collate::locale_compare;
pub use entity::{Entity, EntityStore};

use crate::api::CountrySummary;

/// The normalized country list produced by the `getCountries` query.
pub type CountryStore = EntityStore<CountrySummary>;
