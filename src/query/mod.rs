//! Query/cache layer: named queries over the countries API with cached,
//! deduplicated results and an anti-flicker loading policy.

mod cache;
mod countries;
mod data;
mod handle;
mod policy;
mod status;

pub use cache::{Begin, InflightTicket, QueryCache, SharedResult, Subscription};
pub use countries::CountriesApi;
pub use data::{QueryData, QueryPayload};
pub use handle::{LazyQuery, QueryHandle, QueryResult};
pub use policy::{long_running, LoadingPolicy};
pub use status::{EntryIntent, EntryReducer, EntryState, QueryStatus};
