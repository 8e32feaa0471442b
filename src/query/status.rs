//! Cache entry lifecycle: `Uninitialized → Pending → Fulfilled | Rejected`.

use tokio::time::Instant;

use uuid::Uuid;

use crate::mvi::{Intent, Reducer, UiState};
use crate::query::data::QueryData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Uninitialized,
    Pending,
    Fulfilled,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryState {
    pub status: QueryStatus,
    /// Last fulfilled payload; kept while a refetch is pending or after it fails.
    pub data: Option<QueryData>,
    pub error: Option<String>,
    /// Request currently owning the entry.
    pub request_id: Option<Uuid>,
    pub started_at: Option<Instant>,
    pub settled_at: Option<Instant>,
}

impl UiState for EntryState {}

impl EntryState {
    pub fn is_pending(&self) -> bool {
        self.status == QueryStatus::Pending
    }
}

#[derive(Debug, Clone)]
pub enum EntryIntent {
    Started {
        request_id: Uuid,
        at: Instant,
    },
    Fulfilled {
        request_id: Uuid,
        data: QueryData,
        at: Instant,
    },
    Rejected {
        request_id: Uuid,
        error: String,
        at: Instant,
    },
    /// The owning fetch was dropped before it settled.
    Cancelled { request_id: Uuid },
}

impl Intent for EntryIntent {}

pub struct EntryReducer;

impl EntryReducer {
    fn owns(state: &EntryState, request_id: Uuid) -> bool {
        state.request_id == Some(request_id)
    }
}

impl Reducer for EntryReducer {
    type State = EntryState;
    type Intent = EntryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EntryIntent::Started { request_id, at } => EntryState {
                status: QueryStatus::Pending,
                request_id: Some(request_id),
                started_at: Some(at),
                settled_at: None,
                error: None,
                data: state.data,
            },
            // Results from a request that no longer owns the entry are dropped.
            EntryIntent::Fulfilled {
                request_id,
                data,
                at,
            } if Self::owns(&state, request_id) => EntryState {
                status: QueryStatus::Fulfilled,
                data: Some(data),
                error: None,
                settled_at: Some(at),
                ..state
            },
            EntryIntent::Rejected {
                request_id,
                error,
                at,
            } if Self::owns(&state, request_id) => EntryState {
                status: QueryStatus::Rejected,
                error: Some(error),
                settled_at: Some(at),
                ..state
            },
            EntryIntent::Cancelled { request_id }
                if Self::owns(&state, request_id) && state.is_pending() =>
            {
                let status = if state.data.is_some() {
                    QueryStatus::Fulfilled
                } else {
                    QueryStatus::Uninitialized
                };
                EntryState {
                    status,
                    request_id: None,
                    started_at: None,
                    ..state
                }
            }
            _ => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn names(list: &[&str]) -> QueryData {
        QueryData::Names(Arc::new(list.iter().map(|s| s.to_string()).collect()))
    }

    #[test]
    fn test_started_then_fulfilled() {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let state = EntryReducer::reduce(
            EntryState::default(),
            EntryIntent::Started { request_id: id, at: now },
        );
        assert_eq!(state.status, QueryStatus::Pending);

        let data = names(&["Chad"]);
        let state = EntryReducer::reduce(
            state,
            EntryIntent::Fulfilled {
                request_id: id,
                data: data.clone(),
                at: now,
            },
        );
        assert_eq!(state.status, QueryStatus::Fulfilled);
        assert_eq!(state.data, Some(data));
        assert_eq!(state.settled_at, Some(now));
    }

    #[test]
    fn test_rejection_keeps_previous_data() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let now = Instant::now();
        let data = names(&["Chad"]);

        let mut state = EntryState::default();
        for intent in [
            EntryIntent::Started { request_id: first, at: now },
            EntryIntent::Fulfilled {
                request_id: first,
                data: data.clone(),
                at: now,
            },
            EntryIntent::Started { request_id: second, at: now },
            EntryIntent::Rejected {
                request_id: second,
                error: "HTTP 500".to_string(),
                at: now,
            },
        ] {
            state = EntryReducer::reduce(state, intent);
        }

        assert_eq!(state.status, QueryStatus::Rejected);
        assert_eq!(state.error.as_deref(), Some("HTTP 500"));
        assert_eq!(state.data, Some(data));
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let stale = Uuid::new_v4();
        let current = Uuid::new_v4();
        let now = Instant::now();
        let state = EntryReducer::reduce(
            EntryState::default(),
            EntryIntent::Started { request_id: current, at: now },
        );
        let state = EntryReducer::reduce(
            state,
            EntryIntent::Fulfilled {
                request_id: stale,
                data: names(&["Peru"]),
                at: now,
            },
        );
        assert_eq!(state.status, QueryStatus::Pending);
        assert!(state.data.is_none());
    }

    #[test]
    fn test_cancel_without_data_returns_to_uninitialized() {
        let id = Uuid::new_v4();
        let state = EntryReducer::reduce(
            EntryState::default(),
            EntryIntent::Started {
                request_id: id,
                at: Instant::now(),
            },
        );
        let state = EntryReducer::reduce(state, EntryIntent::Cancelled { request_id: id });
        assert_eq!(state.status, QueryStatus::Uninitialized);
        assert!(state.request_id.is_none());
    }
}
