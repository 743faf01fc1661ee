// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use crate::core::api::ApiError;

/// Tags one fetch lifecycle. Ids only grow, so a superseded request can never match again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// What a finished request hands back to its query
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub request: RequestId,
    pub result: Result<T, Arc<ApiError>>,
}

/// `{data, loading, error}` snapshot of one query, plus the bookkeeping needed
/// to drop answers that arrive after a newer request was issued.
#[derive(Debug)]
pub struct QueryState<T> {
    data: Option<T>,
    loading: bool,
    error: bool,
    in_flight: Option<RequestId>,
    issued: u64,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: false,
            in_flight: None,
            issued: 0,
        }
    }
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> bool {
        self.error
    }

    /// Starts a new lifecycle. Previous data stays until the answer arrives.
    pub fn begin(&mut self) -> RequestId {
        self.issued += 1;
        let request = RequestId(self.issued);

        self.in_flight = Some(request);
        self.loading = true;
        self.error = false;

        request
    }

    /// Applies a response; returns `false` when it belongs to a superseded request
    pub fn settle(&mut self, response: Response<T>) -> bool {
        if self.in_flight != Some(response.request) {
            tracing::debug!(request = ?response.request, "ignoring stale response");
            return false;
        }

        self.in_flight = None;
        self.loading = false;

        match response.result {
            Ok(data) => {
                self.data = Some(data);
                self.error = false;
            }
            Err(err) => {
                tracing::error!(error = %err, "query failed");
                self.error = true;
            }
        }

        true
    }

    /// Back to the idle state; anything still in flight becomes stale
    pub fn reset(&mut self) {
        self.data = None;
        self.loading = false;
        self.error = false;
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{QueryState, Response};
    use crate::core::{api::ApiError, graphql::QueryError};

    fn failed() -> Arc<ApiError> {
        Arc::new(ApiError::Fetch(QueryError::MissingData))
    }

    #[test]
    fn idle_state_is_not_loading() {
        let state = QueryState::<u32>::default();
        assert!(!state.loading());
        assert!(!state.error());
        assert!(state.data().is_none());
    }

    #[test]
    fn lifecycle_goes_loading_then_loaded() {
        let mut state = QueryState::default();
        let request = state.begin();
        assert!(state.loading());

        assert!(state.settle(Response {
            request,
            result: Ok(7),
        }));
        assert!(!state.loading());
        assert!(!state.error());
        assert_eq!(state.data(), Some(&7));
    }

    #[test]
    fn failure_sets_error_and_keeps_previous_data() {
        let mut state = QueryState::default();
        let first = state.begin();
        state.settle(Response {
            request: first,
            result: Ok(1),
        });

        let second = state.begin();
        assert!(!state.error());
        state.settle(Response {
            request: second,
            result: Err(failed()),
        });

        assert!(state.error());
        assert!(!state.loading());
        assert_eq!(state.data(), Some(&1));
    }

    #[test]
    fn last_request_wins() {
        let mut state = QueryState::default();
        let old = state.begin();
        let new = state.begin();

        assert!(!state.settle(Response {
            request: old,
            result: Ok("old"),
        }));
        assert!(state.loading());
        assert!(state.data().is_none());

        assert!(state.settle(Response {
            request: new,
            result: Ok("new"),
        }));
        assert_eq!(state.data(), Some(&"new"));
    }

    #[test]
    fn reset_makes_in_flight_request_stale() {
        let mut state = QueryState::default();
        let request = state.begin();
        state.reset();

        assert!(!state.settle(Response {
            request,
            result: Ok(3),
        }));
        assert!(state.data().is_none());
        assert!(!state.loading());
    }
}
