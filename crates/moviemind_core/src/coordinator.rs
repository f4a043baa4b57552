use moviemind_logging::{mind_debug, mind_warn};
use thiserror::Error;

use crate::{Recommendation, RequestFailure, RequestId, RequestState};

/// Notice shown for every failed recommendation call, whatever the cause.
pub const FAILURE_NOTICE: &str =
    "Couldn't fetch recommendations. Check that the recommendation service is running.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("query is empty after trimming")]
    EmptyQuery,
    #[error("request {0} is still pending")]
    RequestPending(RequestId),
}

/// Free-text mood description, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// An accepted submission; the caller must issue the call it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub request_id: RequestId,
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Succeeded { request_id: RequestId, count: usize },
    Failed { request_id: RequestId },
    /// Not the in-flight request; nothing was applied.
    Stale,
}

/// Owns the lifecycle of the single in-flight recommendation request.
///
/// At most one request is pending at a time: `submit` refuses while one is
/// outstanding, and the pending flag clears on every completion. The
/// displayed results only change on success, so a failure keeps whatever
/// the last success produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestCoordinator {
    state: RequestState,
    results: Option<Vec<Recommendation>>,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
    last_succeeded: Option<RequestId>,
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, raw: &str) -> Result<Submission, SubmitRejected> {
        let query = Query::parse(raw).ok_or(SubmitRejected::EmptyQuery)?;
        if let Some(pending) = self.in_flight {
            return Err(SubmitRejected::RequestPending(pending));
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(request_id);
        self.state = RequestState::Pending;
        mind_debug!(
            "Request {} accepted query_len={}",
            request_id,
            query.as_str().len()
        );

        Ok(Submission { request_id, query })
    }

    pub fn complete(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<Recommendation>, RequestFailure>,
    ) -> Completion {
        if self.in_flight != Some(request_id) {
            mind_warn!(
                "Dropping completion for request {} (in flight: {:?})",
                request_id,
                self.in_flight
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(items) => {
                let count = items.len();
                self.results = Some(items.clone());
                self.state = RequestState::Succeeded(items);
                self.last_succeeded = Some(request_id);
                mind_debug!("Request {} succeeded with {} items", request_id, count);
                Completion::Succeeded { request_id, count }
            }
            Err(failure) => {
                mind_warn!("Request {} failed: {}", request_id, failure);
                self.state = RequestState::Failed(FAILURE_NOTICE.to_string());
                Completion::Failed { request_id }
            }
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Payload of the most recent success, `None` before the first one.
    pub fn results(&self) -> Option<&[Recommendation]> {
        self.results.as_deref()
    }

    pub fn last_succeeded(&self) -> Option<RequestId> {
        self.last_succeeded
    }
}
