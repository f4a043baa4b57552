use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier of one accepted recommendation request.
pub type RequestId = u64;

/// Identifier of one history refresh.
pub type RefreshId = u64;

/// One suggested movie. All fields are opaque display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub reason: String,
}

/// Opaque identifier of a history entry, as assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HistoryId(String);

impl HistoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A past query recorded by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub user_input: String,
    pub timestamp: DateTime<Utc>,
    /// Results the service stored alongside the query. Display-only.
    pub recommendations: Vec<Recommendation>,
}

/// Lifecycle of the recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded(Vec<Recommendation>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Service unreachable or timed out.
    Transport,
    /// Non-2xx status or a body that does not match the contract.
    Service,
}

/// Why a recommendation call failed. `detail` is for logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub kind: FailureClass,
    pub detail: String,
}

impl RequestFailure {
    pub fn new(kind: FailureClass, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureClass::Transport => write!(f, "transport failure: {}", self.detail),
            FailureClass::Service => write!(f, "service failure: {}", self.detail),
        }
    }
}
