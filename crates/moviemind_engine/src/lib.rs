//! MovieMind engine: HTTP contract of the recommendation service and the
//! background runtime that executes calls for the session.
mod client;
mod engine;
mod types;

pub use client::{ApiSettings, RecommendationApi, ReqwestApi};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{
    parse_timestamp, ApiError, EngineError, EngineEvent, FailureKind, HistoryRecord,
    Recommendation, RefreshId, RequestId,
};
