//! MovieMind core: pure request/history state machine and view-model helpers.
mod coordinator;
mod effect;
mod history;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use coordinator::{Completion, Query, RequestCoordinator, SubmitRejected, Submission, FAILURE_NOTICE};
pub use effect::{Effect, Notification, SCROLL_DELAY};
pub use history::{HistoryStore, RefreshOutcome};
pub use msg::Msg;
pub use state::AppState;
pub use types::{
    FailureClass, HistoryEntry, HistoryId, Recommendation, RefreshId, RequestFailure, RequestId,
    RequestState,
};
pub use update::update;
pub use view_model::{AppViewModel, HistoryRowView, RecommendationCard, RequestStatus, ResultsView};
