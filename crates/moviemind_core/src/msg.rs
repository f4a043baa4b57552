use crate::{HistoryEntry, HistoryId, Recommendation, RefreshId, RequestFailure, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Process start; loads the history feed once.
    Started,
    /// User edited the query input (raw, untrimmed text).
    QueryChanged(String),
    /// User submitted the current query input.
    QuerySubmitted,
    /// User opened the history panel.
    HistoryPanelOpened,
    /// User closed the history panel.
    HistoryPanelClosed,
    /// User picked a past query from the history panel.
    HistoryEntrySelected { id: HistoryId },
    /// Engine completion for a recommendation request.
    RecommendFinished {
        request_id: RequestId,
        result: Result<Vec<Recommendation>, RequestFailure>,
    },
    /// Engine completion for a history fetch.
    HistoryRefreshed {
        refresh_id: RefreshId,
        result: Result<Vec<HistoryEntry>, String>,
    },
    /// The post-success render delay has elapsed.
    ScrollTimerElapsed { request_id: RequestId },
    /// Carries nothing; `update` leaves the state and effects unchanged.
    NoOp,
}
