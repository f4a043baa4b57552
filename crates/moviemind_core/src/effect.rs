use std::time::Duration;

use crate::{RefreshId, RequestId};

/// Delay between a successful result and the scroll-to-results signal,
/// leaving the view time to render the new cards.
pub const SCROLL_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Recommend {
        request_id: RequestId,
        preference: String,
    },
    RefreshHistory {
        refresh_id: RefreshId,
    },
    ScheduleScroll {
        request_id: RequestId,
        delay: Duration,
    },
    Notify(Notification),
}

/// Presentation signals for whatever view layer consumes the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ScrollToResults,
    RecommendationFailed { message: String },
    HistoryPanelShown,
    HistoryPanelHidden,
}
