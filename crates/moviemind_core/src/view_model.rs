use crate::HistoryId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub query: String,
    /// True while a recommendation request is outstanding; the submit
    /// control should be disabled.
    pub busy: bool,
    pub status: RequestStatus,
    pub results: ResultsView,
    pub failure_notice: Option<String>,
    pub history: Vec<HistoryRowView>,
    pub history_panel_open: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// What the results section shows. A success with no items is distinct
/// from never having received one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    NotRequested,
    Empty,
    Items(Vec<RecommendationCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationCard {
    pub title: String,
    pub description: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: HistoryId,
    pub user_input: String,
    /// Calendar date of the query, `YYYY-MM-DD` in UTC.
    pub date: String,
    pub recommendation_count: usize,
}
