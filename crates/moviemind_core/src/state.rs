use crate::view_model::{AppViewModel, HistoryRowView, RecommendationCard, RequestStatus, ResultsView};
use crate::{HistoryStore, RequestCoordinator, RequestState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    query_input: String,
    coordinator: RequestCoordinator,
    history: HistoryStore,
    history_panel_open: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let state = self.coordinator.state();
        let status = match state {
            RequestState::Idle => RequestStatus::Idle,
            RequestState::Pending => RequestStatus::Pending,
            RequestState::Succeeded(_) => RequestStatus::Succeeded,
            RequestState::Failed(_) => RequestStatus::Failed,
        };
        let failure_notice = match state {
            RequestState::Failed(message) => Some(message.clone()),
            _ => None,
        };
        let results = match self.coordinator.results() {
            None => ResultsView::NotRequested,
            Some([]) => ResultsView::Empty,
            Some(items) => ResultsView::Items(
                items
                    .iter()
                    .map(|item| RecommendationCard {
                        title: item.title.clone(),
                        description: item.description.clone(),
                        reason: item.reason.clone(),
                    })
                    .collect(),
            ),
        };
        let history = self
            .history
            .entries()
            .iter()
            .map(|entry| HistoryRowView {
                id: entry.id.clone(),
                user_input: entry.user_input.clone(),
                date: entry.timestamp.format("%Y-%m-%d").to_string(),
                recommendation_count: entry.recommendations.len(),
            })
            .collect();

        AppViewModel {
            query: self.query_input.clone(),
            busy: self.coordinator.is_pending(),
            status,
            results,
            failure_notice,
            history,
            history_panel_open: self.history_panel_open,
            dirty: self.dirty,
        }
    }

    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    pub fn coordinator(&self) -> &RequestCoordinator {
        &self.coordinator
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_panel_open(&self) -> bool {
        self.history_panel_open
    }

    /// Returns true when a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_query_input(&mut self, text: String) {
        self.query_input = text;
    }

    pub(crate) fn coordinator_mut(&mut self) -> &mut RequestCoordinator {
        &mut self.coordinator
    }

    pub(crate) fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub(crate) fn set_history_panel_open(&mut self, open: bool) {
        self.history_panel_open = open;
    }
}
