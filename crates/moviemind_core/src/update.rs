use moviemind_logging::{mind_debug, mind_warn};

use crate::{
    AppState, Completion, Effect, Msg, Notification, RefreshOutcome, RequestState, SCROLL_DELAY,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let refresh_id = state.history_mut().refresh();
            vec![Effect::RefreshHistory { refresh_id }]
        }
        Msg::QueryChanged(text) => {
            if text != state.query_input() {
                state.set_query_input(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::QuerySubmitted => submit_query(&mut state),
        Msg::HistoryPanelOpened => set_history_panel(&mut state, true),
        Msg::HistoryPanelClosed => set_history_panel(&mut state, false),
        Msg::HistoryEntrySelected { id } => {
            let Some(input) = state.history().select(&id).map(ToOwned::to_owned) else {
                mind_warn!("Selected history entry {} is not in the feed", id);
                return (state, Vec::new());
            };
            if input != state.query_input() {
                state.set_query_input(input);
                state.mark_dirty();
            }
            let mut effects = set_history_panel(&mut state, false);
            effects.extend(submit_query(&mut state));
            effects
        }
        Msg::RecommendFinished { request_id, result } => {
            match state.coordinator_mut().complete(request_id, result) {
                Completion::Succeeded { request_id, .. } => {
                    state.mark_dirty();
                    let refresh_id = state.history_mut().refresh();
                    vec![
                        Effect::RefreshHistory { refresh_id },
                        Effect::ScheduleScroll {
                            request_id,
                            delay: SCROLL_DELAY,
                        },
                    ]
                }
                Completion::Failed { .. } => {
                    state.mark_dirty();
                    match state.coordinator().state() {
                        RequestState::Failed(message) => {
                            vec![Effect::Notify(Notification::RecommendationFailed {
                                message: message.clone(),
                            })]
                        }
                        _ => Vec::new(),
                    }
                }
                Completion::Stale => Vec::new(),
            }
        }
        Msg::HistoryRefreshed { refresh_id, result } => {
            if let RefreshOutcome::Replaced { .. } =
                state.history_mut().apply_refresh(refresh_id, result)
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ScrollTimerElapsed { request_id } => {
            if state.coordinator().last_succeeded() == Some(request_id) {
                vec![Effect::Notify(Notification::ScrollToResults)]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_query(state: &mut AppState) -> Vec<Effect> {
    let raw = state.query_input().to_string();
    match state.coordinator_mut().submit(&raw) {
        Ok(submission) => {
            state.mark_dirty();
            vec![Effect::Recommend {
                request_id: submission.request_id,
                preference: submission.query.into_string(),
            }]
        }
        Err(rejected) => {
            mind_debug!("Submit ignored: {}", rejected);
            Vec::new()
        }
    }
}

fn set_history_panel(state: &mut AppState, open: bool) -> Vec<Effect> {
    if state.history_panel_open() == open {
        return Vec::new();
    }
    state.set_history_panel_open(open);
    state.mark_dirty();
    let notification = if open {
        Notification::HistoryPanelShown
    } else {
        Notification::HistoryPanelHidden
    };
    vec![Effect::Notify(notification)]
}
