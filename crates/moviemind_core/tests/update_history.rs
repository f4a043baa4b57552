use std::sync::Once;

use chrono::{TimeZone, Utc};
use moviemind_core::{
    update, AppState, Effect, HistoryEntry, HistoryId, HistoryRowView, Msg, Notification,
    Recommendation, RequestStatus,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(moviemind_logging::initialize_for_tests);
}

fn entry(id: &str, input: &str) -> HistoryEntry {
    HistoryEntry {
        id: HistoryId::new(id),
        user_input: input.to_string(),
        timestamp: Utc.with_ymd_and_hms(2026, 2, 14, 21, 30, 0).unwrap(),
        recommendations: vec![Recommendation {
            title: "Groundhog Day".to_string(),
            description: "A loop.".to_string(),
            reason: "Winter comedy.".to_string(),
        }],
    }
}

fn loaded(entries: Vec<HistoryEntry>) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::Started);
    assert_eq!(effects, vec![Effect::RefreshHistory { refresh_id: 1 }]);
    let (state, _) = update(
        state,
        Msg::HistoryRefreshed {
            refresh_id: 1,
            result: Ok(entries),
        },
    );
    state
}

#[test]
fn startup_loads_history_rows() {
    init_logging();
    let mut state = loaded(vec![entry("h2", "cozy winter comedy"), entry("h1", "noir")]);

    assert!(state.consume_dirty());
    assert_eq!(
        state.view().history,
        vec![
            HistoryRowView {
                id: HistoryId::new("h2"),
                user_input: "cozy winter comedy".to_string(),
                date: "2026-02-14".to_string(),
                recommendation_count: 1,
            },
            HistoryRowView {
                id: HistoryId::new("h1"),
                user_input: "noir".to_string(),
                date: "2026-02-14".to_string(),
                recommendation_count: 1,
            },
        ]
    );
}

#[test]
fn failed_refresh_leaves_feed_and_request_state_alone() {
    init_logging();
    let state = loaded(vec![entry("h1", "noir")]);
    let (state, _) = update(state, Msg::QueryChanged("western".to_string()));
    let (state, _) = update(state, Msg::QuerySubmitted);
    let (mut state, _) = update(
        state,
        Msg::RecommendFinished {
            request_id: 1,
            result: Ok(Vec::new()),
        },
    );
    state.consume_dirty();

    let (mut state, effects) = update(
        state,
        Msg::HistoryRefreshed {
            refresh_id: 2,
            result: Err("http status 500".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.view().history.len(), 1);
    assert_eq!(state.view().status, RequestStatus::Succeeded);
}

#[test]
fn selecting_entry_submits_its_input() {
    init_logging();
    let state = loaded(vec![entry("h1", "cozy winter comedy")]);
    let (state, _) = update(state, Msg::HistoryPanelOpened);

    let (state, effects) = update(
        state,
        Msg::HistoryEntrySelected {
            id: HistoryId::new("h1"),
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notification::HistoryPanelHidden),
            Effect::Recommend {
                request_id: 1,
                preference: "cozy winter comedy".to_string(),
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.query, "cozy winter comedy");
    assert!(!view.history_panel_open);
    assert!(view.busy);
}

#[test]
fn selecting_entry_matches_typing_the_same_query() {
    init_logging();
    let state = loaded(vec![entry("h1", "cozy winter comedy")]);

    let (_, via_history) = update(
        state.clone(),
        Msg::HistoryEntrySelected {
            id: HistoryId::new("h1"),
        },
    );
    let (typed, _) = update(state, Msg::QueryChanged("cozy winter comedy".to_string()));
    let (_, via_typing) = update(typed, Msg::QuerySubmitted);

    let recommend = |effects: Vec<Effect>| -> Vec<Effect> {
        effects
            .into_iter()
            .filter(|e| matches!(e, Effect::Recommend { .. }))
            .collect()
    };
    assert_eq!(recommend(via_history), via_typing);
}

#[test]
fn selecting_while_pending_fills_input_but_does_not_submit() {
    init_logging();
    let state = loaded(vec![entry("h1", "cozy winter comedy")]);
    let (state, _) = update(state, Msg::QueryChanged("heist".to_string()));
    let (state, _) = update(state, Msg::QuerySubmitted);

    let (state, effects) = update(
        state,
        Msg::HistoryEntrySelected {
            id: HistoryId::new("h1"),
        },
    );

    assert!(effects.iter().all(|e| !matches!(e, Effect::Recommend { .. })));
    assert_eq!(state.view().query, "cozy winter comedy");
}

#[test]
fn selecting_unknown_entry_is_noop() {
    init_logging();
    let state = loaded(vec![entry("h1", "noir")]);
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::HistoryEntrySelected {
            id: HistoryId::new("nope"),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn each_success_requests_exactly_one_refresh() {
    init_logging();
    let mut state = loaded(Vec::new());
    let mut refreshes = 0;

    for request_id in 1..=3 {
        let (next, _) = update(state, Msg::QueryChanged(format!("mood {request_id}")));
        let (next, _) = update(next, Msg::QuerySubmitted);
        let (next, effects) = update(
            next,
            Msg::RecommendFinished {
                request_id,
                result: Ok(Vec::new()),
            },
        );
        refreshes += effects
            .iter()
            .filter(|e| matches!(e, Effect::RefreshHistory { .. }))
            .count();
        state = next;
    }

    assert_eq!(refreshes, 3);
}
