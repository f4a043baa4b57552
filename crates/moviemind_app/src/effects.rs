use std::sync::mpsc;
use std::thread;

use moviemind_core::{
    Effect, FailureClass, HistoryEntry, HistoryId, Msg, Notification, Recommendation,
    RequestFailure,
};
use moviemind_engine::{ApiError, EngineEvent, EngineEvents, EngineHandle, HistoryRecord};
use moviemind_logging::{mind_debug, mind_info};

use crate::session::Inbound;

/// Executes core effects against the engine and feeds engine events back
/// into the session inbox.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: EngineEvents, inbox: mpsc::Sender<Inbound>) -> Self {
        spawn_event_loop(events, inbox);
        Self { engine }
    }

    /// Starts IO for every effect and returns the notifications meant for
    /// the view, in emission order.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for effect in effects {
            match effect {
                Effect::Recommend {
                    request_id,
                    preference,
                } => {
                    mind_info!(
                        "Recommend request_id={} preference_len={}",
                        request_id,
                        preference.len()
                    );
                    self.engine.recommend(request_id, preference);
                }
                Effect::RefreshHistory { refresh_id } => {
                    mind_debug!("RefreshHistory refresh_id={}", refresh_id);
                    self.engine.refresh_history(refresh_id);
                }
                Effect::ScheduleScroll { request_id, delay } => {
                    self.engine.start_timer(request_id, delay);
                }
                Effect::Notify(notification) => notifications.push(notification),
            }
        }
        notifications
    }
}

fn spawn_event_loop(events: EngineEvents, inbox: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if inbox.send(Inbound::Core(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RecommendCompleted { request_id, result } => Msg::RecommendFinished {
            request_id,
            result: result
                .map(|items| items.into_iter().map(map_recommendation).collect())
                .map_err(map_failure),
        },
        EngineEvent::HistoryCompleted { refresh_id, result } => Msg::HistoryRefreshed {
            refresh_id,
            result: result
                .map(|records| records.into_iter().map(map_history_record).collect())
                .map_err(|err| err.to_string()),
        },
        EngineEvent::TimerElapsed { request_id } => Msg::ScrollTimerElapsed { request_id },
    }
}

fn map_recommendation(item: moviemind_engine::Recommendation) -> Recommendation {
    Recommendation {
        title: item.title,
        description: item.description,
        reason: item.reason,
    }
}

fn map_history_record(record: HistoryRecord) -> HistoryEntry {
    HistoryEntry {
        id: HistoryId::new(record.id),
        user_input: record.user_input,
        timestamp: record.timestamp,
        recommendations: record
            .recommendations
            .into_iter()
            .map(map_recommendation)
            .collect(),
    }
}

fn map_failure(err: ApiError) -> RequestFailure {
    let kind = if err.kind.is_transport() {
        FailureClass::Transport
    } else {
        FailureClass::Service
    };
    RequestFailure::new(kind, err.to_string())
}
