use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use moviemind_logging::{mind_debug, mind_info, mind_warn};

use crate::client::{ApiSettings, RecommendationApi, ReqwestApi};
use crate::{EngineError, EngineEvent, RefreshId, RequestId};

enum EngineCommand {
    Recommend {
        request_id: RequestId,
        preference: String,
    },
    RefreshHistory {
        refresh_id: RefreshId,
    },
    StartTimer {
        request_id: RequestId,
        delay: Duration,
    },
}

/// Command side of the engine. Dropping it stops the background runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Event side of the engine; yields completions in arrival order.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn start(settings: ApiSettings) -> Result<(Self, EngineEvents), EngineError> {
        let api = ReqwestApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    /// Starts the engine over any API implementation.
    pub fn with_api(
        api: Arc<dyn RecommendationApi>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
            mind_debug!("Engine command channel closed");
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn recommend(&self, request_id: RequestId, preference: impl Into<String>) {
        self.send(EngineCommand::Recommend {
            request_id,
            preference: preference.into(),
        });
    }

    pub fn refresh_history(&self, refresh_id: RefreshId) {
        self.send(EngineCommand::RefreshHistory { refresh_id });
    }

    pub fn start_timer(&self, request_id: RequestId, delay: Duration) {
        self.send(EngineCommand::StartTimer { request_id, delay });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            mind_warn!("Engine thread is gone; command dropped");
        }
    }
}

impl EngineEvents {
    /// Blocks until an event arrives; `None` once the engine has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn RecommendationApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Recommend {
            request_id,
            preference,
        } => {
            mind_info!("Recommend request_id={} starting", request_id);
            let result = api.recommend(&preference).await;
            if let Err(err) = &result {
                mind_warn!("Recommend request_id={} failed: {}", request_id, err);
            }
            EngineEvent::RecommendCompleted { request_id, result }
        }
        EngineCommand::RefreshHistory { refresh_id } => {
            let result = api.history().await;
            if let Err(err) = &result {
                mind_warn!("History refresh_id={} failed: {}", refresh_id, err);
            }
            EngineEvent::HistoryCompleted { refresh_id, result }
        }
        EngineCommand::StartTimer { request_id, delay } => {
            tokio::time::sleep(delay).await;
            EngineEvent::TimerElapsed { request_id }
        }
    };
    let _ = event_tx.send(event);
}
