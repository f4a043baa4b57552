use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use moviemind_core::{update, AppState, AppViewModel, Msg, Notification};
use moviemind_engine::{ApiSettings, EngineError, EngineEvents, EngineHandle};
use moviemind_logging::mind_info;

use crate::effects::EffectRunner;

/// Everything the session loop can receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Core(Msg),
    Quit,
}

/// Consumer of view models and presentation signals.
pub trait View {
    fn render(&mut self, view: &AppViewModel);
    fn notify(&mut self, notification: &Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pump {
    Handled,
    Idle,
    Quit,
}

/// Owns the application state and runs `update` on a single thread.
pub struct Session<V: View> {
    state: AppState,
    runner: EffectRunner,
    inbox_tx: mpsc::Sender<Inbound>,
    inbox_rx: mpsc::Receiver<Inbound>,
    view: V,
}

impl<V: View> Session<V> {
    pub fn start(settings: ApiSettings, view: V) -> Result<Self, EngineError> {
        mind_info!("Starting session against {}", settings.base_url);
        let (engine, events) = EngineHandle::start(settings)?;
        Ok(Self::with_engine(engine, events, view))
    }

    /// Builds a session over an already started engine and loads history.
    pub fn with_engine(engine: EngineHandle, events: EngineEvents, view: V) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::channel();
        let runner = EffectRunner::new(engine, events, inbox_tx.clone());
        let mut session = Self {
            state: AppState::new(),
            runner,
            inbox_tx,
            inbox_rx,
            view,
        };
        session.view.render(&session.state.view());
        session.dispatch(Msg::Started);
        session
    }

    /// Sender for user input produced on other threads.
    pub fn sender(&self) -> mpsc::Sender<Inbound> {
        self.inbox_tx.clone()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let notifications = self.runner.run(effects);
        if self.state.consume_dirty() {
            self.view.render(&self.state.view());
        }
        for notification in &notifications {
            self.view.notify(notification);
        }
    }

    /// Handles at most one inbound message, waiting up to `timeout`.
    pub fn pump(&mut self, timeout: Duration) -> Pump {
        match self.inbox_rx.recv_timeout(timeout) {
            Ok(Inbound::Core(msg)) => {
                self.dispatch(msg);
                Pump::Handled
            }
            Ok(Inbound::Quit) | Err(RecvTimeoutError::Disconnected) => Pump::Quit,
            Err(RecvTimeoutError::Timeout) => Pump::Idle,
        }
    }

    /// Runs until a quit request arrives.
    pub fn run(&mut self) {
        while let Ok(inbound) = self.inbox_rx.recv() {
            match inbound {
                Inbound::Core(msg) => self.dispatch(msg),
                Inbound::Quit => break,
            }
        }
        mind_info!("Session stopped");
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
