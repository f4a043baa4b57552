//! MovieMind application runtime: session loop, effect execution,
//! configuration and the console view.
pub mod config;
pub mod console;
pub mod effects;
pub mod logging;
pub mod session;

pub use session::{Inbound, Pump, Session, View};
