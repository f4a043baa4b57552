use std::io;

use moviemind_app::config::{load_config, AppConfig};
use moviemind_app::console::{spawn_stdin_reader, ConsoleView};
use moviemind_app::logging;
use moviemind_app::Session;
use moviemind_logging::{mind_info, mind_warn};

fn main() -> anyhow::Result<()> {
    let (config, load_error) = match load_config(&std::env::current_dir()?) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination, config.log_level()?);
    if let Some(err) = load_error {
        mind_warn!("{}; using defaults", err);
    }

    let settings = config.api_settings()?;
    mind_info!("Recommendation service at {}", settings.base_url);

    println!("Describe your mood (e.g. 'Chill space adventure'). :history, :pick <n>, :close, :quit");
    let view = ConsoleView::new(io::stdout());
    let shown_history = view.shown_history();
    let mut session = Session::start(settings, view)?;
    spawn_stdin_reader(session.sender(), shown_history);
    session.run();
    Ok(())
}
