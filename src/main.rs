use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use pwa_devserver::config::{self, AppState};
use pwa_devserver::server::{self, SignalHandler};
use pwa_devserver::{logger, session, ServerError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_fatal(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), ServerError> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, honoring the optional worker count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), ServerError> {
    logger::log_banner();

    let missing = session::missing_files(Path::new(&cfg.server.root), &cfg.pwa.required_files);
    logger::log_preflight(&missing);

    let addr = cfg.get_socket_addr().map_err(ServerError::InvalidAddress)?;
    let listener = server::bind_listener(addr)?;
    let state = Arc::new(AppState::new(&cfg)?);

    let url = cfg.public_url();
    logger::log_server_start(&addr, &url, &state.root);

    if cfg.pwa.open_browser {
        session::spawn_browser_launch(url.clone(), cfg.browser_delay());
    }

    logger::log_testing_guide(&url);

    let signals = Arc::new(SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    server::start_server_loop(listener, state, Arc::clone(&signals.shutdown)).await;

    logger::log_server_stopped();
    Ok(())
}
