// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

/// Accept connections on `listener` until `shutdown` is notified.
///
/// Accept errors (e.g. file descriptor exhaustion) are logged and the loop
/// keeps going. Connections already in flight are not awaited.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    shutdown: Arc<Notify>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown_requested();
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use crate::server::listener::bind_listener;
    use std::time::Duration;

    #[tokio::test]
    async fn test_loop_exits_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::defaults().unwrap();
        cfg.server.root = dir.path().to_string_lossy().into_owned();
        let state = Arc::new(AppState::new(&cfg).unwrap());

        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let shutdown = Arc::new(Notify::new());
        let task = tokio::spawn(start_server_loop(listener, state, Arc::clone(&shutdown)));

        shutdown.notify_one();
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("loop should stop")
            .unwrap();
    }
}
