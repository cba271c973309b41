// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the active connection count
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` is notified.
///
/// After shutdown the listener is closed and in-flight connections get up to
/// the connection timeout to finish.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    let remaining = drain_connections(&state, state.config.performance.connection_timeout()).await;
    logger::log_shutdown_complete(remaining);
}

/// Wait until no connections are active or `grace` elapses.
///
/// Returns the number of connections still open.
async fn drain_connections(state: &AppState, grace: Duration) -> usize {
    let active = state.active_connections.load(Ordering::SeqCst);
    logger::log_shutdown_started(active);

    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let active = state.active_connections.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
