// Signal handling module
//
// SIGTERM and SIGINT trigger graceful shutdown. Reload and log-rotation
// signals are out of scope for a fixed-route server.

/// Resolve when a shutdown signal arrives (Unix: SIGTERM or SIGINT).
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {}
        _ = sigint.recv() => {}
    }
}

/// Windows fallback - only Ctrl+C is supported
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
