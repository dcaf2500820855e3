//! Signal handling for stopping the event feed

use tracing::debug;

/// Waits for SIGTERM or SIGINT
#[derive(Debug, Default)]
pub struct ShutdownSignal;

impl ShutdownSignal {
    pub fn new() -> Self {
        Self
    }

    /// Wait for a shutdown signal and return its name
    #[cfg(unix)]
    pub async fn wait(&self) -> std::io::Result<&'static str> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        debug!(signal = name, "received shutdown signal");
        Ok(name)
    }

    #[cfg(not(unix))]
    pub async fn wait(&self) -> std::io::Result<&'static str> {
        tokio::signal::ctrl_c().await?;
        debug!("received Ctrl-C");
        Ok("ctrl-c")
    }
}
