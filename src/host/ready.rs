//! Startup handshake for source threads
//!
//! The spawning side blocks until the thread reports that it got going, so a
//! source that cannot start fails its `start` call instead of leaving an
//! open channel that never delivers anything.

use std::sync::mpsc::{sync_channel, SyncSender};
use std::thread;

use tracing::error;

use super::error::SourceError;

/// Lets a source thread report that startup finished
pub(crate) struct Ready {
    tx: Option<SyncSender<Result<(), SourceError>>>,
}

impl Ready {
    /// Release the spawning thread with success
    pub(crate) fn notify(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Ok(()));
        }
    }
}

/// Run `body` on a named thread and wait until it calls [`Ready::notify`]
///
/// If `body` returns before notifying, its result becomes the result of this
/// call, and everything it captured has been dropped by then. Errors after
/// readiness are only logged.
pub(crate) fn spawn_with_ready<F>(name: &str, body: F) -> Result<(), SourceError>
where
    F: FnOnce(&mut Ready) -> Result<(), SourceError> + Send + 'static,
{
    let (ready_tx, ready_rx) = sync_channel(1);
    let thread_name = name.to_string();

    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            let mut ready = Ready { tx: Some(ready_tx) };
            let result = body(&mut ready);

            match (ready.tx.take(), result) {
                (Some(tx), result) => {
                    let _ = tx.send(result);
                }
                (None, Err(e)) => error!(?e, thread = %thread_name, "source thread failed"),
                (None, Ok(())) => {}
            }
        })
        .map_err(|e| SourceError::ThreadSpawn(e.to_string()))?;

    // a closed channel means the thread panicked before reporting
    ready_rx
        .recv()
        .unwrap_or_else(|_| Err(SourceError::ThreadSpawn(format!("{name} exited during startup"))))
}
