//! Host events read as JSON lines
//!
//! Each non-blank line holds one [`HostEvent`], e.g.
//! `{"type":"keydown","code":"KeyC","metaKey":true}`.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::events::HostEvent;

use super::error::SourceError;

/// Reads host events from standard input
pub struct StdinSource {
    event_tx: mpsc::Sender<HostEvent>,
}

impl StdinSource {
    pub fn new(event_tx: mpsc::Sender<HostEvent>) -> Self {
        Self { event_tx }
    }

    /// Forward events until stdin reaches EOF
    pub async fn run(self) -> Result<usize, SourceError> {
        info!("reading key events from stdin");
        forward(BufReader::new(tokio::io::stdin()), &self.event_tx).await
    }
}

/// Decode JSON-line events from `reader` and send them to `event_tx`
///
/// Malformed lines are logged and skipped. Returns the number of events sent.
pub async fn forward<R>(reader: R, event_tx: &mpsc::Sender<HostEvent>) -> Result<usize, SourceError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0;
    let mut sent = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: HostEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(source) => {
                let e = SourceError::Decode {
                    line: line_no,
                    source,
                };
                warn!(%e, "skipping host event");
                continue;
            }
        };

        debug!(%event, "host event received");
        event_tx
            .send(event)
            .await
            .map_err(|_| SourceError::ChannelSend)?;
        sent += 1;
    }

    info!(sent, "event input closed");
    Ok(sent)
}
