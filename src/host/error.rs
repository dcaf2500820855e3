/// Errors that can occur while delivering host key events
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("event source is already running")]
    AlreadyRunning,

    #[error("native key events are not supported on this platform")]
    Unsupported,

    #[error("failed to create event tap - check Accessibility permissions")]
    EventTapCreation,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),

    #[error("failed to send event to channel")]
    ChannelSend,

    #[error("failed to read events: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed event on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
