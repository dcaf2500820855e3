//! shortkey-monitor: prints every shortcut dispatch for a stream of key events
//!
//! Registers one catch-all shortcut for each event phase and feeds it key
//! events from the configured source:
//! - `stdin`: JSON lines such as `{"type":"keydown","code":"KeyC","metaKey":true}`
//! - `native`: the macOS session event tap (needs Accessibility permission)
//!
//! Each dispatched callback prints one JSON record to stdout.

use std::io::Write;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use shortkey::config::{Config, SourceKind};
use shortkey::host::{ShutdownSignal, SourceError, StdinSource};
use shortkey::{Dispatcher, HostEvent, KeyEvent, KeyPhase, Registry, Shortcut, ShortcutBinding};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "shortkey-monitor starting");

    let config = Config::load()?;
    info!(?config, "configuration loaded");

    let registry = Registry::new();
    let dispatcher = Dispatcher::new(registry.clone());
    let _monitor = ShortcutBinding::new(&registry, monitor_shortcut(&config));

    let (event_tx, event_rx) = mpsc::channel::<HostEvent>(config.channel_capacity);
    let source = start_source(config.source, event_tx);

    let shutdown = ShutdownSignal::new();

    tokio::select! {
        _ = dispatcher.run(event_rx) => {
            info!("event source exhausted");
        }

        result = shutdown.wait() => {
            match result {
                Ok(signal) => info!(signal, "shutdown signal received"),
                Err(e) => error!(?e, "failed to listen for shutdown signals"),
            }
        }
    }

    source.stop();
    info!("shortkey-monitor stopped");

    Ok(())
}

/// Catch-all shortcut reporting every phase, repeats included
fn monitor_shortcut(config: &Config) -> Shortcut {
    Shortcut::new()
        .loose(true)
        .repeat(true)
        .include_form_field(config.monitor_form_fields)
        .on_keypress(|e| report(KeyPhase::Press, e))
        .on_keydown(|e| report(KeyPhase::Down, e))
        .on_keyup(|e| report(KeyPhase::Up, e))
}

fn report(phase: KeyPhase, event: &KeyEvent) {
    let record = serde_json::json!({
        "phase": phase,
        "code": event.code,
        "key": event.key,
        "modifiers": event.held_modifiers(),
        "repeat": event.repeat,
    });

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{record}") {
        warn!(?e, "failed to write dispatch record");
    }
}

/// A running event source
///
/// Only the source's own task or thread holds a sender, so the dispatcher
/// loop ends when the source does.
enum Source {
    Stdin(tokio::task::JoinHandle<()>),
    #[cfg(target_os = "macos")]
    Native(shortkey::host::NativeListener),
}

impl Source {
    fn stop(&self) {
        match self {
            Source::Stdin(task) => task.abort(),
            #[cfg(target_os = "macos")]
            Source::Native(listener) => listener.stop(),
        }
    }
}

fn start_source(kind: SourceKind, event_tx: mpsc::Sender<HostEvent>) -> Source {
    if kind == SourceKind::Native {
        match start_native(event_tx.clone()) {
            Ok(source) => return source,
            Err(e) => {
                error!(?e, "failed to start native key listener");
                warn!("falling back to stdin events");
            }
        }
    }

    let task = tokio::spawn(async move {
        if let Err(e) = StdinSource::new(event_tx).run().await {
            error!(?e, "stdin event source failed");
        }
    });
    Source::Stdin(task)
}

#[cfg(target_os = "macos")]
fn start_native(event_tx: mpsc::Sender<HostEvent>) -> Result<Source, SourceError> {
    let listener = shortkey::host::NativeListener::new();
    listener.start(event_tx)?;
    info!("native key listener started");
    Ok(Source::Native(listener))
}

#[cfg(not(target_os = "macos"))]
fn start_native(_event_tx: mpsc::Sender<HostEvent>) -> Result<Source, SourceError> {
    Err(SourceError::Unsupported)
}
