//! Native key event source using macOS CGEventTap
//!
//! Monitors session-wide key-down, key-up and modifier changes and forwards
//! them as [`HostEvent`]s. Runs on a dedicated thread with its own CFRunLoop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use core_foundation::runloop::{kCFRunLoopCommonModes, kCFRunLoopDefaultMode, CFRunLoop};
use core_graphics::event::{
    CGEvent, CGEventTap, CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement, CGEventType,
    EventField,
};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::events::HostEvent;

use super::error::SourceError;
use super::keys::Modifiers;
use super::ready::{spawn_with_ready, Ready};
use super::tap::{relay, RawKey, RawKind, TapMessage};

/// Session-wide key listener feeding the dispatcher
#[derive(Debug, Default)]
pub struct NativeListener {
    running: Arc<AtomicBool>,
}

impl NativeListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the listener
    ///
    /// Spawns a dedicated thread running a CFRunLoop that receives the
    /// CGEventTap callbacks, until `stop()` is called or the program exits.
    /// Returns once the tap is installed, or with the error that prevented
    /// it; `event_tx` is owned by the thread and dropped when it ends.
    pub fn start(&self, event_tx: mpsc::Sender<HostEvent>) -> Result<(), SourceError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(SourceError::AlreadyRunning);
        }

        let running = Arc::clone(&self.running);
        let started = spawn_with_ready("key-listener", move |ready| {
            info!("key listener thread started");
            let result = run_event_loop(event_tx, &running, ready);
            running.store(false, Ordering::SeqCst);
            info!("key listener thread stopped");
            result
        });

        if started.is_err() {
            self.running.store(false, Ordering::SeqCst);
        }
        started
    }

    /// Ask the listener thread to exit after its current run loop slice
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Run the CFRunLoop with the event tap
fn run_event_loop(
    event_tx: mpsc::Sender<HostEvent>,
    running: &AtomicBool,
    ready: &mut Ready,
) -> Result<(), SourceError> {
    let (callback_tx, callback_rx) = std::sync::mpsc::channel::<TapMessage>();

    // CGEventTap callback - must be fast and non-blocking
    let callback = move |_proxy: core_graphics::event::CGEventTapProxy,
                         event_type: CGEventType,
                         event: &CGEvent|
          -> Option<CGEvent> {
        let kind = match event_type {
            CGEventType::KeyDown => Some(RawKind::KeyDown),
            CGEventType::KeyUp => Some(RawKind::KeyUp),
            CGEventType::FlagsChanged => Some(RawKind::FlagsChanged),
            CGEventType::TapDisabledByTimeout | CGEventType::TapDisabledByUserInput => {
                let _ = callback_tx.send(TapMessage::Disabled);
                None
            }
            _ => None,
        };

        if let Some(kind) = kind {
            let raw = RawKey {
                kind,
                keycode: event.get_integer_value_field(EventField::KEYBOARD_EVENT_KEYCODE) as u16,
                autorepeat: event.get_integer_value_field(EventField::KEYBOARD_EVENT_AUTOREPEAT)
                    != 0,
                modifiers: Modifiers::from_flags(event.get_flags()),
            };
            let _ = callback_tx.send(TapMessage::Key(raw));
        }
        Some(event.clone())
    };

    let tap = CGEventTap::new(
        CGEventTapLocation::Session,
        CGEventTapPlacement::HeadInsertEventTap,
        CGEventTapOptions::ListenOnly,
        vec![
            CGEventType::KeyDown,
            CGEventType::KeyUp,
            CGEventType::FlagsChanged,
        ],
        callback,
    )
    .map_err(|_| {
        error!("failed to create event tap - is Accessibility permission granted?");
        SourceError::EventTapCreation
    })?;

    tap.enable();

    let run_loop_source = tap
        .mach_port
        .create_runloop_source(0)
        .map_err(|_| SourceError::EventTapCreation)?;
    let run_loop = CFRunLoop::get_current();

    unsafe {
        run_loop.add_source(&run_loop_source, kCFRunLoopCommonModes);
    }

    info!("event tap created and enabled");
    ready.notify();

    while running.load(Ordering::SeqCst) {
        CFRunLoop::run_in_mode(
            unsafe { kCFRunLoopDefaultMode },
            std::time::Duration::from_millis(100),
            true,
        );

        // not in an async context, so relay blocks until the dispatcher has room
        relay(&callback_rx, &event_tx, || tap.enable())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_creation() {
        let listener = NativeListener::new();
        assert!(!listener.is_running());
    }

    #[test]
    fn test_stop_before_start() {
        let listener = NativeListener::new();
        listener.stop();
        assert!(!listener.is_running());
    }
}
