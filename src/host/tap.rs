//! What the event tap callback queues for its run loop thread
//!
//! The callback itself only copies fields out of the native event. Turning
//! them into [`HostEvent`]s and reacting to the tap being switched off
//! happens here, between run loop slices.

use std::sync::mpsc::Receiver;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::events::{HostEvent, KeyPhase};

use super::error::SourceError;
use super::keys::{code_for_keycode, Modifiers};

/// Kind of a tapped keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawKind {
    KeyDown,
    KeyUp,
    FlagsChanged,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RawKey {
    pub kind: RawKind,
    pub keycode: u16,
    pub autorepeat: bool,
    pub modifiers: Modifiers,
}

#[derive(Debug)]
pub(crate) enum TapMessage {
    Key(RawKey),
    /// The system switched the tap off after a slow callback or user input
    Disabled,
}

/// Translate one tapped event into the host event it stands for
pub(crate) fn translate(raw: &RawKey) -> Option<HostEvent> {
    let Some(code) = code_for_keycode(raw.keycode) else {
        debug!(keycode = raw.keycode, "unmapped keycode");
        return None;
    };

    let phase = match raw.kind {
        RawKind::KeyDown => KeyPhase::Down,
        RawKind::KeyUp => KeyPhase::Up,
        // the flags after the change tell whether the modifier went down or up
        RawKind::FlagsChanged => raw.modifiers.transition(code)?,
    };

    Some(HostEvent::new(phase, raw.modifiers.event_for(code, raw.autorepeat)))
}

/// Forward everything the tap callback queued so far
///
/// `reenable` runs for every [`TapMessage::Disabled`]. Returns the number of
/// events sent, or an error once the dispatcher side has gone away. Blocks
/// while the channel is full, so call it off the async runtime.
pub(crate) fn relay(
    tap_rx: &Receiver<TapMessage>,
    event_tx: &mpsc::Sender<HostEvent>,
    mut reenable: impl FnMut(),
) -> Result<usize, SourceError> {
    let mut sent = 0;

    while let Ok(message) = tap_rx.try_recv() {
        let raw = match message {
            TapMessage::Key(raw) => raw,
            TapMessage::Disabled => {
                reenable();
                warn!("event tap was disabled by the system, re-enabled");
                continue;
            }
        };

        let Some(host_event) = translate(&raw) else {
            continue;
        };
        if event_tx.blocking_send(host_event).is_err() {
            warn!("failed to send key event - channel closed?");
            return Err(SourceError::ChannelSend);
        }
        sent += 1;
    }

    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: RawKind, keycode: u16, modifiers: Modifiers) -> RawKey {
        RawKey {
            kind,
            keycode,
            autorepeat: false,
            modifiers,
        }
    }

    #[test]
    fn test_translate_command_release() {
        let host_event = translate(&raw(RawKind::FlagsChanged, 0x37, Modifiers::default())).unwrap();
        assert_eq!(host_event.phase(), KeyPhase::Up);
        assert_eq!(host_event.event().key, "Meta");
    }

    #[test]
    fn test_translate_key_down() {
        let modifiers = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        let mut key = raw(RawKind::KeyDown, 0x08, modifiers);
        key.autorepeat = true;

        let host_event = translate(&key).unwrap();
        assert_eq!(host_event.phase(), KeyPhase::Down);
        assert_eq!(host_event.event().code, "KeyC");
        assert!(host_event.event().meta_key);
        assert!(host_event.event().repeat);
    }

    #[test]
    fn test_translate_skips_unknown() {
        assert!(translate(&raw(RawKind::KeyDown, 0xFF, Modifiers::default())).is_none());
        // a letter key never shows up as a flags change
        assert!(translate(&raw(RawKind::FlagsChanged, 0x08, Modifiers::default())).is_none());
    }

    #[test]
    fn test_relay_reenables_disabled_tap() {
        let (tap_tx, tap_rx) = std::sync::mpsc::channel();
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let mut reenabled = 0;

        tap_tx.send(TapMessage::Key(raw(RawKind::KeyDown, 0x00, Modifiers::default()))).unwrap();
        tap_tx.send(TapMessage::Disabled).unwrap();
        tap_tx.send(TapMessage::Key(raw(RawKind::KeyUp, 0x00, Modifiers::default()))).unwrap();

        let sent = relay(&tap_rx, &event_tx, || reenabled += 1).unwrap();
        assert_eq!(sent, 2);
        assert_eq!(reenabled, 1);

        // events keep flowing after the re-enable
        assert_eq!(event_rx.try_recv().unwrap().phase(), KeyPhase::Down);
        assert_eq!(event_rx.try_recv().unwrap().phase(), KeyPhase::Up);
    }

    #[test]
    fn test_relay_fails_when_dispatcher_is_gone() {
        let (tap_tx, tap_rx) = std::sync::mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel(8);
        drop(event_rx);

        tap_tx.send(TapMessage::Key(raw(RawKind::KeyDown, 0x24, Modifiers::default()))).unwrap();
        assert!(matches!(
            relay(&tap_rx, &event_tx, || {}),
            Err(SourceError::ChannelSend)
        ));
    }
}
