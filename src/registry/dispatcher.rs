//! Dispatching host keyboard events to registered shortcuts
//!
//! Every handler runs in two phases: collect the matching callbacks while
//! the registry is borrowed, then release it and invoke them in
//! registration order. Callbacks may register or unregister shortcuts;
//! such changes apply from the next event on.

use tokio::sync::mpsc;
use tracing::{info, trace};

use crate::events::{HostEvent, KeyEvent, KeyPhase};
use crate::shortcut::{is_matched, Shortcut};

use super::store::Registry;

/// Logical key reported when the Command/Meta key itself is released
const META_KEY: &str = "Meta";

/// Routes keyboard events to the shortcuts in a [`Registry`]
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Handle a key-press event
    pub fn keypress(&self, event: &KeyEvent) -> usize {
        self.fire(KeyPhase::Press, event, is_matched)
    }

    /// Handle a key-down event
    pub fn keydown(&self, event: &KeyEvent) -> usize {
        self.fire(KeyPhase::Down, event, is_matched)
    }

    /// Handle a key-up event
    ///
    /// Releasing Meta notifies every `keyup` callback regardless of its
    /// criteria: once Command is up, the platform may never deliver the
    /// key-up for the other keys of the chord.
    pub fn keyup(&self, event: &KeyEvent) -> usize {
        if event.key == META_KEY {
            self.fire(KeyPhase::Up, event, |_, _| true)
        } else {
            self.fire(KeyPhase::Up, event, is_matched)
        }
    }

    /// Handle an event of the given phase
    ///
    /// Returns the number of callbacks invoked.
    pub fn dispatch(&self, phase: KeyPhase, event: &KeyEvent) -> usize {
        match phase {
            KeyPhase::Press => self.keypress(event),
            KeyPhase::Down => self.keydown(event),
            KeyPhase::Up => self.keyup(event),
        }
    }

    /// Dispatch host events until the sending side closes
    pub async fn run(&self, mut event_rx: mpsc::Receiver<HostEvent>) {
        info!(live = self.registry.len(), "dispatcher started");

        while let Some(host_event) = event_rx.recv().await {
            self.dispatch(host_event.phase(), host_event.event());
        }

        info!("dispatcher stopped");
    }

    fn fire(
        &self,
        phase: KeyPhase,
        event: &KeyEvent,
        accept: impl Fn(&KeyEvent, &Shortcut) -> bool,
    ) -> usize {
        let callbacks = self.registry.collect(phase, event, accept);

        trace!(
            %phase,
            code = %event.code,
            key = %event.key,
            matched = callbacks.len(),
            "dispatching key event"
        );

        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }
}
