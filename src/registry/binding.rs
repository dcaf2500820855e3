//! Component-lifecycle binding for shortcuts
//!
//! A [`ShortcutBinding`] ties one shortcut registration to the lifetime of
//! the value that owns it. Creating it registers the shortcut, updating it
//! re-registers only when the definition actually changed, and dropping it
//! unregisters.

use tracing::debug;

use crate::shortcut::Shortcut;

use super::store::{Handle, Registry};

/// Owns the registration of one shortcut in a [`Registry`]
pub struct ShortcutBinding {
    registry: Registry,
    current: Shortcut,
    handle: Handle,
}

impl ShortcutBinding {
    /// Register `shortcut` and keep it registered until the binding is dropped
    pub fn new(registry: &Registry, shortcut: Shortcut) -> Self {
        let handle = registry.register(shortcut.clone());
        Self {
            registry: registry.clone(),
            current: shortcut,
            handle,
        }
    }

    /// Replace the bound shortcut
    ///
    /// A definition equal to the current one (same fields, same callbacks)
    /// keeps the existing registration. Anything else swaps the old
    /// registration for a new one. Returns whether a swap happened.
    pub fn update(&mut self, shortcut: Shortcut) -> bool {
        if shortcut == self.current {
            return false;
        }

        let previous = self.handle;
        self.registry.unregister(previous);
        self.handle = self.registry.register(shortcut.clone());
        self.current = shortcut;

        debug!(%previous, current = %self.handle, "shortcut binding updated");
        true
    }

    /// Handle of the live registration
    pub fn handle(&self) -> Handle {
        self.handle
    }
}

impl Drop for ShortcutBinding {
    fn drop(&mut self) {
        self.registry.unregister(self.handle);
    }
}

impl std::fmt::Debug for ShortcutBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutBinding")
            .field("handle", &self.handle)
            .field("shortcut", &self.current)
            .finish()
    }
}
