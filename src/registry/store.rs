//! The shared set of live shortcuts

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::events::{KeyEvent, KeyPhase};
use crate::shortcut::{Callback, Shortcut};

/// Opaque token identifying one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry of live shortcuts
///
/// Cloning yields another reference to the same registry, so one instance can
/// be created at startup and handed to every component that registers
/// shortcuts. Entries enumerate in registration order.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    entries: Vec<(Handle, Rc<Shortcut>)>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shortcut and return the handle that removes it again
    ///
    /// Shortcuts are not validated. Registering the same definition twice
    /// yields two independent members.
    pub fn register(&self, shortcut: Shortcut) -> Handle {
        let mut inner = self.inner.borrow_mut();
        let handle = Handle(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((handle, Rc::new(shortcut)));
        debug!(%handle, live = inner.entries.len(), "shortcut registered");
        handle
    }

    /// Remove a registration
    ///
    /// Returns `false` when the handle is not (or no longer) registered.
    pub fn unregister(&self, handle: Handle) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(index) = inner.entries.iter().position(|(h, _)| *h == handle) else {
            return false;
        };
        inner.entries.remove(index);
        debug!(%handle, live = inner.entries.len(), "shortcut unregistered");
        true
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.inner.borrow().entries.iter().any(|(h, _)| *h == handle)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Collect the `phase` callbacks of every member that accepts `event`
    ///
    /// The registry borrow ends before this returns, so callers can invoke the
    /// result while callbacks register or unregister shortcuts.
    pub(crate) fn collect(
        &self,
        phase: KeyPhase,
        event: &KeyEvent,
        accept: impl Fn(&KeyEvent, &Shortcut) -> bool,
    ) -> Vec<Callback> {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter_map(|(_, shortcut)| {
                let callback = shortcut.callback(phase)?;
                accept(event, &**shortcut).then(|| Rc::clone(callback))
            })
            .collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Registry")
            .field("live", &inner.entries.len())
            .field("next_id", &inner.next_id)
            .finish()
    }
}
