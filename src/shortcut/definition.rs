//! Shortcut definitions
//!
//! A [`Shortcut`] describes one registered shortcut intent: which key to
//! listen for, which modifiers must be held, and which callbacks to run for
//! each event phase.

use std::fmt;
use std::rc::Rc;

use crate::events::{KeyEvent, KeyPhase};

/// Callback invoked with the event that triggered it
pub type Callback = Rc<dyn Fn(&KeyEvent)>;

/// One shortcut intent
///
/// Every field is optional. A shortcut with neither `code` nor `key` matches
/// any key. Modifier flags are tri-state: `Some(true)`, `Some(false)` or unset.
#[derive(Clone, Default)]
pub struct Shortcut {
    /// Physical key identifier to match against [`KeyEvent::code`]
    pub code: Option<String>,
    /// Logical key value to match against [`KeyEvent::key`]
    pub key: Option<String>,
    pub ctrl_key: Option<bool>,
    pub shift_key: Option<bool>,
    pub alt_key: Option<bool>,
    pub meta_key: Option<bool>,
    /// Also fire on auto-repeated key-downs
    pub repeat: bool,
    /// Only compare the modifiers that are set, tolerating extra held modifiers
    pub loose: bool,
    /// Keep firing while a text-entry element has focus
    pub include_form_field: bool,
    pub keypress: Option<Callback>,
    pub keydown: Option<Callback>,
    pub keyup: Option<Callback>,
}

impl Shortcut {
    /// An empty shortcut: any key, strict modifiers, no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn ctrl(mut self, held: bool) -> Self {
        self.ctrl_key = Some(held);
        self
    }

    pub fn shift(mut self, held: bool) -> Self {
        self.shift_key = Some(held);
        self
    }

    pub fn alt(mut self, held: bool) -> Self {
        self.alt_key = Some(held);
        self
    }

    pub fn meta(mut self, held: bool) -> Self {
        self.meta_key = Some(held);
        self
    }

    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    pub fn include_form_field(mut self, include: bool) -> Self {
        self.include_form_field = include;
        self
    }

    pub fn on_keypress(mut self, callback: impl Fn(&KeyEvent) + 'static) -> Self {
        self.keypress = Some(Rc::new(callback));
        self
    }

    pub fn on_keydown(mut self, callback: impl Fn(&KeyEvent) + 'static) -> Self {
        self.keydown = Some(Rc::new(callback));
        self
    }

    pub fn on_keyup(mut self, callback: impl Fn(&KeyEvent) + 'static) -> Self {
        self.keyup = Some(Rc::new(callback));
        self
    }

    /// True when neither `code` nor `key` is set
    pub fn is_wildcard(&self) -> bool {
        self.code.is_none() && self.key.is_none()
    }

    /// The callback registered for `phase`, if any
    pub fn callback(&self, phase: KeyPhase) -> Option<&Callback> {
        match phase {
            KeyPhase::Press => self.keypress.as_ref(),
            KeyPhase::Down => self.keydown.as_ref(),
            KeyPhase::Up => self.keyup.as_ref(),
        }
    }
}

fn same_callback(a: &Option<Callback>, b: &Option<Callback>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Shallow equality: every field equal, callbacks compared by identity
impl PartialEq for Shortcut {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.key == other.key
            && self.ctrl_key == other.ctrl_key
            && self.shift_key == other.shift_key
            && self.alt_key == other.alt_key
            && self.meta_key == other.meta_key
            && self.repeat == other.repeat
            && self.loose == other.loose
            && self.include_form_field == other.include_form_field
            && same_callback(&self.keypress, &other.keypress)
            && same_callback(&self.keydown, &other.keydown)
            && same_callback(&self.keyup, &other.keyup)
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut")
            .field("code", &self.code)
            .field("key", &self.key)
            .field("ctrl_key", &self.ctrl_key)
            .field("shift_key", &self.shift_key)
            .field("alt_key", &self.alt_key)
            .field("meta_key", &self.meta_key)
            .field("repeat", &self.repeat)
            .field("loose", &self.loose)
            .field("include_form_field", &self.include_form_field)
            .field("keypress", &self.keypress.is_some())
            .field("keydown", &self.keydown.is_some())
            .field("keyup", &self.keyup.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard() {
        assert!(Shortcut::new().is_wildcard());
        assert!(Shortcut::new().meta(true).is_wildcard());
        assert!(!Shortcut::new().code("KeyC").is_wildcard());
        assert!(!Shortcut::new().key("?").is_wildcard());
    }

    #[test]
    fn test_callback_by_phase() {
        let shortcut = Shortcut::new().on_keydown(|_| {});
        assert!(shortcut.callback(KeyPhase::Down).is_some());
        assert!(shortcut.callback(KeyPhase::Press).is_none());
        assert!(shortcut.callback(KeyPhase::Up).is_none());
    }

    #[test]
    fn test_shallow_equality() {
        let original = Shortcut::new().meta(true).code("KeyC").on_keydown(|_| {});

        // A clone shares the callback, so it is the same intent
        assert_eq!(original, original.clone());

        // An identical-looking closure is a different callback
        let rebuilt = Shortcut::new().meta(true).code("KeyC").on_keydown(|_| {});
        assert_ne!(original, rebuilt);

        // Changing any field breaks equality
        assert_ne!(original, original.clone().alt(true));
        assert_ne!(original, original.clone().loose(true));
    }
}
