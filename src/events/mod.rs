//! Keyboard event snapshots delivered by the host
//!
//! A [`KeyEvent`] is a read-only snapshot of one physical key transition:
//! key identity, modifier state, the auto-repeat flag and the focused
//! target. [`HostEvent`] pairs a snapshot with the phase it was observed in.

use serde::{Deserialize, Serialize};

/// One physical keyboard event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyEvent {
    /// Physical key identifier, e.g. `KeyC` or `Enter`
    pub code: String,
    /// Logical key value, e.g. `c`, `?` or `Meta`
    pub key: String,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
    /// Set on auto-repeated key-downs while a key is held
    pub repeat: bool,
    /// What had focus when the event fired
    pub target: Target,
}

impl KeyEvent {
    /// Create an event for the given physical code with no modifiers held
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Create an event for the given logical key with no modifiers held
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self, held: bool) -> Self {
        self.ctrl_key = held;
        self
    }

    pub fn shift(mut self, held: bool) -> Self {
        self.shift_key = held;
        self
    }

    pub fn alt(mut self, held: bool) -> Self {
        self.alt_key = held;
        self
    }

    pub fn meta(mut self, held: bool) -> Self {
        self.meta_key = held;
        self
    }

    pub fn repeating(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn targeting(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Names of the modifiers held during this event, in ctrl/shift/alt/meta order
    pub fn held_modifiers(&self) -> Vec<&'static str> {
        [
            (self.ctrl_key, "ctrl"),
            (self.shift_key, "shift"),
            (self.alt_key, "alt"),
            (self.meta_key, "meta"),
        ]
        .into_iter()
        .filter_map(|(held, name)| held.then_some(name))
        .collect()
    }
}

/// The node that received a keyboard event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    /// The page root or any other non-element node
    #[default]
    Document,
    /// An element in the page tree
    Element(Element),
}

/// The parts of an element that decide whether it is used for text entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Element {
    /// Node name, compared case-insensitively
    pub tag: String,
    /// Value of the `type` attribute, if present
    pub input_type: Option<String>,
    /// Whether the element's content is directly user-editable
    pub content_editable: bool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// An `<input>` with the given `type` attribute
    pub fn input(input_type: impl Into<String>) -> Self {
        Self {
            tag: "input".to_string(),
            input_type: Some(input_type.into()),
            content_editable: false,
        }
    }

    pub fn editable(mut self) -> Self {
        self.content_editable = true;
        self
    }
}

impl From<Element> for Target {
    fn from(element: Element) -> Self {
        Target::Element(element)
    }
}

/// The three physical event kinds the dispatcher listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPhase {
    #[serde(rename = "keypress")]
    Press,
    #[serde(rename = "keydown")]
    Down,
    #[serde(rename = "keyup")]
    Up,
}

impl std::fmt::Display for KeyPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyPhase::Press => write!(f, "keypress"),
            KeyPhase::Down => write!(f, "keydown"),
            KeyPhase::Up => write!(f, "keyup"),
        }
    }
}

/// A keyboard event as delivered by a host source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    #[serde(rename = "keypress")]
    KeyPress(KeyEvent),
    #[serde(rename = "keydown")]
    KeyDown(KeyEvent),
    #[serde(rename = "keyup")]
    KeyUp(KeyEvent),
}

impl HostEvent {
    pub fn new(phase: KeyPhase, event: KeyEvent) -> Self {
        match phase {
            KeyPhase::Press => HostEvent::KeyPress(event),
            KeyPhase::Down => HostEvent::KeyDown(event),
            KeyPhase::Up => HostEvent::KeyUp(event),
        }
    }

    pub fn phase(&self) -> KeyPhase {
        match self {
            HostEvent::KeyPress(_) => KeyPhase::Press,
            HostEvent::KeyDown(_) => KeyPhase::Down,
            HostEvent::KeyUp(_) => KeyPhase::Up,
        }
    }

    pub fn event(&self) -> &KeyEvent {
        match self {
            HostEvent::KeyPress(event) | HostEvent::KeyDown(event) | HostEvent::KeyUp(event) => {
                event
            }
        }
    }
}

impl std::fmt::Display for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let event = self.event();
        let mut chord = event.held_modifiers().join("+");
        if !chord.is_empty() {
            chord.push('+');
        }
        write!(f, "{} {}{} ({:?})", self.phase(), chord, event.code, event.key)?;
        if event.repeat {
            write!(f, " [repeat]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_event_deserialization() {
        let json = r#"{"type":"keydown","code":"KeyC","key":"c","metaKey":true,"altKey":true}"#;
        let event: HostEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.phase(), KeyPhase::Down);
        assert_eq!(event.event().code, "KeyC");
        assert!(event.event().meta_key);
        assert!(event.event().alt_key);
        assert!(!event.event().shift_key);
        assert_eq!(event.event().target, Target::Document);
    }

    #[test]
    fn test_element_target_deserialization() {
        let json = r#"{"type":"keyup","key":"a","target":{"type":"element","tag":"INPUT","inputType":"checkbox"}}"#;
        let event: HostEvent = serde_json::from_str(json).unwrap();
        match &event.event().target {
            Target::Element(element) => {
                assert_eq!(element.tag, "INPUT");
                assert_eq!(element.input_type.as_deref(), Some("checkbox"));
                assert!(!element.content_editable);
            }
            Target::Document => panic!("expected an element target"),
        }
    }

    #[test]
    fn test_host_event_serialization() {
        let event = HostEvent::KeyPress(KeyEvent::with_key("?").shift(true));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"keypress""#));
        assert!(json.contains(r#""shiftKey":true"#));
    }

    #[test]
    fn test_display() {
        let event = HostEvent::KeyDown(KeyEvent::with_code("KeyC").meta(true).repeating(true));
        assert_eq!(event.to_string(), r#"keydown meta+KeyC ("") [repeat]"#);
    }
}
