//! Deciding whether a keyboard event satisfies a shortcut
//!
//! [`is_matched`] is the conjunction of four independent checks: form-field
//! suppression, key identity, modifiers and auto-repeat. None of them keep
//! state.

use crate::events::{KeyEvent, Target};

use super::definition::Shortcut;

/// `type` values that turn an `<input>` into a button-like control
const NON_TEXT_INPUT_TYPES: [&str; 4] = ["submit", "reset", "checkbox", "radio"];

/// Whether `shortcut` should fire for `event`
pub fn is_matched(event: &KeyEvent, shortcut: &Shortcut) -> bool {
    !is_form_field(&event.target, shortcut)
        && is_key_matched(event, shortcut)
        && is_composing_matched(event, shortcut)
        && is_repeat_matched(event, shortcut)
}

/// Whether `target` is used for text entry and the shortcut stays silent there
///
/// Non-element targets are never form fields.
pub fn is_form_field(target: &Target, shortcut: &Shortcut) -> bool {
    if shortcut.include_form_field {
        return false;
    }
    let Target::Element(element) = target else {
        return false;
    };

    let tag = element.tag.to_ascii_lowercase();
    let input_type = element
        .input_type
        .as_deref()
        .unwrap_or_default()
        .to_ascii_lowercase();

    tag == "select"
        || tag == "textarea"
        || (tag == "input" && !NON_TEXT_INPUT_TYPES.contains(&input_type.as_str()))
        || element.content_editable
}

/// Key identity: code matches, or key matches, or the shortcut names neither
pub fn is_key_matched(event: &KeyEvent, shortcut: &Shortcut) -> bool {
    if shortcut.code.as_deref() == Some(event.code.as_str()) {
        return true;
    }
    if shortcut.key.as_deref() == Some(event.key.as_str()) {
        return true;
    }
    shortcut.is_wildcard()
}

/// Modifier state check, strict or loose depending on the shortcut
///
/// Strict mode requires the held modifiers to be exactly the declared set,
/// with unset flags read as `false`. Shift is skipped when the shortcut
/// matches on `key`, since the character already implies it. Loose mode
/// compares only the flags the shortcut sets.
pub fn is_composing_matched(event: &KeyEvent, shortcut: &Shortcut) -> bool {
    let pairs = [
        (event.ctrl_key, shortcut.ctrl_key),
        (event.shift_key, shortcut.shift_key),
        (event.alt_key, shortcut.alt_key),
        (event.meta_key, shortcut.meta_key),
    ];

    if shortcut.loose {
        return pairs
            .iter()
            .all(|&(held, wanted)| wanted.map_or(true, |wanted| held == wanted));
    }

    let key_based = shortcut.key.as_deref().is_some_and(|key| !key.is_empty());
    pairs.iter().enumerate().all(|(index, &(held, wanted))| {
        // index 1 is shift
        (key_based && index == 1) || held == wanted.unwrap_or(false)
    })
}

/// Auto-repeated events only fire shortcuts that opt in
pub fn is_repeat_matched(event: &KeyEvent, shortcut: &Shortcut) -> bool {
    shortcut.repeat || !event.repeat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Element;

    fn meta_alt_c() -> Shortcut {
        Shortcut::new().meta(true).alt(true).code("KeyC")
    }

    #[test]
    fn test_key_matched_by_code() {
        let shortcut = Shortcut::new().code("Enter");
        assert!(is_key_matched(&KeyEvent::with_code("Enter"), &shortcut));
        assert!(!is_key_matched(&KeyEvent::with_code("Space"), &shortcut));
    }

    #[test]
    fn test_key_matched_by_key() {
        let shortcut = Shortcut::new().key("c");
        assert!(is_key_matched(&KeyEvent::with_key("c"), &shortcut));
        assert!(!is_key_matched(&KeyEvent::with_key("v"), &shortcut));
    }

    #[test]
    fn test_key_matched_either_field() {
        // code and key are alternatives, not both required
        let shortcut = Shortcut::new().code("KeyC").key("x");
        let mut event = KeyEvent::with_code("KeyC");
        event.key = "c".to_string();
        assert!(is_key_matched(&event, &shortcut));
        assert!(is_key_matched(&KeyEvent::with_key("x"), &shortcut));
        assert!(!is_key_matched(&KeyEvent::with_code("KeyV"), &shortcut));
    }

    #[test]
    fn test_wildcard_matches_any_key() {
        let shortcut = Shortcut::new();
        assert!(is_key_matched(&KeyEvent::default(), &shortcut));
        assert!(is_key_matched(&KeyEvent::with_code("KeyZ"), &shortcut));
    }

    #[test]
    fn test_strict_exact_modifiers() {
        let shortcut = meta_alt_c();
        let exact = KeyEvent::with_code("KeyC").meta(true).alt(true);
        let missing_alt = KeyEvent::with_code("KeyC").meta(true);
        let extra_shift = KeyEvent::with_code("KeyC").meta(true).alt(true).shift(true);

        assert!(is_composing_matched(&exact, &shortcut));
        assert!(!is_composing_matched(&missing_alt, &shortcut));
        assert!(!is_composing_matched(&extra_shift, &shortcut));
    }

    #[test]
    fn test_strict_unset_means_released() {
        let shortcut = Shortcut::new().code("KeyS");
        assert!(is_composing_matched(&KeyEvent::with_code("KeyS"), &shortcut));
        assert!(!is_composing_matched(&KeyEvent::with_code("KeyS").ctrl(true), &shortcut));
    }

    #[test]
    fn test_strict_key_ignores_shift() {
        let shortcut = Shortcut::new().key("?");
        assert!(is_composing_matched(&KeyEvent::with_key("?").shift(true), &shortcut));
        assert!(is_composing_matched(&KeyEvent::with_key("?"), &shortcut));
        // other modifiers are still compared
        assert!(!is_composing_matched(&KeyEvent::with_key("?").ctrl(true), &shortcut));
    }

    #[test]
    fn test_strict_empty_key_still_checks_shift() {
        let shortcut = Shortcut::new().key("");
        assert!(!is_composing_matched(&KeyEvent::default().shift(true), &shortcut));
    }

    #[test]
    fn test_loose_tolerates_extra_modifiers() {
        let shortcut = Shortcut::new().loose(true).meta(true).code("KeyC");
        assert!(is_composing_matched(&KeyEvent::with_code("KeyC").meta(true), &shortcut));
        assert!(is_composing_matched(
            &KeyEvent::with_code("KeyC").meta(true).alt(true),
            &shortcut
        ));
        assert!(is_composing_matched(
            &KeyEvent::with_code("KeyC").meta(true).alt(true).shift(true),
            &shortcut
        ));
        assert!(!is_composing_matched(&KeyEvent::with_code("KeyC"), &shortcut));
    }

    #[test]
    fn test_loose_explicit_false() {
        let shortcut = Shortcut::new().loose(true).meta(true).shift(false).code("KeyC");
        assert!(is_composing_matched(
            &KeyEvent::with_code("KeyC").meta(true).alt(true),
            &shortcut
        ));
        assert!(!is_composing_matched(
            &KeyEvent::with_code("KeyC").meta(true).alt(true).shift(true),
            &shortcut
        ));
    }

    #[test]
    fn test_loose_without_modifiers() {
        let shortcut = Shortcut::new().loose(true);
        let event = KeyEvent::default().ctrl(true).shift(true).alt(true).meta(true);
        assert!(is_composing_matched(&event, &shortcut));
    }

    #[test]
    fn test_repeat() {
        let held = KeyEvent::with_code("ArrowDown").repeating(true);
        assert!(!is_repeat_matched(&held, &Shortcut::new()));
        assert!(is_repeat_matched(&held, &Shortcut::new().repeat(true)));
        assert!(is_repeat_matched(&KeyEvent::with_code("ArrowDown"), &Shortcut::new()));
    }

    #[test]
    fn test_form_fields() {
        let shortcut = Shortcut::new();
        let field = |element: Element| is_form_field(&element.into(), &shortcut);

        assert!(field(Element::new("textarea")));
        assert!(field(Element::new("SELECT")));
        assert!(field(Element::new("input")));
        assert!(field(Element::input("text")));
        assert!(field(Element::input("password")));
        assert!(field(Element::new("div").editable()));

        assert!(!field(Element::input("checkbox")));
        assert!(!field(Element::input("RADIO")));
        assert!(!field(Element::input("submit")));
        assert!(!field(Element::input("reset")));
        assert!(!field(Element::new("button")));
        assert!(!is_form_field(&Target::Document, &shortcut));
    }

    #[test]
    fn test_include_form_field() {
        let shortcut = Shortcut::new().include_form_field(true);
        assert!(!is_form_field(&Element::new("textarea").into(), &shortcut));
    }

    #[test]
    fn test_is_matched_requires_all() {
        let shortcut = meta_alt_c();
        let event = KeyEvent::with_code("KeyC").meta(true).alt(true);
        assert!(is_matched(&event, &shortcut));
        assert!(!is_matched(&event.clone().repeating(true), &shortcut));
        assert!(!is_matched(
            &event.clone().targeting(Element::new("textarea").into()),
            &shortcut
        ));
        assert!(!is_matched(&KeyEvent::with_code("KeyV").meta(true).alt(true), &shortcut));
    }
}
