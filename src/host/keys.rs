//! Key identity and modifier state for native key events
//!
//! Translates macOS virtual keycodes into the W3C `code` names the matcher
//! works with, derives a logical `key` for them, and tracks modifier flags.

use crate::events::{KeyEvent, KeyPhase};

/// Modifier flag masks from macOS CGEventFlags
#[cfg(target_os = "macos")]
pub mod flags {
    use core_graphics::event::CGEventFlags;

    pub const CONTROL: CGEventFlags = CGEventFlags::CGEventFlagControl;
    pub const SHIFT: CGEventFlags = CGEventFlags::CGEventFlagShift;
    /// Option/Alt key modifier flag
    pub const OPTION: CGEventFlags = CGEventFlags::CGEventFlagAlternate;
    pub const COMMAND: CGEventFlags = CGEventFlags::CGEventFlagCommand;
}

/// Device-dependent bits of the event flags telling left and right apart
pub mod device {
    pub const CONTROL_LEFT: u64 = 0x0000_0001;
    pub const SHIFT_LEFT: u64 = 0x0000_0002;
    pub const SHIFT_RIGHT: u64 = 0x0000_0004;
    pub const COMMAND_LEFT: u64 = 0x0000_0008;
    pub const COMMAND_RIGHT: u64 = 0x0000_0010;
    pub const OPTION_LEFT: u64 = 0x0000_0020;
    pub const OPTION_RIGHT: u64 = 0x0000_0040;
    pub const CONTROL_RIGHT: u64 = 0x0000_2000;

    pub const ALL: u64 = CONTROL_LEFT
        | SHIFT_LEFT
        | SHIFT_RIGHT
        | COMMAND_LEFT
        | COMMAND_RIGHT
        | OPTION_LEFT
        | OPTION_RIGHT
        | CONTROL_RIGHT;
}

/// Which modifier keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    /// Option on macOS
    pub alt: bool,
    /// Command on macOS
    pub meta: bool,
    /// Side-specific [`device`] bits, zero when the event carries none
    pub device: u64,
}

impl Modifiers {
    #[cfg(target_os = "macos")]
    pub fn from_flags(event_flags: core_graphics::event::CGEventFlags) -> Self {
        Self {
            ctrl: event_flags.contains(flags::CONTROL),
            shift: event_flags.contains(flags::SHIFT),
            alt: event_flags.contains(flags::OPTION),
            meta: event_flags.contains(flags::COMMAND),
            device: event_flags.bits() & device::ALL,
        }
    }

    /// Build an event for `code` with these modifiers held
    pub fn event_for(&self, code: &str, repeat: bool) -> KeyEvent {
        KeyEvent {
            code: code.to_string(),
            key: key_for_code(code, self.shift).to_string(),
            ctrl_key: self.ctrl,
            shift_key: self.shift,
            alt_key: self.alt,
            meta_key: self.meta,
            repeat,
            ..KeyEvent::default()
        }
    }

    /// Phase of a modifier key change, given the modifiers held afterwards
    ///
    /// Returns `None` for codes that are not modifier keys. The side-specific
    /// bit decides when present, so releasing one Shift while the other is
    /// still held reads as a release.
    pub fn transition(&self, code: &str) -> Option<KeyPhase> {
        let (combined, side) = match code {
            "ControlLeft" => (self.ctrl, device::CONTROL_LEFT),
            "ControlRight" => (self.ctrl, device::CONTROL_RIGHT),
            "ShiftLeft" => (self.shift, device::SHIFT_LEFT),
            "ShiftRight" => (self.shift, device::SHIFT_RIGHT),
            "AltLeft" => (self.alt, device::OPTION_LEFT),
            "AltRight" => (self.alt, device::OPTION_RIGHT),
            "MetaLeft" => (self.meta, device::COMMAND_LEFT),
            "MetaRight" => (self.meta, device::COMMAND_RIGHT),
            _ => return None,
        };
        // synthetic events may only carry the combined flags
        let held = if self.device == 0 {
            combined
        } else {
            self.device & side != 0
        };
        Some(if held { KeyPhase::Down } else { KeyPhase::Up })
    }
}

/// W3C `code` name for a macOS virtual keycode
pub fn code_for_keycode(keycode: u16) -> Option<&'static str> {
    let code = match keycode {
        0x00 => "KeyA",
        0x01 => "KeyS",
        0x02 => "KeyD",
        0x03 => "KeyF",
        0x04 => "KeyH",
        0x05 => "KeyG",
        0x06 => "KeyZ",
        0x07 => "KeyX",
        0x08 => "KeyC",
        0x09 => "KeyV",
        0x0B => "KeyB",
        0x0C => "KeyQ",
        0x0D => "KeyW",
        0x0E => "KeyE",
        0x0F => "KeyR",
        0x10 => "KeyY",
        0x11 => "KeyT",
        0x12 => "Digit1",
        0x13 => "Digit2",
        0x14 => "Digit3",
        0x15 => "Digit4",
        0x16 => "Digit6",
        0x17 => "Digit5",
        0x18 => "Equal",
        0x19 => "Digit9",
        0x1A => "Digit7",
        0x1B => "Minus",
        0x1C => "Digit8",
        0x1D => "Digit0",
        0x1E => "BracketRight",
        0x1F => "KeyO",
        0x20 => "KeyU",
        0x21 => "BracketLeft",
        0x22 => "KeyI",
        0x23 => "KeyP",
        0x24 => "Enter",
        0x25 => "KeyL",
        0x26 => "KeyJ",
        0x27 => "Quote",
        0x28 => "KeyK",
        0x29 => "Semicolon",
        0x2A => "Backslash",
        0x2B => "Comma",
        0x2C => "Slash",
        0x2D => "KeyN",
        0x2E => "KeyM",
        0x2F => "Period",
        0x30 => "Tab",
        0x31 => "Space",
        0x32 => "Backquote",
        0x33 => "Backspace",
        0x35 => "Escape",
        0x36 => "MetaRight",
        0x37 => "MetaLeft",
        0x38 => "ShiftLeft",
        0x39 => "CapsLock",
        0x3A => "AltLeft",
        0x3B => "ControlLeft",
        0x3C => "ShiftRight",
        0x3D => "AltRight",
        0x3E => "ControlRight",
        0x60 => "F5",
        0x61 => "F6",
        0x62 => "F7",
        0x63 => "F3",
        0x64 => "F8",
        0x65 => "F9",
        0x67 => "F11",
        0x6D => "F10",
        0x6F => "F12",
        0x73 => "Home",
        0x74 => "PageUp",
        0x75 => "Delete",
        0x76 => "F4",
        0x77 => "End",
        0x78 => "F2",
        0x79 => "PageDown",
        0x7A => "F1",
        0x7B => "ArrowLeft",
        0x7C => "ArrowRight",
        0x7D => "ArrowDown",
        0x7E => "ArrowUp",
        _ => return None,
    };
    Some(code)
}

/// Logical key value for a `code`, assuming a US layout
pub fn key_for_code(code: &str, shift: bool) -> &'static str {
    const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    const DIGITS: &str = "0123456789)!@#$%^&*(";

    if let Some(letter) = code.strip_prefix("Key") {
        if let Some(index) = LETTERS[26..].find(letter).filter(|_| letter.len() == 1) {
            let index = if shift { index + 26 } else { index };
            return &LETTERS[index..index + 1];
        }
    }
    if let Some(digit) = code.strip_prefix("Digit") {
        if let Some(index) = DIGITS[..10].find(digit).filter(|_| digit.len() == 1) {
            let index = if shift { index + 10 } else { index };
            return &DIGITS[index..index + 1];
        }
    }

    let (plain, shifted) = match code {
        "Minus" => ("-", "_"),
        "Equal" => ("=", "+"),
        "BracketLeft" => ("[", "{"),
        "BracketRight" => ("]", "}"),
        "Backslash" => ("\\", "|"),
        "Semicolon" => (";", ":"),
        "Quote" => ("'", "\""),
        "Comma" => (",", "<"),
        "Period" => (".", ">"),
        "Slash" => ("/", "?"),
        "Backquote" => ("`", "~"),
        "Space" => (" ", " "),
        "MetaLeft" | "MetaRight" => ("Meta", "Meta"),
        "ControlLeft" | "ControlRight" => ("Control", "Control"),
        "AltLeft" | "AltRight" => ("Alt", "Alt"),
        "ShiftLeft" | "ShiftRight" => ("Shift", "Shift"),
        _ => return named_key(code),
    };
    if shift {
        shifted
    } else {
        plain
    }
}

fn named_key(code: &str) -> &'static str {
    const NAMED: [&str; 26] = [
        "Enter", "Tab", "Backspace", "Escape", "Delete", "CapsLock", "Home", "End", "PageUp",
        "PageDown", "ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown", "F1", "F2", "F3", "F4",
        "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
    ];
    NAMED
        .iter()
        .find(|name| **name == code)
        .copied()
        .unwrap_or("Unidentified")
}
