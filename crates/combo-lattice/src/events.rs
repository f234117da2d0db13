//! Input events delivered to combo boxes.
//!
//! An adapter translates platform input (DOM events, winit, a test script)
//! into [`InputEvent`]s and hands them to
//! [`ComboBoxBehavior::dispatch`](crate::ComboBoxBehavior::dispatch).
//! Key events carry both a logical [`Key`] and its legacy numeric key code;
//! the printable-key filter works on the latter.

use combo_lattice_core::NodeId;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Numpad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadMultiply, NumpadAdd, NumpadSeparator, NumpadSubtract,
    NumpadDecimal, NumpadDivide,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Escape,

    // Whitespace
    Space,

    // Modifiers
    Shift, Control, Alt, Meta, CapsLock,

    // Punctuation and symbols
    Semicolon, Equal, Comma, Minus, Period, Slash, Backquote,
    BracketLeft, Backslash, BracketRight, Quote,

    /// Any key without a dedicated variant, by legacy key code.
    Other(u32),
}

#[rustfmt::skip]
const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

#[rustfmt::skip]
const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

#[rustfmt::skip]
const NUMPAD: [Key; 16] = [
    Key::Numpad0, Key::Numpad1, Key::Numpad2, Key::Numpad3, Key::Numpad4,
    Key::Numpad5, Key::Numpad6, Key::Numpad7, Key::Numpad8, Key::Numpad9,
    Key::NumpadMultiply, Key::NumpadAdd, Key::NumpadSeparator,
    Key::NumpadSubtract, Key::NumpadDecimal, Key::NumpadDivide,
];

#[rustfmt::skip]
const FUNCTION: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

#[rustfmt::skip]
const OTHERS: &[(Key, u32)] = &[
    (Key::Backspace, 8), (Key::Tab, 9), (Key::Enter, 13),
    (Key::Shift, 16), (Key::Control, 17), (Key::Alt, 18), (Key::CapsLock, 20),
    (Key::Escape, 27), (Key::Space, 32),
    (Key::PageUp, 33), (Key::PageDown, 34), (Key::End, 35), (Key::Home, 36),
    (Key::ArrowLeft, 37), (Key::ArrowUp, 38), (Key::ArrowRight, 39), (Key::ArrowDown, 40),
    (Key::Insert, 45), (Key::Delete, 46), (Key::Meta, 91),
    (Key::Semicolon, 186), (Key::Equal, 187), (Key::Comma, 188), (Key::Minus, 189),
    (Key::Period, 190), (Key::Slash, 191), (Key::Backquote, 192),
    (Key::BracketLeft, 219), (Key::Backslash, 220), (Key::BracketRight, 221),
    (Key::Quote, 222),
];

fn position(table: &[Key], key: Key) -> Option<u32> {
    table.iter().position(|&k| k == key).map(|i| i as u32)
}

impl Key {
    /// The legacy `keyCode` reported for this key.
    pub fn key_code(self) -> u32 {
        if let Key::Other(code) = self {
            return code;
        }
        if let Some(i) = position(&LETTERS, self) {
            return 65 + i;
        }
        if let Some(i) = position(&DIGITS, self) {
            return 48 + i;
        }
        if let Some(i) = position(&NUMPAD, self) {
            return 96 + i;
        }
        if let Some(i) = position(&FUNCTION, self) {
            return 112 + i;
        }
        OTHERS
            .iter()
            .find(|(k, _)| *k == self)
            .map(|&(_, code)| code)
            .unwrap_or(0)
    }

    /// Map a legacy `keyCode` back to a key.
    pub fn from_key_code(code: u32) -> Self {
        let index = |base: u32| (code - base) as usize;
        match code {
            65..=90 => LETTERS[index(65)],
            48..=57 => DIGITS[index(48)],
            96..=111 => NUMPAD[index(96)],
            112..=123 => FUNCTION[index(112)],
            _ => OTHERS
                .iter()
                .find(|&&(_, c)| c == code)
                .map(|&(k, _)| k)
                .unwrap_or(Key::Other(code)),
        }
    }

    /// The key that types `c` on a US layout, ignoring shift state.
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        match upper {
            'A'..='Z' => Some(LETTERS[(upper as u8 - b'A') as usize]),
            '0'..='9' => Some(DIGITS[(upper as u8 - b'0') as usize]),
            ' ' => Some(Key::Space),
            ';' | ':' => Some(Key::Semicolon),
            '=' | '+' => Some(Key::Equal),
            ',' | '<' => Some(Key::Comma),
            '-' | '_' => Some(Key::Minus),
            '.' | '>' => Some(Key::Period),
            '/' | '?' => Some(Key::Slash),
            '`' | '~' => Some(Key::Backquote),
            '[' | '{' => Some(Key::BracketLeft),
            '\\' | '|' => Some(Key::Backslash),
            ']' | '}' => Some(Key::BracketRight),
            '\'' | '"' => Some(Key::Quote),
            _ => None,
        }
    }
}

/// A key plus the exact modifier set it must be pressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key.
    pub key: Key,
    /// Modifiers that must be held, and no others.
    pub modifiers: KeyboardModifiers,
}

impl KeyChord {
    /// A chord with no modifiers.
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A chord with explicit modifiers.
    pub const fn with(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Kinds of input events the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A pointer click (press and release on the same target).
    Click,
    /// A key was pressed.
    KeyDown,
    /// A key was released.
    KeyUp,
}

/// An input event addressed to a node of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    kind: EventKind,
    target: NodeId,
    key: Option<Key>,
    modifiers: KeyboardModifiers,
    default_prevented: bool,
}

impl InputEvent {
    /// A click on `target`.
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            key: None,
            modifiers: KeyboardModifiers::NONE,
            default_prevented: false,
        }
    }

    /// A key press on `target`.
    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            key: Some(key),
            modifiers: KeyboardModifiers::NONE,
            default_prevented: false,
        }
    }

    /// A key release on `target`.
    pub fn key_up(target: NodeId, key: Key) -> Self {
        Self {
            kind: EventKind::KeyUp,
            ..Self::key_down(target, key)
        }
    }

    /// Set the modifiers held during the event.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The node the event was delivered to.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The key, for keyboard events.
    pub fn key(&self) -> Option<Key> {
        self.key
    }

    /// The legacy key code, for keyboard events.
    pub fn key_code(&self) -> Option<u32> {
        self.key.map(Key::key_code)
    }

    /// Modifiers held during the event.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// The key and modifiers as a chord, for keyboard events.
    pub fn chord(&self) -> Option<KeyChord> {
        self.key.map(|key| KeyChord::with(key, self.modifiers))
    }

    /// Suppress the platform's default action (form submit, caret move, ...).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler suppressed the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::A.key_code(), 65);
        assert_eq!(Key::Z.key_code(), 90);
        assert_eq!(Key::Digit0.key_code(), 48);
        assert_eq!(Key::NumpadDivide.key_code(), 111);
        assert_eq!(Key::F1.key_code(), 112);
        assert_eq!(Key::ArrowDown.key_code(), 40);
        assert_eq!(Key::Quote.key_code(), 222);
        assert_eq!(Key::Other(300).key_code(), 300);
    }

    #[test]
    fn test_from_key_code_inverts() {
        for code in 0..=255 {
            assert_eq!(Key::from_key_code(code).key_code(), code);
        }
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Key::from_char('n'), Some(Key::N));
        assert_eq!(Key::from_char('N'), Some(Key::N));
        assert_eq!(Key::from_char('7'), Some(Key::Digit7));
        assert_eq!(Key::from_char(' '), Some(Key::Space));
        assert_eq!(Key::from_char('?'), Some(Key::Slash));
        assert_eq!(Key::from_char('é'), None);
    }

    #[test]
    fn test_modifiers() {
        assert!(KeyboardModifiers::NONE.none());
        assert!(!KeyboardModifiers::NONE.any());
        for modifiers in [
            KeyboardModifiers::SHIFT,
            KeyboardModifiers::CTRL,
            KeyboardModifiers::ALT,
        ] {
            assert!(modifiers.any());
            assert!(!modifiers.none());
        }
        assert_ne!(
            KeyChord::with(Key::Tab, KeyboardModifiers::ALT),
            KeyChord::plain(Key::Tab)
        );
    }

    #[test]
    fn test_prevent_default() {
        let mut doc = combo_lattice_core::Document::new();
        let input = doc.create_element("input");
        let mut event = InputEvent::key_down(input, Key::Enter);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
        assert_eq!(event.key_code(), Some(13));
        assert_eq!(event.chord(), Some(KeyChord::plain(Key::Enter)));
    }
}
