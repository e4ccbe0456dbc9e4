//! Platform-specific keybinding resolution.
//!
//! Contains:
//! - `cmd_or_ctrl` modifier expansion (Cmd on macOS, Ctrl elsewhere)
//! - Physical key → QWERTY character mapping for layout-independent bindings
//! - Named key and physical key code alias tables

use winit::keyboard::{KeyCode, NamedKey};

/// Letter and digit keys with the character they produce on a US QWERTY layout.
const QWERTY_KEYS: &[(KeyCode, char)] = &[
    (KeyCode::KeyA, 'A'),
    (KeyCode::KeyB, 'B'),
    (KeyCode::KeyC, 'C'),
    (KeyCode::KeyD, 'D'),
    (KeyCode::KeyE, 'E'),
    (KeyCode::KeyF, 'F'),
    (KeyCode::KeyG, 'G'),
    (KeyCode::KeyH, 'H'),
    (KeyCode::KeyI, 'I'),
    (KeyCode::KeyJ, 'J'),
    (KeyCode::KeyK, 'K'),
    (KeyCode::KeyL, 'L'),
    (KeyCode::KeyM, 'M'),
    (KeyCode::KeyN, 'N'),
    (KeyCode::KeyO, 'O'),
    (KeyCode::KeyP, 'P'),
    (KeyCode::KeyQ, 'Q'),
    (KeyCode::KeyR, 'R'),
    (KeyCode::KeyS, 'S'),
    (KeyCode::KeyT, 'T'),
    (KeyCode::KeyU, 'U'),
    (KeyCode::KeyV, 'V'),
    (KeyCode::KeyW, 'W'),
    (KeyCode::KeyX, 'X'),
    (KeyCode::KeyY, 'Y'),
    (KeyCode::KeyZ, 'Z'),
    (KeyCode::Digit0, '0'),
    (KeyCode::Digit1, '1'),
    (KeyCode::Digit2, '2'),
    (KeyCode::Digit3, '3'),
    (KeyCode::Digit4, '4'),
    (KeyCode::Digit5, '5'),
    (KeyCode::Digit6, '6'),
    (KeyCode::Digit7, '7'),
    (KeyCode::Digit8, '8'),
    (KeyCode::Digit9, '9'),
];

const FUNCTION_KEYS: &[(NamedKey, KeyCode)] = &[
    (NamedKey::F1, KeyCode::F1),
    (NamedKey::F2, KeyCode::F2),
    (NamedKey::F3, KeyCode::F3),
    (NamedKey::F4, KeyCode::F4),
    (NamedKey::F5, KeyCode::F5),
    (NamedKey::F6, KeyCode::F6),
    (NamedKey::F7, KeyCode::F7),
    (NamedKey::F8, KeyCode::F8),
    (NamedKey::F9, KeyCode::F9),
    (NamedKey::F10, KeyCode::F10),
    (NamedKey::F11, KeyCode::F11),
    (NamedKey::F12, KeyCode::F12),
];

/// Resolve the `CmdOrCtrl` modifier for the current platform.
///
/// Returns `(expected_ctrl, expected_super)` given a `cmd_or_ctrl` flag and the
/// raw `ctrl`/`super_key` values from the parsed combo.
#[inline]
pub fn resolve_cmd_or_ctrl(cmd_or_ctrl: bool, ctrl: bool, super_key: bool) -> (bool, bool) {
    if cmd_or_ctrl {
        #[cfg(target_os = "macos")]
        {
            (ctrl, true)
        }
        #[cfg(not(target_os = "macos"))]
        {
            (true, super_key)
        }
    } else {
        (ctrl, super_key)
    }
}

/// Check if a physical key code produces `ch` on a US QWERTY layout.
pub fn physical_key_matches_char(code: KeyCode, ch: char) -> bool {
    QWERTY_KEYS
        .iter()
        .find(|(k, _)| *k == code)
        .is_some_and(|(_, c)| c.eq_ignore_ascii_case(&ch))
}

/// Parse a named key string into a [`NamedKey`]. Matching is case-insensitive.
pub fn parse_named_key(s: &str) -> Option<NamedKey> {
    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
        return FUNCTION_KEYS.get(n.checked_sub(1)?).map(|(named, _)| *named);
    }

    match lower.as_str() {
        "enter" | "return" => Some(NamedKey::Enter),
        "escape" | "esc" => Some(NamedKey::Escape),
        "space" => Some(NamedKey::Space),
        "tab" => Some(NamedKey::Tab),
        "backspace" => Some(NamedKey::Backspace),
        "delete" | "del" => Some(NamedKey::Delete),
        "insert" | "ins" => Some(NamedKey::Insert),
        "home" => Some(NamedKey::Home),
        "end" => Some(NamedKey::End),
        "pageup" | "pgup" => Some(NamedKey::PageUp),
        "pagedown" | "pgdn" => Some(NamedKey::PageDown),
        "up" | "arrowup" => Some(NamedKey::ArrowUp),
        "down" | "arrowdown" => Some(NamedKey::ArrowDown),
        "left" | "arrowleft" => Some(NamedKey::ArrowLeft),
        "right" | "arrowright" => Some(NamedKey::ArrowRight),
        _ => None,
    }
}

/// Parse a physical key code name (`KeyS`, `Digit1`, `F11`) into a [`KeyCode`].
pub fn parse_physical_key_code(s: &str) -> Option<KeyCode> {
    let lower = s.to_lowercase();

    if let Some(letter) = lower.strip_prefix("key") {
        let mut chars = letter.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return QWERTY_KEYS
                .iter()
                .find(|(_, ch)| ch.eq_ignore_ascii_case(&c) && c.is_ascii_alphabetic())
                .map(|(code, _)| *code);
        }
        return None;
    }

    if let Some(digit) = lower.strip_prefix("digit") {
        let mut chars = digit.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return QWERTY_KEYS
                .iter()
                .find(|(_, ch)| *ch == c && c.is_ascii_digit())
                .map(|(code, _)| *code);
        }
        return None;
    }

    match parse_named_key(&lower)? {
        named @ (NamedKey::F1
        | NamedKey::F2
        | NamedKey::F3
        | NamedKey::F4
        | NamedKey::F5
        | NamedKey::F6
        | NamedKey::F7
        | NamedKey::F8
        | NamedKey::F9
        | NamedKey::F10
        | NamedKey::F11
        | NamedKey::F12) => FUNCTION_KEYS
            .iter()
            .find(|(n, _)| *n == named)
            .map(|(_, code)| *code),
        NamedKey::Enter => Some(KeyCode::Enter),
        NamedKey::Escape => Some(KeyCode::Escape),
        NamedKey::Space => Some(KeyCode::Space),
        NamedKey::Tab => Some(KeyCode::Tab),
        NamedKey::Backspace => Some(KeyCode::Backspace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys() {
        assert_eq!(parse_named_key("F11"), Some(NamedKey::F11));
        assert_eq!(parse_named_key("f1"), Some(NamedKey::F1));
        assert_eq!(parse_named_key("F0"), None);
        assert_eq!(parse_named_key("F13"), None);
    }

    #[test]
    fn test_physical_codes() {
        assert_eq!(parse_physical_key_code("KeyS"), Some(KeyCode::KeyS));
        assert_eq!(parse_physical_key_code("digit7"), Some(KeyCode::Digit7));
        assert_eq!(parse_physical_key_code("F11"), Some(KeyCode::F11));
        assert_eq!(parse_physical_key_code("Key1"), None);
        assert_eq!(parse_physical_key_code("KeyAB"), None);
    }

    #[test]
    fn test_physical_key_matches_char() {
        assert!(physical_key_matches_char(KeyCode::KeyS, 's'));
        assert!(!physical_key_matches_char(KeyCode::KeyS, 'O'));
        assert!(!physical_key_matches_char(KeyCode::F11, 'F'));
    }
}
