//! Key combination parser.
//!
//! Parses human-readable key strings like "Ctrl+S" into KeyCombo structs.
//! Also supports physical key codes for layout-independent bindings (e.g., "Ctrl+[KeyS]").

use crate::platform::{parse_named_key, parse_physical_key_code};
use std::fmt;
use winit::keyboard::{KeyCode, NamedKey};

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty key combination")]
    Empty,
    #[error("key combination ends with modifier, no key specified")]
    MissingKey,
    #[error("multiple keys specified: already have a key, found '{0}'")]
    MultipleKeys(String),
    #[error("unknown key: '{0}'")]
    UnknownKey(String),
    #[error("unknown physical key code: '{0}'")]
    UnknownPhysicalKey(String),
}

/// Set of active modifiers for a key combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
    /// If true, this represents CmdOrCtrl (Cmd on macOS, Ctrl elsewhere)
    pub cmd_or_ctrl: bool,
}

impl Modifiers {
    /// Only the Ctrl key held.
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// A parsed key combination (modifiers + key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mods = [
            (self.modifiers.cmd_or_ctrl, "CmdOrCtrl"),
            (self.modifiers.ctrl, "Ctrl"),
            (self.modifiers.alt, "Alt"),
            (self.modifiers.shift, "Shift"),
            (self.modifiers.super_key, "Super"),
        ];
        for (_, name) in mods.iter().filter(|(on, _)| *on) {
            write!(f, "{}+", name)?;
        }

        match &self.key {
            ParsedKey::Character(c) => write!(f, "{}", c),
            ParsedKey::Named(n) => write!(f, "{:?}", n),
            ParsedKey::Physical(k) => write!(f, "[{:?}]", k),
        }
    }
}

/// The actual key (either a character or a named key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// A single character key, stored uppercased (e.g., 'S', '1')
    Character(char),
    /// A named key (e.g., F11, Enter, Escape)
    Named(NamedKey),
    /// A physical key code (e.g., KeyS) matched by position rather than
    /// by the character the layout produces.
    Physical(KeyCode),
}

/// Parse a key combination string into a KeyCombo.
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
/// - `Super`, `Cmd`, `Command`, `Meta`, `Win` - Super/Cmd key
/// - `CmdOrCtrl` - Cmd on macOS, Ctrl on other platforms
///
/// Keys:
/// - Single characters: `S`, `O`, `1`, etc.
/// - Named keys: `F1`-`F12`, `Enter`, `Escape`, `Space`, `Tab`, etc.
/// - Physical keys in brackets: `[KeyS]`, `[Digit1]`
pub fn parse_key_combo(s: &str) -> Result<KeyCombo, ParseError> {
    if s.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let parts: Vec<&str> = s.split('+').map(str::trim).collect();
    let mut modifiers = Modifiers::default();
    let mut key_part = None;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;

        let is_modifier = match part.to_lowercase().as_str() {
            "ctrl" | "control" => {
                modifiers.ctrl = true;
                true
            }
            "alt" | "option" => {
                modifiers.alt = true;
                true
            }
            "shift" => {
                modifiers.shift = true;
                true
            }
            "super" | "cmd" | "command" | "meta" | "win" => {
                modifiers.super_key = true;
                true
            }
            "cmdorctrl" => {
                modifiers.cmd_or_ctrl = true;
                true
            }
            _ => false,
        };

        if !is_modifier {
            if key_part.is_some() {
                return Err(ParseError::MultipleKeys(part.to_string()));
            }
            key_part = Some(*part);
        } else if is_last {
            return Err(ParseError::MissingKey);
        }
    }

    let key_str = key_part.ok_or(ParseError::MissingKey)?;
    let key = parse_key(key_str)?;

    Ok(KeyCombo { modifiers, key })
}

/// Parse a key string into a ParsedKey.
fn parse_key(s: &str) -> Result<ParsedKey, ParseError> {
    if let Some(code_str) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return parse_physical_key_code(code_str)
            .map(ParsedKey::Physical)
            .ok_or_else(|| ParseError::UnknownPhysicalKey(code_str.to_string()));
    }

    if let Some(named) = parse_named_key(s) {
        return Ok(ParsedKey::Named(named));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(ParsedKey::Character(c.to_ascii_uppercase())),
        _ => Err(ParseError::UnknownKey(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ctrl_letter() {
        let combo = parse_key_combo("Ctrl+s").unwrap();
        assert!(combo.modifiers.ctrl);
        assert!(!combo.modifiers.shift);
        assert_eq!(combo.key, ParsedKey::Character('S'));
    }

    #[test]
    fn test_parse_named_key_without_modifiers() {
        let combo = parse_key_combo("F11").unwrap();
        assert_eq!(combo.modifiers, Modifiers::default());
        assert_eq!(combo.key, ParsedKey::Named(NamedKey::F11));
    }

    #[test]
    fn test_parse_physical_key() {
        let combo = parse_key_combo("CmdOrCtrl+[KeyO]").unwrap();
        assert!(combo.modifiers.cmd_or_ctrl);
        assert_eq!(combo.key, ParsedKey::Physical(KeyCode::KeyO));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_key_combo(""), Err(ParseError::Empty));
        assert_eq!(parse_key_combo("Ctrl+Shift"), Err(ParseError::MissingKey));
        assert_eq!(
            parse_key_combo("Ctrl+A+B"),
            Err(ParseError::MultipleKeys("B".to_string()))
        );
        assert_eq!(
            parse_key_combo("Ctrl+Banana"),
            Err(ParseError::UnknownKey("Banana".to_string()))
        );
        assert_eq!(
            parse_key_combo("[KeyNope]"),
            Err(ParseError::UnknownPhysicalKey("KeyNope".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_modifier_order() {
        let combo = parse_key_combo("shift+ctrl+r").unwrap();
        assert_eq!(combo.to_string(), "Ctrl+Shift+R");
    }
}
