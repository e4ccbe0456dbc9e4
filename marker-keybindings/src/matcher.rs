//! Key event matching.
//!
//! Matches winit KeyEvents against parsed KeyCombos.
//! Supports both logical key matching (character-based) and physical key matching
//! (scan code-based) for layout-independent bindings.

use crate::parser::{KeyCombo, Modifiers, ParsedKey};
use crate::platform::{physical_key_matches_char, resolve_cmd_or_ctrl};
use winit::event::{KeyEvent, Modifiers as WinitModifiers};
use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};

/// Normalized logical key of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKey {
    Character(char),
    Named(NamedKey),
}

/// Matcher for comparing key events against keybindings.
#[derive(Debug, Clone)]
pub struct KeybindingMatcher {
    /// Active modifiers from the event
    modifiers: Modifiers,
    /// The logical key from the event
    key: Option<EventKey>,
    /// The physical key code from the event
    physical_key: Option<KeyCode>,
}

impl KeybindingMatcher {
    /// Build a matcher from already-decoded key state.
    ///
    /// Used for synthesized shortcuts (menu accelerators, tests) where no
    /// winit `KeyEvent` exists; `KeyEvent` has private fields.
    pub fn new(modifiers: Modifiers, key: EventKey, physical_key: Option<KeyCode>) -> Self {
        let key = match key {
            EventKey::Character(c) => EventKey::Character(c.to_ascii_uppercase()),
            named => named,
        };
        Self {
            modifiers,
            key: Some(key),
            physical_key,
        }
    }

    /// Create a matcher from a winit key event.
    pub fn from_event(event: &KeyEvent, modifiers: &WinitModifiers) -> Self {
        let state = modifiers.state();
        let mods = Modifiers {
            ctrl: state.control_key(),
            alt: state.alt_key(),
            shift: state.shift_key(),
            super_key: state.super_key(),
            cmd_or_ctrl: false, // Resolved during matching
        };

        let key = match &event.logical_key {
            // First character, uppercased for case-insensitive matching
            Key::Character(c) => c
                .chars()
                .next()
                .map(|ch| EventKey::Character(ch.to_ascii_uppercase())),
            Key::Named(named) => Some(EventKey::Named(*named)),
            _ => None,
        };

        let physical_key = match event.physical_key {
            PhysicalKey::Code(code) => Some(code),
            PhysicalKey::Unidentified(_) => None,
        };

        Self {
            modifiers: mods,
            key,
            physical_key,
        }
    }

    /// Check if this event matches the given key combo.
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        self.matches_with_physical_preference(combo, false)
    }

    /// Check if this event matches the given key combo, with option to prefer physical keys.
    ///
    /// When `use_physical_keys` is true, character bindings match by key position
    /// so they behave the same on every keyboard layout.
    pub fn matches_with_physical_preference(
        &self,
        combo: &KeyCombo,
        use_physical_keys: bool,
    ) -> bool {
        let key_matches = match (&combo.key, use_physical_keys) {
            (ParsedKey::Physical(combo_code), _) => self.physical_key.as_ref() == Some(combo_code),
            (ParsedKey::Character(combo_char), true) => match (self.physical_key, self.key) {
                (Some(physical), _) => physical_key_matches_char(physical, *combo_char),
                (None, Some(EventKey::Character(event_char))) => {
                    event_char.eq_ignore_ascii_case(combo_char)
                }
                _ => false,
            },
            (ParsedKey::Character(combo_char), false) => {
                matches!(self.key, Some(EventKey::Character(c)) if c.eq_ignore_ascii_case(combo_char))
            }
            (ParsedKey::Named(combo_named), _) => {
                matches!(self.key, Some(EventKey::Named(n)) if n == *combo_named)
            }
        };

        key_matches && self.modifiers_match(&combo.modifiers)
    }

    /// Exact modifier comparison, expanding CmdOrCtrl for the platform.
    fn modifiers_match(&self, combo_mods: &Modifiers) -> bool {
        let (expected_ctrl, expected_super) =
            resolve_cmd_or_ctrl(combo_mods.cmd_or_ctrl, combo_mods.ctrl, combo_mods.super_key);

        self.modifiers.ctrl == expected_ctrl
            && self.modifiers.alt == combo_mods.alt
            && self.modifiers.shift == combo_mods.shift
            && self.modifiers.super_key == expected_super
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_key_combo;

    #[test]
    fn test_cmd_or_ctrl_modifiers() {
        let ctrl = KeybindingMatcher::new(Modifiers::ctrl(), EventKey::Character('o'), None);
        let cmd = KeybindingMatcher::new(
            Modifiers {
                super_key: true,
                ..Modifiers::default()
            },
            EventKey::Character('o'),
            None,
        );
        let combo = parse_key_combo("CmdOrCtrl+O").unwrap();

        #[cfg(target_os = "macos")]
        {
            assert!(cmd.matches(&combo));
            assert!(!ctrl.matches(&combo));
        }
        #[cfg(not(target_os = "macos"))]
        {
            assert!(ctrl.matches(&combo));
            assert!(!cmd.matches(&combo));
        }
    }

    #[test]
    fn test_character_matching_is_case_insensitive() {
        let combo = parse_key_combo("Ctrl+S").unwrap();
        for ch in ['s', 'S'] {
            let matcher = KeybindingMatcher::new(Modifiers::ctrl(), EventKey::Character(ch), None);
            assert!(matcher.matches(&combo));
        }
        let wrong = KeybindingMatcher::new(Modifiers::ctrl(), EventKey::Character('d'), None);
        assert!(!wrong.matches(&combo));
    }

    #[test]
    fn test_modifier_mismatch() {
        let combo = parse_key_combo("Ctrl+S").unwrap();

        // No Ctrl
        let bare = KeybindingMatcher::new(Modifiers::default(), EventKey::Character('s'), None);
        assert!(!bare.matches(&combo));

        // Extra Shift
        let shifted = KeybindingMatcher::new(
            Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::default()
            },
            EventKey::Character('S'),
            None,
        );
        assert!(!shifted.matches(&combo));
    }

    #[test]
    fn test_named_key_requires_no_modifiers() {
        let combo = parse_key_combo("F11").unwrap();
        let plain = KeybindingMatcher::new(
            Modifiers::default(),
            EventKey::Named(NamedKey::F11),
            Some(KeyCode::F11),
        );
        assert!(plain.matches(&combo));

        let with_ctrl = KeybindingMatcher::new(
            Modifiers::ctrl(),
            EventKey::Named(NamedKey::F11),
            Some(KeyCode::F11),
        );
        assert!(!with_ctrl.matches(&combo));
    }

    #[test]
    fn test_physical_key_preference() {
        let combo = parse_key_combo("Ctrl+Z").unwrap();

        // AZERTY: physical KeyZ produces 'W'
        let azerty = KeybindingMatcher::new(
            Modifiers::ctrl(),
            EventKey::Character('w'),
            Some(KeyCode::KeyZ),
        );
        assert!(!azerty.matches_with_physical_preference(&combo, false));
        assert!(azerty.matches_with_physical_preference(&combo, true));
    }
}
