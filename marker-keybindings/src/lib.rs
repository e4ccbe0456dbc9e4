//! Keybinding system for Marker.
//!
//! Maps configurable key combinations (Ctrl+S, CmdOrCtrl+O, F11, ...) from
//! the user's config.yaml to window action names.

mod matcher;
pub mod parser;
pub mod platform;

pub use matcher::{EventKey, KeybindingMatcher};
pub use parser::{KeyCombo, Modifiers, ParseError, ParsedKey, parse_key_combo};

use marker_config::KeyBinding;

/// Registry of keybindings mapping key combinations to action names.
///
/// Bindings are kept in config order; the first match wins.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    bindings: Vec<(KeyCombo, String)>,
}

impl KeybindingRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config keybindings.
    ///
    /// Invalid keybinding strings are logged and skipped.
    pub fn from_config(keybindings: &[KeyBinding]) -> Self {
        let mut registry = Self::new();

        for binding in keybindings {
            match parser::parse_key_combo(&binding.key) {
                Ok(combo) => {
                    log::debug!(
                        "Registered keybinding: {} -> {} (parsed as: {})",
                        binding.key,
                        binding.action,
                        combo
                    );
                    registry.insert(combo, binding.action.clone());
                }
                Err(e) => {
                    log::warn!(
                        "Invalid keybinding '{}' for action '{}': {}",
                        binding.key,
                        binding.action,
                        e
                    );
                }
            }
        }

        log::info!(
            "Keybinding registry initialized with {} bindings",
            registry.bindings.len()
        );
        registry
    }

    /// Add a binding, replacing any existing binding for the same combo.
    pub fn insert(&mut self, combo: KeyCombo, action: String) {
        if let Some(existing) = self.bindings.iter_mut().find(|(c, _)| *c == combo) {
            log::warn!(
                "Keybinding {} rebound from '{}' to '{}'",
                combo,
                existing.1,
                action
            );
            existing.1 = action;
        } else {
            self.bindings.push((combo, action));
        }
    }

    /// Look up an action for a winit key event.
    pub fn lookup(
        &self,
        event: &winit::event::KeyEvent,
        modifiers: &winit::event::Modifiers,
    ) -> Option<&str> {
        self.action_for(&KeybindingMatcher::from_event(event, modifiers), false)
    }

    /// Look up an action for an already-built matcher.
    pub fn action_for(&self, matcher: &KeybindingMatcher, use_physical_keys: bool) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(combo, _)| matcher.matches_with_physical_preference(combo, use_physical_keys))
            .map(|(_, action)| action.as_str())
    }

    /// The key combo bound to `action`, for display in menus and help.
    pub fn combo_for(&self, action: &str) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find(|(_, a)| a == action)
            .map(|(combo, _)| combo)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = KeybindingRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_rebinding_same_combo_replaces_action() {
        let bindings = vec![
            KeyBinding::new("Ctrl+S", "save_file"),
            KeyBinding::new("ctrl+s", "refresh_preview"),
        ];
        let registry = KeybindingRegistry::from_config(&bindings);
        assert_eq!(registry.len(), 1);
        assert!(registry.combo_for("save_file").is_none());
        assert!(registry.combo_for("refresh_preview").is_some());
    }
}
