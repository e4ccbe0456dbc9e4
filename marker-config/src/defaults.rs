//! Default values for configuration fields.

use crate::types::KeyBinding;

pub fn window_width() -> u32 {
    900
}

pub fn window_height() -> u32 {
    600
}

pub fn bool_true() -> bool {
    true
}

pub fn bool_false() -> bool {
    false
}

pub fn editor_font_size() -> f32 {
    14.0
}

pub fn min_editor_font_size() -> f32 {
    6.0
}

pub fn max_editor_font_size() -> f32 {
    72.0
}

/// Built-in window shortcuts.
pub fn keybindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("Ctrl+R", "refresh_preview"),
        KeyBinding::new("Ctrl+O", "open_file"),
        KeyBinding::new("Ctrl+S", "save_file"),
        KeyBinding::new("F11", "toggle_fullscreen"),
    ]
}
