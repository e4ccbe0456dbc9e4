//! Application menu support for marker
//!
//! - macOS: the global application menu bar, built with `muda`
//! - everywhere else (or with `native_app_menu: false`): the app-menu entries
//!   are registered into each window's [`ActionMap`] and shown at the end of
//!   the header bar's gear popover.

mod actions;
#[cfg(target_os = "macos")]
mod native;

pub use actions::MenuAction;
#[cfg(target_os = "macos")]
pub use native::MenuManager;

use marker_config::Config;
use std::collections::HashMap;

/// Application-menu entries, in display order.
pub const APP_MENU_ENTRIES: &[(&str, MenuAction)] = &[
    ("New Window", MenuAction::NewWindow),
    ("Keyboard Shortcuts", MenuAction::ShowShortcuts),
    ("About Marker", MenuAction::About),
    ("Quit", MenuAction::Quit),
];

/// Whether the application menu is provided by the platform.
pub fn has_native_app_menu(config: &Config) -> bool {
    cfg!(target_os = "macos") && config.native_app_menu
}

/// Per-window map from action identifier to action.
#[derive(Debug, Default, Clone)]
pub struct ActionMap {
    actions: HashMap<String, MenuAction>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with every window-scoped action registered under its id.
    pub fn for_window() -> Self {
        let mut map = Self::new();
        for action in [
            MenuAction::OpenFile,
            MenuAction::SaveFile,
            MenuAction::SaveFileAs,
            MenuAction::RefreshPreview,
            MenuAction::ToggleFullscreen,
            MenuAction::ExitFullscreen,
            MenuAction::CloseWindow,
        ] {
            map.insert(action);
        }
        map
    }

    /// Register `action` under [`MenuAction::id`]. Returns false if the id was taken.
    pub fn insert(&mut self, action: MenuAction) -> bool {
        let previous = self.actions.insert(action.id().to_string(), action);
        if let Some(previous) = previous {
            log::warn!("Action '{}' re-registered (was {:?})", action.id(), previous);
        }
        previous.is_none()
    }

    pub fn get(&self, id: &str) -> Option<MenuAction> {
        self.actions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
