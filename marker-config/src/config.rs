//! The `Config` struct and its persistence.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - Path helpers (`config_path`, `config_dir`)
//! - Merging new default keybindings into an existing user config
//! - Validation of loaded values

use crate::defaults;
use crate::error::ConfigError;
use crate::types::{KeyBinding, LogLevel, ViewMode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Editor window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Window & Display
    // ========================================================================
    /// Initial window width in logical pixels
    #[serde(default = "defaults::window_width")]
    pub window_width: u32,

    /// Initial window height in logical pixels
    #[serde(default = "defaults::window_height")]
    pub window_height: u32,

    /// Open new windows in fullscreen mode
    #[serde(default = "defaults::bool_false")]
    pub start_fullscreen: bool,

    /// Draw the header bar as the window title bar instead of native decorations
    #[serde(default = "defaults::bool_true")]
    pub client_side_decorations: bool,

    /// Use the platform's global application menu where one exists.
    /// When false (or on platforms without one) the app-menu entries are
    /// appended to the header bar popover instead.
    #[serde(default = "defaults::bool_true")]
    pub native_app_menu: bool,

    // ========================================================================
    // Editor
    // ========================================================================
    /// Which panes the editor shows
    #[serde(default)]
    pub view_mode: ViewMode,

    /// Font size of the source editor in points
    #[serde(default = "defaults::editor_font_size")]
    pub editor_font_size: f32,

    // ========================================================================
    // Keybindings
    // ========================================================================
    /// Window shortcuts (key combo -> action name)
    #[serde(default = "defaults::keybindings")]
    pub keybindings: Vec<KeyBinding>,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Verbosity of the debug log file
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: defaults::window_width(),
            window_height: defaults::window_height(),
            start_fullscreen: defaults::bool_false(),
            client_side_decorations: defaults::bool_true(),
            native_app_menu: defaults::bool_true(),
            view_mode: ViewMode::default(),
            editor_font_size: defaults::editor_font_size(),
            keybindings: defaults::keybindings(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the user config file, creating it with
    /// defaults when it does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating it with defaults when missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Config file not found, creating default at {:?}", path);
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            return Ok(config);
        }

        log::info!("Loading existing config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let mut config = Self::from_yaml(&contents)?;

        // Merge in any new default keybindings that don't exist in user's config
        config.merge_default_keybindings();
        config.validate()?;

        Ok(config)
    }

    /// Parse a config from YAML text without touching the filesystem.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not a mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(contents).map_err(ConfigError::Parse)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ConfigError::io(path, e))?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("marker")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/marker on every Unix, macOS included
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("marker")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Check field values, clamping the ones that have a safe range.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Validation(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            )));
        }

        let min = defaults::min_editor_font_size();
        let max = defaults::max_editor_font_size();
        if !(min..=max).contains(&self.editor_font_size) {
            let clamped = if self.editor_font_size.is_nan() {
                defaults::editor_font_size()
            } else {
                self.editor_font_size.clamp(min, max)
            };
            log::warn!(
                "editor_font_size {} out of range, using {}",
                self.editor_font_size,
                clamped
            );
            self.editor_font_size = clamped;
        }

        Ok(())
    }

    /// Merge default keybindings into the user's config.
    /// Only adds keybindings for actions that don't already exist in the
    /// user's config, and never on a key the user already bound.
    pub(crate) fn merge_default_keybindings(&mut self) {
        let existing_actions: HashSet<String> = self
            .keybindings
            .iter()
            .map(|kb| kb.action.clone())
            .collect();
        let bound_keys: HashSet<String> = self
            .keybindings
            .iter()
            .map(KeyBinding::normalized_key)
            .collect();

        let mut added_count = 0;
        for default_kb in defaults::keybindings() {
            if existing_actions.contains(&default_kb.action) {
                continue;
            }
            if bound_keys.contains(&default_kb.normalized_key()) {
                log::info!(
                    "Default keybinding {} -> {} skipped, key is bound by the user",
                    default_kb.key,
                    default_kb.action
                );
                continue;
            }
            log::info!(
                "Adding new default keybinding: {} -> {}",
                default_kb.key,
                default_kb.action
            );
            self.keybindings.push(default_kb);
            added_count += 1;
        }

        if added_count > 0 {
            log::info!(
                "Merged {} new default keybinding(s) into user config",
                added_count
            );
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.start_fullscreen = fullscreen;
        self
    }
}
