//! Configuration value types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Keybinding Types
// ============================================================================

/// A keybinding configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key combination string, e.g., "Ctrl+S" or "CmdOrCtrl+O"
    pub key: String,
    /// Action name, e.g., "save_file"
    pub action: String,
}

impl KeyBinding {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }

    /// The key string in a canonical form: lowercase, modifier aliases
    /// folded, modifiers sorted ahead of the key. `"Shift+Control+s"` and
    /// `"Ctrl+Shift+S"` normalize to the same value; `CmdOrCtrl` folds to the
    /// platform's modifier.
    pub fn normalized_key(&self) -> String {
        let mut parts: Vec<String> = self
            .key
            .split('+')
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .collect();
        let key = parts.pop().unwrap_or_default();
        for part in &mut parts {
            let canonical = match part.as_str() {
                "control" => "ctrl",
                "option" => "alt",
                "cmd" | "command" | "meta" | "win" => "super",
                "cmdorctrl" if cfg!(target_os = "macos") => "super",
                "cmdorctrl" => "ctrl",
                other => other,
            };
            *part = canonical.to_string();
        }
        parts.sort();
        parts.dedup();
        parts.push(key);
        parts.join("+")
    }
}

// ============================================================================
// Editor Layout
// ============================================================================

/// Which panes the editor widget shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Source text only
    Editor,
    /// Rendered preview only
    Preview,
    /// Source and preview side by side
    #[default]
    Dual,
}

// ============================================================================
// Logging
// ============================================================================

/// Log verbosity written to the debug log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Parse a level name as accepted by `--log-level` and `RUST_LOG`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "off" | "none" => Some(LogLevel::Off),
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}
