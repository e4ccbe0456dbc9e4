//! Configuration system for the Marker markdown editor.
//!
//! This crate provides configuration loading, saving, and default values
//! for the editor windows. It includes:
//!
//! - The [`Config`] struct and its YAML persistence
//! - Default values for every field (see [`defaults`])
//! - Keybinding and logging configuration types
//! - Typed errors for load/save failures

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{KeyBinding, LogLevel, ViewMode};
