//! Marker: a markdown editor with live preview.
//!
//! Each top-level window hosts one [`editor::Editor`] inside a
//! [`shell::WindowShell`], which owns the window chrome and the fullscreen
//! transition. [`window::MarkerWindow`] routes shortcuts and menu actions;
//! [`app`] runs the winit event loop and draws windows with egui over wgpu.

pub mod app;
pub mod cli;
pub mod debug;
pub mod dialogs;
pub mod editor;
pub mod menu;
pub mod shell;
pub mod window;

pub use marker_config as config;
pub use marker_keybindings as keybindings;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
