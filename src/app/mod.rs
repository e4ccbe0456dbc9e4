//! Application module for marker
//!
//! - `App`: entry point that loads the config and runs the event loop
//! - `WindowManager`: owns every window and routes menu actions and window requests
//! - `WindowState`: one winit window with its wgpu surface, egui state and editor

use crate::cli::RuntimeOptions;
use anyhow::{Context, Result};
use marker_config::Config;
use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::event_loop::{ControlFlow, EventLoop};

pub mod handler;
pub mod ui;
pub mod window_manager;
pub mod window_state;

pub use window_manager::WindowManager;

/// Main application entry point
pub struct App {
    config: Config,
    runtime: Arc<Runtime>,
    runtime_options: RuntimeOptions,
}

impl App {
    pub fn new(runtime: Arc<Runtime>, runtime_options: RuntimeOptions) -> Result<Self> {
        let mut config = Config::load().context("Failed to load configuration")?;
        crate::debug::apply_config_level(config.log_level.to_level_filter());

        if runtime_options.fullscreen {
            config.start_fullscreen = true;
            log::info!("CLI override: starting fullscreen");
        }

        Ok(Self {
            config,
            runtime,
            runtime_options,
        })
    }

    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut window_manager =
            WindowManager::new(self.config, self.runtime, self.runtime_options.files);

        event_loop.run_app(&mut window_manager)?;

        Ok(())
    }
}
