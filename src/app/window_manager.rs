//! Multi-window manager for the editor
//!
//! `WindowManager` owns every open window, creates new ones (centered on the
//! primary monitor), routes menu actions to the focused window and drains the
//! requests windows queue after each event.

use crate::app::window_state::WindowState;
use crate::dialogs::{FileChooser, NativeFileChooser};
use crate::editor::Editor;
#[cfg(target_os = "macos")]
use crate::menu::MenuManager;
use crate::menu::MenuAction;
use crate::window::WindowRequest;
use marker_config::Config;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

pub struct WindowManager {
    pub(crate) windows: HashMap<WindowId, WindowState>,
    /// Native global menu (macOS only)
    #[cfg(target_os = "macos")]
    pub(crate) menu: Option<MenuManager>,
    pub(crate) config: Config,
    /// Shared async runtime, used to initialize each window's GPU context
    runtime: Arc<Runtime>,
    chooser: Rc<dyn FileChooser>,
    /// Files from the command line, opened on the first resume
    pub(crate) initial_files: Option<Vec<PathBuf>>,
    pub(crate) focused: Option<WindowId>,
    pub(crate) should_exit: bool,
}

impl WindowManager {
    pub fn new(config: Config, runtime: Arc<Runtime>, files: Vec<PathBuf>) -> Self {
        Self {
            windows: HashMap::new(),
            #[cfg(target_os = "macos")]
            menu: None,
            config,
            runtime,
            chooser: Rc::new(NativeFileChooser),
            initial_files: Some(files),
            focused: None,
            should_exit: false,
        }
    }

    /// Install the native application menu when the platform has one.
    pub(crate) fn init_menu(&mut self) {
        #[cfg(target_os = "macos")]
        {
            if crate::menu::has_native_app_menu(&self.config) && self.menu.is_none() {
                match MenuManager::new() {
                    Ok(menu) => {
                        menu.init();
                        self.menu = Some(menu);
                    }
                    Err(e) => log::warn!("Failed to create menu: {}", e),
                }
            }
        }
    }

    /// Open a window, bound to `file` when given. A file that cannot be read
    /// still gets a window, with the error shown in its header bar.
    pub fn create_window(&mut self, event_loop: &ActiveEventLoop, file: Option<PathBuf>) {
        let (editor, load_error) = match file {
            Some(path) => match Editor::from_file(&path) {
                Ok(editor) => (editor, None),
                Err(e) => (Editor::new(), Some(e)),
            },
            None => (Editor::new(), None),
        };
        if let Some(id) = self.open_editor(event_loop, editor)
            && let Some(e) = load_error
            && let Some(window) = self.windows.get(&id)
        {
            window.marker.report_error(&e);
        }
    }

    /// Open a new window for a file another window asked for. Read failures
    /// are reported in the requesting window and no window is opened.
    fn open_requested(&mut self, event_loop: &ActiveEventLoop, from: WindowId, path: PathBuf) {
        let editor = match self.windows.get(&from) {
            Some(window) => window.marker.load_requested(&path),
            None => Editor::from_file(&path)
                .map_err(|e| log::error!("{}", e))
                .ok(),
        };
        match editor {
            Some(editor) => {
                self.open_editor(event_loop, editor);
            }
            None => {
                if let Some(window) = self.windows.get(&from) {
                    window.request_redraw();
                }
            }
        }
    }

    fn open_editor(&mut self, event_loop: &ActiveEventLoop, editor: Editor) -> Option<WindowId> {
        let size = LogicalSize::new(self.config.window_width, self.config.window_height);
        let mut attrs = Window::default_attributes()
            .with_title("Marker")
            .with_inner_size(size)
            .with_min_inner_size(LogicalSize::new(400, 300))
            .with_decorations(!self.config.client_side_decorations);

        if let Some(position) = centered_position(event_loop, size) {
            attrs = attrs.with_position(position);
        }

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                return None;
            }
        };

        let init = WindowState::new(window, editor, &self.config, Rc::clone(&self.chooser));
        match self.runtime.block_on(init) {
            Ok(state) => {
                let id = state.window_id();
                self.windows.insert(id, state);
                self.focused = Some(id);
                log::info!(
                    "Created new window {:?} (total: {})",
                    id,
                    self.windows.len()
                );
                Some(id)
            }
            Err(e) => {
                log::error!("Failed to initialize window: {:#}", e);
                None
            }
        }
    }

    pub fn close_window(&mut self, window_id: WindowId) {
        if self.windows.remove(&window_id).is_some() {
            log::info!(
                "Closing window {:?} (remaining: {})",
                window_id,
                self.windows.len()
            );
        }
        if self.focused == Some(window_id) {
            self.focused = self.windows.keys().next().copied();
        }
        if self.windows.is_empty() {
            log::info!("Last window closed, exiting application");
            self.should_exit = true;
        }
    }

    /// Route a native menu action: application actions are handled here,
    /// the rest go to the focused window.
    pub fn handle_menu_action(&mut self, action: MenuAction, event_loop: &ActiveEventLoop) {
        match action {
            MenuAction::NewWindow => self.create_window(event_loop, None),
            MenuAction::Quit => {
                log::info!("Quit requested");
                self.should_exit = true;
            }
            _ => {
                if let Some(id) = self.focused
                    && let Some(window) = self.windows.get_mut(&id)
                {
                    window.marker.dispatch(action);
                    window.request_redraw();
                }
            }
        }
    }

    pub(crate) fn process_menu_events(&mut self, event_loop: &ActiveEventLoop) {
        #[cfg(target_os = "macos")]
        {
            let actions: Vec<_> = match &self.menu {
                Some(menu) => menu.poll_events().collect(),
                None => Vec::new(),
            };
            for action in actions {
                self.handle_menu_action(action, event_loop);
            }
        }
        #[cfg(not(target_os = "macos"))]
        let _ = event_loop;
    }

    /// Apply everything windows asked for since the last call.
    pub(crate) fn process_requests(&mut self, event_loop: &ActiveEventLoop) {
        let pending: Vec<(WindowId, Vec<WindowRequest>)> = self
            .windows
            .iter_mut()
            .map(|(id, window)| (*id, window.take_requests()))
            .filter(|(_, requests)| !requests.is_empty())
            .collect();

        for (id, requests) in pending {
            for request in requests {
                log::debug!("Window {:?} requested {:?}", id, request);
                match request {
                    WindowRequest::OpenWindow(Some(path)) => {
                        self.open_requested(event_loop, id, path)
                    }
                    WindowRequest::OpenWindow(None) => self.create_window(event_loop, None),
                    WindowRequest::Close => self.close_window(id),
                    WindowRequest::Quit => self.should_exit = true,
                }
            }
        }
    }
}

/// Top-left corner that centers a window of `size` on the primary monitor.
fn centered_position(
    event_loop: &ActiveEventLoop,
    size: LogicalSize<u32>,
) -> Option<PhysicalPosition<i32>> {
    let monitor = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())?;
    let window = size.to_physical::<i32>(monitor.scale_factor());
    let area = monitor.size();
    let origin = monitor.position();
    Some(PhysicalPosition::new(
        origin.x + (area.width as i32 - window.width).max(0) / 2,
        origin.y + (area.height as i32 - window.height).max(0) / 2,
    ))
}
