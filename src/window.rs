//! Per-window behavior independent of the windowing system.
//!
//! `MarkerWindow` owns the shell, its action map and the keybinding registry,
//! and turns shortcuts, menu items and popover clicks into editor operations.
//! Anything that needs the application (new windows, quitting) is queued as a
//! [`WindowRequest`] for the window manager to drain.

use crate::dialogs::FileChooser;
use crate::editor::{Editor, SaveOutcome};
use crate::menu::{self, ActionMap, MenuAction};
use crate::shell::{DisplayControl, WindowShell};
use anyhow::{Context, Result};
use marker_config::{Config, ViewMode};
use marker_keybindings::{KeybindingMatcher, KeybindingRegistry};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use winit::event::{ElementState, KeyEvent, Modifiers};

/// What a window asks of the application after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowRequest {
    /// Open a new window, bound to a file when one is given.
    OpenWindow(Option<PathBuf>),
    /// Close this window.
    Close,
    /// Close every window and exit.
    Quit,
}

/// Whether a key event should continue to the default handlers. Window
/// shortcuts never consume the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPropagation {
    Continue,
}

/// Overlays drawn on top of the window content.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Overlays {
    pub about: bool,
    pub shortcuts: bool,
}

pub struct MarkerWindow {
    shell: WindowShell,
    actions: ActionMap,
    keybindings: KeybindingRegistry,
    chooser: Rc<dyn FileChooser>,
    requests: Vec<WindowRequest>,
    pub overlays: Overlays,
    pub view_mode: ViewMode,
    pub font_size: f32,
}

impl MarkerWindow {
    pub fn new(
        editor: Editor,
        config: &Config,
        display: Box<dyn DisplayControl>,
        chooser: Rc<dyn FileChooser>,
    ) -> Result<Self> {
        let shell = WindowShell::new(editor, display).context("Failed to build window chrome")?;

        let mut actions = ActionMap::for_window();
        if !menu::has_native_app_menu(config) {
            shell.install_fallback_app_menu(&mut actions);
        }

        let mut window = Self {
            shell,
            actions,
            keybindings: KeybindingRegistry::from_config(&config.keybindings),
            chooser,
            requests: Vec::new(),
            overlays: Overlays::default(),
            view_mode: config.view_mode,
            font_size: config.editor_font_size,
        };
        window.shell.with_editor(Editor::refresh_preview);
        if config.start_fullscreen {
            window.shell.enter_fullscreen();
        }
        Ok(window)
    }

    pub fn shell(&self) -> &WindowShell {
        &self.shell
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    pub fn keybindings(&self) -> &KeybindingRegistry {
        &self.keybindings
    }

    pub fn with_editor<R>(&self, f: impl FnOnce(&mut Editor) -> R) -> Option<R> {
        self.shell.with_editor(f)
    }

    /// Window-level key interception.
    ///
    /// Bound shortcuts run their action on press. The event is never
    /// consumed: it always continues to the default handlers.
    pub fn handle_key_event(&mut self, event: &KeyEvent, modifiers: &Modifiers) -> KeyPropagation {
        if is_fresh_press(event.state, event.repeat) {
            let action = self.keybindings.lookup(event, modifiers).map(str::to_owned);
            self.run_shortcut(action);
        }
        KeyPropagation::Continue
    }

    /// Key interception for an already-built matcher. Releases and
    /// auto-repeats pass through without running anything.
    pub fn handle_key(
        &mut self,
        matcher: &KeybindingMatcher,
        state: ElementState,
        repeat: bool,
    ) -> KeyPropagation {
        if is_fresh_press(state, repeat) {
            let action = self
                .keybindings
                .action_for(matcher, false)
                .map(str::to_owned);
            self.run_shortcut(action);
        }
        KeyPropagation::Continue
    }

    fn run_shortcut(&mut self, action: Option<String>) {
        if let Some(action) = action {
            self.activate(&action);
        }
    }

    /// Run the action registered under `id`. Returns false if none is.
    pub fn activate(&mut self, id: &str) -> bool {
        match self.actions.get(id) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => {
                log::warn!("No action registered for '{}'", id);
                false
            }
        }
    }

    pub fn dispatch(&mut self, action: MenuAction) {
        log::debug!("Dispatching {:?}", action);
        match action {
            MenuAction::NewWindow => self.requests.push(WindowRequest::OpenWindow(None)),
            MenuAction::ShowShortcuts => self.overlays.shortcuts = true,
            MenuAction::About => self.overlays.about = true,
            MenuAction::Quit => self.requests.push(WindowRequest::Quit),
            MenuAction::OpenFile => self.open_file(),
            MenuAction::SaveFile => self.save(),
            MenuAction::SaveFileAs => self.save_as(),
            MenuAction::RefreshPreview => {
                self.shell.with_editor(Editor::refresh_preview);
            }
            MenuAction::ToggleFullscreen => self.shell.toggle_fullscreen(),
            MenuAction::ExitFullscreen => {
                if self.shell.is_fullscreen() {
                    self.shell.exit_fullscreen();
                } else {
                    log::debug!("Exit fullscreen ignored, window is not fullscreen");
                }
            }
            MenuAction::CloseWindow => self.requests.push(WindowRequest::Close),
        }
    }

    /// Requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Shortcut table for the shortcuts overlay: (combo, action id).
    pub fn shortcut_rows(&self) -> Vec<(String, &'static str)> {
        [
            MenuAction::RefreshPreview,
            MenuAction::OpenFile,
            MenuAction::SaveFile,
            MenuAction::ToggleFullscreen,
        ]
        .into_iter()
        .filter_map(|action| {
            self.keybindings
                .combo_for(action.id())
                .map(|combo| (combo.to_string(), action.id()))
        })
        .collect()
    }

    fn start_dir(&self) -> Option<PathBuf> {
        self.shell
            .with_editor(|e| e.path().and_then(|p| p.parent()).map(PathBuf::from))
            .flatten()
    }

    /// Load `path` for a window this one asked to open. A file that cannot be
    /// read is reported in this window's header bar and yields `None`.
    pub fn load_requested(&self, path: &Path) -> Option<Editor> {
        match Editor::from_file(path) {
            Ok(editor) => Some(editor),
            Err(e) => {
                self.report_error(&e);
                None
            }
        }
    }

    fn open_file(&mut self) {
        let start = self.start_dir();
        if let Some(path) = self.chooser.choose_open(start.as_deref()) {
            log::info!("Requesting window for {}", path.display());
            self.requests.push(WindowRequest::OpenWindow(Some(path)));
        }
    }

    fn save(&mut self) {
        match self.shell.with_editor(Editor::save_file) {
            Some(Ok(SaveOutcome::Saved(_))) | None => {}
            Some(Ok(SaveOutcome::NeedsPath)) => self.save_as(),
            Some(Err(e)) => self.report_error(&e),
        }
    }

    fn save_as(&mut self) {
        let start = self.start_dir();
        let name = self
            .shell
            .with_editor(|e| e.title().trim_start_matches('*').to_string())
            .unwrap_or_default();
        let Some(path) = self.chooser.choose_save(start.as_deref(), &name) else {
            return;
        };
        if let Some(Err(e)) = self.shell.with_editor(|e| e.save_file_as(path)) {
            self.report_error(&e);
        }
    }

    /// Log `error` and show it in the header bar subtitle.
    pub fn report_error(&self, error: &dyn std::error::Error) {
        log::error!("{}", error);
        self.shell
            .with_header_bar_mut(|bar| bar.set_subtitle(format!("Error: {}", error)));
    }
}

/// Shortcuts fire once per physical press.
fn is_fresh_press(state: ElementState, repeat: bool) -> bool {
    state == ElementState::Pressed && !repeat
}
