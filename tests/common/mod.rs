//! Shared integration test helpers for marker.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` suppresses warnings when a file uses only some of
//! the helpers.

#![allow(dead_code)]

use marker::dialogs::FileChooser;
use marker::editor::Editor;
use marker::shell::DisplayControl;
use marker::window::MarkerWindow;
use marker_config::Config;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Display control that records every fullscreen request.
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    pub requests: Rc<RefCell<Vec<bool>>>,
}

impl DisplayControl for RecordingDisplay {
    fn request_fullscreen(&self, fullscreen: bool) {
        self.requests.borrow_mut().push(fullscreen);
    }
}

/// File chooser that answers from queued responses; an empty queue cancels.
#[derive(Default)]
pub struct ScriptedChooser {
    pub open_responses: RefCell<VecDeque<Option<PathBuf>>>,
    pub save_responses: RefCell<VecDeque<Option<PathBuf>>>,
    pub open_calls: Cell<usize>,
    pub save_calls: Cell<usize>,
    pub last_suggested_name: RefCell<Option<String>>,
}

impl ScriptedChooser {
    pub fn answer_open(&self, path: Option<PathBuf>) {
        self.open_responses.borrow_mut().push_back(path);
    }

    pub fn answer_save(&self, path: Option<PathBuf>) {
        self.save_responses.borrow_mut().push_back(path);
    }
}

impl FileChooser for ScriptedChooser {
    fn choose_open(&self, _start_dir: Option<&Path>) -> Option<PathBuf> {
        self.open_calls.set(self.open_calls.get() + 1);
        self.open_responses.borrow_mut().pop_front().flatten()
    }

    fn choose_save(&self, _start_dir: Option<&Path>, suggested_name: &str) -> Option<PathBuf> {
        self.save_calls.set(self.save_calls.get() + 1);
        *self.last_suggested_name.borrow_mut() = Some(suggested_name.to_string());
        self.save_responses.borrow_mut().pop_front().flatten()
    }
}

/// A config that never uses the native app menu, so results match on every platform.
pub fn test_config() -> Config {
    Config {
        native_app_menu: false,
        ..Config::default()
    }
}

pub struct TestWindow {
    pub window: MarkerWindow,
    pub display: RecordingDisplay,
    pub chooser: Rc<ScriptedChooser>,
}

pub fn test_window(editor: Editor) -> TestWindow {
    test_window_with_config(editor, &test_config())
}

pub fn test_window_with_config(editor: Editor, config: &Config) -> TestWindow {
    let display = RecordingDisplay::default();
    let chooser = Rc::new(ScriptedChooser::default());
    let window = MarkerWindow::new(
        editor,
        config,
        Box::new(display.clone()),
        Rc::clone(&chooser) as Rc<dyn FileChooser>,
    )
    .expect("window construction");
    TestWindow {
        window,
        display,
        chooser,
    }
}
