//! Modal file dialogs.
//!
//! Dialogs block the event loop until dismissed. A cancelled dialog returns
//! `None` and callers treat that as a no-op.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "txt"];

pub trait FileChooser {
    /// Ask for an existing markdown file to open.
    fn choose_open(&self, start_dir: Option<&Path>) -> Option<PathBuf>;

    /// Ask where to save; `suggested_name` pre-fills the file name.
    fn choose_save(&self, start_dir: Option<&Path>, suggested_name: &str) -> Option<PathBuf>;
}

/// Platform file dialogs via `rfd`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeFileChooser;

impl FileChooser for NativeFileChooser {
    fn choose_open(&self, start_dir: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Open Markdown File")
            .add_filter("Markdown", MARKDOWN_EXTENSIONS)
            .add_filter("All files", &["*"]);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        let picked = dialog.pick_file();
        log::debug!("Open dialog returned {:?}", picked);
        picked
    }

    fn choose_save(&self, start_dir: Option<&Path>, suggested_name: &str) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Save Markdown File")
            .set_file_name(suggested_name)
            .add_filter("Markdown", MARKDOWN_EXTENSIONS);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        let picked = dialog.save_file();
        log::debug!("Save dialog returned {:?}", picked);
        picked
    }
}
