//! The markdown editor component hosted by each window.
//!
//! An [`Editor`] owns the text buffer, the file it is bound to and a cached
//! preview. It knows nothing about windows; whoever displays it learns about
//! title and subtitle changes through [`Editor::subscribe`].

mod events;
pub mod preview;

pub use events::{EditorEvent, SubscriptionId, Subscribers};
pub use preview::{PreviewBlock, Span};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Title shown for a buffer that has never been saved.
pub const UNTITLED: &str = "Untitled.md";

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of [`Editor::save_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// No file is bound; the caller must pick one and call [`Editor::save_file_as`].
    NeedsPath,
}

#[derive(Debug, Default)]
pub struct Editor {
    text: String,
    path: Option<PathBuf>,
    modified: bool,
    preview: Vec<PreviewBlock>,
    subscribers: Subscribers,
}

impl Editor {
    /// An empty, untitled buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor bound to `path`, loaded from disk.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let mut editor = Self::new();
        editor.open_file(path)?;
        Ok(editor)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn title(&self) -> String {
        let name = self
            .path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string());
        if self.modified {
            format!("*{}", name)
        } else {
            name
        }
    }

    pub fn subtitle(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    /// The preview as of the last [`refresh_preview`](Self::refresh_preview).
    pub fn preview(&self) -> &[PreviewBlock] {
        &self.preview
    }

    pub fn refresh_preview(&mut self) {
        self.preview = preview::render(&self.text);
        log::debug!("Preview refreshed: {} block(s)", self.preview.len());
    }

    /// Replace the buffer contents.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.mark_modified();
    }

    /// Edit the buffer in place. `edit` returns whether it changed anything.
    pub fn edit(&mut self, edit: impl FnOnce(&mut String) -> bool) {
        if edit(&mut self.text) {
            self.mark_modified();
        }
    }

    fn mark_modified(&mut self) {
        if !self.modified {
            self.modified = true;
            let title = self.title();
            self.subscribers.emit(&EditorEvent::TitleChanged(title));
        }
    }

    /// Load `path` into the buffer and bind the editor to it.
    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| EditorError::Read {
            path: path.clone(),
            source,
        })?;
        log::info!("Opened {} ({} bytes)", path.display(), text.len());

        self.text = text;
        self.path = Some(path);
        self.modified = false;
        self.refresh_preview();
        self.notify_location();
        Ok(())
    }

    /// Write the buffer to its bound file.
    pub fn save_file(&mut self) -> Result<SaveOutcome, EditorError> {
        let Some(path) = self.path.clone() else {
            log::debug!("Save requested for an untitled buffer");
            return Ok(SaveOutcome::NeedsPath);
        };
        self.write_to(&path)?;
        Ok(SaveOutcome::Saved(path))
    }

    /// Write the buffer to `path` and bind the editor to it.
    pub fn save_file_as(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        let path = path.into();
        self.write_to(&path)?;
        if self.path.as_deref() != Some(path.as_path()) {
            self.path = Some(path);
        }
        self.notify_location();
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<(), EditorError> {
        let write_err = |source| EditorError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Atomic write: temp file next to the real target (through any
        // symlink), then rename over it. An existing file keeps its permissions.
        let target = match fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(_) => path.to_path_buf(),
        };
        let permissions = fs::metadata(&target).ok().map(|m| m.permissions());
        let mut tmp = target.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, &self.text).map_err(write_err)?;
        let replaced = match permissions {
            Some(permissions) => fs::set_permissions(&tmp, permissions),
            None => Ok(()),
        }
        .and_then(|()| fs::rename(&tmp, &target));
        if let Err(e) = replaced {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }
        log::info!("Saved {} ({} bytes)", path.display(), self.text.len());

        let was_modified = std::mem::replace(&mut self.modified, false);
        self.subscribers
            .emit(&EditorEvent::Saved(path.to_path_buf()));
        if was_modified {
            let title = self.title();
            self.subscribers.emit(&EditorEvent::TitleChanged(title));
        }
        Ok(())
    }

    fn notify_location(&mut self) {
        let title = self.title();
        let subtitle = self.subtitle();
        self.subscribers.emit(&EditorEvent::TitleChanged(title));
        self.subscribers.emit(&EditorEvent::SubtitleChanged(subtitle));
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent) + 'static) -> SubscriptionId {
        self.subscribers.add(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(editor: &mut Editor) -> Rc<RefCell<Vec<EditorEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        editor.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        events
    }

    #[test]
    fn test_untitled_title() {
        let editor = Editor::new();
        assert_eq!(editor.title(), UNTITLED);
        assert_eq!(editor.subtitle(), "");
    }

    #[test]
    fn test_first_edit_marks_modified_once() {
        let mut editor = Editor::new();
        let events = record(&mut editor);

        editor.set_text("# a");
        editor.set_text("# ab");

        assert!(editor.is_modified());
        assert_eq!(
            *events.borrow(),
            vec![EditorEvent::TitleChanged("*Untitled.md".into())]
        );
    }

    #[test]
    fn test_unchanged_text_is_not_an_edit() {
        let mut editor = Editor::new();
        editor.set_text("");
        editor.edit(|_| false);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_save_untitled_needs_path() {
        let mut editor = Editor::new();
        editor.set_text("x");
        assert_eq!(editor.save_file().unwrap(), SaveOutcome::NeedsPath);
        assert!(editor.is_modified());
    }

    #[test]
    fn test_preview_is_stale_until_refreshed() {
        let mut editor = Editor::new();
        editor.set_text("# Heading");
        assert!(editor.preview().is_empty());
        editor.refresh_preview();
        assert_eq!(editor.preview().len(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut editor = Editor::new();
        let id = editor.subscribe(|_| {});
        assert_eq!(editor.subscriber_count(), 1);
        assert!(editor.unsubscribe(id));
        assert_eq!(editor.subscriber_count(), 0);
    }
}
