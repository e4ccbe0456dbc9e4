//! Window chrome and the fullscreen transition.
//!
//! A window is two stacked containers: the header container (the title bar
//! area) and the content container. In windowed mode the header bar lives in
//! the header container and the editor in the content container. Entering
//! fullscreen moves the header bar into the content container above the
//! editor, so it stays visible while the title bar area is gone. Leaving
//! fullscreen moves only the header bar back.

mod display;
mod header_bar;
mod reparent;
mod widget;

pub use display::{DisplayControl, WinitDisplay};
pub use header_bar::{HeaderBar, PopoverItem};
pub use reparent::Reparent;
pub use widget::{Container, Widget, WidgetContent, WidgetError, WidgetId};

use crate::editor::{Editor, EditorEvent, SubscriptionId};
use crate::menu::{APP_MENU_ENTRIES, ActionMap};
use std::rc::{Rc, Weak};

pub struct WindowShell {
    is_fullscreen: bool,
    header_container: Rc<Container>,
    content_container: Rc<Container>,
    header_bar: Weak<Widget>,
    editor: Weak<Widget>,
    display: Box<dyn DisplayControl>,
    title_subscription: Option<SubscriptionId>,
}

impl WindowShell {
    /// Build the windowed layout around `editor`.
    ///
    /// The header bar starts with the editor's title and subtitle and follows
    /// them until the shell is dropped.
    pub fn new(editor: Editor, display: Box<dyn DisplayControl>) -> Result<Self, WidgetError> {
        let header_container = Container::new("header_container");
        let content_container = Container::new("content_container");

        let header = Widget::header_bar(HeaderBar::new(editor.title(), editor.subtitle()));
        let editor = Widget::editor(editor);
        let header_bar = Rc::downgrade(&header);
        let editor_handle = Rc::downgrade(&editor);

        let title_subscription = editor.as_editor().map(|cell| {
            let bar = header_bar.clone();
            cell.borrow_mut()
                .subscribe(move |event| update_header_bar(&bar, event))
        });

        header_container.append(header)?;
        content_container.append(editor)?;

        Ok(Self {
            is_fullscreen: false,
            header_container,
            content_container,
            header_bar,
            editor: editor_handle,
            display,
            title_subscription,
        })
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Switch to fullscreen.
    ///
    /// # Panics
    ///
    /// Panics if the window is already fullscreen.
    pub fn enter_fullscreen(&mut self) {
        assert!(
            !self.is_fullscreen,
            "enter_fullscreen called while already fullscreen"
        );
        self.is_fullscreen = true;
        self.display.request_fullscreen(true);

        move_widget(&self.header_bar, "header_bar", &self.content_container, |w| {
            if let Some(bar) = w.as_header_bar() {
                let mut bar = bar.borrow_mut();
                bar.set_show_close_button(false);
                bar.set_unfullscreen_visible(true);
            }
        });
        // Re-pack the editor so it sits below the header bar
        move_widget(&self.editor, "editor", &self.content_container, |_| {});
        log::debug!("Shell entered fullscreen");
    }

    /// Switch back to windowed mode.
    ///
    /// # Panics
    ///
    /// Panics if the window is not fullscreen.
    pub fn exit_fullscreen(&mut self) {
        assert!(
            self.is_fullscreen,
            "exit_fullscreen called while not fullscreen"
        );
        self.is_fullscreen = false;
        self.display.request_fullscreen(false);

        move_widget(&self.header_bar, "header_bar", &self.header_container, |w| {
            if let Some(bar) = w.as_header_bar() {
                let mut bar = bar.borrow_mut();
                bar.set_show_close_button(true);
                bar.set_unfullscreen_visible(false);
            }
        });
        log::debug!("Shell exited fullscreen");
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.is_fullscreen {
            self.exit_fullscreen();
        } else {
            self.enter_fullscreen();
        }
    }

    /// Register the application-menu actions on this window and list them in
    /// the gear popover. Used when there is no native application menu.
    pub fn install_fallback_app_menu(&self, actions: &mut ActionMap) {
        for (_, action) in APP_MENU_ENTRIES {
            actions.insert(*action);
        }
        self.with_header_bar_mut(|bar| {
            bar.append_app_menu(
                APP_MENU_ENTRIES
                    .iter()
                    .map(|(label, action)| PopoverItem::new(*label, *action)),
            )
        });
        log::debug!("Installed fallback app menu ({} entries)", APP_MENU_ENTRIES.len());
    }

    pub fn header_container(&self) -> &Rc<Container> {
        &self.header_container
    }

    pub fn content_container(&self) -> &Rc<Container> {
        &self.content_container
    }

    pub fn header_bar(&self) -> Option<Rc<Widget>> {
        self.header_bar.upgrade()
    }

    pub fn editor_widget(&self) -> Option<Rc<Widget>> {
        self.editor.upgrade()
    }

    pub fn unfullscreen_button_visible(&self) -> bool {
        self.with_header_bar(HeaderBar::unfullscreen_visible)
            .unwrap_or(false)
    }

    pub fn with_header_bar<R>(&self, f: impl FnOnce(&HeaderBar) -> R) -> Option<R> {
        let widget = self.header_bar.upgrade()?;
        let bar = widget.as_header_bar()?;
        Some(f(&bar.borrow()))
    }

    pub fn with_header_bar_mut<R>(&self, f: impl FnOnce(&mut HeaderBar) -> R) -> Option<R> {
        let widget = self.header_bar.upgrade()?;
        let bar = widget.as_header_bar()?;
        Some(f(&mut bar.borrow_mut()))
    }

    pub fn with_editor<R>(&self, f: impl FnOnce(&mut Editor) -> R) -> Option<R> {
        let widget = self.editor.upgrade()?;
        let editor = widget.as_editor()?;
        Some(f(&mut editor.borrow_mut()))
    }
}

impl Drop for WindowShell {
    fn drop(&mut self) {
        let Some(id) = self.title_subscription.take() else {
            return;
        };
        if let Some(widget) = self.editor.upgrade()
            && let Some(cell) = widget.as_editor()
            && let Ok(mut editor) = cell.try_borrow_mut()
        {
            editor.unsubscribe(id);
        }
    }
}

fn update_header_bar(bar: &Weak<Widget>, event: &EditorEvent) {
    let Some(widget) = bar.upgrade() else {
        return;
    };
    let Some(bar) = widget.as_header_bar() else {
        return;
    };
    match event {
        EditorEvent::TitleChanged(title) => bar.borrow_mut().set_title(title.as_str()),
        EditorEvent::SubtitleChanged(subtitle) => bar.borrow_mut().set_subtitle(subtitle.as_str()),
        EditorEvent::Saved(_) => {}
    }
}

/// Move the widget behind `handle` to the end of `target`.
///
/// Both widgets are owned by the shell's containers for the shell's whole
/// life, so failure here is a broken invariant.
fn move_widget(
    handle: &Weak<Widget>,
    name: &'static str,
    target: &Rc<Container>,
    adjust: impl FnOnce(&Widget),
) {
    let guard = match Reparent::detach(handle, name) {
        Ok(guard) => guard,
        Err(e) => panic!("cannot detach {name}: {e}"),
    };
    if let Some(widget) = guard.widget() {
        adjust(widget);
    }
    if let Err(e) = guard.attach(target) {
        panic!("cannot attach {name} to {}: {e}", target.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct RecordingDisplay(Rc<RefCell<Vec<bool>>>);

    impl DisplayControl for RecordingDisplay {
        fn request_fullscreen(&self, fullscreen: bool) {
            self.0.borrow_mut().push(fullscreen);
        }
    }

    fn shell() -> (WindowShell, RecordingDisplay) {
        let display = RecordingDisplay::default();
        let shell = WindowShell::new(Editor::new(), Box::new(display.clone())).unwrap();
        (shell, display)
    }

    fn child_names(container: &Container) -> Vec<&'static str> {
        container.children().iter().map(|w| w.name()).collect()
    }

    #[test]
    fn test_initial_layout() {
        let (shell, display) = shell();
        assert!(!shell.is_fullscreen());
        assert_eq!(child_names(shell.header_container()), ["header_bar"]);
        assert_eq!(child_names(shell.content_container()), ["editor"]);
        assert!(display.0.borrow().is_empty());
    }

    #[test]
    fn test_enter_stacks_header_above_editor() {
        let (mut shell, display) = shell();
        shell.enter_fullscreen();

        assert!(shell.header_container().is_empty());
        assert_eq!(
            child_names(shell.content_container()),
            ["header_bar", "editor"]
        );
        assert_eq!(shell.with_header_bar(|b| b.show_close_button()), Some(false));
        assert!(shell.unfullscreen_button_visible());
        assert_eq!(*display.0.borrow(), [true]);
    }

    #[test]
    fn test_exit_leaves_editor_in_content() {
        let (mut shell, display) = shell();
        shell.enter_fullscreen();
        shell.exit_fullscreen();

        assert_eq!(child_names(shell.header_container()), ["header_bar"]);
        assert_eq!(child_names(shell.content_container()), ["editor"]);
        assert_eq!(shell.with_header_bar(|b| b.show_close_button()), Some(true));
        assert!(!shell.unfullscreen_button_visible());
        assert_eq!(*display.0.borrow(), [true, false]);
    }

    #[test]
    #[should_panic(expected = "already fullscreen")]
    fn test_double_enter_panics() {
        let (mut shell, _) = shell();
        shell.enter_fullscreen();
        shell.enter_fullscreen();
    }

    #[test]
    #[should_panic(expected = "not fullscreen")]
    fn test_exit_while_windowed_panics() {
        let (mut shell, _) = shell();
        shell.exit_fullscreen();
    }

    #[test]
    fn test_header_follows_editor_title() {
        let (shell, _) = shell();
        shell.with_editor(|e| e.set_text("hello"));
        assert_eq!(
            shell.with_header_bar(|b| b.title().to_string()),
            Some("*Untitled.md".to_string())
        );
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (shell, _) = shell();
        let editor = shell.editor_widget().unwrap();
        assert_eq!(editor.as_editor().unwrap().borrow().subscriber_count(), 1);
        drop(shell);
        assert_eq!(editor.as_editor().unwrap().borrow().subscriber_count(), 0);
    }

    #[test]
    fn test_fallback_app_menu() {
        let (shell, _) = shell();
        let mut actions = ActionMap::for_window();
        shell.install_fallback_app_menu(&mut actions);

        assert!(actions.contains("about"));
        assert!(actions.contains("quit"));
        assert_eq!(
            shell.with_header_bar(|b| b.app_menu_items().len()),
            Some(APP_MENU_ENTRIES.len())
        );
    }
}
