//! Header bar state: the title bar replacement shown above the editor.

use crate::menu::MenuAction;

/// One entry of the header bar's gear popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverItem {
    pub label: String,
    /// Action-map identifier activated when the entry is clicked.
    pub action: String,
}

impl PopoverItem {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action: action.id().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeaderBar {
    title: String,
    subtitle: String,
    /// Window-control affordance (close button); hidden in fullscreen.
    show_close_button: bool,
    /// "Exit fullscreen" button; only visible in fullscreen.
    unfullscreen_visible: bool,
    popover: Vec<PopoverItem>,
    /// Index where the app-menu section starts, once appended.
    app_menu_start: Option<usize>,
}

impl HeaderBar {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            show_close_button: true,
            unfullscreen_visible: false,
            popover: vec![
                PopoverItem::new("Open…", MenuAction::OpenFile),
                PopoverItem::new("Save", MenuAction::SaveFile),
                PopoverItem::new("Save As…", MenuAction::SaveFileAs),
                PopoverItem::new("Refresh Preview", MenuAction::RefreshPreview),
                PopoverItem::new("Fullscreen", MenuAction::ToggleFullscreen),
            ],
            app_menu_start: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = subtitle.into();
    }

    pub fn show_close_button(&self) -> bool {
        self.show_close_button
    }

    pub fn set_show_close_button(&mut self, show: bool) {
        self.show_close_button = show;
    }

    pub fn unfullscreen_visible(&self) -> bool {
        self.unfullscreen_visible
    }

    pub fn set_unfullscreen_visible(&mut self, visible: bool) {
        self.unfullscreen_visible = visible;
    }

    /// Gear popover entries, window section first.
    pub fn popover_items(&self) -> &[PopoverItem] {
        &self.popover
    }

    /// Entries of the window section (everything before the app menu).
    pub fn window_items(&self) -> &[PopoverItem] {
        &self.popover[..self.app_menu_start.unwrap_or(self.popover.len())]
    }

    /// Entries appended from the application menu, empty when a native app menu is used.
    pub fn app_menu_items(&self) -> &[PopoverItem] {
        match self.app_menu_start {
            Some(start) => &self.popover[start..],
            None => &[],
        }
    }

    /// Append the fallback application-menu section at the end of the popover.
    ///
    /// Appending twice is ignored.
    pub fn append_app_menu(&mut self, items: impl IntoIterator<Item = PopoverItem>) {
        if self.app_menu_start.is_some() {
            log::debug!("App menu section already present in header bar popover");
            return;
        }
        self.app_menu_start = Some(self.popover.len());
        self.popover.extend(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_header_bar_is_windowed() {
        let bar = HeaderBar::new("a.md", "/tmp");
        assert!(bar.show_close_button());
        assert!(!bar.unfullscreen_visible());
        assert!(bar.app_menu_items().is_empty());
        assert_eq!(bar.window_items().len(), bar.popover_items().len());
    }

    #[test]
    fn test_app_menu_section_appended_once() {
        let mut bar = HeaderBar::new("a.md", "");
        let window_len = bar.window_items().len();
        bar.append_app_menu([PopoverItem::new("About", MenuAction::About)]);
        bar.append_app_menu([PopoverItem::new("Quit", MenuAction::Quit)]);

        assert_eq!(bar.window_items().len(), window_len);
        assert_eq!(bar.app_menu_items().len(), 1);
        assert_eq!(bar.app_menu_items()[0].action, "about");
    }
}
