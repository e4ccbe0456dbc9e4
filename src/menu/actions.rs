//! Menu action definitions for marker
//!
//! A `MenuAction` is what a native menu item, a gear-popover entry or a
//! fallback app-menu action resolves to.

/// Actions that can be triggered from the menu system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    // Application menu
    /// Open another empty window
    NewWindow,
    /// Show the keyboard shortcuts overlay
    ShowShortcuts,
    /// Show the about overlay
    About,
    /// Close every window and exit
    Quit,

    // Window
    /// Choose a file and open it in a new window
    OpenFile,
    /// Save the active editor (runs save-as when untitled)
    SaveFile,
    /// Choose a path and save the active editor there
    SaveFileAs,
    /// Re-render the editor preview
    RefreshPreview,
    /// Enter or leave fullscreen
    ToggleFullscreen,
    /// Leave fullscreen; ignored when windowed
    ExitFullscreen,
    /// Close the current window
    CloseWindow,
}

impl MenuAction {
    /// Identifier used in action maps and native menu item ids.
    pub fn id(self) -> &'static str {
        match self {
            Self::NewWindow => "new_window",
            Self::ShowShortcuts => "shortcuts",
            Self::About => "about",
            Self::Quit => "quit",
            Self::OpenFile => "open_file",
            Self::SaveFile => "save_file",
            Self::SaveFileAs => "save_file_as",
            Self::RefreshPreview => "refresh_preview",
            Self::ToggleFullscreen => "toggle_fullscreen",
            Self::ExitFullscreen => "exit_fullscreen",
            Self::CloseWindow => "close_window",
        }
    }
}
