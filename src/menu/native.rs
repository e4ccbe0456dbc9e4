//! macOS global menu bar.

use super::{APP_MENU_ENTRIES, MenuAction};
use anyhow::Result;
use muda::{
    Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem, Submenu,
    accelerator::{Accelerator, Code, Modifiers},
};
use std::collections::HashMap;

/// Owns the native menu and maps its item ids back to actions.
pub struct MenuManager {
    /// Kept alive for as long as the menu is installed
    #[allow(dead_code)]
    menu: Menu,
    action_map: HashMap<MenuId, MenuAction>,
}

impl MenuManager {
    pub fn new() -> Result<Self> {
        let menu = Menu::new();
        let mut action_map = HashMap::new();
        let cmd = Modifiers::META;

        let mut item = |action: MenuAction, label: &str, accel: Option<Accelerator>| {
            let item = MenuItem::with_id(action.id(), label, true, accel);
            action_map.insert(item.id().clone(), action);
            item
        };

        // Application menu (first submenu is the app menu on macOS)
        let app_menu = Submenu::new("Marker", true);
        for (label, action) in APP_MENU_ENTRIES {
            let accel = match action {
                MenuAction::NewWindow => Some(Accelerator::new(Some(cmd), Code::KeyN)),
                MenuAction::Quit => Some(Accelerator::new(Some(cmd), Code::KeyQ)),
                _ => None,
            };
            if *action == MenuAction::Quit {
                app_menu.append(&PredefinedMenuItem::separator())?;
            }
            app_menu.append(&item(*action, *label, accel))?;
        }
        menu.append(&app_menu)?;

        // File menu
        let file_menu = Submenu::new("File", true);
        file_menu.append(&item(
            MenuAction::OpenFile,
            "Open…",
            Some(Accelerator::new(Some(cmd), Code::KeyO)),
        ))?;
        file_menu.append(&item(
            MenuAction::SaveFile,
            "Save",
            Some(Accelerator::new(Some(cmd), Code::KeyS)),
        ))?;
        file_menu.append(&item(
            MenuAction::SaveFileAs,
            "Save As…",
            Some(Accelerator::new(Some(cmd | Modifiers::SHIFT), Code::KeyS)),
        ))?;
        file_menu.append(&PredefinedMenuItem::separator())?;
        file_menu.append(&item(
            MenuAction::CloseWindow,
            "Close Window",
            Some(Accelerator::new(Some(cmd), Code::KeyW)),
        ))?;
        menu.append(&file_menu)?;

        // View menu
        let view_menu = Submenu::new("View", true);
        view_menu.append(&item(
            MenuAction::RefreshPreview,
            "Refresh Preview",
            Some(Accelerator::new(Some(cmd), Code::KeyR)),
        ))?;
        view_menu.append(&item(
            MenuAction::ToggleFullscreen,
            "Toggle Fullscreen",
            Some(Accelerator::new(Some(cmd | Modifiers::CONTROL), Code::KeyF)),
        ))?;
        menu.append(&view_menu)?;

        Ok(Self { menu, action_map })
    }

    /// Install as the global menu bar. Only needs to happen once per process.
    pub fn init(&self) {
        self.menu.init_for_nsapp();
        log::info!("Initialized macOS global menu bar");
    }

    /// Drain pending menu events, yielding the actions they map to.
    pub fn poll_events(&self) -> impl Iterator<Item = MenuAction> + '_ {
        std::iter::from_fn(|| match MenuEvent::receiver().try_recv() {
            Ok(event) => Some(self.action_map.get(&event.id).copied()),
            Err(_) => None,
        })
        .flatten()
    }
}
