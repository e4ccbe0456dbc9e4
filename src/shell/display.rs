//! Display-mode requests the shell makes of the windowing system.

use std::sync::Arc;
use winit::window::{Fullscreen, Window};

/// Requests fullscreen or windowed presentation of the host window.
pub trait DisplayControl {
    fn request_fullscreen(&self, fullscreen: bool);
}

/// [`DisplayControl`] for a winit window, using borderless fullscreen on the
/// window's current monitor.
pub struct WinitDisplay {
    window: Arc<Window>,
}

impl WinitDisplay {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl DisplayControl for WinitDisplay {
    fn request_fullscreen(&self, fullscreen: bool) {
        if fullscreen {
            self.window
                .set_fullscreen(Some(Fullscreen::Borderless(None)));
            log::info!("Entering fullscreen mode");
        } else {
            self.window.set_fullscreen(None);
            log::info!("Exiting fullscreen mode");
        }
        self.window.request_redraw();
    }
}
