//! `ApplicationHandler` impl for `WindowManager`.

use crate::app::window_manager::WindowManager;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

impl ApplicationHandler for WindowManager {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // First resume: menu plus the windows asked for on the command line
        if let Some(files) = self.initial_files.take() {
            self.init_menu();
            if files.is_empty() {
                self.create_window(event_loop, None);
            }
            for file in files {
                self.create_window(event_loop, Some(file));
            }
        }
        if self.windows.is_empty() {
            // Nothing could be created
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::Focused(true) = event {
            self.focused = Some(window_id);
        }

        let should_close = match self.windows.get_mut(&window_id) {
            Some(window) => window.handle_window_event(event),
            None => false,
        };
        if should_close {
            self.close_window(window_id);
        }

        self.process_requests(event_loop);
        if self.should_exit {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.process_menu_events(event_loop);
        self.process_requests(event_loop);
        if self.should_exit {
            event_loop.exit();
        }
    }
}
