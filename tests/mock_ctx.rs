use eframe::egui;
use std::sync::{Arc, Mutex};

/// Viewport-command recorder standing in for [`egui::Context`] in tests.
#[derive(Clone, Default)]
pub struct MockCtx {
    pub commands: Arc<Mutex<Vec<egui::ViewportCommand>>>,
}

impl fluenter_overlay::overlay::ViewportCtx for MockCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        self.commands.lock().unwrap().push(cmd);
    }

    fn request_repaint(&self) {}
}
