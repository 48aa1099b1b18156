use eframe::egui;
use serde_json::Value;

use crate::display;
use crate::placement;

/// The subset of [`egui::Context`] the lifecycle manager drives. Tests
/// substitute a command-recording mock for the real context.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Receiver of forwarded suggestion payloads: the rendered content surface.
/// Payloads are opaque to the manager and handed over verbatim.
pub trait ContentSink {
    fn update_suggestion(&self, payload: &Value);
}

struct OverlayWindow<C> {
    ctx: C,
    visible: bool,
    position: (i32, i32),
}

/// Owns the single overlay window instance.
///
/// The overlay is either absent (no window, every operation but [`attach`] is
/// a no-op) or present, in which case it is hidden or visible. At most one
/// instance exists at any time; a second [`attach`] while present is ignored.
///
/// [`attach`]: OverlayManager::attach
pub struct OverlayManager<C: ViewportCtx> {
    window: Option<OverlayWindow<C>>,
}

impl<C: ViewportCtx> OverlayManager<C> {
    pub fn new() -> Self {
        Self { window: None }
    }

    pub fn is_present(&self) -> bool {
        self.window.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.visible)
    }

    /// Last position issued for the window, if one exists.
    pub fn position(&self) -> Option<(i32, i32)> {
        self.window.as_ref().map(|w| w.position)
    }

    /// Create the overlay if none exists: hidden, at the bottom-right default
    /// placement on the primary display. Called once at startup and again on
    /// reactivation after the user closed the window.
    pub fn attach(&mut self, ctx: C) {
        if self.window.is_some() {
            tracing::debug!("overlay already present; ignoring attach");
            return;
        }

        let area = display::primary_work_area();
        let position = placement::default_placement(area);
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
            position.0 as f32,
            position.1 as f32,
        )));
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
        tracing::debug!(x = position.0, y = position.1, "overlay attached");

        self.window = Some(OverlayWindow {
            ctx,
            visible: false,
            position,
        });
    }

    /// Forward the payload to the content surface, then reveal the overlay.
    pub fn show(&mut self, payload: &Value, content: &impl ContentSink) {
        if let Some(window) = self.window.as_mut() {
            content.update_suggestion(payload);
            window.ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
            window.ctx.request_repaint();
            window.visible = true;
        } else {
            tracing::debug!("show ignored; overlay absent");
        }
    }

    pub fn hide(&mut self) {
        match self.window.as_mut() {
            Some(window) if window.visible => {
                window
                    .ctx
                    .send_viewport_cmd(egui::ViewportCommand::Visible(false));
                window.visible = false;
            }
            Some(_) => tracing::trace!("hide ignored; overlay already hidden"),
            None => tracing::debug!("hide ignored; overlay absent"),
        }
    }

    /// Move the overlay next to `anchor`, clamped to the usable area of the
    /// display nearest that point. The work area is resolved per call, never
    /// cached.
    pub fn reposition(&mut self, anchor: (i32, i32)) {
        if let Some(window) = self.window.as_mut() {
            let area = display::work_area_at(anchor);
            let position = placement::place_near(anchor, area);
            window
                .ctx
                .send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                    position.0 as f32,
                    position.1 as f32,
                )));
            window.position = position;
        } else {
            tracing::debug!("reposition ignored; overlay absent");
        }
    }

    /// Drop the window reference after the user closed it. The overlay is not
    /// recreated until the next [`attach`](OverlayManager::attach).
    pub fn detach(&mut self) {
        if self.window.take().is_some() {
            tracing::debug!("overlay closed");
        }
    }
}

impl<C: ViewportCtx> Default for OverlayManager<C> {
    fn default() -> Self {
        Self::new()
    }
}
