#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use eframe::egui;

use fluenter_overlay::gui::OverlayApp;
use fluenter_overlay::placement::{self, OVERLAY_HEIGHT, OVERLAY_WIDTH};
use fluenter_overlay::server::{self, CtxHandle, WatcherHub};
use fluenter_overlay::settings::Settings;
use fluenter_overlay::{display, logging};

const SETTINGS_FILE: &str = "settings.json";

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    let _log_guard = logging::init(settings.debug_logging, &settings.log_dir);

    let (tx, rx) = mpsc::channel();
    let ctx_handle: CtxHandle = Arc::new(Mutex::new(None));
    let hub = WatcherHub::new();
    let addr = server::spawn_listener(
        &settings.listen_addr,
        tx.clone(),
        hub.clone(),
        ctx_handle.clone(),
    )?;
    tracing::info!(%addr, "listening for watcher signals");

    let (x, y) = placement::default_placement(display::primary_work_area());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([OVERLAY_WIDTH as f32, OVERLAY_HEIGHT as f32])
            .with_position(egui::pos2(x as f32, y as f32))
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_resizable(false)
            .with_visible(false),
        ..Default::default()
    };

    eframe::run_native(
        "Fluenter",
        native_options,
        Box::new(move |cc| {
            *ctx_handle.lock().unwrap() = Some(cc.egui_ctx.clone());
            Box::new(OverlayApp::new(cc.egui_ctx.clone(), rx, tx, hub))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run overlay window: {e}"))?;

    Ok(())
}
