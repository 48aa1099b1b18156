use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use eframe::egui;
use serde_json::Value;

use crate::overlay::{ContentSink, OverlayManager};
use crate::relay::{self, Signal};
use crate::server::WatcherHub;

/// The rendered content surface: holds the most recently forwarded
/// suggestion payload and draws it. The relay hands payloads over verbatim;
/// only this view inspects them, and only loosely.
#[derive(Clone, Default)]
pub struct SuggestionView {
    current: Arc<Mutex<Option<Value>>>,
}

impl SuggestionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Value> {
        self.current.lock().unwrap().clone()
    }

    /// Best-effort corrected text for the Apply control.
    fn corrected_text(payload: &Value) -> Option<String> {
        ["corrected", "rewritten_text", "suggestion"]
            .iter()
            .find_map(|key| payload.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn original_text(payload: &Value) -> Option<String> {
        ["original", "input", "text"]
            .iter()
            .find_map(|key| payload.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

impl ContentSink for SuggestionView {
    fn update_suggestion(&self, payload: &Value) {
        *self.current.lock().unwrap() = Some(payload.clone());
    }
}

pub struct OverlayApp {
    rx: Receiver<Signal>,
    tx: Sender<Signal>,
    overlay: OverlayManager<egui::Context>,
    view: SuggestionView,
    hub: WatcherHub,
}

impl OverlayApp {
    pub fn new(
        ctx: egui::Context,
        rx: Receiver<Signal>,
        tx: Sender<Signal>,
        hub: WatcherHub,
    ) -> Self {
        let mut overlay = OverlayManager::new();
        overlay.attach(ctx);
        Self {
            rx,
            tx,
            overlay,
            view: SuggestionView::new(),
            hub,
        }
    }

    fn suggestion_ui(&self, ui: &mut egui::Ui) {
        match self.view.current() {
            Some(payload) => {
                if let Some(original) = SuggestionView::original_text(&payload) {
                    ui.label(egui::RichText::new(original).weak());
                    ui.separator();
                }
                if let Some(corrected) = SuggestionView::corrected_text(&payload) {
                    ui.label(egui::RichText::new(&corrected).strong());
                    if ui.button("Apply").clicked() {
                        let _ = self.tx.send(Signal::ApplyCorrection(corrected));
                    }
                } else {
                    // Payload without a recognised text field; show it raw.
                    ui.monospace(payload.to_string());
                }
            }
            None => {
                ui.label(egui::RichText::new("No suggestion yet").weak());
            }
        }
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Keep the window background transparent; only the panel frame paints.
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.overlay.detach();
        }

        // Signals queue on the channel in arrival order; everything that
        // mutates the overlay happens here, on the one GUI thread.
        while let Ok(signal) = self.rx.try_recv() {
            relay::dispatch(signal, &mut self.overlay, &self.view, &self.hub);
        }

        let panel_frame = egui::Frame::none()
            .fill(egui::Color32::from_black_alpha(200))
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::same(12.0));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                self.suggestion_ui(ui);
            });
    }
}
