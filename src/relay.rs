use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::overlay::{ContentSink, OverlayManager, ViewportCtx};

/// Inbound signals accepted from the watcher process, one JSON object per
/// line on the wire: `{"signal": "...", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", content = "payload", rename_all = "kebab-case")]
pub enum Signal {
    /// Suggestion data for the content surface; opaque to the relay.
    ShowSuggestion(Value),
    HideOverlay,
    /// Corrected text accepted by the user, relayed back to the watcher
    /// which performs the actual text replacement.
    ApplyCorrection(String),
    /// Last known cursor/text position in screen coordinates.
    UpdatePosition { x: i32, y: i32 },
}

/// Notification seam towards the external watcher process.
pub trait WatcherLink {
    fn correction_applied(&self, text: &str);
}

/// Route one inbound signal to the lifecycle manager or the watcher
/// pass-through. Fire-and-forget: no signal produces a result, and signals
/// against an absent overlay degrade to no-ops inside the manager.
pub fn dispatch<C: ViewportCtx>(
    signal: Signal,
    overlay: &mut OverlayManager<C>,
    content: &impl ContentSink,
    watcher: &impl WatcherLink,
) {
    match signal {
        Signal::ShowSuggestion(payload) => overlay.show(&payload, content),
        Signal::HideOverlay => overlay.hide(),
        Signal::ApplyCorrection(text) => {
            tracing::info!(text = %text, "correction accepted; notifying watcher");
            watcher.correction_applied(&text);
        }
        Signal::UpdatePosition { x, y } => overlay.reposition((x, y)),
    }
}
