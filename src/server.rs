use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

use eframe::egui;

use crate::relay::{Signal, WatcherLink};

/// Handle to the GUI context once the window exists. Reader threads use it to
/// wake the event loop after queueing a signal; before the window is up it
/// holds `None` and queued signals are drained on the first frame.
pub type CtxHandle = Arc<Mutex<Option<egui::Context>>>;

/// Write halves of connected watcher processes, used to deliver the
/// `apply-correction` pass-through notice.
#[derive(Clone, Default)]
pub struct WatcherHub {
    peers: Arc<Mutex<Vec<TcpStream>>>,
}

impl WatcherHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peer_count(&self) -> usize {
        self.peers.lock().unwrap().len()
    }

    fn register(&self, stream: TcpStream) {
        self.peers.lock().unwrap().push(stream);
    }
}

impl WatcherLink for WatcherHub {
    fn correction_applied(&self, text: &str) {
        let notice = serde_json::json!({ "event": "correction-applied", "text": text });
        let line = format!("{notice}\n");
        let mut peers = self.peers.lock().unwrap();
        peers.retain_mut(|peer| match peer.write_all(line.as_bytes()) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "dropping dead watcher connection");
                false
            }
        });
    }
}

/// Bind the watcher signal socket and start accepting connections. Each
/// connection gets its own reader thread; all of them funnel into the single
/// `tx` channel, so signals keep their per-connection arrival order. Returns
/// the bound address so an OS-assigned port can be reported.
pub fn spawn_listener(
    addr: &str,
    tx: Sender<Signal>,
    hub: WatcherHub,
    ctx_handle: CtxHandle,
) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind(addr)?;
    let local_addr = listener.local_addr()?;

    thread::spawn(move || {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Ok(writer) = stream.try_clone() {
                        hub.register(writer);
                    }
                    let tx = tx.clone();
                    let ctx_handle = ctx_handle.clone();
                    thread::spawn(move || read_signals(stream, tx, ctx_handle));
                }
                Err(e) => tracing::warn!(error = %e, "failed to accept watcher connection"),
            }
        }
    });

    Ok(local_addr)
}

fn read_signals(stream: TcpStream, tx: Sender<Signal>, ctx_handle: CtxHandle) {
    if let Ok(peer) = stream.peer_addr() {
        tracing::info!(%peer, "watcher connected");
    }

    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "watcher stream error");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Signal>(&line) {
            Ok(signal) => {
                if tx.send(signal).is_err() {
                    // GUI side is gone; nothing left to deliver to.
                    break;
                }
                if let Some(ctx) = ctx_handle.lock().unwrap().as_ref() {
                    ctx.request_repaint();
                }
            }
            Err(e) => tracing::warn!(error = %e, line = %line, "ignoring malformed signal"),
        }
    }

    tracing::info!("watcher disconnected");
}
