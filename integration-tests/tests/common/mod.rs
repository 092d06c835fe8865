//! Shared helpers for diffpad integration tests.
//!
//! Provides settings presets, a controller wired to a debounce channel, and
//! clipboard doubles that record or reject writes.

#![allow(dead_code)]

use async_trait::async_trait;
use diffpad_core::clipboard::{Clipboard, ClipboardError};
use diffpad_core::config::Settings;
use diffpad_core::debounce::Ticket;
use diffpad_core::{ComparisonController, PaneSide};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Default settings with live updates switched as requested.
pub fn settings(live: bool) -> Settings {
    let mut settings = Settings::default();
    settings.ui.live_updates = live;
    settings
}

/// A controller with live updates off.
pub fn manual_controller() -> ComparisonController {
    ComparisonController::new(&settings(false)).expect("default language is in the catalog")
}

/// A live controller whose debounce tickets arrive on the returned receiver.
pub fn live_controller() -> (ComparisonController, UnboundedReceiver<Ticket>) {
    let mut controller =
        ComparisonController::new(&settings(true)).expect("default language is in the catalog");
    let (tx, rx) = mpsc::unbounded_channel();
    controller.attach_debouncer(tx);
    (controller, rx)
}

/// Replaces the text of a pane through the controller.
pub fn set_text(controller: &mut ComparisonController, side: PaneSide, text: &str) {
    controller.edit(side, |pane| pane.set_text(text));
}

/// Feeds every delivered ticket to the controller; returns how many ran.
pub fn drain_ticks(
    controller: &mut ComparisonController,
    ticks: &mut UnboundedReceiver<Ticket>,
) -> usize {
    let mut ran = 0;
    while let Ok(ticket) = ticks.try_recv() {
        if controller.handle_tick(ticket).is_some() {
            ran += 1;
        }
    }
    ran
}

/// Debounce window of the default settings.
pub fn debounce() -> Duration {
    Settings::default().ui.debounce()
}

/// Clipboard that rejects every write.
pub struct FailingClipboard;

#[async_trait]
impl Clipboard for FailingClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Write("permission denied".to_string()))
    }
}

/// Clipboard that keeps everything written to it.
#[derive(Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    /// Texts written so far, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().push(text.to_string());
        Ok(())
    }
}
