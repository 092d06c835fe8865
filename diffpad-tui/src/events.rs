use diffpad_core::PaneSide;
use diffpad_core::clipboard::ClipboardError;

/// Results of background work, delivered to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A clipboard write for a pane completed.
    CopyFinished {
        /// Pane that was copied.
        side: PaneSide,
        /// Outcome of the write.
        result: Result<(), ClipboardError>,
    },
}
