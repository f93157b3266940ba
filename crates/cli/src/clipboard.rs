//! Clipboard effect execution for the terminal shell.
//!
//! The engine's presenter only emits effects; the ambient clipboard write
//! happens here, at the shell boundary.

use fleetdeck_types::Effect;
use tracing::warn;

/// Applies one engine-emitted effect.
pub fn apply_effect(effect: Effect) {
    match effect {
        Effect::CopyToClipboardRequested(text) => execute_clipboard_set(text),
    }
}

fn execute_clipboard_set(text: String) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => {}
        Err(error) => {
            warn!("clipboard error: {}", error);
        }
    }
}
