//! Per-field copy actions.
//!
//! Copying never fails the caller: a broken clipboard only means the
//! "copied" indicator does not light up.

use crate::error::{AppError, Result};
use crate::view::{CopyField, ListingView};
use std::time::{Duration, Instant};

/// How long a field is shown as copied.
pub const COPIED_INDICATOR: Duration = Duration::from_secs(2);

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<()>;
}

/// The system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| AppError::clipboard(format!("Could not access clipboard: {}", e)))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        self.inner
            .set_text(text)
            .map_err(|e| AppError::clipboard(format!("Failed to copy to clipboard: {}", e)))
    }
}

/// Tracks the most recently copied field.
#[derive(Debug, Default)]
pub struct CopyIndicator {
    last: Option<(CopyField, Instant)>,
}

impl CopyIndicator {
    /// Copies `field` into `sink` and lights the indicator on success.
    ///
    /// Returns whether the copy went through.
    pub fn copy(&mut self, sink: &mut dyn ClipboardSink, view: &ListingView<'_>, field: CopyField) -> bool {
        self.copy_at(sink, view, field, Instant::now())
    }

    pub fn copy_at(
        &mut self,
        sink: &mut dyn ClipboardSink,
        view: &ListingView<'_>,
        field: CopyField,
        now: Instant,
    ) -> bool {
        match sink.set_text(view.copy_text(field)) {
            Ok(()) => {
                self.last = Some((field, now));
                true
            }
            Err(e) => {
                tracing::warn!(field = field.label(), error = %e, "Copy failed");
                false
            }
        }
    }

    pub fn is_copied(&self, field: CopyField, now: Instant) -> bool {
        matches!(self.last, Some((copied, at)) if copied == field && now.saturating_duration_since(at) < COPIED_INDICATOR)
    }
}
