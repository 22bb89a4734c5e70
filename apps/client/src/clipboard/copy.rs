use tokio::time::Duration;
use tracing::{debug, warn};

use super::{ClipboardBackend, ClipboardBackends};
use crate::page::effects::Effect;
use crate::page::ids::{self, classes};
use crate::page::notify::show_error;
use crate::page::Document;

/// How long the copy button shows its success state.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(1);
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Nothing to copy; no backend was called.
    Skipped,
    Copied { backend: &'static str },
    Failed,
}

/// Click handler of the copy button.
///
/// Tries the primary backend, then the fallback. Both are optional: an
/// absent backend counts as a failed one.
pub async fn copy_output(document: &mut Document, backends: &ClipboardBackends) -> CopyOutcome {
    let Some(editor) = document.get(ids::COVER_LETTER_EDITOR) else {
        warn!("Cover letter editor not found in the document");
        return CopyOutcome::Skipped;
    };
    let text = editor.value().to_string();
    if text.trim().is_empty() {
        debug!("Nothing to copy");
        return CopyOutcome::Skipped;
    }

    for backend in [&backends.primary, &backends.fallback].into_iter().flatten() {
        if let Some(name) = try_backend(backend.as_ref(), &text).await {
            flash_success(document);
            return CopyOutcome::Copied { backend: name };
        }
    }

    show_error(document, COPY_FAILED_MESSAGE);
    CopyOutcome::Failed
}

async fn try_backend(backend: &dyn ClipboardBackend, text: &str) -> Option<&'static str> {
    match backend.write_text(text).await {
        Ok(()) => {
            debug!("Copied {} characters via {}", text.len(), backend.name());
            Some(backend.name())
        }
        Err(e) => {
            warn!("Clipboard backend {} failed: {}", backend.name(), e);
            None
        }
    }
}

fn flash_success(document: &mut Document) {
    let Some(button) = document.get_mut(ids::COPY_BTN) else {
        warn!("Copy button element not found in the document");
        return;
    };
    button.add_class(classes::BTN_SUCCESS);
    document.schedule(
        COPY_FEEDBACK_DURATION,
        Effect::remove_class(ids::COPY_BTN, classes::BTN_SUCCESS),
    );
}
