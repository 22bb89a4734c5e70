use tokio::time::Duration;
use tracing::error;

use super::effects::Effect;
use super::ids::{self, classes};
use super::Document;
use crate::sanitize::sanitize_plain_text;

/// How long an error stays visible before the banner hides itself.
pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Shows `message` in the error banner and schedules it to hide again.
/// The message is always passed through the plain-text sanitizer first.
pub fn show_error(document: &mut Document, message: &str) {
    let message = sanitize_plain_text(message);

    let Some(container) = document.get_mut(ids::ERROR_CONTAINER) else {
        error!("Error: {}", message);
        return;
    };
    container.set_text(message);
    container.remove_class(classes::HIDDEN);

    document.schedule(
        ERROR_DISPLAY_DURATION,
        Effect::add_class(ids::ERROR_CONTAINER, classes::HIDDEN),
    );
}

/// Text currently shown by the error banner, if it is visible.
pub fn visible_error(document: &Document) -> Option<&str> {
    document
        .get(ids::ERROR_CONTAINER)
        .filter(|container| !container.is_hidden())
        .map(|container| container.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_error_is_shown_then_hidden() {
        let mut doc = Document::cover_letter_page();
        show_error(&mut doc, "Please upload your CV/resume file");

        assert_eq!(visible_error(&doc), Some("Please upload your CV/resume file"));

        tokio::time::advance(ERROR_DISPLAY_DURATION).await;
        doc.run_due_effects();
        assert_eq!(visible_error(&doc), None);
    }

    #[test]
    fn test_error_message_is_sanitized() {
        let mut doc = Document::cover_letter_page();
        show_error(&mut doc, "<img src=x onerror=alert(1)>Server <b>down</b>");

        assert_eq!(visible_error(&doc), Some("Server down"));
    }

    #[test]
    fn test_missing_container_does_not_panic() {
        let mut doc = Document::cover_letter_page();
        doc.remove(ids::ERROR_CONTAINER);

        show_error(&mut doc, "Network error: boom");
        assert_eq!(doc.pending_effects(), 0);
    }
}
