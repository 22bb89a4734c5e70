//! Page controller: owns the document and routes page events to their
//! handlers, one event at a time.

pub mod orchestrator;

use std::sync::Arc;

use tracing::{debug, info};

use crate::clipboard::{copy_output, ClipboardBackends, CopyOutcome};
use crate::errors::PageError;
use crate::form::mode_toggle::{sync_mode, JobDescriptionMode};
use crate::page::{ids, Document};
use crate::service::CoverLetterService;

pub use orchestrator::SubmissionOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Change { target: String },
    Submit { form: String },
    Click { target: String },
}

impl PageEvent {
    pub fn change(target: &str) -> Self {
        PageEvent::Change {
            target: target.to_string(),
        }
    }

    pub fn submit(form: &str) -> Self {
        PageEvent::Submit {
            form: form.to_string(),
        }
    }

    pub fn click(target: &str) -> Self {
        PageEvent::Click {
            target: target.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// No handler is bound to the event target.
    Ignored,
    ModeChanged(JobDescriptionMode),
    Submitted(SubmissionOutcome),
    Copied(CopyOutcome),
}

pub struct App {
    document: Document,
    service: Arc<dyn CoverLetterService>,
    clipboard: ClipboardBackends,
}

impl App {
    /// Wires the handlers to `document` and applies the initially selected
    /// job description mode.
    pub fn load(
        mut document: Document,
        service: Arc<dyn CoverLetterService>,
        clipboard: ClipboardBackends,
    ) -> Result<Self, PageError> {
        let mode = sync_mode(&mut document)?;
        info!("Cover letter page ready (job description mode: {})", mode);

        Ok(Self {
            document,
            service,
            clipboard,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    #[cfg(test)]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub async fn dispatch(&mut self, event: PageEvent) -> Result<EventOutcome, PageError> {
        let expired = self.document.run_due_effects();
        if expired > 0 {
            debug!("Applied {} expired page effects", expired);
        }

        match event {
            PageEvent::Change { target }
                if target == ids::JOB_DESC_TYPE_TEXT || target == ids::JOB_DESC_TYPE_IMAGE =>
            {
                self.document.check(&target)?;
                let mode = sync_mode(&mut self.document)?;
                debug!("Job description mode switched to {}", mode);
                Ok(EventOutcome::ModeChanged(mode))
            }
            PageEvent::Submit { form } if form == ids::COVER_LETTER_FORM => {
                let outcome =
                    orchestrator::submit(&mut self.document, self.service.as_ref()).await?;
                Ok(EventOutcome::Submitted(outcome))
            }
            PageEvent::Click { target } if target == ids::COPY_BTN => {
                let outcome = copy_output(&mut self.document, &self.clipboard).await;
                Ok(EventOutcome::Copied(outcome))
            }
            other => {
                debug!("No handler for {:?}", other);
                Ok(EventOutcome::Ignored)
            }
        }
    }
}
