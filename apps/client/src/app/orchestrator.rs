//! Submission Orchestrator: handles the submit event of the cover letter form.
//!
//! Loading state is entered once at the start and always restored once at
//! the end, whichever branch the attempt took.

use tracing::{debug, error, info};

use crate::errors::PageError;
use crate::form::mode_toggle::{selected_mode, JobDescriptionMode};
use crate::form::submission::{FormSubmission, IncompleteSubmission};
use crate::form::validation::validate_form;
use crate::page::form_data::{FormData, FormValue};
use crate::page::ids::{self, attributes, classes};
use crate::page::notify::show_error;
use crate::page::Document;
use crate::service::CoverLetterService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The editor now holds a letter of `length` bytes.
    Generated { length: usize },
    /// Client-side checks failed; no request was made.
    Rejected { reason: String },
    /// The request failed or the server answered with a non-2xx status.
    Failed { reason: String },
    /// A submission is already in flight.
    Ignored,
}

pub async fn submit(
    document: &mut Document,
    service: &dyn CoverLetterService,
) -> Result<SubmissionOutcome, PageError> {
    if document.element(ids::GENERATE_BTN)?.is_disabled() {
        debug!("Submit ignored: a submission is already in progress");
        return Ok(SubmissionOutcome::Ignored);
    }
    document.element(ids::COVER_LETTER_LOADING)?;

    begin_loading(document);
    let outcome = run_submission(document, service).await;
    end_loading(document);

    outcome
}

async fn run_submission(
    document: &mut Document,
    service: &dyn CoverLetterService,
) -> Result<SubmissionOutcome, PageError> {
    let mode = selected_mode(document)?;
    let mut form_data = document.form_data(ids::COVER_LETTER_FORM)?;
    debug!(
        mode = %mode,
        fields = ?form_data.iter().map(|(name, _)| name).collect::<Vec<_>>(),
        "Collected form data"
    );

    if let Err(missing) = enforce_mode(&mut form_data, mode) {
        return Ok(reject(document, missing.to_string()));
    }

    let validation = validate_form(&form_data);
    if !validation.is_valid {
        return Ok(reject(document, validation.error_message));
    }

    let submission = match FormSubmission::from_form_data(&form_data, mode) {
        Ok(submission) => submission,
        Err(incomplete) => return Ok(reject(document, incomplete.to_string())),
    };

    match service.generate(&submission).await {
        Ok(letter) => {
            let length = letter.len();
            // plain text field: the value is never interpreted as markup
            document
                .element_mut(ids::COVER_LETTER_EDITOR)?
                .set_value(letter);
            info!("Cover letter generated ({} characters)", length);
            Ok(SubmissionOutcome::Generated { length })
        }
        Err(err) => {
            let reason = format!("Network error: {err}");
            error!("Cover letter request failed: {}", err);
            show_error(document, &reason);
            Ok(SubmissionOutcome::Failed { reason })
        }
    }
}

/// Drops the inactive mode's field from the payload, then checks that the
/// active one is filled in.
fn enforce_mode(
    form_data: &mut FormData,
    mode: JobDescriptionMode,
) -> Result<(), IncompleteSubmission> {
    match mode {
        JobDescriptionMode::Text => {
            form_data.delete(ids::JOB_DESC_IMAGE);
            let filled = form_data
                .get_text(ids::JOB_DESC_TEXT)
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false);
            if !filled {
                return Err(IncompleteSubmission::MissingText);
            }
        }
        JobDescriptionMode::Image => {
            form_data.set(ids::JOB_DESC_TEXT, FormValue::Text(String::new()));
            let filled = form_data
                .get_file(ids::JOB_DESC_IMAGE)
                .map(|file| !file.is_empty())
                .unwrap_or(false);
            if !filled {
                return Err(IncompleteSubmission::MissingImage);
            }
        }
    }
    Ok(())
}

fn reject(document: &mut Document, reason: String) -> SubmissionOutcome {
    debug!("Submission rejected: {}", reason);
    show_error(document, &reason);
    SubmissionOutcome::Rejected { reason }
}

fn begin_loading(document: &mut Document) {
    if let Some(loading) = document.get_mut(ids::COVER_LETTER_LOADING) {
        loading.set_hidden(false);
    }
    if let Some(button) = document.get_mut(ids::GENERATE_BTN) {
        button.add_class(classes::LOADING);
        button.set_attribute(attributes::ARIA_BUSY, "true");
        button.set_disabled(true);
    }
}

fn end_loading(document: &mut Document) {
    if let Some(loading) = document.get_mut(ids::COVER_LETTER_LOADING) {
        loading.set_hidden(true);
    }
    if let Some(button) = document.get_mut(ids::GENERATE_BTN) {
        button.remove_class(classes::LOADING);
        button.remove_attribute(attributes::ARIA_BUSY);
        button.set_disabled(false);
    }
}
