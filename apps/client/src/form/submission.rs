use thiserror::Error;

use crate::form::mode_toggle::JobDescriptionMode;
use crate::form::validation::{parse_word_limit, InvalidWordLimit, MISSING_CV_MESSAGE};
use crate::page::form_data::{FormData, UploadedFile};
use crate::page::ids;

/// The job description carried by a submission. Exactly one form is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobDescription {
    Text(String),
    Image(UploadedFile),
}

impl JobDescription {
    pub fn mode(&self) -> JobDescriptionMode {
        match self {
            JobDescription::Text(_) => JobDescriptionMode::Text,
            JobDescription::Image(_) => JobDescriptionMode::Image,
        }
    }
}

/// Payload sent to the generation service. Created on submit and dropped
/// once the request resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub cv_file: UploadedFile,
    pub job_description: JobDescription,
    pub company_name: Option<String>,
    pub word_limit: Option<u16>,
}

#[derive(Debug, Error)]
pub enum IncompleteSubmission {
    #[error("{}", MISSING_CV_MESSAGE)]
    MissingCv,

    #[error("Please enter a job description text")]
    MissingText,

    #[error("Please upload a job description image")]
    MissingImage,

    #[error(transparent)]
    WordLimit(#[from] InvalidWordLimit),
}

impl FormSubmission {
    /// Builds the payload for `mode` from form data. Only the field of the
    /// active mode is read, so the other one can never leak into the request.
    pub fn from_form_data(
        form_data: &FormData,
        mode: JobDescriptionMode,
    ) -> Result<Self, IncompleteSubmission> {
        let cv_file = form_data
            .get_file(ids::CV_FILE)
            .filter(|file| !file.is_empty())
            .cloned()
            .ok_or(IncompleteSubmission::MissingCv)?;

        let job_description = match mode {
            JobDescriptionMode::Text => form_data
                .get_text(ids::JOB_DESC_TEXT)
                .filter(|text| !text.trim().is_empty())
                .map(|text| JobDescription::Text(text.to_string()))
                .ok_or(IncompleteSubmission::MissingText)?,
            JobDescriptionMode::Image => form_data
                .get_file(ids::JOB_DESC_IMAGE)
                .filter(|file| !file.is_empty())
                .cloned()
                .map(JobDescription::Image)
                .ok_or(IncompleteSubmission::MissingImage)?,
        };

        let company_name = form_data
            .get_text(ids::COMPANY_NAME)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let word_limit = match form_data.get_text(ids::WORD_LIMIT) {
            Some(raw) => parse_word_limit(raw)?,
            None => None,
        };

        Ok(Self {
            cv_file,
            job_description,
            company_name,
            word_limit,
        })
    }

    pub fn job_desc_type(&self) -> JobDescriptionMode {
        self.job_description.mode()
    }
}
