//! Mode Toggle: keeps the job description inputs consistent with the
//! `job_desc_type` radio group.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::errors::PageError;
use crate::page::ids;
use crate::page::Document;

/// How the job description is provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobDescriptionMode {
    Text,
    Image,
}

impl JobDescriptionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            JobDescriptionMode::Text => "text",
            JobDescriptionMode::Image => "image",
        }
    }

    /// Id of the radio button selecting this mode.
    pub fn radio_id(self) -> &'static str {
        match self {
            JobDescriptionMode::Text => ids::JOB_DESC_TYPE_TEXT,
            JobDescriptionMode::Image => ids::JOB_DESC_TYPE_IMAGE,
        }
    }

    fn input_id(self) -> &'static str {
        match self {
            JobDescriptionMode::Text => ids::JOB_DESC_TEXT,
            JobDescriptionMode::Image => ids::JOB_DESC_IMAGE,
        }
    }

    fn container_id(self) -> &'static str {
        match self {
            JobDescriptionMode::Text => ids::JOB_DESC_TEXT_CONTAINER,
            JobDescriptionMode::Image => ids::JOB_DESC_IMAGE_CONTAINER,
        }
    }

    fn other(self) -> Self {
        match self {
            JobDescriptionMode::Text => JobDescriptionMode::Image,
            JobDescriptionMode::Image => JobDescriptionMode::Text,
        }
    }
}

impl FromStr for JobDescriptionMode {
    type Err = PageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(JobDescriptionMode::Text),
            "image" => Ok(JobDescriptionMode::Image),
            other => Err(PageError::InvalidValue {
                field: ids::JOB_DESC_TYPE.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for JobDescriptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the mode from the checked radio. Never assumes a default.
pub fn selected_mode(document: &Document) -> Result<JobDescriptionMode, PageError> {
    document
        .checked_value(ids::JOB_DESC_TYPE)
        .ok_or_else(|| PageError::NothingChecked(ids::JOB_DESC_TYPE.to_string()))?
        .parse()
}

/// Shows and requires the input of `mode`, hides and un-requires the other.
/// All four elements are looked up before anything is mutated.
pub fn apply_mode(document: &mut Document, mode: JobDescriptionMode) -> Result<(), PageError> {
    let inactive = mode.other();
    for id in [
        mode.container_id(),
        mode.input_id(),
        inactive.container_id(),
        inactive.input_id(),
    ] {
        document.element(id)?;
    }

    document.element_mut(mode.container_id())?.set_hidden(false);
    document.element_mut(inactive.container_id())?.set_hidden(true);
    document.element_mut(mode.input_id())?.set_required(true);
    document.element_mut(inactive.input_id())?.set_required(false);

    debug!("Job description mode set to {}", mode);
    Ok(())
}

/// Change handler of the radio group: re-applies the checked mode.
pub fn sync_mode(document: &mut Document) -> Result<JobDescriptionMode, PageError> {
    let mode = selected_mode(document)?;
    apply_mode(document, mode)?;
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exactly_one_active(doc: &Document, mode: JobDescriptionMode) {
        let active_input = doc.element(mode.input_id()).unwrap();
        let active_container = doc.element(mode.container_id()).unwrap();
        let other_input = doc.element(mode.other().input_id()).unwrap();
        let other_container = doc.element(mode.other().container_id()).unwrap();

        assert!(active_input.is_required());
        assert!(!active_container.is_hidden());
        assert!(!other_input.is_required());
        assert!(other_container.is_hidden());
    }

    #[test]
    fn test_initial_state_follows_default_radio() {
        let mut doc = Document::cover_letter_page();
        assert_eq!(sync_mode(&mut doc).unwrap(), JobDescriptionMode::Text);
        assert_exactly_one_active(&doc, JobDescriptionMode::Text);
    }

    #[test]
    fn test_initial_state_respects_image_default() {
        let mut doc = Document::cover_letter_page();
        doc.check(ids::JOB_DESC_TYPE_IMAGE).unwrap();

        assert_eq!(sync_mode(&mut doc).unwrap(), JobDescriptionMode::Image);
        assert_exactly_one_active(&doc, JobDescriptionMode::Image);
    }

    #[test]
    fn test_toggling_back_and_forth_keeps_invariant() {
        let mut doc = Document::cover_letter_page();
        for mode in [
            JobDescriptionMode::Image,
            JobDescriptionMode::Text,
            JobDescriptionMode::Image,
            JobDescriptionMode::Image,
            JobDescriptionMode::Text,
        ] {
            doc.check(mode.radio_id()).unwrap();
            assert_eq!(sync_mode(&mut doc).unwrap(), mode);
            assert_exactly_one_active(&doc, mode);
        }
    }

    #[test]
    fn test_no_checked_radio_is_an_error() {
        let mut doc = Document::cover_letter_page();
        doc.remove(ids::JOB_DESC_TYPE_TEXT);

        assert!(matches!(sync_mode(&mut doc), Err(PageError::NothingChecked(_))));
    }

    #[test]
    fn test_missing_element_leaves_page_untouched() {
        let mut doc = Document::cover_letter_page();
        doc.remove(ids::JOB_DESC_IMAGE);

        let result = apply_mode(&mut doc, JobDescriptionMode::Image);
        assert!(matches!(result, Err(PageError::MissingElement(_))));
        assert!(doc.element(ids::JOB_DESC_IMAGE_CONTAINER).unwrap().is_hidden());
        assert!(!doc.element(ids::JOB_DESC_TEXT_CONTAINER).unwrap().is_hidden());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("text".parse::<JobDescriptionMode>().unwrap(), JobDescriptionMode::Text);
        assert_eq!("image".parse::<JobDescriptionMode>().unwrap(), JobDescriptionMode::Image);
        assert!("video".parse::<JobDescriptionMode>().is_err());
    }
}
