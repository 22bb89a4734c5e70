use std::ops::RangeInclusive;

use thiserror::Error;

use crate::page::form_data::FormData;
use crate::page::ids;

pub const MISSING_CV_MESSAGE: &str = "Please upload your CV/resume file";
pub const MISSING_JOB_DESCRIPTION_MESSAGE: &str =
    "Please provide either job description text or image";
pub const WORD_LIMIT_MESSAGE: &str = "Word limit must be between 250 and 400 words";

/// Word limits accepted by the generation service.
pub const WORD_LIMIT_RANGE: RangeInclusive<u16> = 250..=400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", WORD_LIMIT_MESSAGE)]
pub struct InvalidWordLimit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: String,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: String::new(),
        }
    }

    fn invalid(message: &str) -> Self {
        Self {
            is_valid: false,
            error_message: message.to_string(),
        }
    }
}

/// Validates submitted form fields. Rules run in order and the first
/// failure wins:
///
/// 1. a non-empty résumé file
/// 2. non-blank job description text, or a non-empty job description image
/// 3. when present, a word limit within [`WORD_LIMIT_RANGE`]
pub fn validate_form(form_data: &FormData) -> ValidationResult {
    let has_cv = form_data
        .get_file(ids::CV_FILE)
        .map(|file| !file.is_empty())
        .unwrap_or(false);
    if !has_cv {
        return ValidationResult::invalid(MISSING_CV_MESSAGE);
    }

    let has_text = form_data
        .get_text(ids::JOB_DESC_TEXT)
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false);
    let has_image = form_data
        .get_file(ids::JOB_DESC_IMAGE)
        .map(|file| !file.is_empty())
        .unwrap_or(false);
    if !has_text && !has_image {
        return ValidationResult::invalid(MISSING_JOB_DESCRIPTION_MESSAGE);
    }

    if let Some(raw) = form_data.get_text(ids::WORD_LIMIT) {
        if parse_word_limit(raw).is_err() {
            return ValidationResult::invalid(WORD_LIMIT_MESSAGE);
        }
    }

    ValidationResult::valid()
}

/// `Ok(None)` for a blank field, `Ok(Some(n))` for an in-range limit.
pub fn parse_word_limit(raw: &str) -> Result<Option<u16>, InvalidWordLimit> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u16>() {
        Ok(limit) if WORD_LIMIT_RANGE.contains(&limit) => Ok(Some(limit)),
        _ => Err(InvalidWordLimit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::form_data::{FormValue, UploadedFile};

    fn cv() -> FormValue {
        FormValue::File(UploadedFile::new("cv.pdf", "application/pdf", "%PDF-1.7"))
    }

    fn image() -> FormValue {
        FormValue::File(UploadedFile::new("jd.png", "image/png", vec![0x89, b'P', b'N', b'G']))
    }

    fn text(value: &str) -> FormValue {
        FormValue::Text(value.to_string())
    }

    fn form(fields: Vec<(&str, FormValue)>) -> FormData {
        let mut data = FormData::new();
        for (name, value) in fields {
            data.append(name, value);
        }
        data
    }

    #[test]
    fn test_pass_with_cv_and_text() {
        let result = validate_form(&form(vec![
            (ids::CV_FILE, cv()),
            (ids::JOB_DESC_TEXT, text("Senior Rust engineer")),
        ]));
        assert!(result.is_valid);
        assert_eq!(result.error_message, "");
    }

    #[test]
    fn test_pass_with_cv_and_image() {
        let result = validate_form(&form(vec![
            (ids::CV_FILE, cv()),
            (ids::JOB_DESC_TEXT, text("")),
            (ids::JOB_DESC_IMAGE, image()),
        ]));
        assert!(result.is_valid);
    }

    #[test]
    fn test_fail_without_cv() {
        let result = validate_form(&form(vec![(ids::JOB_DESC_TEXT, text("Rust"))]));
        assert!(!result.is_valid);
        assert_eq!(result.error_message, MISSING_CV_MESSAGE);
    }

    #[test]
    fn test_fail_with_empty_cv_file() {
        let result = validate_form(&form(vec![
            (ids::CV_FILE, FormValue::File(UploadedFile::empty())),
            (ids::JOB_DESC_TEXT, text("Rust")),
        ]));
        assert_eq!(result.error_message, MISSING_CV_MESSAGE);
    }

    #[test]
    fn test_cv_rule_wins_over_job_description_rule() {
        let result = validate_form(&FormData::new());
        assert_eq!(result.error_message, MISSING_CV_MESSAGE);
    }

    #[test]
    fn test_cv_as_text_field_is_not_a_file() {
        let result = validate_form(&form(vec![
            (ids::CV_FILE, text("cv.pdf")),
            (ids::JOB_DESC_TEXT, text("Rust")),
        ]));
        assert_eq!(result.error_message, MISSING_CV_MESSAGE);
    }

    #[test]
    fn test_fail_with_blank_text_and_no_image() {
        let result = validate_form(&form(vec![
            (ids::CV_FILE, cv()),
            (ids::JOB_DESC_TEXT, text("  \n\t ")),
        ]));
        assert!(!result.is_valid);
        assert_eq!(result.error_message, MISSING_JOB_DESCRIPTION_MESSAGE);
    }

    #[test]
    fn test_fail_with_empty_image() {
        let result = validate_form(&form(vec![
            (ids::CV_FILE, cv()),
            (ids::JOB_DESC_IMAGE, FormValue::File(UploadedFile::empty())),
        ]));
        assert_eq!(result.error_message, MISSING_JOB_DESCRIPTION_MESSAGE);
    }

    #[test]
    fn test_word_limit_bounds() {
        for (raw, valid) in [("250", true), ("400", true), ("", true), ("249", false), ("401", false), ("lots", false)] {
            let result = validate_form(&form(vec![
                (ids::CV_FILE, cv()),
                (ids::JOB_DESC_TEXT, text("Rust")),
                (ids::WORD_LIMIT, text(raw)),
            ]));
            assert_eq!(result.is_valid, valid, "word limit {raw:?}");
        }
    }

    #[test]
    fn test_word_limit_checked_after_job_description() {
        let result = validate_form(&form(vec![
            (ids::CV_FILE, cv()),
            (ids::WORD_LIMIT, text("10")),
        ]));
        assert_eq!(result.error_message, MISSING_JOB_DESCRIPTION_MESSAGE);
    }

    #[test]
    fn test_parse_word_limit() {
        assert_eq!(parse_word_limit(" 300 "), Ok(Some(300)));
        assert_eq!(parse_word_limit(""), Ok(None));
        assert!(parse_word_limit("-1").is_err());
    }
}
