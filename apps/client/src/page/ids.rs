//! Element ids, names and classes the page scripts rely on.

pub const COVER_LETTER_FORM: &str = "cover_letter_form";
pub const GENERATE_BTN: &str = "generate_btn";
pub const COVER_LETTER_LOADING: &str = "cover_letter_loading";
pub const COVER_LETTER_EDITOR: &str = "cover_letter_editor";
pub const COPY_BTN: &str = "copy_btn";
pub const ERROR_CONTAINER: &str = "error_container";

pub const CV_FILE: &str = "cv_file";
pub const JOB_DESC_TEXT_CONTAINER: &str = "job_desc_text_container";
pub const JOB_DESC_IMAGE_CONTAINER: &str = "job_desc_image_container";
pub const JOB_DESC_TEXT: &str = "job_desc_text";
pub const JOB_DESC_IMAGE: &str = "job_desc_image";
pub const COMPANY_NAME: &str = "company_name";
pub const WORD_LIMIT: &str = "word_limit";

/// Name of the radio group selecting the job description mode.
pub const JOB_DESC_TYPE: &str = "job_desc_type";
pub const JOB_DESC_TYPE_TEXT: &str = "job_desc_type_text";
pub const JOB_DESC_TYPE_IMAGE: &str = "job_desc_type_image";

pub mod classes {
    pub const HIDDEN: &str = "hidden";
    pub const LOADING: &str = "loading";
    pub const BTN_SUCCESS: &str = "btn-success";
}

pub mod attributes {
    pub const REQUIRED: &str = "required";
    pub const ARIA_BUSY: &str = "aria-busy";
}
