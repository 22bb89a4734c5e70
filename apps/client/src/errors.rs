use thiserror::Error;

/// Errors raised when the page does not honour the fixed element contract.
/// These are programming or markup errors, never user input errors.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Element '#{0}' not found in the document")]
    MissingElement(String),

    #[error("Element '#{id}' is not a {expected}")]
    UnexpectedKind { id: String, expected: &'static str },

    #[error("No option of radio group '{0}' is checked")]
    NothingChecked(String),

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },
}
