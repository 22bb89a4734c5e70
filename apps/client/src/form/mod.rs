// Form handling: the text/image mode toggle, validation rules and the typed
// submission built from validated form data.

pub mod mode_toggle;
pub mod submission;
pub mod validation;
