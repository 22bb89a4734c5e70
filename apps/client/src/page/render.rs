use crate::sanitize::sanitize_rich_text;

/// Renders a generated letter as HTML for rich display surfaces.
///
/// Blank lines separate paragraphs and single newlines become `<br>`. The
/// letter comes from the server, so the markup is built first and the whole
/// result then goes through the rich-text sanitizer.
pub fn letter_to_html(letter: &str) -> String {
    let normalized = letter.replace("\r\n", "\n");

    let html: String = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| format!("<p>{}</p>", paragraph.lines().collect::<Vec<_>>().join("<br>")))
        .collect();

    sanitize_rich_text(&html)
}
