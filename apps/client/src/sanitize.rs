//! XSS guards for strings rendered into the page.
//!
//! Both helpers delegate to `ammonia`. `script` and `style` elements are
//! removed together with their content in either mode.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;

/// Tags kept by [`sanitize_rich_text`]. Every attribute is dropped.
pub const RICH_TEXT_TAGS: &[&str] = &["p", "br", "b", "i", "em", "strong", "u", "ul", "ol", "li"];

/// Strips all markup and attributes and trims the result.
/// The returned text is HTML-escaped, so it is safe to insert as markup.
pub fn sanitize_plain_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    Builder::default()
        .tags(HashSet::new())
        .generic_attributes(HashSet::new())
        .tag_attributes(HashMap::new())
        .clean(input)
        .to_string()
        .trim()
        .to_string()
}

/// Keeps a small set of inline and structural tags, without attributes.
pub fn sanitize_rich_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    Builder::default()
        .tags(RICH_TEXT_TAGS.iter().copied().collect())
        .generic_attributes(HashSet::new())
        .tag_attributes(HashMap::new())
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_drops_script_and_trims() {
        assert_eq!(sanitize_plain_text("<script>alert(1)</script>hello"), "hello");
        assert_eq!(sanitize_plain_text("   <b>bold</b> move  "), "bold move");
    }

    #[test]
    fn test_plain_text_empty_input() {
        assert_eq!(sanitize_plain_text(""), "");
        assert_eq!(sanitize_plain_text("   "), "");
    }

    #[test]
    fn test_plain_text_strips_attributes_and_handlers() {
        let out = sanitize_plain_text(r#"<img src=x onerror="alert(1)">Oops <a href="javascript:x()">link</a>"#);
        assert_eq!(out, "Oops link");
        assert!(!out.contains("onerror"));
        assert!(!out.contains("javascript"));
    }

    #[test]
    fn test_plain_text_escapes_markup_characters() {
        assert_eq!(sanitize_plain_text("1 < 2"), "1 &lt; 2");
        assert_eq!(sanitize_plain_text("Tom & Jerry"), "Tom &amp; Jerry");
    }

    #[test]
    fn test_plain_text_keeps_ordinary_messages() {
        assert_eq!(
            sanitize_plain_text("Please upload your CV/resume file"),
            "Please upload your CV/resume file"
        );
    }

    #[test]
    fn test_rich_text_keeps_paragraph_drops_script() {
        assert_eq!(sanitize_rich_text("<p>ok</p><script>x</script>"), "<p>ok</p>");
    }

    #[test]
    fn test_rich_text_strips_attributes() {
        assert_eq!(
            sanitize_rich_text(r#"<p class="x" onclick="steal()">hi <strong style="color:red">there</strong></p>"#),
            "<p>hi <strong>there</strong></p>"
        );
    }

    #[test]
    fn test_rich_text_keeps_lists() {
        let html = "<ul><li>one</li><li>two</li></ul><ol><li>three</li></ol>";
        assert_eq!(sanitize_rich_text(html), html);
    }

    #[test]
    fn test_rich_text_drops_disallowed_tags_keeps_text() {
        assert_eq!(
            sanitize_rich_text(r#"<div><a href="javascript:alert(1)">click</a></div><iframe src="x"></iframe>"#),
            "click"
        );
        assert_eq!(sanitize_rich_text("<style>p{}</style><em>fine</em>"), "<em>fine</em>");
    }

    #[test]
    fn test_rich_text_empty_input() {
        assert_eq!(sanitize_rich_text(""), "");
    }
}
