//! HTML sanitization presets applied to free-text input before it reaches
//! storage or an email template.
//!
//! Three levels:
//! - `strip`   - no markup at all (names, subjects, cities)
//! - `inline`  - inline formatting only (testimony and message bodies)
//! - `article` - rich subset for admin-authored news articles

use std::collections::HashSet;

use ammonia::Builder;
use once_cell::sync::Lazy;

static STRIP: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::new();
    builder.tags(HashSet::new());
    builder
});

static INLINE: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::new();
    builder.tags(HashSet::from(["em", "strong", "b", "i", "u", "br"]));
    builder
});

static ARTICLE: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::new();
    builder.tags(HashSet::from([
        "p", "h2", "h3", "ul", "ol", "li", "blockquote", "a", "img", "em", "strong", "b", "i",
        "u", "br",
    ]));
    builder.url_schemes(HashSet::from(["http", "https", "mailto"]));
    builder.link_rel(Some("noopener noreferrer"));
    builder
});

/// Remove all HTML, keeping text content only
pub fn strip(input: &str) -> String {
    STRIP.clean(input).to_string().trim().to_string()
}

/// Keep inline formatting tags, drop everything else
pub fn inline(input: &str) -> String {
    INLINE.clean(input).to_string().trim().to_string()
}

/// Rich article subset with safe link schemes
pub fn article(input: &str) -> String {
    ARTICLE.clean(input).to_string().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_removes_all_markup() {
        assert_eq!(strip("<b>Jean</b> Dupont"), "Jean Dupont");
        assert_eq!(strip("<script>alert(1)</script>name"), "name");
        assert_eq!(strip("plain text"), "plain text");
    }

    #[test]
    fn inline_keeps_formatting_drops_blocks() {
        let cleaned = inline("<p>Hello <strong>world</strong></p>");
        assert!(!cleaned.contains("<p>"));
        assert!(cleaned.contains("<strong>world</strong>"));
    }

    #[test]
    fn inline_drops_scripts_and_handlers() {
        let cleaned = inline("<b onclick=\"x()\">bold</b><script>bad()</script>");
        assert_eq!(cleaned, "<b>bold</b>");
    }

    #[test]
    fn article_keeps_structure() {
        let input = "<h2>Title</h2><p>Body with <a href=\"https://example.com\">link</a></p>";
        let cleaned = article(input);
        assert!(cleaned.contains("<h2>Title</h2>"));
        assert!(cleaned.contains("href=\"https://example.com\""));
        assert!(cleaned.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn article_rejects_javascript_urls() {
        let cleaned = article("<a href=\"javascript:alert(1)\">x</a>");
        assert!(!cleaned.contains("javascript:"));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(strip("  hello  "), "hello");
    }
}
